//! `timetable` CLI — search lectures and enumerate conflict-free timetables.
//!
//! ## Usage
//!
//! ```sh
//! # Build a search index from a lecture dataset
//! timetable index -d db.json -o index.json
//!
//! # Search lectures by name or code (builds the index on the fly without -x)
//! timetable search -d db.json -x index.json "calculo 2"
//!
//! # Restrict results to a campus and to evening classes
//! timetable search -d db.json --campus "São Carlos" --period evening calculo
//!
//! # Enumerate combinations of a plan, picking the one closest to a previous choice
//! timetable combine -d db.json -p plan.json --previous previous.json
//! ```
//!
//! Logging goes to stderr. `-v` enables debug output, `RUST_LOG` overrides both.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lecture_search::{DayPeriod, LectureSearch, SearchFilters, TrigramIndex, DEFAULT_LIMIT};
use serde::Serialize;
use timetable_engine::{find_closest_index, load_lectures, Combination, Lecture, Plan};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "timetable",
    version,
    about = "Lecture search and timetable combination CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a trigram search index from a lecture dataset
    Index {
        /// Lecture dataset (JSON array of lectures)
        #[arg(short, long)]
        dataset: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Search lectures by partial name or code
    Search {
        /// Lecture dataset (JSON array of lectures)
        #[arg(short, long)]
        dataset: String,
        /// Prebuilt index (built from the dataset if omitted)
        #[arg(short = 'x', long)]
        index: Option<String>,
        /// Only lectures offered on this campus
        #[arg(long)]
        campus: Option<String>,
        /// Only lectures of this unit
        #[arg(long)]
        unit: Option<String>,
        /// Only lectures of this department
        #[arg(long)]
        department: Option<String>,
        /// Only lectures with a class starting in this period (repeatable)
        #[arg(long = "period")]
        periods: Vec<DayPeriod>,
        /// Maximum number of results
        #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Free-text query
        query: String,
    },
    /// Enumerate conflict-free combinations of a plan
    Combine {
        /// Lecture dataset (JSON array of lectures)
        #[arg(short, long)]
        dataset: String,
        /// Plan file: `[{"codigo": ..., "selected": ..., "color": ..., "turmas": [...]}]`
        /// (reads from stdin if omitted)
        #[arg(short, long)]
        plan: Option<String>,
        /// Previously chosen combination, used to pick the closest new one
        #[arg(long)]
        previous: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct CombineOutput {
    combinations: Vec<Combination>,
    hit_limit: bool,
    /// Index into `combinations` of the one closest to `--previous`.
    closest: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SearchRow<'a> {
    codigo: &'a str,
    nome: &'a str,
    score: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Index { dataset, output } => {
            let lectures = read_dataset(&dataset)?;
            let index = TrigramIndex::build(&lectures);
            tracing::info!(
                lectures = index.lecture_count(),
                trigrams = index.len(),
                "index built"
            );
            let json = index.to_json().context("Failed to serialize index")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Search {
            dataset,
            index,
            campus,
            unit,
            department,
            periods,
            limit,
            json,
            query,
        } => {
            let lectures = read_dataset(&dataset)?;
            let index = match index {
                Some(path) => {
                    let raw = read_input(Some(&path))?;
                    TrigramIndex::from_json(&raw)
                        .with_context(|| format!("Failed to parse index: {}", path))?
                }
                None => TrigramIndex::build(&lectures),
            };
            let filters = SearchFilters {
                campus,
                unit,
                department,
                periods,
            };

            let mut search = LectureSearch::with_store(lectures, index);
            let filters = (!filters.is_empty()).then_some(filters);
            let hits = search.search(&query, filters.as_ref(), limit);
            tracing::info!(query = %query, results = hits.len(), "search finished");

            if json {
                let rows: Vec<SearchRow<'_>> = hits
                    .iter()
                    .map(|h| SearchRow {
                        codigo: &h.lecture.code,
                        nome: &h.lecture.name,
                        score: h.score,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for hit in &hits {
                    println!("{}\t{:.3}\t{}", hit.lecture.code, hit.score, hit.lecture.name);
                }
            }
        }
        Commands::Combine {
            dataset,
            plan,
            previous,
            output,
        } => {
            let lectures = read_dataset(&dataset)?;
            let plan_json = read_input(plan.as_deref())?;
            let plan =
                Plan::from_records_json(&lectures, &plan_json).context("Failed to parse plan")?;

            let previous: Option<Combination> = match previous {
                Some(path) => {
                    let raw = read_input(Some(&path))?;
                    Some(
                        serde_json::from_str(&raw)
                            .with_context(|| format!("Failed to parse combination: {}", path))?,
                    )
                }
                None => None,
            };

            let set = plan.combinations();
            if set.hit_limit {
                tracing::warn!(
                    combinations = set.len(),
                    "combination limit reached, result is truncated"
                );
            }
            let closest = find_closest_index(&set.combinations, previous.as_ref());
            tracing::info!(combinations = set.len(), ?closest, "combinations computed");

            let out = CombineOutput {
                combinations: set.combinations,
                hit_limit: set.hit_limit,
                closest,
            };
            let json = serde_json::to_string_pretty(&out)?;
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_dataset(path: &str) -> Result<Vec<Lecture>> {
    let raw = read_input(Some(path))?;
    load_lectures(&raw).with_context(|| format!("Failed to parse dataset: {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
