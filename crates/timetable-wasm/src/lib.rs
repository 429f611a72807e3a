//! WASM bindings for timetable-engine and lecture-search.
//!
//! Exposes combination enumeration, closest-combination selection, and lecture
//! search to JavaScript via `wasm-bindgen`. All complex types are passed as
//! JSON strings: lectures use the dataset format, plans are arrays of
//! `{codigo, selected, color, turmas}` records.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timetable-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/timetable-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/timetable_wasm.wasm
//! ```

use lecture_search::{LectureSearch, SearchFilters, TrigramIndex};
use serde::Serialize;
use timetable_engine::{find_closest_combination, load_lectures, Combination, Lecture, Plan};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SearchHitDto<'a> {
    codigo: &'a str,
    nome: &'a str,
    score: f64,
}

// ---------------------------------------------------------------------------
// JSON-in, JSON-out implementations (plain `String` errors, testable natively)
// ---------------------------------------------------------------------------

fn parse_lectures(json: &str) -> Result<Vec<Lecture>, String> {
    load_lectures(json).map_err(|e| format!("Invalid lectures JSON: {}", e))
}

fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn combinations_json(lectures_json: &str, plan_json: &str) -> Result<String, String> {
    let lectures = parse_lectures(lectures_json)?;
    let plan = Plan::from_records_json(&lectures, plan_json)
        .map_err(|e| format!("Invalid plan JSON: {}", e))?;
    serialize(&plan.combinations())
}

fn closest_combination_json(
    combinations_json: &str,
    previous_json: Option<&str>,
) -> Result<String, String> {
    let combinations: Vec<Combination> = serde_json::from_str(combinations_json)
        .map_err(|e| format!("Invalid combinations JSON: {}", e))?;
    let previous = previous_json
        .map(serde_json::from_str::<Combination>)
        .transpose()
        .map_err(|e| format!("Invalid previous combination JSON: {}", e))?;

    serialize(&find_closest_combination(&combinations, previous.as_ref()))
}

fn index_json(lectures_json: &str) -> Result<String, String> {
    let lectures = parse_lectures(lectures_json)?;
    TrigramIndex::build(&lectures)
        .to_json()
        .map_err(|e| format!("Serialization error: {}", e))
}

fn search_json(
    lectures_json: &str,
    index_json: &str,
    query: &str,
    filters_json: Option<&str>,
    limit: usize,
) -> Result<String, String> {
    let lectures = parse_lectures(lectures_json)?;
    let index =
        TrigramIndex::from_json(index_json).map_err(|e| format!("Invalid index JSON: {}", e))?;
    let filters = filters_json
        .map(serde_json::from_str::<SearchFilters>)
        .transpose()
        .map_err(|e| format!("Invalid filters JSON: {}", e))?;

    let mut search = LectureSearch::with_store(lectures, index);
    let hits: Vec<SearchHitDto<'_>> = search
        .search(query, filters.as_ref(), limit)
        .into_iter()
        .map(|h| SearchHitDto {
            codigo: &h.lecture.code,
            nome: &h.lecture.name,
            score: h.score,
        })
        .collect();
    serialize(&hits)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Enumerate the conflict-free combinations of a plan.
///
/// # Arguments
/// - `lectures_json` -- JSON array of lectures in the dataset format
/// - `plan_json` -- JSON array of `{codigo, selected, color, turmas}` records
///
/// Returns a JSON string `{combinations, hit_limit}`.
#[wasm_bindgen(js_name = "computeCombinations")]
pub fn compute_combinations(lectures_json: &str, plan_json: &str) -> Result<String, JsValue> {
    combinations_json(lectures_json, plan_json).map_err(|e| JsValue::from_str(&e))
}

/// Pick the combination most similar to a previously active one.
///
/// `combinations_json` is a JSON array of combinations as returned by
/// `computeCombinations`. Returns the chosen combination as JSON, the first one
/// when `previous_json` is omitted, or `null` when the array is empty.
#[wasm_bindgen(js_name = "findClosestCombination")]
pub fn find_closest(
    combinations_json: &str,
    previous_json: Option<String>,
) -> Result<String, JsValue> {
    closest_combination_json(combinations_json, previous_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Build a serialized trigram index for a lecture dataset.
#[wasm_bindgen(js_name = "buildIndex")]
pub fn build_index(lectures_json: &str) -> Result<String, JsValue> {
    index_json(lectures_json).map_err(|e| JsValue::from_str(&e))
}

/// Search lectures by partial name or code.
///
/// `filters_json` is an optional `{campus, unit, department, periods}` object.
/// Returns a JSON array of `{codigo, nome, score}`, best match first.
#[wasm_bindgen(js_name = "searchLectures")]
pub fn search_lectures(
    lectures_json: &str,
    index_json: &str,
    query: &str,
    filters_json: Option<String>,
    limit: u32,
) -> Result<String, JsValue> {
    search_json(
        lectures_json,
        index_json,
        query,
        filters_json.as_deref(),
        limit as usize,
    )
    .map_err(|e| JsValue::from_str(&e))
}
