//! Inverted trigram index with TF-IDF-like weights.
//!
//! For every trigram `t` and lecture `d`:
//!
//! ```text
//! weight(t)    = sqrt(ln(N / df(t)))
//! posting(t,d) = weight(t) * ln(1 + count(t, d))
//! ```
//!
//! where `N` is the total number of trigram emissions over the dataset,
//! `df(t)` the number of lectures emitting `t`, and `count(t, d)` how often
//! lecture `d` emitted it (name and code combined). Rare trigrams weigh more;
//! repetition helps, logarithmically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use timetable_engine::Lecture;

use crate::error::Result;
use crate::trigram::trigrams;

/// Lecture code → weight for one trigram.
pub type Postings = BTreeMap<String, f64>;

/// Immutable trigram → postings map built from a lecture dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrigramIndex {
    lecture_count: usize,
    emission_count: u64,
    postings: BTreeMap<String, Postings>,
}

impl TrigramIndex {
    /// Index the names and codes of `lectures`.
    pub fn build(lectures: &[Lecture]) -> Self {
        let mut counts: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
        let mut emission_count: u64 = 0;

        for lecture in lectures {
            let emitted = trigrams(&lecture.name, false)
                .into_iter()
                .chain(trigrams(&lecture.code, false));
            for trigram in emitted {
                *counts
                    .entry(trigram)
                    .or_default()
                    .entry(lecture.code.clone())
                    .or_default() += 1;
                emission_count += 1;
            }
        }

        let total = emission_count as f64;
        let mut postings = BTreeMap::new();
        for (trigram, docs) in counts {
            let weight = (total / docs.len() as f64).ln().sqrt();
            let weighted: Postings = docs
                .into_iter()
                .map(|(code, count)| (code, weight * (1.0 + f64::from(count)).ln()))
                .filter(|(_, w)| w.is_finite() && *w > 0.0)
                .collect();
            if !weighted.is_empty() {
                postings.insert(trigram, weighted);
            }
        }

        tracing::debug!(
            lectures = lectures.len(),
            emissions = emission_count,
            trigrams = postings.len(),
            "built trigram index"
        );

        Self {
            lecture_count: lectures.len(),
            emission_count,
            postings,
        }
    }

    /// Postings of `trigram`, if any lecture emitted it.
    pub fn get(&self, trigram: &str) -> Option<&Postings> {
        self.postings.get(trigram)
    }

    /// Number of distinct trigrams with at least one positive posting.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn lecture_count(&self) -> usize {
        self.lecture_count
    }

    /// Total trigram emissions seen during the build (`N`).
    pub fn emission_count(&self) -> u64 {
        self.emission_count
    }

    pub fn trigrams(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
