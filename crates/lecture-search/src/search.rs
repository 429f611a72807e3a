//! Ranked lecture lookup.
//!
//! A query is prepared like an indexed name, expanded into trigrams with
//! acronym tokens enabled, and each trigram's postings are summed per lecture.
//! The sum is divided by `ln(3 + name_length)` so that, for the same raw
//! match, shorter names rank higher. Lookups go one trigram at a time through
//! the searcher's [`TrigramCache`].

use std::collections::HashMap;

use timetable_engine::Lecture;

use crate::cache::{TrigramCache, CACHE_CAPACITY};
use crate::filter::SearchFilters;
use crate::index::TrigramIndex;
use crate::store::TrigramStore;
use crate::trigram::trigrams;

/// Default number of results returned by a search.
pub const DEFAULT_LIMIT: usize = 50;

/// Tuning knobs for [`LectureSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    pub cache_capacity: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            cache_capacity: CACHE_CAPACITY,
        }
    }
}

/// Raw trigram scoring against a store.
#[derive(Debug)]
pub struct Searcher<S> {
    store: S,
    cache: TrigramCache,
}

impl<S: TrigramStore> Searcher<S> {
    pub fn new(store: S) -> Self {
        Self::with_cache_capacity(store, CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(store: S, capacity: usize) -> Self {
        Self {
            store,
            cache: TrigramCache::new(capacity),
        }
    }

    /// Sum of posting weights per lecture code over the query's trigrams.
    ///
    /// Trigrams the store does not know contribute nothing. A store error is
    /// logged and treated the same way.
    pub fn raw_scores(&mut self, query: &str) -> HashMap<String, f64> {
        let Self { store, cache } = self;
        let mut scores: HashMap<String, f64> = HashMap::new();

        for trigram in trigrams(query, true) {
            let postings = match cache.get_or_fetch(&trigram, |t| store.postings(t)) {
                Ok(Some(postings)) => postings,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(trigram = %trigram, error = %e, "trigram lookup failed");
                    continue;
                }
            };
            for (code, weight) in postings.iter() {
                *scores.entry(code.clone()).or_insert(0.0) += weight;
            }
        }

        scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &TrigramCache {
        &self.cache
    }
}

/// A ranked search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub lecture: &'a Lecture,
    pub score: f64,
}

/// Lectures plus the searcher that ranks them.
#[derive(Debug)]
pub struct LectureSearch<S = TrigramIndex> {
    lectures: Vec<Lecture>,
    by_code: HashMap<String, usize>,
    searcher: Searcher<S>,
    options: SearchOptions,
}

impl LectureSearch<TrigramIndex> {
    /// Build an in-memory index over `lectures`.
    pub fn build(lectures: Vec<Lecture>) -> Self {
        let index = TrigramIndex::build(&lectures);
        Self::with_store(lectures, index)
    }
}

impl<S: TrigramStore> LectureSearch<S> {
    pub fn with_store(lectures: Vec<Lecture>, store: S) -> Self {
        Self::with_options(lectures, store, SearchOptions::default())
    }

    pub fn with_options(lectures: Vec<Lecture>, store: S, options: SearchOptions) -> Self {
        let mut by_code = HashMap::with_capacity(lectures.len());
        for (i, lecture) in lectures.iter().enumerate() {
            by_code.entry(lecture.code.clone()).or_insert(i);
        }
        Self {
            lectures,
            by_code,
            searcher: Searcher::with_cache_capacity(store, options.cache_capacity),
            options,
        }
    }

    pub fn lectures(&self) -> &[Lecture] {
        &self.lectures
    }

    pub fn lecture(&self, code: &str) -> Option<&Lecture> {
        self.by_code.get(code).map(|&i| &self.lectures[i])
    }

    pub fn searcher(&self) -> &Searcher<S> {
        &self.searcher
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Lectures matching `query`, best first, at most `limit` of them.
    ///
    /// Filters are applied after ranking and before truncation. Lectures
    /// sharing no trigram with the query are never returned; equal scores
    /// are ordered by lecture code.
    pub fn search(
        &mut self,
        query: &str,
        filters: Option<&SearchFilters>,
        limit: usize,
    ) -> Vec<SearchHit<'_>> {
        let raw = self.searcher.raw_scores(query);

        let mut hits: Vec<SearchHit<'_>> = raw
            .into_iter()
            .filter_map(|(code, sum)| {
                let lecture = &self.lectures[*self.by_code.get(&code)?];
                let length = lecture.name.chars().count() as f64;
                Some(SearchHit {
                    lecture,
                    score: sum / (3.0 + length).ln(),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.lecture.code.cmp(&b.lecture.code))
        });

        if let Some(filters) = filters {
            hits.retain(|h| filters.matches(h.lecture));
        }
        hits.truncate(limit);

        tracing::debug!(query, results = hits.len(), "search");
        hits
    }

    /// [`search`](Self::search) with the configured default limit, returning
    /// lectures only.
    pub fn search_lectures(&mut self, query: &str, filters: Option<&SearchFilters>) -> Vec<&Lecture> {
        let limit = self.options.limit;
        self.search(query, filters, limit)
            .into_iter()
            .map(|h| h.lecture)
            .collect()
    }
}
