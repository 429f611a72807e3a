//! Bounded cache of recently looked-up trigram postings.
//!
//! Eviction is by insertion order: when full, the entry inserted first is
//! dropped, no matter how recently it was read. Absent trigrams are cached
//! too, so a repeated miss does not go back to the store.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::Result;
use crate::index::Postings;

/// Default number of trigrams kept.
pub const CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct TrigramCache {
    capacity: usize,
    entries: IndexMap<String, Option<Arc<Postings>>>,
    hits: u64,
    misses: u64,
}

impl Default for TrigramCache {
    fn default() -> Self {
        Self::new(CACHE_CAPACITY)
    }
}

impl TrigramCache {
    /// A cache holding at most `capacity` trigrams. Zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached postings of `trigram`, calling `fetch` on a miss.
    ///
    /// A fetch error is returned as-is and nothing is cached for the trigram.
    pub fn get_or_fetch<F>(&mut self, trigram: &str, fetch: F) -> Result<Option<Arc<Postings>>>
    where
        F: FnOnce(&str) -> Result<Option<Postings>>,
    {
        if let Some(cached) = self.entries.get(trigram) {
            self.hits += 1;
            return Ok(cached.clone());
        }

        self.misses += 1;
        let fetched = fetch(trigram)?.map(Arc::new);
        if self.capacity == 0 {
            return Ok(fetched);
        }

        while self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(trigram.to_string(), fetched.clone());
        Ok(fetched)
    }

    pub fn contains(&self, trigram: &str) -> bool {
        self.entries.contains_key(trigram)
    }

    /// Cached trigrams, oldest insertion first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
