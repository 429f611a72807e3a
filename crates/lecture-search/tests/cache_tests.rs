//! Tests for the insertion-order trigram cache.

use std::cell::Cell;

use lecture_search::{Postings, SearchError, TrigramCache, CACHE_CAPACITY};

fn postings(code: &str) -> Postings {
    Postings::from([(code.to_string(), 1.0)])
}

fn fill(cache: &mut TrigramCache, trigram: &str) {
    cache
        .get_or_fetch(trigram, |t| Ok(Some(postings(t))))
        .unwrap();
}

#[test]
fn default_capacity_is_64() {
    assert_eq!(TrigramCache::default().capacity(), CACHE_CAPACITY);
    assert_eq!(CACHE_CAPACITY, 64);
}

#[test]
fn oldest_insertion_is_evicted_when_full() {
    let mut cache = TrigramCache::new(2);
    fill(&mut cache, "AAA");
    fill(&mut cache, "BBB");
    fill(&mut cache, "CCC");

    assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["BBB", "CCC"]);
    assert!(!cache.contains("AAA"));
}

#[test]
fn reading_an_entry_does_not_protect_it() {
    let mut cache = TrigramCache::new(2);
    fill(&mut cache, "AAA");
    fill(&mut cache, "BBB");
    fill(&mut cache, "AAA"); // hit
    fill(&mut cache, "CCC");

    assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["BBB", "CCC"]);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 3);
}

#[test]
fn hit_skips_the_store() {
    let mut cache = TrigramCache::new(4);
    fill(&mut cache, "AAA");

    let got = cache
        .get_or_fetch("AAA", |_| panic!("store must not be called on a hit"))
        .unwrap();
    assert_eq!(got.unwrap().get("AAA"), Some(&1.0));
}

#[test]
fn absent_trigrams_are_cached() {
    let mut cache = TrigramCache::new(4);
    let calls = Cell::new(0);

    for _ in 0..3 {
        let got = cache
            .get_or_fetch("ZZZ", |_| {
                calls.set(calls.get() + 1);
                Ok(None)
            })
            .unwrap();
        assert!(got.is_none());
    }
    assert_eq!(calls.get(), 1);
    assert!(cache.contains("ZZZ"));
}

#[test]
fn fetch_errors_are_not_cached() {
    let mut cache = TrigramCache::new(4);
    let err = cache.get_or_fetch("AAA", |t| {
        Err(SearchError::Store {
            trigram: t.to_string(),
            message: "offline".to_string(),
        })
    });
    assert!(matches!(err, Err(SearchError::Store { .. })));
    assert!(cache.is_empty());

    fill(&mut cache, "AAA");
    assert!(cache.contains("AAA"));
}

#[test]
fn zero_capacity_never_stores() {
    let mut cache = TrigramCache::new(0);
    fill(&mut cache, "AAA");
    fill(&mut cache, "AAA");
    assert!(cache.is_empty());
    assert_eq!(cache.misses(), 2);
}

#[test]
fn clear_empties_the_cache() {
    let mut cache = TrigramCache::new(4);
    fill(&mut cache, "AAA");
    fill(&mut cache, "BBB");
    cache.clear();
    assert_eq!(cache.len(), 0);
}
