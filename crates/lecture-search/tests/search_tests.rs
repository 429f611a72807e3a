//! Tests for ranked lecture search.

use lecture_search::{
    DayPeriod, LectureSearch, Postings, SearchError, SearchFilters, SearchOptions, TrigramIndex,
    TrigramStore,
};
use timetable_engine::{ClockTime, Lecture, Schedule, Section, Weekday};

// ----------------------------------------------------------------------------
// Fixtures
// ----------------------------------------------------------------------------

fn at(hour: u16) -> ClockTime {
    ClockTime::new(hour, 0).unwrap()
}

fn meeting(hour: u16) -> Section {
    Section::new("2025101", vec![Schedule::new(Weekday::Monday, at(hour), at(hour + 2))])
}

fn lecture(code: &str, name: &str, campus: &str, unit: &str, start_hour: u16) -> Lecture {
    let mut l = Lecture::new(code, name).with_section(meeting(start_hour));
    l.campus = campus.to_string();
    l.unit = unit.to_string();
    l.department = unit.to_string();
    l
}

fn catalog() -> Vec<Lecture> {
    vec![
        lecture("MAC0110", "Introdução à Computação", "São Paulo", "IME", 8),
        lecture("MAC0121", "Algoritmos e Estruturas de Dados I", "São Paulo", "IME", 10),
        lecture("MAC0122", "Algoritmos e Estruturas de Dados II", "São Paulo", "IME", 14),
        lecture("MAT2453", "Cálculo Diferencial e Integral I", "São Paulo", "IME", 8),
        lecture("MAT2454", "Cálculo Diferencial e Integral II", "São Carlos", "ICMC", 19),
        lecture("FLC0101", "Língua Portuguesa", "São Paulo", "FFLCH", 14),
    ]
}

fn codes(search: &mut LectureSearch, query: &str, filters: Option<&SearchFilters>, limit: usize) -> Vec<String> {
    search
        .search(query, filters, limit)
        .into_iter()
        .map(|h| h.lecture.code.clone())
        .collect()
}

// ----------------------------------------------------------------------------
// Ranking
// ----------------------------------------------------------------------------

#[test]
fn exact_name_ranks_first() {
    let mut search = LectureSearch::build(catalog());
    let hits = codes(&mut search, "Algoritmos e Estruturas de Dados I", None, 10);
    assert_eq!(hits[0], "MAC0121");
    assert_eq!(hits[1], "MAC0122");
}

#[test]
fn code_query_finds_the_lecture() {
    let mut search = LectureSearch::build(catalog());
    let hits = codes(&mut search, "mac0110", None, 10);
    assert_eq!(hits[0], "MAC0110");
}

#[test]
fn accents_and_case_are_ignored() {
    let mut search = LectureSearch::build(catalog());
    assert_eq!(codes(&mut search, "INTRODUCAO A COMPUTACAO", None, 1), vec!["MAC0110"]);
    assert_eq!(codes(&mut search, "introdução à computação", None, 1), vec!["MAC0110"]);
}

#[test]
fn misspelled_query_still_matches() {
    let mut search = LectureSearch::build(catalog());
    assert_eq!(codes(&mut search, "Introdção a Computacao", None, 1), vec!["MAC0110"]);
}

#[test]
fn arabic_numeral_matches_roman_name() {
    let mut search = LectureSearch::build(catalog());
    let hits = codes(&mut search, "calculo 2", None, 10);
    assert_eq!(hits[0], "MAT2454");
    assert_eq!(hits[1], "MAT2453");
    assert_eq!(
        codes(&mut search, "calculo 2", None, 10),
        codes(&mut search, "CALCULO II", None, 10)
    );
}

#[test]
fn shorter_name_wins_an_equal_raw_match() {
    let mut search = LectureSearch::build(catalog());
    let hits = search.search("calculo", None, 10);
    assert_eq!(hits[0].lecture.code, "MAT2453");
    assert_eq!(hits[1].lecture.code, "MAT2454");
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn scores_are_descending() {
    let mut search = LectureSearch::build(catalog());
    let hits = search.search("algoritmos dados", None, 10);
    assert!(!hits.is_empty());
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(hits.iter().all(|h| h.score > 0.0));
}

#[test]
fn unrelated_query_returns_nothing() {
    let mut search = LectureSearch::build(catalog());
    assert!(search.search("zzzz", None, 10).is_empty());
    assert!(search.search("", None, 10).is_empty());
}

#[test]
fn limit_truncates_results() {
    let mut search = LectureSearch::build(catalog());
    assert_eq!(search.search("algoritmos calculo", None, 1).len(), 1);
    assert!(search.search("algoritmos calculo", None, 0).is_empty());
}

// ----------------------------------------------------------------------------
// Filters
// ----------------------------------------------------------------------------

#[test]
fn filters_apply_before_truncation() {
    let mut search = LectureSearch::build(catalog());
    let filters = SearchFilters {
        campus: Some("São Carlos".to_string()),
        ..SearchFilters::default()
    };
    assert_eq!(codes(&mut search, "calculo", Some(&filters), 1), vec!["MAT2454"]);
}

#[test]
fn all_filters_must_hold() {
    let mut search = LectureSearch::build(catalog());
    let filters = SearchFilters {
        campus: Some("São Paulo".to_string()),
        unit: Some("ICMC".to_string()),
        ..SearchFilters::default()
    };
    assert!(search.search("calculo", Some(&filters), 10).is_empty());
}

#[test]
fn period_filter_checks_class_start() {
    let mut search = LectureSearch::build(catalog());
    let evening = SearchFilters {
        periods: vec![DayPeriod::Evening],
        ..SearchFilters::default()
    };
    assert_eq!(codes(&mut search, "calculo", Some(&evening), 10), vec!["MAT2454"]);

    let mornings = SearchFilters {
        periods: vec![DayPeriod::Morning],
        ..SearchFilters::default()
    };
    assert_eq!(
        codes(&mut search, "algoritmos", Some(&mornings), 10),
        vec!["MAC0121"]
    );
}

#[test]
fn day_periods_split_at_noon_and_six() {
    assert_eq!(DayPeriod::of(at(11)), DayPeriod::Morning);
    assert_eq!(DayPeriod::of(at(12)), DayPeriod::Afternoon);
    assert_eq!(DayPeriod::of(at(17)), DayPeriod::Afternoon);
    assert_eq!(DayPeriod::of(at(18)), DayPeriod::Evening);
    assert_eq!("tarde".parse::<DayPeriod>(), Ok(DayPeriod::Afternoon));
    assert!("dawn".parse::<DayPeriod>().is_err());
}

#[test]
fn empty_filters_match_everything() {
    let filters = SearchFilters::default();
    assert!(filters.is_empty());
    assert!(catalog().iter().all(|l| filters.matches(l)));
}

#[test]
fn filters_deserialize_from_json() {
    let filters: SearchFilters =
        serde_json::from_str(r#"{"campus": "São Carlos", "periods": ["evening"]}"#).unwrap();
    assert_eq!(filters.campus.as_deref(), Some("São Carlos"));
    assert_eq!(filters.periods, vec![DayPeriod::Evening]);
}

// ----------------------------------------------------------------------------
// Stores and cache
// ----------------------------------------------------------------------------

#[test]
fn persisted_index_ranks_identically() {
    let lectures = catalog();
    let index = TrigramIndex::build(&lectures);
    let restored = TrigramIndex::from_json(&index.to_json().unwrap()).unwrap();

    let mut fresh = LectureSearch::with_store(lectures.clone(), index);
    let mut loaded = LectureSearch::with_store(lectures, restored);
    for query in ["calculo 2", "algoritmos", "lingua", "mac01"] {
        assert_eq!(
            codes(&mut fresh, query, None, 10),
            codes(&mut loaded, query, None, 10),
            "{query}"
        );
    }
}

#[test]
fn codes_missing_from_the_lecture_list_are_skipped() {
    let lectures = catalog();
    let index = TrigramIndex::build(&lectures);
    let subset: Vec<Lecture> = lectures
        .into_iter()
        .filter(|l| l.code != "MAT2454")
        .collect();

    let mut search = LectureSearch::with_store(subset, index);
    let hits = codes(&mut search, "calculo", None, 10);
    assert_eq!(hits[0], "MAT2453");
    assert!(!hits.contains(&"MAT2454".to_string()));
}

struct OfflineStore;

impl TrigramStore for OfflineStore {
    fn postings(&self, trigram: &str) -> lecture_search::error::Result<Option<Postings>> {
        Err(SearchError::Store {
            trigram: trigram.to_string(),
            message: "offline".to_string(),
        })
    }
}

#[test]
fn failing_store_yields_no_results() {
    let mut search = LectureSearch::with_store(catalog(), OfflineStore);
    assert!(search.search("calculo", None, 10).is_empty());
    assert!(search.searcher().cache().is_empty());
}

#[test]
fn lookups_go_through_the_cache() {
    let mut search = LectureSearch::build(catalog());
    search.search("calculo", None, 10);
    let cache = search.searcher().cache();
    assert!(!cache.is_empty());
    assert!(cache.len() <= cache.capacity());
    let misses = cache.misses();

    search.search("calculo", None, 10);
    let cache = search.searcher().cache();
    assert_eq!(cache.misses(), misses);
    assert!(cache.hits() > 0);
}

#[test]
fn custom_options_are_honored() {
    let options = SearchOptions {
        limit: 2,
        cache_capacity: 4,
    };
    let lectures = catalog();
    let index = TrigramIndex::build(&lectures);
    let mut search = LectureSearch::with_options(lectures, index, options);

    assert_eq!(search.search_lectures("algoritmos calculo", None).len(), 2);
    assert!(search.searcher().cache().len() <= 4);
}

#[test]
fn lecture_lookup_by_code() {
    let search = LectureSearch::build(catalog());
    assert_eq!(search.lecture("FLC0101").unwrap().name, "Língua Portuguesa");
    assert!(search.lecture("XXX0000").is_none());
}
