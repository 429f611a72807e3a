//! # lecture-search
//!
//! Typo-tolerant lookup of lectures by partial name or code, without a server
//! round trip.
//!
//! Lecture names and codes are normalized (uppercase, no diacritics, Roman
//! numerals folded, stopwords dropped), cut into tagged trigrams, and indexed
//! with TF-IDF-like weights. Queries go through the same pipeline and are
//! ranked by summed trigram weight, penalizing long names.
//!
//! ## Quick start
//!
//! ```rust
//! use lecture_search::LectureSearch;
//! use timetable_engine::Lecture;
//!
//! let mut search = LectureSearch::build(vec![
//!     Lecture::new("MAT2453", "Cálculo Diferencial e Integral I"),
//!     Lecture::new("MAC0110", "Introdução à Computação"),
//! ]);
//!
//! let hits = search.search("calculo 1", None, 10);
//! assert_eq!(hits[0].lecture.code, "MAT2453");
//! ```
//!
//! ## Modules
//!
//! - [`normalize`] — uppercase, diacritics, Roman numerals, stopwords
//! - [`trigram`] — tagged trigram generation
//! - [`index`] — TF-IDF-weighted inverted index (`TrigramIndex`)
//! - [`store`] — `TrigramStore` seam for posting lookups
//! - [`cache`] — bounded insertion-order cache of postings
//! - [`filter`] — campus/unit/department/period filters
//! - [`search`] — ranking (`Searcher`, `LectureSearch`)
//! - [`error`] — Error types

pub mod cache;
pub mod error;
pub mod filter;
pub mod index;
pub mod normalize;
pub mod search;
pub mod store;
pub mod trigram;

pub use cache::{TrigramCache, CACHE_CAPACITY};
pub use error::SearchError;
pub use filter::{DayPeriod, SearchFilters};
pub use index::{Postings, TrigramIndex};
pub use normalize::{normalize, prepare};
pub use search::{LectureSearch, SearchHit, SearchOptions, Searcher, DEFAULT_LIMIT};
pub use store::TrigramStore;
pub use trigram::trigrams;
