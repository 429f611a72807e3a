//! Error types for index persistence and weight lookups.

use thiserror::Error;

/// Errors that can occur while loading, saving, or reading a trigram index.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The index or lecture data was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A weight store failed to produce the postings of a trigram.
    #[error("Trigram store error for {trigram:?}: {message}")]
    Store { trigram: String, message: String },
}

/// Convenience alias used throughout lecture-search.
pub type Result<T> = std::result::Result<T, SearchError>;
