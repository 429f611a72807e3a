//! Error types for timetable-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("Invalid color tag: {0}")]
    InvalidColor(u8),

    #[error("Lecture '{0}' is not in the dataset")]
    UnknownLecture(String),

    #[error("Dataset parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TimetableError>;
