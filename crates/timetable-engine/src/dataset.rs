//! Load lecture records from the dataset JSON (an array of lectures).

use crate::error::Result;
use crate::model::Lecture;

/// Parse a JSON array of lecture records.
///
/// Loading is all-or-nothing: one schedule with an unknown weekday or a
/// malformed time (`"8:5"`, `"24:00"`, `""`) rejects the whole dataset rather
/// than dropping the record.
///
/// # Errors
/// Returns `TimetableError::Json` if the input is not a valid lecture array,
/// including unknown weekday tokens and malformed `HH:MM` times.
pub fn load_lectures(json: &str) -> Result<Vec<Lecture>> {
    let lectures: Vec<Lecture> = serde_json::from_str(json)?;
    tracing::debug!(lectures = lectures.len(), "loaded lecture dataset");
    Ok(lectures)
}

/// Parse a single lecture record.
pub fn lecture_from_json(json: &str) -> Result<Lecture> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize lectures back to the dataset format.
pub fn lectures_to_json(lectures: &[Lecture]) -> Result<String> {
    Ok(serde_json::to_string(lectures)?)
}
