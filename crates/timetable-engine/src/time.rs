//! Time, date, and weekday primitives.
//!
//! Clock times are stored as minutes since midnight so that overlap checks are
//! plain integer comparisons. Section validity dates stay as the raw
//! `DD/MM/YYYY` strings from the dataset and are parsed on demand, because a
//! malformed date must be treated as a possible clash rather than rejected.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Date format used by section validity ranges.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A wall-clock time of day with minute granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Build a time from hours and minutes. Returns `None` outside `00:00..=23:59`.
    pub fn new(hours: u16, minutes: u16) -> Option<Self> {
        (hours < 24 && minutes < 60).then_some(Self(hours * 60 + minutes))
    }

    /// Parse an `"HH:MM"` string (one- or two-digit hours).
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || TimetableError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hours: u16 = h.parse().map_err(|_| invalid())?;
        let minutes: u16 = m.parse().map_err(|_| invalid())?;
        Self::new(hours, minutes).ok_or_else(invalid)
    }

    /// Minutes elapsed since midnight (`hours * 60 + minutes`).
    pub fn minute_of_day(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimetableError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

/// Day of the week as written in the dataset (`seg`, `ter`, ... `dom`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The dataset token for this day.
    pub fn token(self) -> &'static str {
        match self {
            Weekday::Monday => "seg",
            Weekday::Tuesday => "ter",
            Weekday::Wednesday => "qua",
            Weekday::Thursday => "qui",
            Weekday::Friday => "sex",
            Weekday::Saturday => "sab",
            Weekday::Sunday => "dom",
        }
    }

    /// Parse a dataset token, case-insensitively. `sáb` is accepted for Saturday.
    pub fn parse(token: &str) -> Result<Self> {
        match token.trim().to_lowercase().as_str() {
            "seg" => Ok(Weekday::Monday),
            "ter" => Ok(Weekday::Tuesday),
            "qua" => Ok(Weekday::Wednesday),
            "qui" => Ok(Weekday::Thursday),
            "sex" => Ok(Weekday::Friday),
            "sab" | "sáb" => Ok(Weekday::Saturday),
            "dom" => Ok(Weekday::Sunday),
            _ => Err(TimetableError::UnknownWeekday(token.to_string())),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Weekday {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Weekday {
    type Error = TimetableError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Weekday> for String {
    fn from(d: Weekday) -> Self {
        d.token().to_string()
    }
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` overlap iff
/// `s1 < e2 && e1 > s2`. Touching endpoints do not overlap.
pub fn time_ranges_overlap<T: PartialOrd>(s1: T, e1: T, s2: T, e2: T) -> bool {
    s1 < e2 && e1 > s2
}

/// Parse a `DD/MM/YYYY` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| TimetableError::InvalidDate(s.to_string()))
}

/// Overlap of two `DD/MM/YYYY` date ranges, with the same half-open rule as
/// [`time_ranges_overlap`].
///
/// If any of the four dates fails to parse, the ranges are reported as
/// overlapping so a possible clash is never hidden.
pub fn date_ranges_overlap(start1: &str, end1: &str, start2: &str, end2: &str) -> bool {
    match (
        parse_date(start1),
        parse_date(end1),
        parse_date(start2),
        parse_date(end2),
    ) {
        (Ok(s1), Ok(e1), Ok(s2), Ok(e2)) => time_ranges_overlap(s1, e1, s2, e2),
        _ => {
            tracing::debug!(start1, end1, start2, end2, "unparseable date range, assuming overlap");
            true
        }
    }
}
