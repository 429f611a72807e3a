//! Post-ranking filters on lecture metadata.
//!
//! Each field is an equality or membership predicate; unset fields do not
//! constrain. All set fields must hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use timetable_engine::{ClockTime, Lecture};

/// Part of the day a class starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    /// Before 12:00.
    Morning,
    /// 12:00 to 17:59.
    Afternoon,
    /// From 18:00.
    Evening,
}

impl DayPeriod {
    pub fn of(time: ClockTime) -> Self {
        match time.hour() {
            0..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "manha" | "manhã" => Ok(DayPeriod::Morning),
            "afternoon" | "tarde" => Ok(DayPeriod::Afternoon),
            "evening" | "night" | "noite" => Ok(DayPeriod::Evening),
            other => Err(format!(
                "unknown period '{}', expected morning, afternoon or evening",
                other
            )),
        }
    }
}

/// Optional constraints applied to ranked search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub campus: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Lecture must have a class starting in one of these periods.
    #[serde(default)]
    pub periods: Vec<DayPeriod>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.campus.is_none()
            && self.unit.is_none()
            && self.department.is_none()
            && self.periods.is_empty()
    }

    pub fn matches(&self, lecture: &Lecture) -> bool {
        let equals = |wanted: &Option<String>, actual: &str| {
            wanted.as_deref().is_none_or(|w| w == actual)
        };

        equals(&self.campus, &lecture.campus)
            && equals(&self.unit, &lecture.unit)
            && equals(&self.department, &lecture.department)
            && (self.periods.is_empty() || self.meets_in_period(lecture))
    }

    fn meets_in_period(&self, lecture: &Lecture) -> bool {
        lecture
            .sections
            .iter()
            .flat_map(|s| s.schedules.iter())
            .any(|s| self.periods.contains(&DayPeriod::of(s.start)))
    }
}
