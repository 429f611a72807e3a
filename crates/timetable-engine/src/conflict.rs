//! Detect clashes between schedules and between whole sections.
//!
//! Adjacent slots (where one ends exactly when another starts) are NOT conflicts.

use crate::model::{Schedule, Section};
use crate::time::{date_ranges_overlap, time_ranges_overlap};

/// Two schedules conflict when they fall on the same weekday and their time
/// ranges overlap.
pub fn schedules_conflict(a: &Schedule, b: &Schedule) -> bool {
    if a.day != b.day {
        return false;
    }
    time_ranges_overlap(
        a.start.minute_of_day(),
        a.end.minute_of_day(),
        b.start.minute_of_day(),
        b.end.minute_of_day(),
    )
}

/// Whether two sections can not be attended together.
///
/// A section without schedules never conflicts. When both sections carry a
/// validity date range, disjoint ranges rule out any clash before schedules
/// are compared. Otherwise any pair of conflicting schedules is a conflict.
pub fn sections_conflict(a: &Section, b: &Section) -> bool {
    if a.schedules.is_empty() || b.schedules.is_empty() {
        return false;
    }

    if a.has_date_range()
        && b.has_date_range()
        && !date_ranges_overlap(&a.start_date, &a.end_date, &b.start_date, &b.end_date)
    {
        return false;
    }

    a.schedules
        .iter()
        .any(|x| b.schedules.iter().any(|y| schedules_conflict(x, y)))
}
