//! # timetable-engine
//!
//! Conflict detection and combination enumeration for weekly class timetables.
//!
//! A student picks lectures and, for each, the candidate sections they would
//! accept. The engine groups interchangeable sections, then enumerates every
//! choice of one group per lecture that has no time or date clash, bounded by
//! [`MAX_COMBINATIONS`]. When the plan changes, [`find_closest_combination`]
//! keeps the previously active choice as stable as possible.
//!
//! ## Modules
//!
//! - [`time`] — clock times, weekdays, time and date range overlap
//! - [`conflict`] — schedule and section conflict checks
//! - [`model`] — lecture, section, schedule, and selection records
//! - [`grouping`] — partition sections into schedule-equivalence groups
//! - [`combination`] — bounded worklist enumeration of conflict-free combinations
//! - [`selector`] — pick the combination most similar to a previous one
//! - [`plan`] — immutable plan snapshots and mutual-exclusion checks
//! - [`dataset`] — load lecture records from JSON
//! - [`error`] — Error types

pub mod combination;
pub mod conflict;
pub mod dataset;
pub mod error;
pub mod grouping;
pub mod model;
pub mod plan;
pub mod selector;
pub mod time;

pub use combination::{compute_combinations, Combination, CombinationSet, MAX_COMBINATIONS};
pub use conflict::{schedules_conflict, sections_conflict};
pub use dataset::load_lectures;
pub use error::TimetableError;
pub use grouping::{group_classrooms, ClassroomGroup};
pub use model::{Color, Lecture, Schedule, Section, SelectionState, Vacancy};
pub use plan::{lectures_mutually_exclusive, Plan, PlanEntry, PlanRecord};
pub use selector::{find_closest_combination, find_closest_index};
pub use time::{date_ranges_overlap, time_ranges_overlap, ClockTime, Weekday};
