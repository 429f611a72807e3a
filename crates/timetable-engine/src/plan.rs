//! Immutable snapshot of a user's lecture selections.
//!
//! Every mutation returns a new [`Plan`]; combinations and other derived
//! values are recomputed from the snapshot instead of being patched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::combination::{compute_combinations, CombinationSet};
use crate::conflict::sections_conflict;
use crate::error::{Result, TimetableError};
use crate::grouping::{group_classrooms, ClassroomGroup};
use crate::model::{Color, Lecture, SelectionState, Section};

/// A lecture together with the user's selection state for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub lecture: Lecture,
    pub selection: SelectionState,
}

impl PlanEntry {
    pub fn new(lecture: Lecture) -> Self {
        Self {
            lecture,
            selection: SelectionState::default(),
        }
    }

    pub fn with_selection(lecture: Lecture, selection: SelectionState) -> Self {
        Self { lecture, selection }
    }

    /// Sections taking part in grouping (the explicit subset, or all of them).
    pub fn considered_sections(&self) -> impl Iterator<Item = &Section> {
        self.lecture
            .sections
            .iter()
            .filter(|s| self.selection.considers(&s.code))
    }

    pub fn groups(&self) -> Vec<ClassroomGroup> {
        group_classrooms(&self.lecture, &self.selection)
    }
}

/// Two lectures can never be taken together: both have at least one
/// considered section with schedules, and every such pair of sections
/// conflicts.
pub fn lectures_mutually_exclusive(a: &PlanEntry, b: &PlanEntry) -> bool {
    let left: Vec<&Section> = a
        .considered_sections()
        .filter(|s| !s.schedules.is_empty())
        .collect();
    let right: Vec<&Section> = b
        .considered_sections()
        .filter(|s| !s.schedules.is_empty())
        .collect();

    if left.is_empty() || right.is_empty() {
        return false;
    }

    left.iter()
        .all(|x| right.iter().all(|y| sections_conflict(x, y)))
}

/// Persisted form of a plan entry: the lecture code plus its selection.
///
/// ```json
/// {"codigo": "MAC0110", "selected": true, "color": 0, "turmas": ["2026101"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    #[serde(rename = "codigo")]
    pub lecture_code: String,
    #[serde(flatten)]
    pub selection: SelectionState,
}

/// Ordered lecture selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    entries: Vec<PlanEntry>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    /// Rebuild a plan from persisted records, looking lectures up by code.
    ///
    /// # Errors
    /// Returns `TimetableError::UnknownLecture` for a code missing from
    /// `lectures`.
    pub fn resolve(lectures: &[Lecture], records: Vec<PlanRecord>) -> Result<Self> {
        let by_code: HashMap<&str, &Lecture> =
            lectures.iter().map(|l| (l.code.as_str(), l)).collect();

        let entries = records
            .into_iter()
            .map(|r| match by_code.get(r.lecture_code.as_str()) {
                Some(lecture) => Ok(PlanEntry::with_selection((*lecture).clone(), r.selection)),
                None => Err(TimetableError::UnknownLecture(r.lecture_code)),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Parse a JSON array of [`PlanRecord`]s and [`resolve`](Self::resolve) it.
    pub fn from_records_json(lectures: &[Lecture], json: &str) -> Result<Self> {
        let records: Vec<PlanRecord> = serde_json::from_str(json)?;
        Self::resolve(lectures, records)
    }

    /// Persisted form of every entry, in plan order.
    pub fn records(&self) -> Vec<PlanRecord> {
        self.entries
            .iter()
            .map(|e| PlanRecord {
                lecture_code: e.lecture.code.clone(),
                selection: e.selection.clone(),
            })
            .collect()
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn entry(&self, lecture_code: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.lecture.code == lecture_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `lecture` with a fresh selection. A lecture already in the plan
    /// leaves it unchanged.
    ///
    /// The new entry takes the first color not used by another entry, and
    /// starts deselected when it is mutually exclusive with a lecture that
    /// is already selected.
    pub fn with_lecture(&self, lecture: Lecture) -> Plan {
        if self.entry(&lecture.code).is_some() {
            return self.clone();
        }

        let mut entry = PlanEntry::new(lecture);
        entry.selection.color = self.next_color();

        if let Some(blocker) = self
            .entries
            .iter()
            .filter(|e| e.selection.selected)
            .find(|e| lectures_mutually_exclusive(e, &entry))
        {
            tracing::debug!(
                lecture = %entry.lecture.code,
                blocker = %blocker.lecture.code,
                "lecture conflicts with every section of a selected lecture, deselecting"
            );
            entry.selection.selected = false;
        }

        let mut entries = self.entries.clone();
        entries.push(entry);
        Plan { entries }
    }

    pub fn without_lecture(&self, lecture_code: &str) -> Plan {
        Plan {
            entries: self
                .entries
                .iter()
                .filter(|e| e.lecture.code != lecture_code)
                .cloned()
                .collect(),
        }
    }

    /// Flip the inclusion flag of a lecture.
    pub fn toggle_lecture(&self, lecture_code: &str) -> Plan {
        self.map_selection(lecture_code, |s| s.selected = !s.selected)
    }

    /// Add `section_code` to the explicit subset, or remove it if present.
    pub fn toggle_section(&self, lecture_code: &str, section_code: &str) -> Plan {
        self.map_selection(lecture_code, |s| {
            if !s.sections.remove(section_code) {
                s.sections.insert(section_code.to_string());
            }
        })
    }

    pub fn with_color(&self, lecture_code: &str, color: Color) -> Plan {
        self.map_selection(lecture_code, |s| s.color = color)
    }

    pub fn combinations(&self) -> CombinationSet {
        compute_combinations(&self.entries)
    }

    fn map_selection(&self, lecture_code: &str, f: impl Fn(&mut SelectionState)) -> Plan {
        let mut entries = self.entries.clone();
        for entry in entries.iter_mut().filter(|e| e.lecture.code == lecture_code) {
            f(&mut entry.selection);
        }
        Plan { entries }
    }

    fn next_color(&self) -> Color {
        Color::all()
            .find(|c| self.entries.iter().all(|e| e.selection.color != *c))
            .unwrap_or_default()
    }
}
