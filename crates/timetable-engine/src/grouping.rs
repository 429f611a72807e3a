//! Partition a lecture's sections into schedule-equivalence groups.
//!
//! Sections that meet in exactly the same weekly slots are interchangeable as
//! far as conflicts go, so the combination engine only has to branch once per
//! group instead of once per section.

use serde::{Deserialize, Serialize};

use crate::model::{Lecture, Schedule, SelectionState, Section};
use crate::time::{ClockTime, Weekday};

/// Sections of one lecture sharing an identical schedule set.
///
/// The first section is the group's representative. Groups built by
/// [`group_classrooms`] are never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassroomGroup {
    pub lecture_code: String,
    pub lecture_name: String,
    pub class_credits: u32,
    pub work_credits: u32,
    pub selection: SelectionState,
    pub sections: Vec<Section>,
}

impl ClassroomGroup {
    fn seed(lecture: &Lecture, selection: &SelectionState, section: &Section) -> Self {
        Self {
            lecture_code: lecture.code.clone(),
            lecture_name: lecture.name.clone(),
            class_credits: lecture.class_credits,
            work_credits: lecture.work_credits,
            selection: selection.clone(),
            sections: vec![section.clone()],
        }
    }

    /// The section whose schedules stand for the whole group.
    pub fn representative(&self) -> Option<&Section> {
        self.sections.first()
    }

    pub fn section_codes(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.code.as_str())
    }
}

/// `(day, start, end)` of every schedule, sorted. Repeated rows are kept.
fn sorted_slots(schedules: &[Schedule]) -> Vec<(Weekday, ClockTime, ClockTime)> {
    let mut slots: Vec<_> = schedules.iter().map(Schedule::slot).collect();
    slots.sort();
    slots
}

/// Same cardinality and the same slots on both sides, in any order.
fn same_schedule_set(a: &[Schedule], b: &[Schedule]) -> bool {
    a.len() == b.len() && sorted_slots(a) == sorted_slots(b)
}

/// Group the considered sections of `lecture` by identical schedule set.
///
/// Sections outside a non-empty selection subset are skipped, as are sections
/// without schedules. Group order and member order follow section order.
pub fn group_classrooms(lecture: &Lecture, selection: &SelectionState) -> Vec<ClassroomGroup> {
    let mut groups: Vec<ClassroomGroup> = Vec::new();

    for section in &lecture.sections {
        if !selection.considers(&section.code) || section.schedules.is_empty() {
            continue;
        }

        let existing = groups.iter_mut().find(|g| {
            g.representative()
                .is_some_and(|rep| same_schedule_set(&rep.schedules, &section.schedules))
        });

        match existing {
            Some(group) => group.sections.push(section.clone()),
            None => groups.push(ClassroomGroup::seed(lecture, selection, section)),
        }
    }

    tracing::trace!(
        lecture = %lecture.code,
        sections = lecture.sections.len(),
        groups = groups.len(),
        "grouped classrooms"
    );

    groups
}
