//! Tests for classroom grouping by identical schedule sets.

use timetable_engine::{group_classrooms, ClockTime, Lecture, Schedule, Section, SelectionState, Weekday};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn slot(day: Weekday, start: &str, end: &str) -> Schedule {
    Schedule::new(
        day,
        ClockTime::parse(start).unwrap(),
        ClockTime::parse(end).unwrap(),
    )
}

fn mon_wed() -> Vec<Schedule> {
    vec![
        slot(Weekday::Monday, "08:00", "10:00"),
        slot(Weekday::Wednesday, "08:00", "10:00"),
    ]
}

fn select(codes: &[&str]) -> SelectionState {
    SelectionState {
        sections: codes.iter().map(|c| c.to_string()).collect(),
        ..SelectionState::default()
    }
}

fn codes(lecture: &Lecture, selection: &SelectionState) -> Vec<Vec<String>> {
    group_classrooms(lecture, selection)
        .iter()
        .map(|g| g.section_codes().map(str::to_string).collect())
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[test]
fn identical_schedules_share_a_group() {
    let lecture = Lecture::new("MAC0110", "Introdução à Computação")
        .with_section(Section::new("T1", mon_wed()))
        .with_section(Section::new("T2", mon_wed()));

    assert_eq!(
        codes(&lecture, &SelectionState::default()),
        vec![vec!["T1", "T2"]]
    );
}

#[test]
fn permuted_schedules_share_a_group() {
    let mut reversed = mon_wed();
    reversed.reverse();
    let lecture = Lecture::new("MAC0110", "Introdução à Computação")
        .with_section(Section::new("T1", mon_wed()))
        .with_section(Section::new("T2", reversed));

    assert_eq!(group_classrooms(&lecture, &SelectionState::default()).len(), 1);
}

#[test]
fn subset_schedule_starts_its_own_group() {
    let lecture = Lecture::new("MAC0110", "Introdução à Computação")
        .with_section(Section::new("T1", mon_wed()))
        .with_section(Section::new(
            "T2",
            vec![slot(Weekday::Monday, "08:00", "10:00")],
        ));

    assert_eq!(
        codes(&lecture, &SelectionState::default()),
        vec![vec!["T1"], vec!["T2"]]
    );
}

#[test]
fn superset_schedule_starts_its_own_group() {
    let mut more = mon_wed();
    more.push(slot(Weekday::Friday, "08:00", "10:00"));
    let lecture = Lecture::new("MAC0110", "Introdução à Computação")
        .with_section(Section::new("T1", mon_wed()))
        .with_section(Section::new("T2", more));

    assert_eq!(group_classrooms(&lecture, &SelectionState::default()).len(), 2);
}

#[test]
fn groups_follow_section_order() {
    let tue = vec![slot(Weekday::Tuesday, "14:00", "16:00")];
    let lecture = Lecture::new("MAT2453", "Cálculo I")
        .with_section(Section::new("T1", tue.clone()))
        .with_section(Section::new("T2", mon_wed()))
        .with_section(Section::new("T3", tue));

    assert_eq!(
        codes(&lecture, &SelectionState::default()),
        vec![vec!["T1", "T3"], vec!["T2"]]
    );
}

#[test]
fn explicit_subset_filters_sections() {
    let lecture = Lecture::new("MAC0110", "Introdução à Computação")
        .with_section(Section::new("T1", mon_wed()))
        .with_section(Section::new(
            "T2",
            vec![slot(Weekday::Tuesday, "08:00", "10:00")],
        ))
        .with_section(Section::new(
            "T3",
            vec![slot(Weekday::Thursday, "08:00", "10:00")],
        ));

    assert_eq!(
        codes(&lecture, &select(&["T1", "T3"])),
        vec![vec!["T1"], vec!["T3"]]
    );
}

#[test]
fn sections_without_schedules_are_skipped() {
    let lecture = Lecture::new("MAC0110", "Introdução à Computação")
        .with_section(Section::new("T1", vec![]))
        .with_section(Section::new("T2", mon_wed()));

    assert_eq!(codes(&lecture, &SelectionState::default()), vec![vec!["T2"]]);
}

#[test]
fn lecture_without_sections_has_no_groups() {
    let lecture = Lecture::new("MAC0110", "Introdução à Computação");
    assert!(group_classrooms(&lecture, &SelectionState::default()).is_empty());
}

#[test]
fn groups_carry_lecture_credits_and_selection() {
    let lecture = Lecture::new("MAC0110", "Introdução à Computação")
        .with_credits(4, 2)
        .with_section(Section::new("T1", mon_wed()));
    let selection = select(&["T1"]);

    let groups = group_classrooms(&lecture, &selection);
    assert_eq!(groups[0].lecture_code, "MAC0110");
    assert_eq!(groups[0].class_credits, 4);
    assert_eq!(groups[0].work_credits, 2);
    assert_eq!(groups[0].selection, selection);
    assert_eq!(groups[0].representative().unwrap().code, "T1");
}

#[test]
fn repeated_slot_does_not_absorb_a_wider_schedule() {
    let mon = slot(Weekday::Monday, "08:00", "10:00");
    let tue = slot(Weekday::Tuesday, "08:00", "10:00");
    let lecture = Lecture::new("MAC0110", "Introdução à Computação")
        .with_section(Section::new("T1", vec![mon.clone(), mon.clone()]))
        .with_section(Section::new("T2", vec![mon.clone(), tue]));

    assert_eq!(
        codes(&lecture, &SelectionState::default()),
        vec![vec!["T1"], vec!["T2"]]
    );
}

#[test]
fn repeated_slot_does_not_match_the_single_slot() {
    let mon = slot(Weekday::Monday, "08:00", "10:00");
    let lecture = Lecture::new("MAC0110", "Introdução à Computação")
        .with_section(Section::new("T1", vec![mon.clone(), mon.clone()]))
        .with_section(Section::new("T2", vec![mon]));

    assert_eq!(
        codes(&lecture, &SelectionState::default()),
        vec![vec!["T1"], vec!["T2"]]
    );
}
