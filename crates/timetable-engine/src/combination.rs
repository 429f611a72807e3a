//! Bounded enumeration of conflict-free section combinations.
//!
//! The engine walks the included lectures in plan order and keeps a worklist
//! of partial combinations. Each lecture's classroom groups extend every
//! partial whose groups do not clash with the candidate. Extension is a pure
//! step producing a new worklist, capped at [`MAX_COMBINATIONS`] entries.
//!
//! Groups are schedule-uniform, so conflicts are tested between group
//! representatives only.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::conflict::sections_conflict;
use crate::grouping::{group_classrooms, ClassroomGroup};
use crate::plan::PlanEntry;

/// Hard cap on the number of combinations kept at every extension step.
pub const MAX_COMBINATIONS: usize = 1000;

/// One conflict-free choice of classroom group per contributing lecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub groups: Vec<Arc<ClassroomGroup>>,
    /// Sum of the class-time credits of every lecture in the combination.
    pub lecture_credits: u32,
    /// Sum of the work credits of every lecture in the combination.
    pub work_credits: u32,
}

impl Combination {
    pub fn group_for(&self, lecture_code: &str) -> Option<&ClassroomGroup> {
        self.groups
            .iter()
            .map(|g| g.as_ref())
            .find(|g| g.lecture_code == lecture_code)
    }
}

/// Result of [`compute_combinations`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinationSet {
    pub combinations: Vec<Combination>,
    /// Some acceptable combination was dropped because the cap was reached.
    pub hit_limit: bool,
}

impl CombinationSet {
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

/// A combination under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialCombination {
    groups: Vec<Arc<ClassroomGroup>>,
}

impl PartialCombination {
    pub fn groups(&self) -> &[Arc<ClassroomGroup>] {
        &self.groups
    }

    /// Whether `candidate` can join without clashing with any group already
    /// present. The empty partial accepts every non-empty group.
    pub fn accepts(&self, candidate: &ClassroomGroup) -> bool {
        let Some(rep) = candidate.representative() else {
            return false;
        };
        self.groups.iter().all(|g| {
            g.representative()
                .is_none_or(|other| !sections_conflict(rep, other))
        })
    }

    /// A new partial with `candidate` appended.
    pub fn extended(&self, candidate: Arc<ClassroomGroup>) -> Self {
        let mut groups = Vec::with_capacity(self.groups.len() + 1);
        groups.extend(self.groups.iter().cloned());
        groups.push(candidate);
        Self { groups }
    }

    /// Finish the partial, aggregating credits over its lectures.
    pub fn into_combination(self) -> Combination {
        let lecture_credits = self.groups.iter().map(|g| g.class_credits).sum();
        let work_credits = self.groups.iter().map(|g| g.work_credits).sum();
        Combination {
            groups: self.groups,
            lecture_credits,
            work_credits,
        }
    }
}

/// Output of one extension step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extension {
    pub worklist: Vec<PartialCombination>,
    pub hit_limit: bool,
}

/// Extend every partial in `worklist` with every acceptable candidate group.
///
/// Order is partial-major, then candidate order. At most `cap` partials are
/// produced; `hit_limit` is set only when an acceptable extension had to be
/// dropped, so a step yielding exactly `cap` partials is not truncated. A cap
/// of zero yields an empty worklist, truncated if anything was acceptable.
pub fn extend_worklist(
    worklist: &[PartialCombination],
    candidates: &[Arc<ClassroomGroup>],
    cap: usize,
) -> Extension {
    let mut next = Vec::new();

    for partial in worklist {
        for candidate in candidates {
            if !partial.accepts(candidate) {
                continue;
            }
            if next.len() == cap {
                return Extension {
                    worklist: next,
                    hit_limit: true,
                };
            }
            next.push(partial.extended(Arc::clone(candidate)));
        }
    }

    Extension {
        worklist: next,
        hit_limit: false,
    }
}

/// Every conflict-free combination of the included lectures in `entries`,
/// capped at [`MAX_COMBINATIONS`].
///
/// Never panics: a failure during enumeration yields an empty set with
/// `hit_limit == false`.
pub fn compute_combinations(entries: &[PlanEntry]) -> CombinationSet {
    compute_combinations_with_limit(entries, MAX_COMBINATIONS)
}

/// [`compute_combinations`] with an explicit cap. A cap of zero returns no
/// combinations, with `hit_limit` set when any would have existed.
pub fn compute_combinations_with_limit(entries: &[PlanEntry], cap: usize) -> CombinationSet {
    recover(|| enumerate(entries, cap))
}

fn enumerate(entries: &[PlanEntry], cap: usize) -> CombinationSet {
    let included: Vec<&PlanEntry> = entries.iter().filter(|e| e.selection.selected).collect();
    if included.is_empty() {
        return CombinationSet::default();
    }

    let mut worklist = vec![PartialCombination::default()];
    let mut contributed = false;
    let mut hit_limit = false;

    for entry in included {
        let groups: Vec<Arc<ClassroomGroup>> = group_classrooms(&entry.lecture, &entry.selection)
            .into_iter()
            .map(Arc::new)
            .collect();
        if groups.is_empty() {
            tracing::debug!(lecture = %entry.lecture.code, "no schedulable sections, skipping");
            continue;
        }
        contributed = true;

        let step = extend_worklist(&worklist, &groups, cap);
        hit_limit |= step.hit_limit;
        worklist = step.worklist;
        tracing::debug!(
            lecture = %entry.lecture.code,
            groups = groups.len(),
            partials = worklist.len(),
            hit_limit,
            "extended combinations"
        );

        if worklist.is_empty() {
            break;
        }
    }

    if !contributed {
        return CombinationSet::default();
    }

    CombinationSet {
        combinations: worklist
            .into_iter()
            .map(PartialCombination::into_combination)
            .collect(),
        hit_limit,
    }
}

fn recover<F: FnOnce() -> CombinationSet>(compute: F) -> CombinationSet {
    match panic::catch_unwind(AssertUnwindSafe(compute)) {
        Ok(set) => set,
        Err(payload) => {
            tracing::warn!(
                reason = panic_message(payload.as_ref()),
                "combination computation failed, returning no combinations"
            );
            CombinationSet::default()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
