//! Keep the active combination stable across recomputation.
//!
//! After the plan changes, the new combination list is searched for the entry
//! sharing the most (lecture, representative section) pairs with the one that
//! was active before.

use crate::combination::Combination;

/// Number of (group in `a`, group in `b`) pairs with the same lecture code and
/// the same representative section code.
pub fn similarity(a: &Combination, b: &Combination) -> usize {
    let mut score = 0;
    for x in &a.groups {
        let Some(x_rep) = x.representative() else {
            continue;
        };
        for y in &b.groups {
            if x.lecture_code == y.lecture_code
                && y.representative().is_some_and(|r| r.code == x_rep.code)
            {
                score += 1;
            }
        }
    }
    score
}

/// Index of the combination closest to `previous`.
///
/// `None` when `combinations` is empty; `Some(0)` when there is no previous
/// combination. Ties keep the earliest index.
pub fn find_closest_index(
    combinations: &[Combination],
    previous: Option<&Combination>,
) -> Option<usize> {
    if combinations.is_empty() {
        return None;
    }
    let Some(previous) = previous else {
        return Some(0);
    };

    let mut best = 0;
    let mut best_score = similarity(previous, &combinations[0]);
    for (i, candidate) in combinations.iter().enumerate().skip(1) {
        let score = similarity(previous, candidate);
        if score > best_score {
            best = i;
            best_score = score;
        }
    }
    Some(best)
}

/// The combination closest to `previous`. See [`find_closest_index`].
pub fn find_closest_combination<'a>(
    combinations: &'a [Combination],
    previous: Option<&Combination>,
) -> Option<&'a Combination> {
    find_closest_index(combinations, previous).map(|i| &combinations[i])
}
