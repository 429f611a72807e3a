//! Trigram generation for prepared words.
//!
//! Besides the plain 3-character windows, each word emits tagged tokens that
//! reward matches on initials, prefixes, and whole words:
//!
//! | token | meaning |
//! |---|---|
//! | `X#` | first letter of a word |
//! | `XYZ!` | first three letters of the first word |
//! | `WORD$` | the whole word |
//! | `XYZ` | every contiguous 3-character window |
//! | `XY%` | adjacent letters of a short word (query side only) |
//! | `XY%` | initials of two consecutive words |
//!
//! The index is built with `as_acronym = false`; queries use `true` so that a
//! short query like "ED" or "GA" can hit the cross-word initials of names.

use crate::normalize::prepare;

/// Words shorter than this emit acronym tokens when `as_acronym` is set.
pub const ACRONYM_MAX_LEN: usize = 5;

/// Trigrams of `words`, in generation order. Duplicates are kept.
pub fn word_trigrams<S: AsRef<str>>(words: &[S], as_acronym: bool) -> Vec<String> {
    let words: Vec<Vec<char>> = words.iter().map(|w| w.as_ref().chars().collect()).collect();
    let mut out = Vec::new();

    for (i, word) in words.iter().enumerate() {
        let Some(&first) = word.first() else {
            continue;
        };

        out.push(format!("{first}#"));

        if i == 0 && word.len() > 2 {
            let prefix: String = word[..3].iter().collect();
            out.push(format!("{prefix}!"));
        }

        let whole: String = word.iter().collect();
        out.push(format!("{whole}$"));

        out.extend(word.windows(3).map(|w| w.iter().collect::<String>()));

        if as_acronym && word.len() < ACRONYM_MAX_LEN {
            out.extend(word.windows(2).map(|w| format!("{}{}%", w[0], w[1])));
        }

        if i > 0 {
            if let Some(&prev) = words[i - 1].first() {
                out.push(format!("{prev}{first}%"));
            }
        }
    }

    out
}

/// Normalize `text` and generate its trigrams.
pub fn trigrams(text: &str, as_acronym: bool) -> Vec<String> {
    word_trigrams(&prepare(text), as_acronym)
}
