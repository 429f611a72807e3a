//! Text normalization shared by index build and query.
//!
//! Both sides go through [`prepare`], so "Cálculo 2", "calculo ii" and
//! "CALCULO II" all produce the same words:
//!
//! 1. uppercase with diacritics stripped (NFD, combining marks removed);
//! 2. split into alphanumeric words;
//! 3. Roman numerals split by whitespace merged, trailing integer folded to a
//!    Roman numeral;
//! 4. Portuguese stopwords dropped, except in first position.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Articles and prepositions ignored after the first word.
pub const STOPWORDS: &[&str] = &[
    "DE", "DA", "DO", "DAS", "DOS", "A", "EM", "NO", "NA", "NOS", "NAS", "E", "O", "AO", "AS",
    "OS", "AOS", "PARA", "POR",
];

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Uppercase `text` and strip diacritics.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

/// Maximal runs of alphanumeric characters.
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Roman representation of `n`, for `1..=3999`.
pub fn to_roman(mut n: u32) -> Option<String> {
    if n == 0 || n > 3999 {
        return None;
    }
    let mut out = String::new();
    for (value, symbol) in NUMERALS {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    Some(out)
}

fn symbol_value(c: char) -> Option<u32> {
    Some(match c {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        'M' => 1000,
        _ => return None,
    })
}

/// Value of a canonical uppercase Roman numeral.
///
/// Only canonical spellings are accepted, so words made of numeral letters
/// such as `CIVIL` are not numerals.
pub fn roman_value(token: &str) -> Option<u32> {
    let values: Vec<i64> = token
        .chars()
        .map(|c| symbol_value(c).map(i64::from))
        .collect::<Option<_>>()?;
    let mut total = 0i64;
    for (i, &v) in values.iter().enumerate() {
        match values.get(i + 1) {
            Some(&next) if next > v => total -= v,
            _ => total += v,
        }
    }
    let total = u32::try_from(total).ok()?;
    (to_roman(total).as_deref() == Some(token)).then_some(total)
}

pub fn is_roman_numeral(token: &str) -> bool {
    roman_value(token).is_some()
}

/// Merge split Roman numerals (`I I` → `II`) when the result is still a
/// numeral, and turn a trailing integer into a Roman numeral when there is
/// more than one word (`CALCULO 2` → `CALCULO II`).
pub fn fold_roman_numerals<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        let word = word.as_ref();
        if let Some(last) = out.last_mut() {
            if is_roman_numeral(last) && is_roman_numeral(word) {
                let merged = format!("{}{}", last, word);
                if is_roman_numeral(&merged) {
                    *last = merged;
                    continue;
                }
            }
        }
        out.push(word.to_string());
    }

    if out.len() > 1 {
        if let Some(last) = out.last_mut() {
            if last.chars().all(|c| c.is_ascii_digit()) {
                if let Some(roman) = last.parse::<u32>().ok().and_then(to_roman) {
                    *last = roman;
                }
            }
        }
    }

    out
}

/// Drop stopwords, keeping the first word whatever it is.
pub fn remove_stopwords<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let words: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();
    words
        .iter()
        .enumerate()
        .filter(|&(i, w)| i == 0 || !STOPWORDS.contains(w))
        .map(|(_, w)| w.to_string())
        .collect()
}

/// The full normalization pipeline: the words trigrams are generated from.
pub fn prepare(text: &str) -> Vec<String> {
    let words = words(&normalize(text));
    remove_stopwords(&fold_roman_numerals(&words))
}
