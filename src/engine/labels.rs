// src/engine/labels.rs

//! Display letters for presented options and answer-string normalisation.

use std::collections::BTreeSet;

/// Display label for the option at `index` in a presentation.
///
/// Bijective base-26: `a` .. `z`, then `aa`, `ab`, .. so the lettering never runs out.
pub fn label_for(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Normalises a submitted or computed answer string into a set of labels.
///
/// Trims, splits on commas, lower-cases every token and drops empty ones.
pub fn parse_answer_set(raw: &str) -> BTreeSet<String> {
    raw.trim()
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}
