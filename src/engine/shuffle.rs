// src/engine/shuffle.rs

//! Deterministic option shuffling.
//!
//! The permutation for a question is a pure function of its id, so a question presented
//! in one request can be graded in another without persisting the ordering.

use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

/// Seed for a question's permutation.
pub fn seed_for(question_id: i64) -> u64 {
    question_id as u64
}

/// Seeded permutation of `0..option_count` for the given question.
///
/// ChaCha8 output is portable, so every process computes the same permutation.
pub fn shuffle_order(question_id: i64, option_count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..option_count).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed_for(question_id));
    order.shuffle(&mut rng);
    order
}

/// True when the options are exactly "true" and "false", ignoring case and padding.
pub fn is_true_false(texts: &[&str]) -> bool {
    if texts.len() != 2 {
        return false;
    }
    let mut normalized: Vec<String> = texts.iter().map(|t| t.trim().to_lowercase()).collect();
    normalized.sort();
    normalized == ["false", "true"]
}

/// Order in which a question's options are presented, as indices into canonical order.
///
/// True/false questions keep their canonical order even when shuffling is requested.
pub fn presentation_order(question_id: i64, texts: &[&str], shuffle_requested: bool) -> Vec<usize> {
    if !shuffle_requested || is_true_false(texts) {
        return (0..texts.len()).collect();
    }
    shuffle_order(question_id, texts.len())
}
