// src/engine/mod.rs

//! Presentation and grading of questions.
//!
//! Everything here is read-only: a question's option ordering is derived from its id on
//! every call, so presenting and grading need no shared state beyond the database.

pub mod grading;
pub mod labels;
pub mod presentation;
pub mod shuffle;

use rand::seq::SliceRandom;
use sqlx::SqlitePool;

use crate::{error::AppError, store};

pub use grading::GradeResult;
pub use presentation::PresentedQuestion;

/// Presents one question.
pub async fn present(
    pool: &SqlitePool,
    question_id: i64,
    shuffle: bool,
) -> Result<PresentedQuestion, AppError> {
    let bundle = store::questions::load_bundle(pool, question_id).await?;
    presentation::build(&bundle, shuffle)
}

/// Grades an answer against the presentation the client was served.
pub async fn grade(
    pool: &SqlitePool,
    question_id: i64,
    submitted_answer: &str,
    shuffle: bool,
) -> Result<GradeResult, AppError> {
    let bundle = store::questions::load_bundle(pool, question_id).await?;
    grading::grade(&bundle, submitted_answer, shuffle)
}

/// Presents every presentable question of a test bank.
///
/// Questions without options are skipped rather than failing the batch. With `shuffle`
/// the question order is randomised too; unlike option order it plays no part in grading.
pub async fn present_bank(
    pool: &SqlitePool,
    test_bank_id: i64,
    shuffle: bool,
) -> Result<Vec<PresentedQuestion>, AppError> {
    let bundles = store::questions::load_bank_bundles(pool, test_bank_id).await?;

    let mut presented = Vec::with_capacity(bundles.len());
    for bundle in &bundles {
        match presentation::build(bundle, shuffle) {
            Ok(question) => presented.push(question),
            Err(e) => {
                tracing::warn!("Skipping question {}: {}", bundle.question.id, e);
            }
        }
    }

    if shuffle {
        presented.shuffle(&mut rand::thread_rng());
    }

    Ok(presented)
}
