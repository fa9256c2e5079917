// src/engine/grading.rs

use serde::Serialize;

use crate::{
    engine::{
        labels::parse_answer_set,
        presentation::{letter_options, resolve_images},
    },
    error::AppError,
    models::question::QuestionBundle,
};

/// Outcome of grading one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeResult {
    pub correct: bool,
    /// Correct display letters of the reconstructed presentation.
    pub correct_answer: String,
    pub explanation: String,
    pub explanation_images: Vec<String>,
}

/// Grades `submitted` against the presentation selected by `shuffle`.
///
/// The presentation is rebuilt from the seed instead of being looked up, so grading works
/// in any request or process. An empty submission is never correct, and unparseable input
/// simply does not match.
pub fn grade(bundle: &QuestionBundle, submitted: &str, shuffle: bool) -> Result<GradeResult, AppError> {
    let lettering = letter_options(bundle, shuffle)?;

    let submitted = parse_answer_set(submitted);
    let expected = parse_answer_set(&lettering.correct_answer);
    let correct = !submitted.is_empty() && submitted == expected;

    let question = &bundle.question;
    Ok(GradeResult {
        correct,
        correct_answer: lettering.correct_answer,
        explanation: question.explanation.clone().unwrap_or_default(),
        explanation_images: resolve_images(&bundle.exam_code, &question.explanation_images),
    })
}
