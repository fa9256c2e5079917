// src/models/question.rs

use serde::Deserialize;
use sqlx::{prelude::FromRow, types::Json};

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: i64,

    pub test_bank_id: i64,

    /// The text content of the question.
    #[sqlx(rename = "question")]
    pub text: String,

    /// Explanation shown after the question has been answered.
    pub explanation: Option<String>,

    /// Image file names attached to the question text, in display order.
    /// Stored as a JSON array in the database.
    pub question_images: Json<Vec<String>>,

    /// Image file names attached to the explanation, in display order.
    pub explanation_images: Json<Vec<String>>,
}

/// Represents the 'options' table in the database.
///
/// The row id is the option's stable internal identity. It never leaves the server:
/// clients only ever see per-presentation display letters.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionOption {
    pub id: i64,
    pub question_id: i64,
    #[sqlx(rename = "option_text")]
    pub text: String,
    pub is_correct: bool,
    pub image_ref: Option<String>,
}

/// A question with everything needed to present or grade it.
#[derive(Debug, Clone)]
pub struct QuestionBundle {
    pub question: Question,
    /// Exam code of the owning test bank; namespaces image paths.
    pub exam_code: String,
    /// Options in canonical (insertion) order.
    pub options: Vec<QuestionOption>,
}

/// Query parameters for listing the questions of a test bank.
#[derive(Debug, Deserialize)]
pub struct ListQuestionsParams {
    pub test_bank_id: i64,
    #[serde(default)]
    pub shuffle: bool,
}

/// Query parameters for presenting a single question.
#[derive(Debug, Deserialize)]
pub struct PresentParams {
    #[serde(default)]
    pub shuffle: bool,
}

/// DTO for submitting one answer.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: i64,

    /// Comma-separated display letters, e.g. "a" or "b,d".
    #[serde(default)]
    pub selected_answer: String,

    /// Must match the `shuffle` flag the question was fetched with,
    /// so the letters are graded against the ordering the user saw.
    #[serde(default)]
    pub shuffle: bool,
}
