// src/models/exam_result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Represents the 'exam_results' table in the database.
/// Append-only; only the most recent rows per test bank are retained.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: i64,
    pub test_bank_id: i64,
    pub score: i64,
    pub total_questions: i64,
    pub timestamp: DateTime<Utc>,
}

/// DTO for the results and history listings.
#[derive(Debug, Serialize)]
pub struct ExamResultView {
    pub score: i64,
    pub total_questions: i64,
    pub timestamp: DateTime<Utc>,
    pub percentage: f64,
}

impl From<ExamResult> for ExamResultView {
    fn from(result: ExamResult) -> Self {
        Self {
            percentage: percentage(result.score, result.total_questions),
            score: result.score,
            total_questions: result.total_questions,
            timestamp: result.timestamp,
        }
    }
}

/// DTO for recording a finished exam.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_score_bounds))]
pub struct RecordResultRequest {
    pub test_bank_id: i64,
    #[validate(range(min = 0))]
    pub score: i64,
    #[validate(range(min = 1))]
    pub total_questions: i64,
}

fn validate_score_bounds(req: &RecordResultRequest) -> Result<(), ValidationError> {
    if req.score > req.total_questions {
        return Err(ValidationError::new("score_exceeds_total"));
    }
    Ok(())
}

/// Score as a percentage of the question count. Zero questions yields 0.
pub fn percentage(score: i64, total_questions: i64) -> f64 {
    if total_questions > 0 {
        score as f64 / total_questions as f64 * 100.0
    } else {
        0.0
    }
}
