// src/models/test_bank.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// The exam code becomes a path segment of every image URL (`/{exam_code}/images/...`).
static EXAM_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid exam code regex"));

/// Represents the 'test_banks' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestBank {
    pub id: i64,

    /// Unique display name (e.g., "AWS Solutions Architect").
    pub name: String,

    /// Short exam code (e.g., "SAA-C03"). Namespaces the bank's image files.
    pub exam_code: String,
}

/// Raw listing row: the bank plus its presentable question count and latest result.
#[derive(Debug, FromRow)]
pub struct TestBankRow {
    pub id: i64,
    pub name: String,
    pub exam_code: String,
    pub question_count: i64,
    pub last_result_score: Option<i64>,
    pub last_result_total: Option<i64>,
}

/// DTO for the test bank listing.
#[derive(Debug, Serialize)]
pub struct TestBankSummary {
    pub id: i64,
    pub name: String,
    pub exam_code: String,
    pub question_count: i64,
    /// Percentage of the most recent exam result, if any.
    pub last_score: Option<f64>,
}

impl From<TestBankRow> for TestBankSummary {
    fn from(row: TestBankRow) -> Self {
        let last_score = match (row.last_result_score, row.last_result_total) {
            (Some(score), Some(total)) => Some(crate::models::exam_result::percentage(score, total)),
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            exam_code: row.exam_code,
            question_count: row.question_count,
            last_score,
        }
    }
}

/// DTO for creating an empty test bank.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTestBankRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50), custom(function = validate_exam_code))]
    pub exam_code: String,
}

/// Ensures the exam code is safe to use as a single URL path segment.
pub fn validate_exam_code(code: &str) -> Result<(), validator::ValidationError> {
    if !EXAM_CODE_PATTERN.is_match(code) || code.contains("..") {
        return Err(validator::ValidationError::new("invalid_exam_code"));
    }
    Ok(())
}
