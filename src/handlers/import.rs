// src/handlers/import.rs

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{error::AppError, models::import::ExamImport, store};

/// Imports an uploaded JSON exam file (multipart field `file`).
pub async fn import_questions(
    State(pool): State<SqlitePool>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !file_name.to_lowercase().ends_with(".json") {
            return Err(AppError::BadRequest(
                "Unsupported file type. Please upload a JSON file.".to_string(),
            ));
        }

        let content = field.bytes().await?;
        let exam: ExamImport = serde_json::from_slice(&content).map_err(|e| {
            AppError::BadRequest(format!(
                "Invalid JSON format: 'exam_name', 'exam_code', or 'questions' missing or malformed ({})",
                e
            ))
        })?;

        let summary = store::import::import_exam(&pool, &exam).await?;
        return Ok((StatusCode::CREATED, Json(summary)));
    }

    Err(AppError::BadRequest("Missing 'file' field in upload.".to_string()))
}
