// src/handlers/test_banks.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{error::AppError, models::test_bank::CreateTestBankRequest, store::test_banks};

/// Lists all test banks with their question counts and latest score.
pub async fn list_test_banks(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let banks = test_banks::list_summaries(&pool).await?;

    Ok(Json(serde_json::json!({ "test_banks": banks })))
}

/// Creates an empty test bank.
pub async fn create_test_bank(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateTestBankRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = test_banks::create(&pool, &payload.name, &payload.exam_code).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"id": id, "message": "Test bank added."})),
    ))
}

/// Deletes a test bank together with its questions and results.
pub async fn delete_test_bank(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    test_banks::delete(&pool, id).await?;

    Ok(Json(serde_json::json!({
        "message": "Test bank and associated questions deleted successfully"
    })))
}
