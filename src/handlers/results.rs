// src/handlers/results.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::RECENT_RESULTS_LIMIT,
    error::AppError,
    models::exam_result::{ExamResultView, RecordResultRequest},
    store::results,
};

/// Records a finished exam.
///
/// Only the most recent results of each test bank are kept.
pub async fn save_exam_result(
    State(pool): State<SqlitePool>,
    Json(req): Json<RecordResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let result = results::record_result(
        &pool,
        req.test_bank_id,
        req.score,
        req.total_questions,
        chrono::Utc::now(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": result.id,
            "message": "Result saved successfully"
        })),
    ))
}

/// Retrieves the most recent results of a test bank.
pub async fn get_exam_results(
    State(pool): State<SqlitePool>,
    Path(test_bank_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = results::list_results(&pool, test_bank_id, Some(RECENT_RESULTS_LIMIT)).await?;
    let views: Vec<ExamResultView> = rows.into_iter().map(ExamResultView::from).collect();

    Ok(Json(serde_json::json!({ "results": views })))
}

/// Retrieves the full retained history of a test bank.
pub async fn get_exam_history(
    State(pool): State<SqlitePool>,
    Path(test_bank_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = results::list_results(&pool, test_bank_id, None).await?;
    let views: Vec<ExamResultView> = rows.into_iter().map(ExamResultView::from).collect();

    Ok(Json(serde_json::json!({ "history": views })))
}
