// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    engine,
    error::AppError,
    models::question::{ListQuestionsParams, PresentParams, SubmitAnswerRequest},
};

/// Serves the questions of a test bank, optionally shuffled.
///
/// Each question carries the correct answer for its own lettering, so the client can
/// show feedback without another round trip.
pub async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListQuestionsParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions = engine::present_bank(&pool, params.test_bank_id, params.shuffle).await?;

    Ok(Json(serde_json::json!({ "questions": questions })))
}

/// Presents a single question.
pub async fn get_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Query(params): Query<PresentParams>,
) -> Result<impl IntoResponse, AppError> {
    let question = engine::present(&pool, id, params.shuffle).await?;

    Ok(Json(question))
}

/// Grades one submitted answer.
pub async fn check_answer(
    State(pool): State<SqlitePool>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = engine::grade(&pool, req.question_id, &req.selected_answer, req.shuffle).await?;

    tracing::debug!(
        "Graded question {}: correct={}",
        req.question_id,
        result.correct
    );

    Ok(Json(result))
}
