// src/store/questions.rs

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::question::{Question, QuestionBundle, QuestionOption},
    store::test_banks,
};

/// Helper row for fetching a question together with its bank's exam code.
#[derive(sqlx::FromRow)]
struct QuestionWithExamCode {
    #[sqlx(flatten)]
    question: Question,
    exam_code: String,
}

/// Loads one question with its options in canonical order.
pub async fn load_bundle(pool: &SqlitePool, question_id: i64) -> Result<QuestionBundle, AppError> {
    let row = sqlx::query_as::<_, QuestionWithExamCode>(
        r#"
        SELECT
            q.id, q.test_bank_id, q.question, q.explanation,
            q.question_images, q.explanation_images,
            tb.exam_code
        FROM questions q
        JOIN test_banks tb ON tb.id = q.test_bank_id
        WHERE q.id = ?
        "#,
    )
    .bind(question_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch question {}: {:?}", question_id, e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::NotFound("Question not found.".to_string()))?;

    let options = sqlx::query_as::<_, QuestionOption>(
        r#"
        SELECT id, question_id, option_text, is_correct, image_ref
        FROM options
        WHERE question_id = ?
        ORDER BY id
        "#,
    )
    .bind(question_id)
    .fetch_all(pool)
    .await?;

    Ok(QuestionBundle {
        question: row.question,
        exam_code: row.exam_code,
        options,
    })
}

/// Loads every question of a test bank, in creation order, with their options.
pub async fn load_bank_bundles(
    pool: &SqlitePool,
    test_bank_id: i64,
) -> Result<Vec<QuestionBundle>, AppError> {
    let bank = test_banks::find(pool, test_bank_id)
        .await?
        .ok_or(AppError::NotFound("Test bank not found.".to_string()))?;

    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, test_bank_id, question, explanation, question_images, explanation_images
        FROM questions
        WHERE test_bank_id = ?
        ORDER BY id
        "#,
    )
    .bind(test_bank_id)
    .fetch_all(pool)
    .await?;

    let options = sqlx::query_as::<_, QuestionOption>(
        r#"
        SELECT o.id, o.question_id, o.option_text, o.is_correct, o.image_ref
        FROM options o
        JOIN questions q ON q.id = o.question_id
        WHERE q.test_bank_id = ?
        ORDER BY o.id
        "#,
    )
    .bind(test_bank_id)
    .fetch_all(pool)
    .await?;

    // Rows arrive in ascending id, so each group stays in canonical order.
    let mut by_question: HashMap<i64, Vec<QuestionOption>> = HashMap::new();
    for option in options {
        by_question.entry(option.question_id).or_default().push(option);
    }

    Ok(questions
        .into_iter()
        .map(|question| QuestionBundle {
            options: by_question.remove(&question.id).unwrap_or_default(),
            exam_code: bank.exam_code.clone(),
            question,
        })
        .collect())
}
