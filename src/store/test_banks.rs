// src/store/test_banks.rs

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::test_bank::{TestBank, TestBankRow, TestBankSummary},
};

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<TestBank>, AppError> {
    let bank = sqlx::query_as::<_, TestBank>("SELECT id, name, exam_code FROM test_banks WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(bank)
}

/// Lists all test banks with their presentable question count and latest score.
pub async fn list_summaries(pool: &SqlitePool) -> Result<Vec<TestBankSummary>, AppError> {
    let rows = sqlx::query_as::<_, TestBankRow>(
        r#"
        SELECT
            tb.id,
            tb.name,
            tb.exam_code,
            (
                SELECT COUNT(*) FROM questions q
                WHERE q.test_bank_id = tb.id
                  AND EXISTS (SELECT 1 FROM options o WHERE o.question_id = q.id)
            ) AS question_count,
            (
                SELECT r.score FROM exam_results r
                WHERE r.test_bank_id = tb.id
                ORDER BY r.timestamp DESC, r.id DESC
                LIMIT 1
            ) AS last_result_score,
            (
                SELECT r.total_questions FROM exam_results r
                WHERE r.test_bank_id = tb.id
                ORDER BY r.timestamp DESC, r.id DESC
                LIMIT 1
            ) AS last_result_total
        FROM test_banks tb
        ORDER BY tb.id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list test banks: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(rows.into_iter().map(TestBankSummary::from).collect())
}

/// Creates an empty test bank. Duplicate names are a conflict.
pub async fn create(pool: &SqlitePool, name: &str, exam_code: &str) -> Result<i64, AppError> {
    let result = sqlx::query("INSERT INTO test_banks (name, exam_code) VALUES (?, ?)")
        .bind(name)
        .bind(exam_code)
        .execute(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Test bank '{}' already exists.", name))
            }
            _ => {
                tracing::error!("Failed to create test bank: {:?}", e);
                AppError::InternalServerError(e.to_string())
            }
        })?;

    Ok(result.last_insert_rowid())
}

/// Deletes a test bank. Questions, options and results go with it.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM test_banks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Test bank not found".to_string()));
    }

    tracing::info!("Deleted test bank {}", id);
    Ok(())
}
