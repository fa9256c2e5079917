// src/store/results.rs

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{
    config::RESULTS_KEPT_PER_BANK, error::AppError, models::exam_result::ExamResult,
    store::test_banks,
};

/// Records a finished exam and trims the bank's history to the newest
/// `RESULTS_KEPT_PER_BANK` rows. Insert and trim share one transaction.
pub async fn record_result(
    pool: &SqlitePool,
    test_bank_id: i64,
    score: i64,
    total_questions: i64,
    timestamp: DateTime<Utc>,
) -> Result<ExamResult, AppError> {
    let mut tx = pool.begin().await?;

    let bank_exists = sqlx::query_scalar::<_, i64>("SELECT id FROM test_banks WHERE id = ?")
        .bind(test_bank_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();
    if !bank_exists {
        return Err(AppError::NotFound("Test bank not found.".to_string()));
    }

    let id = sqlx::query(
        "INSERT INTO exam_results (test_bank_id, score, total_questions, timestamp) VALUES (?, ?, ?, ?)",
    )
    .bind(test_bank_id)
    .bind(score)
    .bind(total_questions)
    .bind(timestamp)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert exam result: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .last_insert_rowid();

    let trimmed = sqlx::query(
        r#"
        DELETE FROM exam_results
        WHERE test_bank_id = ?
          AND id NOT IN (
              SELECT id FROM exam_results
              WHERE test_bank_id = ?
              ORDER BY timestamp DESC, id DESC
              LIMIT ?
          )
        "#,
    )
    .bind(test_bank_id)
    .bind(test_bank_id)
    .bind(RESULTS_KEPT_PER_BANK)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;

    if trimmed > 0 {
        tracing::debug!("Trimmed {} old results for test bank {}", trimmed, test_bank_id);
    }

    Ok(ExamResult {
        id,
        test_bank_id,
        score,
        total_questions,
        timestamp,
    })
}

/// Results of a test bank, newest first. `None` returns every retained row.
pub async fn list_results(
    pool: &SqlitePool,
    test_bank_id: i64,
    limit: Option<i64>,
) -> Result<Vec<ExamResult>, AppError> {
    test_banks::find(pool, test_bank_id)
        .await?
        .ok_or(AppError::NotFound("Test bank not found.".to_string()))?;

    // SQLite treats a negative LIMIT as "no limit".
    let results = sqlx::query_as::<_, ExamResult>(
        r#"
        SELECT id, test_bank_id, score, total_questions, timestamp
        FROM exam_results
        WHERE test_bank_id = ?
        ORDER BY timestamp DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(test_bank_id)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;

    Ok(results)
}
