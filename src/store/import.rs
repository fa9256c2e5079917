// src/store/import.rs

use sqlx::{SqlitePool, types::Json};

use crate::{
    error::AppError,
    models::import::{ExamImport, ImportSummary},
};

/// Imports an exam document.
///
/// Every question is validated first; the writes then run in one transaction, so a
/// failed import leaves nothing behind. The test bank is matched by name or exam code
/// and created when neither exists.
pub async fn import_exam(pool: &SqlitePool, exam: &ExamImport) -> Result<ImportSummary, AppError> {
    let prepared = exam.prepare()?;

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM test_banks WHERE name = ? OR exam_code = ? ORDER BY id LIMIT 1",
    )
    .bind(&exam.exam_name)
    .bind(&exam.exam_code)
    .fetch_optional(&mut *tx)
    .await?;

    let (test_bank_id, created_test_bank) = match existing {
        Some(id) => {
            tracing::info!("Using existing test bank {} for {}", id, exam.exam_name);
            (id, false)
        }
        None => {
            let id = sqlx::query("INSERT INTO test_banks (name, exam_code) VALUES (?, ?)")
                .bind(&exam.exam_name)
                .bind(&exam.exam_code)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
            tracing::info!("Created test bank {}: {} ({})", id, exam.exam_name, exam.exam_code);
            (id, true)
        }
    };

    for question in &prepared {
        let question_id = sqlx::query(
            r#"
            INSERT INTO questions (test_bank_id, question, explanation, question_images, explanation_images)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(test_bank_id)
        .bind(&question.text)
        .bind(&question.explanation)
        .bind(Json(&question.question_images))
        .bind(Json(&question.explanation_images))
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        // Insertion order fixes the canonical option order.
        for option in &question.options {
            sqlx::query(
                "INSERT INTO options (question_id, option_text, is_correct, image_ref) VALUES (?, ?, ?, ?)",
            )
            .bind(question_id)
            .bind(&option.text)
            .bind(option.is_correct)
            .bind(&option.image_ref)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await.map_err(|e| {
        tracing::error!("Failed to commit import of {}: {:?}", exam.exam_name, e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!(
        "Imported {} questions into {} ({})",
        prepared.len(),
        exam.exam_name,
        exam.exam_code
    );

    Ok(ImportSummary {
        test_bank_id,
        exam_name: exam.exam_name.clone(),
        exam_code: exam.exam_code.clone(),
        created_test_bank,
        questions_imported: prepared.len(),
        message: format!(
            "Successfully imported questions into {} ({})",
            exam.exam_name, exam.exam_code
        ),
    })
}
