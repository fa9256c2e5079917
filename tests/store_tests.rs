// tests/store_tests.rs

use chrono::{Duration, TimeZone, Utc};
use exam_engine::{
    engine,
    error::AppError,
    models::import::ExamImport,
    store::{import::import_exam, questions, results, test_banks},
};
use serde_json::json;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    pool
}

fn exam(name: &str, code: &str) -> ExamImport {
    serde_json::from_value(json!({
        "exam_name": name,
        "exam_code": code,
        "questions": [
            {
                "question": "Capital of France?",
                "option_a": "Paris",
                "option_b": "London",
                "option_c": "Berlin",
                "option_a_image": "paris.png",
                "correct_answer": "A"
            }
        ]
    }))
    .unwrap()
}

#[tokio::test]
async fn retention_keeps_three_most_recent_by_timestamp() {
    let pool = test_pool().await;
    let bank_id = test_banks::create(&pool, "Bank", "B1").await.unwrap();

    let base = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    // Inserted out of chronological order on purpose.
    for (score, minutes) in [(1, 10), (2, 30), (3, 20), (4, 40)] {
        results::record_result(&pool, bank_id, score, 10, base + Duration::minutes(minutes))
            .await
            .unwrap();
    }

    let kept = results::list_results(&pool, bank_id, None).await.unwrap();
    let scores: Vec<i64> = kept.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![4, 2, 3]);

    // An older result than everything retained is trimmed straight away.
    results::record_result(&pool, bank_id, 9, 10, base)
        .await
        .unwrap();
    let kept = results::list_results(&pool, bank_id, None).await.unwrap();
    assert_eq!(kept.iter().map(|r| r.score).collect::<Vec<_>>(), vec![4, 2, 3]);
}

#[tokio::test]
async fn retention_is_per_test_bank() {
    let pool = test_pool().await;
    let first = test_banks::create(&pool, "First", "F1").await.unwrap();
    let second = test_banks::create(&pool, "Second", "S1").await.unwrap();

    let now = Utc::now();
    for i in 0..4 {
        results::record_result(&pool, first, i, 4, now + Duration::seconds(i))
            .await
            .unwrap();
    }
    results::record_result(&pool, second, 1, 4, now).await.unwrap();

    assert_eq!(results::list_results(&pool, first, None).await.unwrap().len(), 3);
    assert_eq!(results::list_results(&pool, second, None).await.unwrap().len(), 1);
    assert_eq!(results::list_results(&pool, first, Some(2)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn record_result_for_unknown_bank_is_not_found() {
    let pool = test_pool().await;
    let result = results::record_result(&pool, 31337, 1, 2, Utc::now()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn list_results_for_unknown_bank_is_not_found() {
    let pool = test_pool().await;
    let bank_id = test_banks::create(&pool, "Bank", "B1").await.unwrap();

    assert!(results::list_results(&pool, bank_id, None).await.unwrap().is_empty());

    let result = results::list_results(&pool, 31337, Some(10)).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn import_reuses_bank_matched_by_exam_code() {
    let pool = test_pool().await;

    let first = import_exam(&pool, &exam("Geography", "GEO-101")).await.unwrap();
    assert!(first.created_test_bank);

    let second = import_exam(&pool, &exam("Geography (2nd edition)", "GEO-101"))
        .await
        .unwrap();
    assert!(!second.created_test_bank);
    assert_eq!(first.test_bank_id, second.test_bank_id);

    let bundles = questions::load_bank_bundles(&pool, first.test_bank_id).await.unwrap();
    assert_eq!(bundles.len(), 2);
}

#[tokio::test]
async fn imported_options_keep_canonical_order() {
    let pool = test_pool().await;
    let summary = import_exam(&pool, &exam("Geography", "GEO-101")).await.unwrap();

    let bundles = questions::load_bank_bundles(&pool, summary.test_bank_id).await.unwrap();
    let bundle = questions::load_bundle(&pool, bundles[0].question.id).await.unwrap();

    let texts: Vec<&str> = bundle.options.iter().map(|o| o.text.as_str()).collect();
    assert_eq!(texts, vec!["Paris", "London", "Berlin"]);
    assert!(bundle.options.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(bundle.exam_code, "GEO-101");
    assert_eq!(bundle.options[0].image_ref.as_deref(), Some("paris.png"));
}

#[tokio::test]
async fn present_and_grade_round_trip_through_storage() {
    let pool = test_pool().await;
    let summary = import_exam(&pool, &exam("Geography", "GEO-101")).await.unwrap();
    let bundles = questions::load_bank_bundles(&pool, summary.test_bank_id).await.unwrap();
    let question_id = bundles[0].question.id;

    for shuffle in [false, true] {
        let presented = engine::present(&pool, question_id, shuffle).await.unwrap();
        assert_eq!(presented, engine::present(&pool, question_id, shuffle).await.unwrap());

        let paris_letter = presented.correct_answer.clone();
        assert_eq!(presented.options.get(&paris_letter).map(String::as_str), Some("Paris"));
        assert_eq!(
            presented.option_images.get(&paris_letter).cloned().flatten().as_deref(),
            Some("/GEO-101/images/paris.png")
        );

        let graded = engine::grade(&pool, question_id, &paris_letter, shuffle).await.unwrap();
        assert!(graded.correct);
    }
}

#[tokio::test]
async fn present_unknown_question_is_not_found() {
    let pool = test_pool().await;
    let result = engine::present(&pool, 404, true).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
