use axum::http::StatusCode;
use sotrack_client::{CollectorConfig, HttpSubmitter};
use sotrack_core::{AppError, Submitter};

use crate::integration::common::*;

fn submitter(base: &str) -> HttpSubmitter {
    let config = CollectorConfig::new(&format!("{base}/collect"), "tracker-login").unwrap();
    HttpSubmitter::new(config).unwrap()
}

#[tokio::test]
async fn submit_posts_json_with_login() {
    let fake = Fake::new(question_json(1), answers_json(vec![]));
    let base = spawn(fake.clone()).await;

    submitter(&base).submit(&sample_page_info()).await.unwrap();

    let submissions = fake.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    let (params, body) = &submissions[0];
    assert_eq!(params.get("login").map(String::as_str), Some("tracker-login"));
    assert_eq!(body["questionId"], TEST_QUESTION_ID);
    assert_eq!(body["bestAnswerId"], 7223765);
    assert_eq!(body["creationDate"], 1314551142000_i64);
    assert_eq!(body["tags"], serde_json::json!(["python", "string"]));
}

#[tokio::test]
async fn collector_500_is_submission_error_without_retry() {
    let fake = Fake::new(question_json(1), answers_json(vec![]))
        .with_collector_status(StatusCode::INTERNAL_SERVER_ERROR);
    let base = spawn(fake.clone()).await;

    let err = submitter(&base)
        .submit(&sample_page_info())
        .await
        .unwrap_err();

    match err {
        AppError::SubmissionError { status, response } => {
            assert_eq!(status, 500);
            assert!(response.contains("collector unavailable"));
        }
        other => panic!("expected SubmissionError, got {other:?}"),
    }
    assert_eq!(fake.collector_hits(), 1);
}

#[tokio::test]
async fn unreachable_collector_is_network_error() {
    let config = CollectorConfig::new("http://127.0.0.1:9/collect", "tracker-login").unwrap();
    let err = HttpSubmitter::new(config)
        .unwrap()
        .submit(&sample_page_info())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::NetworkError(_) | AppError::Timeout(_)
    ));
}
