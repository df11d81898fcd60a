use axum::http::StatusCode;
use sotrack_client::ReqwestFetcher;
use sotrack_core::{ApiConfig, AppError, Fetcher};

use crate::integration::common::*;

#[tokio::test]
async fn fetch_decodes_json() {
    let base = spawn(Fake::new(question_json(1314551142), answers_json(vec![]))).await;
    let api = ApiConfig::new(format!("{base}/2.2"));

    let fetcher = ReqwestFetcher::new().unwrap();
    let value = fetcher.fetch(&api.question_url(TEST_QUESTION_ID)).await.unwrap();

    assert_eq!(value["items"][0]["title"], "How do I do X?");
    assert_eq!(value["quota_remaining"], 297);
}

#[tokio::test]
async fn non_2xx_is_http_status_error() {
    let fake = Fake::new(
        serde_json::json!({"error_id": 404, "error_name": "no_method"}),
        answers_json(vec![]),
    )
    .with_question_status(StatusCode::NOT_FOUND);
    let base = spawn(fake).await;
    let url = ApiConfig::new(format!("{base}/2.2")).question_url(TEST_QUESTION_ID);

    let err = ReqwestFetcher::new().unwrap().fetch(&url).await.unwrap_err();

    match err {
        AppError::HttpStatusError {
            status,
            status_text,
            url: failed_url,
            body,
        } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
            assert_eq!(failed_url, url);
            assert!(body.contains("no_method"));
        }
        other => panic!("expected HttpStatusError, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let base = spawn(Fake::new(question_json(1), answers_json(vec![]))).await;

    let err = ReqwestFetcher::new()
        .unwrap()
        .fetch(&format!("{base}/text"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MalformedResource(_)));
}

#[tokio::test]
async fn fetch_issues_exactly_one_request() {
    let fake = Fake::new(question_json(1), answers_json(vec![]))
        .with_question_status(StatusCode::SERVICE_UNAVAILABLE);
    let base = spawn(fake.clone()).await;
    let url = ApiConfig::new(format!("{base}/2.2")).question_url(TEST_QUESTION_ID);

    let _ = ReqwestFetcher::new().unwrap().fetch(&url).await;

    assert_eq!(fake.api_hits(), 1);
}
