use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use sotrack_core::models::PageInfo;

pub const TEST_QUESTION_ID: u64 = 7222449;

/// A recorded collector request: query parameters and JSON body.
pub type Submission = (HashMap<String, String>, Value);

/// Canned upstream replies plus everything the fake server was sent.
#[derive(Clone)]
pub struct Fake {
    pub question: (StatusCode, Value),
    pub answers: (StatusCode, Value),
    pub collector_status: StatusCode,
    pub submissions: Arc<Mutex<Vec<Submission>>>,
    pub collector_hits: Arc<AtomicUsize>,
    pub api_hits: Arc<AtomicUsize>,
}

impl Fake {
    pub fn new(question: Value, answers: Value) -> Self {
        Self {
            question: (StatusCode::OK, question),
            answers: (StatusCode::OK, answers),
            collector_status: StatusCode::OK,
            submissions: Arc::new(Mutex::new(Vec::new())),
            collector_hits: Arc::new(AtomicUsize::new(0)),
            api_hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_question_status(mut self, status: StatusCode) -> Self {
        self.question.0 = status;
        self
    }

    pub fn with_collector_status(mut self, status: StatusCode) -> Self {
        self.collector_status = status;
        self
    }

    pub fn collector_hits(&self) -> usize {
        self.collector_hits.load(Ordering::SeqCst)
    }

    pub fn api_hits(&self) -> usize {
        self.api_hits.load(Ordering::SeqCst)
    }
}

async fn question(
    State(fake): State<Fake>,
    Path(_id): Path<u64>,
) -> (StatusCode, Json<Value>) {
    fake.api_hits.fetch_add(1, Ordering::SeqCst);
    let (status, body) = fake.question;
    (status, Json(body))
}

async fn answers(
    State(fake): State<Fake>,
    Path(_id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    fake.api_hits.fetch_add(1, Ordering::SeqCst);
    if params.get("sort").map(String::as_str) != Some("activity") {
        return (StatusCode::BAD_REQUEST, Json(json!({"error_id": 400})));
    }
    let (status, body) = fake.answers;
    (status, Json(body))
}

async fn collect(
    State(fake): State<Fake>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    fake.collector_hits.fetch_add(1, Ordering::SeqCst);
    fake.submissions.lock().unwrap().push((params, body));
    let status = fake.collector_status;
    let reply = if status.is_success() {
        r#"{"ok":true}"#
    } else {
        r#"{"ok":false,"reason":"collector unavailable"}"#
    };
    (status, reply.to_string())
}

async fn plain_text() -> &'static str {
    "this is not json"
}

/// Serve the fake Stack Exchange API under `/2.2` and the collector at
/// `/collect`. Returns the server's base URL.
pub async fn spawn(fake: Fake) -> String {
    let router = Router::new()
        .route("/2.2/questions/{id}/", get(question))
        .route("/2.2/questions/{id}/answers", get(answers))
        .route("/collect", post(collect))
        .route("/text", get(plain_text))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn question_json(creation_date: i64) -> Value {
    json!({
        "items": [{
            "question_id": TEST_QUESTION_ID,
            "title": "How do I do X?",
            "body": "<p>I want to do X.</p>",
            "creation_date": creation_date,
            "tags": ["python", "string"]
        }],
        "quota_max": 300,
        "quota_remaining": 297
    })
}

pub fn answers_json(items: Vec<Value>) -> Value {
    json!({"items": items, "quota_max": 300, "quota_remaining": 296})
}

pub fn answer_json(id: u64, score: i64, accepted: bool, creation_date: i64) -> Value {
    json!({
        "answer_id": id,
        "body": format!("<p>answer {id}</p>"),
        "creation_date": creation_date,
        "score": score,
        "is_accepted": accepted
    })
}

pub fn sample_page_info() -> PageInfo {
    PageInfo {
        url: format!("https://stackoverflow.com/questions/{TEST_QUESTION_ID}/how-to-do-x"),
        path: format!("/questions/{TEST_QUESTION_ID}/how-to-do-x"),
        question_id: TEST_QUESTION_ID,
        title: "How do I do X?".to_string(),
        question: "<p>I want to do X.</p>".to_string(),
        creation_date: 1314551142000,
        tags: vec!["python".to_string(), "string".to_string()],
        best_answer_id: 7223765,
        best_answer: "<p>answer 7223765</p>".to_string(),
        best_answer_creation_date: 1314563889000,
        best_answer_score: 131,
    }
}
