//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::ApiConfig;
use crate::error::AppError;
use crate::models::{PageInfo, PageSource};
use crate::traits::{Fetcher, Submitter};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

struct MockRoute {
    delay: Duration,
    response: Option<Result<serde_json::Value, AppError>>,
}

/// Mock fetcher that answers by exact URL.
///
/// The question and answers lookups run concurrently, so responses are keyed
/// by URL rather than queued. Each route answers once; an unknown or spent
/// route is an [`AppError::HttpError`].
#[derive(Clone, Default)]
pub struct MockFetcher {
    routes: Arc<Mutex<HashMap<String, MockRoute>>>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.route(url.into(), Ok(body), Duration::ZERO)
    }

    pub fn with_error(self, url: impl Into<String>, error: AppError) -> Self {
        self.route(url.into(), Err(error), Duration::ZERO)
    }

    /// Like [`with_json`](Self::with_json), but the response is held back for `delay`.
    pub fn with_delayed_json(
        self,
        url: impl Into<String>,
        body: serde_json::Value,
        delay: Duration,
    ) -> Self {
        self.route(url.into(), Ok(body), delay)
    }

    /// Like [`with_error`](Self::with_error), but the failure is held back for `delay`.
    pub fn with_delayed_error(
        self,
        url: impl Into<String>,
        error: AppError,
        delay: Duration,
    ) -> Self {
        self.route(url.into(), Err(error), delay)
    }

    fn route(
        self,
        url: String,
        response: Result<serde_json::Value, AppError>,
        delay: Duration,
    ) -> Self {
        self.routes.lock().unwrap().insert(
            url,
            MockRoute {
                delay,
                response: Some(response),
            },
        );
        self
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, AppError> {
        self.requested.lock().unwrap().push(url.to_string());

        let (delay, response) = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(url) {
                Some(route) => (route.delay, route.response.take()),
                None => (Duration::ZERO, None),
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        response.unwrap_or_else(|| Err(AppError::HttpError(format!("no mock route for {url}"))))
    }
}

// ---------------------------------------------------------------------------
// MockSubmitter
// ---------------------------------------------------------------------------

/// Mock submitter that records every record it is given.
#[derive(Clone)]
pub struct MockSubmitter {
    pub submitted: Arc<Mutex<Vec<PageInfo>>>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockSubmitter {
    pub fn accepting() -> Self {
        Self {
            submitted: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
        }
    }

    /// Submitter whose next call fails with `error`.
    pub fn with_error(error: AppError) -> Self {
        Self {
            submitted: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }

    pub fn calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

impl Submitter for MockSubmitter {
    async fn submit(&self, page_info: &PageInfo) -> Result<(), AppError> {
        self.submitted.lock().unwrap().push(page_info.clone());
        let mut err = self.error.lock().unwrap();
        match err.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

pub const TEST_QUESTION_ID: u64 = 7222449;

/// The page source for [`TEST_QUESTION_ID`].
pub fn make_test_source() -> PageSource {
    PageSource {
        url: format!("https://stackoverflow.com/questions/{TEST_QUESTION_ID}/how-to-do-x"),
        path: format!("/questions/{TEST_QUESTION_ID}/how-to-do-x"),
        question_id: TEST_QUESTION_ID,
    }
}

/// A question response with a single item.
pub fn question_json(creation_date: i64, quota_remaining: u32) -> serde_json::Value {
    serde_json::json!({
        "items": [{
            "question_id": TEST_QUESTION_ID,
            "title": "How do I do X?",
            "body": "<p>I want to do X.</p>",
            "creation_date": creation_date,
            "tags": ["python", "string"]
        }],
        "has_more": false,
        "quota_max": 300,
        "quota_remaining": quota_remaining
    })
}

/// One answer item; `id` doubles as the body marker.
pub fn answer_json(id: u64, score: i64, accepted: bool, creation_date: i64) -> serde_json::Value {
    serde_json::json!({
        "answer_id": id,
        "question_id": TEST_QUESTION_ID,
        "body": format!("<p>answer {id}</p>"),
        "creation_date": creation_date,
        "score": score,
        "is_accepted": accepted
    })
}

/// An answers response wrapping `items`.
pub fn answers_json(items: Vec<serde_json::Value>, quota_remaining: u32) -> serde_json::Value {
    serde_json::json!({
        "items": items,
        "has_more": false,
        "quota_max": 300,
        "quota_remaining": quota_remaining
    })
}

/// A fetcher answering both lookups for [`TEST_QUESTION_ID`] with `api`'s URLs.
pub fn make_fetcher(
    api: &ApiConfig,
    question: serde_json::Value,
    answers: serde_json::Value,
) -> MockFetcher {
    MockFetcher::new()
        .with_json(api.question_url(TEST_QUESTION_ID), question)
        .with_json(api.answers_url(TEST_QUESTION_ID), answers)
}

/// A well-formed page-info record.
pub fn make_test_page_info() -> PageInfo {
    let source = make_test_source();
    PageInfo {
        url: source.url,
        path: source.path,
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
