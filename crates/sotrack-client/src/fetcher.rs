use std::time::Duration;

use reqwest::{Client, Response};
use sotrack_core::error::AppError;
use sotrack_core::traits::Fetcher;

pub(crate) const USER_AGENT: &str = "sotrack/0.1 (Stack Overflow Tracker)";

/// JSON fetcher using reqwest.
///
/// Issues a single GET per call, requires a 2xx status and decodes the body
/// as JSON. Responses are gzip-decoded transparently (the Stack Exchange API
/// always compresses).
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatusError {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                url: url.to_string(),
                body: read_body(response).await,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))?;

        serde_json::from_slice(&body)
            .map_err(|e| AppError::MalformedResource(format!("{url} did not return JSON: {e}")))
    }
}

/// Classify a reqwest failure that happened before a status was available.
pub(crate) fn transport_error(e: reqwest::Error, timeout_secs: u64) -> AppError {
    if e.is_timeout() {
        AppError::Timeout(timeout_secs)
    } else if e.is_connect() {
        AppError::NetworkError(format!("Connection failed: {e}"))
    } else {
        AppError::HttpError(e.to_string())
    }
}

/// Best-effort body text for error reports.
pub(crate) async fn read_body(response: Response) -> String {
    response.text().await.unwrap_or_default()
}
