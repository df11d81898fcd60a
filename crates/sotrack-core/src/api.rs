//! Stack Exchange read endpoints.

use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::ApiResponse;

const DEFAULT_BASE_URL: &str = "https://api.stackexchange.com/2.2";
const DEFAULT_SITE: &str = "stackoverflow";

/// Filter that adds `body` to question and answer items.
const BODY_FILTER: &str = "withbody";

/// At or below this many remaining requests the API is about to throttle us.
pub const LOW_QUOTA_THRESHOLD: u32 = 1;

/// Base URL and site used to build the question and answers lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub site: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            site: DEFAULT_SITE.to_string(),
        }
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    /// `GET /questions/{id}` with bodies included.
    pub fn question_url(&self, question_id: u64) -> String {
        format!(
            "{}/questions/{}/?site={}&filter={}",
            self.base_url, question_id, self.site, BODY_FILTER
        )
    }

    /// `GET /questions/{id}/answers`, most recently active first.
    pub fn answers_url(&self, question_id: u64) -> String {
        format!(
            "{}/questions/{}/answers?order=desc&sort=activity&site={}&filter={}",
            self.base_url, question_id, self.site, BODY_FILTER
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Parse a decoded Stack Exchange response into its typed collection.
///
/// `resource` names the lookup in the error (`"question"`, `"answers"`).
pub fn parse_response<T: DeserializeOwned>(
    value: serde_json::Value,
    resource: &str,
) -> Result<ApiResponse<T>, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::MalformedResource(format!("{resource} response: {e}")))
}

/// Emit the advisory low-quota signal. Never fails.
pub fn check_quota(quota_remaining: u32, resource: &str) {
    if quota_remaining <= LOW_QUOTA_THRESHOLD {
        tracing::warn!(
            quota_remaining,
            resource,
            "Stack Exchange API quota nearly exhausted"
        );
    } else {
        tracing::debug!(quota_remaining, resource, "Stack Exchange API quota");
    }
}
