use std::time::Duration;

use reqwest::Client;
use sotrack_core::error::AppError;
use sotrack_core::models::PageInfo;
use sotrack_core::traits::Submitter;

use crate::config::CollectorConfig;
use crate::fetcher::{USER_AGENT, read_body, transport_error};

/// Query parameter carrying the collector login token.
const LOGIN_PARAM: &str = "login";

/// Posts page-info records to the collector as JSON.
#[derive(Clone)]
pub struct HttpSubmitter {
    client: Client,
    config: CollectorConfig,
    timeout_secs: u64,
}

impl HttpSubmitter {
    pub fn new(config: CollectorConfig) -> Result<Self, AppError> {
        Self::with_timeout(config, Duration::from_secs(30))
    }

    pub fn with_timeout(config: CollectorConfig, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            timeout_secs: timeout.as_secs(),
        })
    }
}

impl Submitter for HttpSubmitter {
    async fn submit(&self, page_info: &PageInfo) -> Result<(), AppError> {
        tracing::debug!(collector = %self.config.url, "Submitting page info");

        let response = self
            .client
            .post(self.config.url.clone())
            .query(&[(LOGIN_PARAM, self.config.login_token.as_str())])
            .json(page_info)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::SubmissionError {
                status: status.as_u16(),
                response: read_body(response).await,
            });
        }

        Ok(())
    }
}
