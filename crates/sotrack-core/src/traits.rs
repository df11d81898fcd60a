use std::future::Future;

use crate::error::AppError;
use crate::models::PageInfo;

/// Performs one HTTP GET and decodes the body as JSON.
///
/// Implementations must fail with [`AppError::HttpStatusError`] for any
/// status outside the 2xx range and must not retry.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<serde_json::Value, AppError>> + Send;
}

/// Sends a finished page-info record to the collector.
pub trait Submitter: Send + Sync + Clone {
    /// Single attempt. A non-2xx reply is an [`AppError::SubmissionError`].
    fn submit(&self, page_info: &PageInfo) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// A Submitter that accepts everything, for dry runs.
#[derive(Debug, Clone)]
pub struct NullSubmitter;

impl Submitter for NullSubmitter {
    async fn submit(&self, _page_info: &PageInfo) -> Result<(), AppError> {
        Ok(())
    }
}
