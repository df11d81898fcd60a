use crate::aggregate::Aggregator;
use crate::api::ApiConfig;
use crate::error::AppError;
use crate::models::{PageInfo, PageSource};
use crate::traits::{Fetcher, Submitter};
use crate::validate::PageInfoValidator;

/// Orchestrates the page-info pipeline: resolve → merge → validate → submit.
///
/// Generic over the network via traits so the whole pipeline runs in tests
/// without real HTTP.
pub struct PageInfoService<F, S>
where
    F: Fetcher,
    S: Submitter,
{
    aggregator: Aggregator<F>,
    validator: PageInfoValidator,
    submitter: S,
}

impl<F, S> PageInfoService<F, S>
where
    F: Fetcher,
    S: Submitter,
{
    pub fn new(fetcher: F, api: ApiConfig, submitter: S) -> Result<Self, AppError> {
        Ok(Self {
            aggregator: Aggregator::new(fetcher, api),
            validator: PageInfoValidator::new()?,
            submitter,
        })
    }

    /// Build and validate the record for a page without submitting it.
    ///
    /// 1. Fetch question and answers concurrently
    /// 2. Merge into one record, timestamps in milliseconds
    /// 3. Validate against the collector schema
    pub async fn inspect(&self, source: &PageSource) -> Result<PageInfo, AppError> {
        // 1 & 2. Resolve + merge
        tracing::info!(question_id = source.question_id, "Resolving {}", source.url);
        let page_info = self.aggregator.aggregate(source).await?;
        tracing::info!(
            best_answer_id = page_info.best_answer_id,
            best_answer_score = page_info.best_answer_score,
            "Resolved \"{}\"",
            page_info.title
        );

        // 3. Validate
        self.validator.validate(&page_info)?;

        Ok(page_info)
    }

    /// Run the full pipeline once for a page: [`inspect`](Self::inspect),
    /// then submit.
    ///
    /// Any failure ends the run; nothing is submitted unless every earlier
    /// step succeeded.
    pub async fn track(&self, source: &PageSource) -> Result<PageInfo, AppError> {
        let page_info = self.inspect(source).await?;

        // 4. Submit
        self.submitter.submit(&page_info).await?;
        tracing::info!(question_id = page_info.question_id, "Submitted page info");

        Ok(page_info)
    }
}
