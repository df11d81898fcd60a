use crate::answers::resolve_answers;
use crate::api::ApiConfig;
use crate::error::AppError;
use crate::models::{BestAnswer, PageInfo, PageSource, QuestionDetails, seconds_to_millis};
use crate::question::resolve_question;
use crate::traits::Fetcher;

/// Runs the question and answer lookups concurrently and merges them into
/// one [`PageInfo`].
#[derive(Clone)]
pub struct Aggregator<F: Fetcher> {
    fetcher: F,
    api: ApiConfig,
}

impl<F: Fetcher> Aggregator<F> {
    pub fn new(fetcher: F, api: ApiConfig) -> Self {
        Self { fetcher, api }
    }

    /// Resolve both resources for `source.question_id`.
    ///
    /// The first lookup to fail aborts the aggregation with its error; the
    /// other lookup is dropped.
    pub async fn aggregate(&self, source: &PageSource) -> Result<PageInfo, AppError> {
        let question_id = source.question_id;
        let (question, answer) = tokio::try_join!(
            resolve_question(&self.fetcher, &self.api, question_id),
            resolve_answers(&self.fetcher, &self.api, question_id),
        )?;

        tracing::debug!(
            question_id,
            quota_remaining = question.quota_remaining.min(answer.quota_remaining),
            "Resolved question and answers"
        );

        Ok(merge(source, question, answer))
    }
}

/// Combine both partial records. Creation dates go from seconds to
/// milliseconds here and nowhere else.
fn merge(source: &PageSource, question: QuestionDetails, answer: BestAnswer) -> PageInfo {
    PageInfo {
        url: source.url.clone(),
        path: source.path.clone(),
        question_id: source.question_id,
        title: question.title,
        question: question.body,
        creation_date: seconds_to_millis(question.creation_date),
        tags: question.tags,
        best_answer_id: answer.answer_id,
        best_answer: answer.body,
        best_answer_creation_date: seconds_to_millis(answer.creation_date),
        best_answer_score: answer.score,
    }
}
