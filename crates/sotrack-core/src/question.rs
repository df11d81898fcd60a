use crate::api::{ApiConfig, check_quota, parse_response};
use crate::error::AppError;
use crate::models::{QuestionDetails, QuestionItem};
use crate::traits::Fetcher;

/// Fetch the question resource and pull out its page-info fields.
///
/// The creation date is left in epoch seconds. Fails with
/// [`AppError::EmptyResultError`] when the API knows no such question.
pub async fn resolve_question<F: Fetcher>(
    fetcher: &F,
    api: &ApiConfig,
    question_id: u64,
) -> Result<QuestionDetails, AppError> {
    let url = api.question_url(question_id);
    tracing::debug!(%url, "Fetching question");

    let response = parse_response::<QuestionItem>(fetcher.fetch(&url).await?, "question")?;
    check_quota(response.quota_remaining, "question");

    let question = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| AppError::EmptyResultError {
            resource: "question".to_string(),
        })?;

    Ok(QuestionDetails {
        title: question.title,
        body: question.body,
        creation_date: question.creation_date,
        tags: question.tags,
        quota_remaining: response.quota_remaining,
    })
}
