use crate::api::{ApiConfig, check_quota, parse_response};
use crate::error::AppError;
use crate::models::{AnswerItem, BestAnswer};
use crate::traits::Fetcher;

/// Pick the best answer out of a collection in server order.
///
/// The first accepted answer wins outright and stops the scan. Otherwise the
/// highest score wins, and on equal scores the earliest one is kept.
/// Returns `None` for an empty collection.
pub fn select_best_answer(answers: &[AnswerItem]) -> Option<usize> {
    let first = answers.first()?;
    let mut max_score = first.score;
    let mut max_index = 0;

    for (i, answer) in answers.iter().enumerate() {
        if max_score < answer.score {
            max_score = answer.score;
            max_index = i;
        }
        if answer.is_accepted {
            return Some(i);
        }
    }

    Some(max_index)
}

/// Fetch the answers collection and keep only the best answer.
///
/// The creation date is left in epoch seconds. A question without answers
/// fails with [`AppError::EmptyResultError`].
pub async fn resolve_answers<F: Fetcher>(
    fetcher: &F,
    api: &ApiConfig,
    question_id: u64,
) -> Result<BestAnswer, AppError> {
    let url = api.answers_url(question_id);
    tracing::debug!(%url, "Fetching answers");

    let response = parse_response::<AnswerItem>(fetcher.fetch(&url).await?, "answers")?;
    check_quota(response.quota_remaining, "answers");

    let index = select_best_answer(&response.items).ok_or_else(|| AppError::EmptyResultError {
        resource: "answers".to_string(),
    })?;
    let total = response.items.len();
    let best = response.items.into_iter().nth(index).ok_or_else(|| {
        AppError::MalformedResource(format!("answer index {index} out of {total}"))
    })?;

    tracing::debug!(
        answer_id = best.answer_id,
        score = best.score,
        accepted = best.is_accepted,
        candidates = total,
        "Selected best answer"
    );

    Ok(BestAnswer {
        answer_id: best.answer_id,
        body: best.body,
        creation_date: best.creation_date,
        score: best.score,
        quota_remaining: response.quota_remaining,
    })
}
