use serde::{Deserialize, Serialize};

/// Where a page-info record comes from: supplied by the hosting environment,
/// never computed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    /// Full page URL, e.g. `https://stackoverflow.com/questions/7222449/slug`
    pub url: String,
    /// URL path component, e.g. `/questions/7222449/slug`
    pub path: String,
    pub question_id: u64,
}

/// The aggregated record sent to the collector.
///
/// Both creation dates are epoch **milliseconds**. The Stack Exchange API
/// reports seconds; the conversion happens once, in the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub url: String,
    pub path: String,
    pub question_id: u64,
    pub title: String,
    /// Question body markup
    pub question: String,
    pub creation_date: i64,
    pub tags: Vec<String>,
    pub best_answer_id: u64,
    /// Best answer body markup
    pub best_answer: String,
    pub best_answer_creation_date: i64,
    pub best_answer_score: i64,
}

/// Partial record produced by the question resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDetails {
    pub title: String,
    pub body: String,
    /// Epoch seconds, as reported upstream
    pub creation_date: i64,
    pub tags: Vec<String>,
    pub quota_remaining: u32,
}

/// Partial record produced by the answer resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestAnswer {
    pub answer_id: u64,
    pub body: String,
    /// Epoch seconds, as reported upstream
    pub creation_date: i64,
    pub score: i64,
    pub quota_remaining: u32,
}

// ---- Stack Exchange API types ----

/// Common wrapper around every Stack Exchange API collection.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub items: Vec<T>,
    pub quota_remaining: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionItem {
    pub title: String,
    pub body: String,
    pub creation_date: i64,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerItem {
    pub answer_id: u64,
    pub body: String,
    pub creation_date: i64,
    pub score: i64,
    #[serde(default)]
    pub is_accepted: bool,
}

/// Convert an epoch-seconds timestamp to epoch milliseconds.
pub fn seconds_to_millis(seconds: i64) -> i64 {
    seconds.saturating_mul(1000)
}
