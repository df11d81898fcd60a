use thiserror::Error;

/// Application-wide error types for sotrack.
#[derive(Error, Debug)]
pub enum AppError {
    /// An upstream read endpoint answered outside the 2xx range.
    #[error("HTTP {status} {status_text} for {url}")]
    HttpStatusError {
        status: u16,
        status_text: String,
        url: String,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The question or answers collection came back empty.
    #[error("No {resource} returned by the API")]
    EmptyResultError { resource: String },

    /// An upstream resource is missing fields or is not the expected shape.
    #[error("Malformed resource: {0}")]
    MalformedResource(String),

    /// A page-info record does not match the collector schema.
    #[error("Schema validation failed for fields: {}", .violations.join(", "))]
    SchemaError { violations: Vec<String> },

    /// The collector rejected the submission.
    #[error("Submission rejected (HTTP {status}): {response}")]
    SubmissionError { status: u16, response: String },

    /// Request failed before any response was received.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Field names a [`AppError::SchemaError`] reported, empty for other kinds.
    pub fn violations(&self) -> &[String] {
        match self {
            AppError::SchemaError { violations } => violations,
            _ => &[],
        }
    }
}
