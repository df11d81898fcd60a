use sotrack_core::AppError;
use url::Url;

/// Where finished records are sent, and who is sending them.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub url: Url,
    /// Opaque token passed through as the `login` query parameter.
    pub login_token: String,
}

impl CollectorConfig {
    /// Validate and build a collector configuration.
    ///
    /// The URL must be absolute `http` or `https`; the token must be non-empty.
    pub fn new(url: &str, login_token: impl Into<String>) -> Result<Self, AppError> {
        let url = Url::parse(url)
            .map_err(|e| AppError::ConfigError(format!("Invalid collector URL '{url}': {e}")))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AppError::ConfigError(format!(
                    "Collector URL scheme '{scheme}' is not allowed (only http/https)"
                )));
            }
        }

        let login_token = login_token.into();
        if login_token.trim().is_empty() {
            return Err(AppError::ConfigError(
                "Collector login token must not be empty".into(),
            ));
        }

        Ok(Self { url, login_token })
    }
}
