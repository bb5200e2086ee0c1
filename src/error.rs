//! Error types for tubeseo.

use thiserror::Error;

/// Library-level error type for tubeseo operations.
#[derive(Error, Debug)]
pub enum SeoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("YouTube API error ({status}{}): {message}", reason_suffix(.reason))]
    YoutubeApi {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("Page scrape failed: {0}")]
    Scrape(String),

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Language model error: {0}")]
    Llm(String),

    #[error("Result not found: {0}")]
    ResultNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SeoError {
    /// Whether this is a YouTube quota or rate-limit rejection.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(
            self,
            SeoError::YoutubeApi { reason: Some(reason), .. }
                if reason == "quotaExceeded" || reason == "rateLimitExceeded" || reason == "dailyLimitExceeded"
        )
    }
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(", {}", r)).unwrap_or_default()
}

/// Result type alias for tubeseo operations.
pub type Result<T> = std::result::Result<T, SeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_error_display() {
        let err = SeoError::YoutubeApi {
            status: 403,
            reason: Some("quotaExceeded".to_string()),
            message: "The request cannot be completed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "YouTube API error (403, quotaExceeded): The request cannot be completed"
        );
        assert!(err.is_quota_exceeded());

        let err = SeoError::YoutubeApi {
            status: 400,
            reason: None,
            message: "API key not valid".to_string(),
        };
        assert_eq!(err.to_string(), "YouTube API error (400): API key not valid");
        assert!(!err.is_quota_exceeded());
    }
}
