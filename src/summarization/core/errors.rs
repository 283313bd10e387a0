//! Error types for the summarization pipeline.

use thiserror::Error;

/// Summarization error type.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Missing or empty conversation input; reported to the caller as a client error.
    #[error("{0}")]
    Validation(String),
    /// Sentence or word splitting failed.
    #[error("tokenization error: {0}")]
    Tokenization(String),
    /// The abstractive model failed while generating a summary.
    #[error("model inference failed: {0}")]
    ModelInference(String),
    /// The abstractive model could not be loaded.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// HTTP client error from Rig.
    #[error("http client error: {0}")]
    HttpClient(#[from] rig::http_client::Error),
    /// Completion error.
    #[error("completion error: {0}")]
    Completion(#[from] rig::completion::CompletionError),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl SummarizeError {
    /// Whether the error is the caller's fault rather than the server's.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Convenience result alias for summarization operations.
pub type SummarizeResult<T> = Result<T, SummarizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_client_error() {
        let err = SummarizeError::Validation("Empty conversation".to_string());
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Empty conversation");
    }

    #[test]
    fn test_other_errors_are_server_errors() {
        assert!(!SummarizeError::Tokenization("bad".to_string()).is_client_error());
        assert!(!SummarizeError::ModelInference("boom".to_string()).is_client_error());
        assert!(!SummarizeError::ModelUnavailable("offline".to_string()).is_client_error());
    }
}
