//! Seam between the orchestrator and any abstractive summarization model.

use std::future::Future;
use std::pin::Pin;

use tracing::error;

use crate::summarization::core::errors::SummarizeResult;

/// Boxed future type for abstractive summarizer operations.
pub type SummaryFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait abstraction over pretrained summarization models.
///
/// Implementations are loaded once and shared read-only across requests.
pub trait AbstractiveSummarizer: Send + Sync {
    /// Generate a summary of `text` between `min_length` and `max_length` tokens.
    /// Generation is deterministic (no sampling).
    ///
    /// # Errors
    /// Returns an error if inference fails or the model output is unusable.
    fn summarize(
        &self,
        text: &str,
        max_length: u32,
        min_length: u32,
    ) -> SummaryFuture<'_, SummarizeResult<String>>;

    /// Name of the underlying model.
    fn model_name(&self) -> &str;
}

/// Outcome of one abstractive attempt, as seen by the orchestrator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AbstractiveOutcome {
    /// The model produced a usable summary.
    Summary(String),
    /// The model failed; the caller should summarize extractively.
    Fallback {
        /// Why the attempt failed.
        reason: String,
    },
}

/// Run the model once and turn any failure into a fallback signal. No retries.
pub async fn attempt_abstractive(
    summarizer: &dyn AbstractiveSummarizer,
    text: &str,
    max_length: u32,
    min_length: u32,
) -> AbstractiveOutcome {
    match summarizer.summarize(text, max_length, min_length).await {
        Ok(summary) if !summary.trim().is_empty() => {
            AbstractiveOutcome::Summary(summary.trim().to_string())
        }
        Ok(_) => {
            error!("Model {} returned an empty summary", summarizer.model_name());
            AbstractiveOutcome::Fallback {
                reason: "model returned an empty summary".to_string(),
            }
        }
        Err(err) => {
            error!("Error during summarization with {}: {err}", summarizer.model_name());
            AbstractiveOutcome::Fallback {
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarization::core::errors::SummarizeError;

    struct Fixed(&'static str);

    impl AbstractiveSummarizer for Fixed {
        fn summarize(&self, _: &str, _: u32, _: u32) -> SummaryFuture<'_, SummarizeResult<String>> {
            let out = self.0.to_string();
            Box::pin(async move { Ok(out) })
        }
        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    struct Failing;

    impl AbstractiveSummarizer for Failing {
        fn summarize(&self, _: &str, _: u32, _: u32) -> SummaryFuture<'_, SummarizeResult<String>> {
            Box::pin(async { Err(SummarizeError::ModelInference("out of memory".to_string())) })
        }
        fn model_name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_success_is_trimmed() {
        let outcome = attempt_abstractive(&Fixed("  A short recap. \n"), "text", 150, 30).await;
        assert_eq!(outcome, AbstractiveOutcome::Summary("A short recap.".to_string()));
    }

    #[tokio::test]
    async fn test_error_becomes_fallback() {
        let outcome = attempt_abstractive(&Failing, "text", 150, 30).await;
        assert_eq!(
            outcome,
            AbstractiveOutcome::Fallback {
                reason: "model inference failed: out of memory".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_blank_output_becomes_fallback() {
        let outcome = attempt_abstractive(&Fixed("   "), "text", 150, 30).await;
        assert!(matches!(outcome, AbstractiveOutcome::Fallback { .. }));
    }
}
