//! Summarization orchestration: format, truncate, pick a summarizer, label the result.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::summarization::abstractive::adapter::{
    AbstractiveOutcome, AbstractiveSummarizer, attempt_abstractive,
};
use crate::summarization::core::config::{ModelConfig, SummarizerConfig, SummaryConfig};
use crate::summarization::core::errors::{SummarizeError, SummarizeResult};
use crate::summarization::core::message::{SummaryMethod, SummaryResult};
use crate::summarization::extractive::analyzer::TextAnalyzer;
use crate::summarization::extractive::summarizer::ExtractiveSummarizer;
use crate::summarization::format::conversation::format_conversation;

/// Request payload field holding the message list.
const CONVERSATION_FIELD: &str = "conversation";

/// Chooses between the abstractive model and extractive ranking for each request.
///
/// Holds no per-request state; one instance is shared by all handlers.
pub struct SummarizationEngine {
    summary: SummaryConfig,
    model: ModelConfig,
    extractive: ExtractiveSummarizer,
    abstractive: Option<Arc<dyn AbstractiveSummarizer>>,
}

impl SummarizationEngine {
    /// Create an engine. `abstractive` is `None` when no model loaded at startup.
    ///
    /// Runs the analyzer's readiness check once, here.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the analyzer is not usable.
    pub fn new(
        config: &SummarizerConfig,
        analyzer: Arc<dyn TextAnalyzer>,
        abstractive: Option<Arc<dyn AbstractiveSummarizer>>,
    ) -> SummarizeResult<Self> {
        config.validate()?;
        analyzer.ensure_ready()?;

        Ok(Self {
            summary: config.summary.clone(),
            model: config.model.clone(),
            extractive: ExtractiveSummarizer::new(analyzer),
            abstractive,
        })
    }

    /// Whether an abstractive model is available for this process.
    #[must_use]
    pub const fn model_loaded(&self) -> bool {
        self.abstractive.is_some()
    }

    /// Name of the configured abstractive model.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.abstractive
            .as_ref()
            .map_or(self.model.name.as_str(), |model| model.model_name())
    }

    /// Summarize the `conversation` array of a request payload.
    ///
    /// # Errors
    /// Returns a validation error if the conversation is missing, not an array, empty,
    /// or has no renderable messages; a tokenization error if extractive splitting fails.
    pub async fn generate_summary(&self, payload: &Value) -> SummarizeResult<SummaryResult> {
        let conversation = match payload.get(CONVERSATION_FIELD) {
            None | Some(Value::Null) => {
                return Err(SummarizeError::Validation(
                    "No conversation data provided".to_string(),
                ));
            }
            Some(Value::Array(messages)) => messages,
            Some(_) => {
                return Err(SummarizeError::Validation(
                    "Conversation must be an array of messages".to_string(),
                ));
            }
        };

        info!("Received request with {} messages", conversation.len());
        self.summarize_conversation(conversation).await
    }

    /// Summarize a list of raw message records.
    ///
    /// # Errors
    /// Returns a validation error if there is nothing to summarize; a tokenization
    /// error if extractive splitting fails.
    pub async fn summarize_conversation(&self, conversation: &[Value]) -> SummarizeResult<SummaryResult> {
        if conversation.is_empty() {
            return Err(SummarizeError::Validation("Empty conversation".to_string()));
        }

        let document = format_conversation(conversation);
        info!("Formatted text length: {}", document.chars().count());
        if document.is_empty() {
            return Err(SummarizeError::Validation(
                "Empty conversation: no message has both a role and content".to_string(),
            ));
        }

        self.summarize_document(&document).await
    }

    /// Summarize an already formatted document.
    ///
    /// # Errors
    /// Returns a tokenization error if extractive splitting fails.
    pub async fn summarize_document(&self, document: &str) -> SummarizeResult<SummaryResult> {
        let text = truncate_chars(document, self.summary.max_input_chars);
        if text.len() < document.len() {
            warn!(
                "Input text too long ({} chars), truncating to {}",
                document.chars().count(),
                self.summary.max_input_chars
            );
        }

        let Some(model) = &self.abstractive else {
            warn!("Model not available, using extractive summarization");
            let summary = self.extractive.summarize(text, self.summary.num_sentences)?;
            return Ok(SummaryResult::new(summary, SummaryMethod::Extractive));
        };

        let outcome = attempt_abstractive(
            model.as_ref(),
            text,
            self.model.max_length,
            self.model.min_length,
        )
        .await;

        match outcome {
            AbstractiveOutcome::Summary(summary) => {
                info!("Summary generated: {} chars", summary.chars().count());
                Ok(SummaryResult::new(summary, SummaryMethod::Model))
            }
            AbstractiveOutcome::Fallback { reason } => {
                warn!("Falling back to extractive summarization: {reason}");
                let summary = self.extractive.summarize(text, self.summary.num_sentences)?;
                Ok(SummaryResult::new(summary, SummaryMethod::ExtractiveFallback))
            }
        }
    }
}

/// Longest prefix of `text` with at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarization::abstractive::adapter::SummaryFuture;
    use crate::summarization::extractive::analyzer::RuleBasedAnalyzer;
    use serde_json::json;
    use std::sync::Mutex;

    struct EchoModel {
        seen: Mutex<Vec<String>>,
    }

    impl EchoModel {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl AbstractiveSummarizer for EchoModel {
        fn summarize(&self, text: &str, _: u32, _: u32) -> SummaryFuture<'_, SummarizeResult<String>> {
            self.seen.lock().unwrap().push(text.to_string());
            Box::pin(async { Ok("A model summary.".to_string()) })
        }
        fn model_name(&self) -> &str {
            "echo"
        }
    }

    struct BrokenModel;

    impl AbstractiveSummarizer for BrokenModel {
        fn summarize(&self, _: &str, _: u32, _: u32) -> SummaryFuture<'_, SummarizeResult<String>> {
            Box::pin(async { Err(SummarizeError::ModelInference("timeout".to_string())) })
        }
        fn model_name(&self) -> &str {
            "broken"
        }
    }

    fn engine(abstractive: Option<Arc<dyn AbstractiveSummarizer>>) -> SummarizationEngine {
        SummarizationEngine::new(
            &SummarizerConfig::default(),
            Arc::new(RuleBasedAnalyzer::new().unwrap()),
            abstractive,
        )
        .unwrap()
    }

    fn with_model(model: Arc<dyn AbstractiveSummarizer>) -> SummarizationEngine {
        engine(Some(model))
    }

    fn hello_payload() -> Value {
        json!({"conversation": [
            {"role": "user", "content": "Hi"},
            {"role": "assistant", "content": "Hello"}
        ]})
    }

    #[tokio::test]
    async fn test_extractive_when_model_never_loaded() {
        let result = engine(None).generate_summary(&hello_payload()).await.unwrap();
        assert_eq!(result.summary, "User: Hi\n\nAssistant: Hello");
        assert_eq!(result.method, SummaryMethod::Extractive);
    }

    #[tokio::test]
    async fn test_model_success_has_model_method() {
        let result = with_model(Arc::new(EchoModel::new()))
            .generate_summary(&hello_payload())
            .await
            .unwrap();
        assert_eq!(result.summary, "A model summary.");
        assert_eq!(result.method, SummaryMethod::Model);
    }

    #[tokio::test]
    async fn test_failing_model_always_falls_back() {
        let engine = with_model(Arc::new(BrokenModel));
        for _ in 0..3 {
            let result = engine.generate_summary(&hello_payload()).await.unwrap();
            assert_eq!(result.method, SummaryMethod::ExtractiveFallback);
            assert_eq!(result.summary, "User: Hi\n\nAssistant: Hello");
        }
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let engine = engine(None);
        let payload = json!({"conversation": [
            {"role": "user", "content": "Tell me about Rust. Why is it safe? Who uses it?"},
            {"role": "assistant", "content": "Rust is a systems language. Its ownership model makes Rust safe. \
                Many companies use Rust. Rust has a package manager called Cargo. \
                The Rust compiler catches memory bugs. Rust is fast."}
        ]});
        let first = engine.generate_summary(&payload).await.unwrap();
        let second = engine.generate_summary(&payload).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.method, SummaryMethod::Extractive);
    }

    #[tokio::test]
    async fn test_missing_conversation_is_validation_error() {
        let err = engine(None).generate_summary(&json!({})).await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "No conversation data provided");

        let err = engine(None)
            .generate_summary(&json!({"conversation": null}))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_empty_conversation_is_validation_error() {
        let err = engine(None)
            .generate_summary(&json!({"conversation": []}))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Empty conversation");
    }

    #[tokio::test]
    async fn test_non_array_conversation_is_validation_error() {
        let err = engine(None)
            .generate_summary(&json!({"conversation": "hello"}))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_unrenderable_messages_are_validation_error() {
        let payload = json!({"conversation": [{"role": "user"}, {"text": "no fields"}]});
        let err = engine(None).generate_summary(&payload).await.unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_model_never_sees_more_than_limit() {
        let model = Arc::new(EchoModel::new());
        let engine = with_model(model.clone());
        let document = "a".repeat(2000);

        engine.summarize_document(&document).await.unwrap();

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].chars().count(), 1024);
    }

    #[tokio::test]
    async fn test_extractive_summary_ignores_text_past_limit() {
        let filler = "Filler words keep going here. ".repeat(40);
        let document = format!("{filler}UNIQUEMARKER appears late.");
        assert!(document.chars().count() > 1024);

        let result = engine(None).summarize_document(&document).await.unwrap();
        assert!(!result.summary.contains("UNIQUEMARKER"));
        assert_eq!(result.method, SummaryMethod::Extractive);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars(&"x".repeat(2000), 1024).len(), 1024);
    }

    #[test]
    fn test_model_name_and_availability() {
        let without = engine(None);
        assert!(!without.model_loaded());
        assert_eq!(without.model_name(), ModelConfig::default().name);

        let with = with_model(Arc::new(BrokenModel));
        assert!(with.model_loaded());
        assert_eq!(with.model_name(), "broken");
    }
}
