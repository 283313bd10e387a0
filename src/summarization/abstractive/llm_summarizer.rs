//! Ollama-backed abstractive summarizer (Rig provider).

use reqwest::Client as ReqwestClient;
use rig::client::CompletionClient;
use rig::completion::CompletionModel;
use rig::message::AssistantContent;
use rig::providers::ollama;
use tracing::debug;

use crate::summarization::abstractive::adapter::{AbstractiveSummarizer, SummaryFuture};
use crate::summarization::core::config::ModelConfig;
use crate::summarization::core::errors::{SummarizeError, SummarizeResult};

/// Greedy decoding.
const TEMPERATURE: f64 = 0.0;

/// Abstractive summarizer backed by an Ollama completion model.
pub struct OllamaSummarizer {
    model: ollama::CompletionModel,
    name: String,
}

impl OllamaSummarizer {
    /// Create a summarizer for the configured model.
    ///
    /// # Errors
    /// Returns an error if the Ollama client cannot be built.
    pub fn new(config: &ModelConfig) -> SummarizeResult<Self> {
        let builder = ollama::Client::<ReqwestClient>::builder().api_key(rig::client::Nothing);
        let builder = if let Some(base_url) = &config.base_url {
            builder.base_url(base_url)
        } else {
            builder
        };
        let client = builder.build().map_err(SummarizeError::from)?;
        let model = client.completion_model(config.name.clone());

        Ok(Self {
            model,
            name: config.name.clone(),
        })
    }
}

impl AbstractiveSummarizer for OllamaSummarizer {
    fn summarize(
        &self,
        text: &str,
        max_length: u32,
        min_length: u32,
    ) -> SummaryFuture<'_, SummarizeResult<String>> {
        let prompt = format!("Summarize the following conversation:\n\n{text}");
        let preamble = summary_preamble(max_length, min_length);

        Box::pin(async move {
            debug!("Summarizing {} chars with {}", prompt.len(), self.name);

            let request = self
                .model
                .completion_request(prompt)
                .preamble(preamble)
                .temperature(TEMPERATURE)
                .max_tokens_opt(Some(u64::from(max_length)))
                .build();

            let response = self.model.completion(request).await?;
            let summary = extract_text(&response.choice);
            if summary.trim().is_empty() {
                return Err(SummarizeError::ModelInference(
                    "model returned no text".to_string(),
                ));
            }
            Ok(summary.trim().to_string())
        })
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}

/// System prompt stating the length bounds the model must respect.
fn summary_preamble(max_length: u32, min_length: u32) -> String {
    format!(
        "You summarize conversations. Write a single plain-text paragraph of at least \
         {min_length} and at most {max_length} words. Report only what the conversation \
         says; do not add commentary, headings or bullet points."
    )
}

/// Extract text from assistant response.
fn extract_text(choice: &rig::OneOrMany<AssistantContent>) -> String {
    let mut out = String::new();
    for content in choice.iter() {
        if let AssistantContent::Text(text) = content {
            out.push_str(&text.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_states_bounds() {
        let preamble = summary_preamble(150, 30);
        assert!(preamble.contains("at least 30"));
        assert!(preamble.contains("at most 150"));
    }

    #[test]
    fn test_new_uses_configured_name() {
        let config = ModelConfig {
            name: "llama3".to_string(),
            base_url: Some("http://127.0.0.1:11434".to_string()),
            ..ModelConfig::default()
        };
        let summarizer = OllamaSummarizer::new(&config).unwrap();
        assert_eq!(summarizer.model_name(), "llama3");
    }
}
