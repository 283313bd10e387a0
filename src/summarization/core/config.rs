//! Configuration for the summarization service.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::summarization::core::errors::{SummarizeError, SummarizeResult};
use crate::summarization::extractive::summarizer::DEFAULT_NUM_SENTENCES;

/// Environment variable for the listening port.
const PORT_ENV: &str = "SUMMARIZER_PORT";
/// Fallback environment variable for the listening port.
const PORT_FALLBACK_ENV: &str = "PORT";
/// Environment variable for the abstractive model name.
const MODEL_ENV: &str = "SUMMARIZER_MODEL";
/// Environment variable for a custom Ollama URL (e.g. "http://10.0.0.5:11434").
const OLLAMA_URL_ENV: &str = "SUMMARIZER_OLLAMA_URL";
/// Environment variable that turns the abstractive path off.
const DISABLE_MODEL_ENV: &str = "SUMMARIZER_DISABLE_MODEL";
/// Environment variable for the input truncation limit.
const MAX_INPUT_CHARS_ENV: &str = "SUMMARIZER_MAX_INPUT_CHARS";
/// Environment variable for the extractive summary size.
const NUM_SENTENCES_ENV: &str = "SUMMARIZER_NUM_SENTENCES";

/// Top-level configuration for the service.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Summarization pipeline settings.
    pub summary: SummaryConfig,
    /// Abstractive model settings.
    pub model: ModelConfig,
}

impl SummarizerConfig {
    /// Build the configuration from defaults plus process environment overrides.
    ///
    /// # Errors
    /// Returns an error if an override cannot be parsed or the result is invalid.
    pub fn from_env() -> SummarizeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from defaults plus overrides returned by `lookup`.
    ///
    /// # Errors
    /// Returns an error if an override cannot be parsed or the result is invalid.
    pub fn from_lookup<F>(lookup: F) -> SummarizeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let port = lookup(PORT_ENV)
            .map(|value| (PORT_ENV, value))
            .or_else(|| lookup(PORT_FALLBACK_ENV).map(|value| (PORT_FALLBACK_ENV, value)));
        if let Some((key, port)) = port {
            config.server.port = parse_number(key, &port)?;
        }
        if let Some(name) = lookup(MODEL_ENV) {
            config.model.name = name;
        }
        if let Some(base_url) = lookup(OLLAMA_URL_ENV) {
            config.model.base_url = Some(base_url);
        }
        if let Some(flag) = lookup(DISABLE_MODEL_ENV) {
            config.model.enabled = !matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(limit) = lookup(MAX_INPUT_CHARS_ENV) {
            config.summary.max_input_chars = parse_number(MAX_INPUT_CHARS_ENV, &limit)?;
        }
        if let Some(count) = lookup(NUM_SENTENCES_ENV) {
            config.summary.num_sentences = parse_number(NUM_SENTENCES_ENV, &count)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> SummarizeResult<()> {
        if self.summary.num_sentences == 0 {
            return Err(SummarizeError::InvalidConfig(
                "summary.num_sentences must be > 0".to_string(),
            ));
        }

        if self.summary.max_input_chars == 0 {
            return Err(SummarizeError::InvalidConfig(
                "summary.max_input_chars must be > 0".to_string(),
            ));
        }

        if self.model.max_length == 0 {
            return Err(SummarizeError::InvalidConfig(
                "model.max_length must be > 0".to_string(),
            ));
        }

        if self.model.min_length > self.model.max_length {
            return Err(SummarizeError::InvalidConfig(format!(
                "model.min_length ({}) must not exceed model.max_length ({})",
                self.model.min_length, self.model.max_length
            )));
        }

        if let Some(base_url) = &self.model.base_url {
            Url::parse(base_url)?;
        }

        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> SummarizeResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| SummarizeError::InvalidConfig(format!("{key} must be a number, got {raw:?}")))
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

/// Summarization pipeline settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Formatted documents longer than this many characters are cut to this prefix.
    pub max_input_chars: usize,
    /// Number of sentences kept by the extractive summarizer.
    pub num_sentences: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 1024,
            num_sentences: DEFAULT_NUM_SENTENCES,
        }
    }
}

/// Abstractive model settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Whether to try loading the abstractive model at all.
    pub enabled: bool,
    /// Ollama model name.
    pub name: String,
    /// Optional custom base URL.
    pub base_url: Option<String>,
    /// Upper bound on the generated summary length.
    pub max_length: u32,
    /// Lower bound on the generated summary length.
    pub min_length: u32,
    /// How long Ollama keeps the model resident after the warm-up.
    pub keep_alive: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "mistral:7b-instruct-q8_0".to_string(),
            base_url: None,
            max_length: 150,
            min_length: 30,
            keep_alive: "1h".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = SummarizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.summary.max_input_chars, 1024);
        assert_eq!(config.summary.num_sentences, 5);
        assert_eq!(config.model.max_length, 150);
        assert_eq!(config.model.min_length, 30);
    }

    #[test]
    fn test_env_overrides() {
        let config = SummarizerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("SUMMARIZER_MODEL", "llama3"),
            ("SUMMARIZER_OLLAMA_URL", "http://10.0.0.5:11434"),
            ("SUMMARIZER_DISABLE_MODEL", "true"),
            ("SUMMARIZER_NUM_SENTENCES", "3"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.model.name, "llama3");
        assert_eq!(config.model.base_url.as_deref(), Some("http://10.0.0.5:11434"));
        assert!(!config.model.enabled);
        assert_eq!(config.summary.num_sentences, 3);
    }

    #[test]
    fn test_specific_port_wins_over_generic() {
        let config =
            SummarizerConfig::from_lookup(lookup_from(&[("PORT", "8080"), ("SUMMARIZER_PORT", "9090")]))
                .unwrap();
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let err = SummarizerConfig::from_lookup(lookup_from(&[("SUMMARIZER_MAX_INPUT_CHARS", "lots")]))
            .unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidConfig(_)));
    }

    #[test]
    fn test_bad_port_names_its_variable() {
        let err = SummarizerConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PORT must be a number"));
        assert!(!err.to_string().contains("SUMMARIZER_PORT"));

        let err =
            SummarizerConfig::from_lookup(lookup_from(&[("SUMMARIZER_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("SUMMARIZER_PORT must be a number"));
    }

    #[test]
    fn test_zero_sentences_is_rejected() {
        let err = SummarizerConfig::from_lookup(lookup_from(&[("SUMMARIZER_NUM_SENTENCES", "0")]))
            .unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidConfig(_)));
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let mut config = SummarizerConfig::default();
        config.model.min_length = 200;
        assert!(matches!(config.validate(), Err(SummarizeError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let mut config = SummarizerConfig::default();
        config.model.base_url = Some("not a url".to_string());
        assert!(matches!(config.validate(), Err(SummarizeError::Url(_))));
    }
}
