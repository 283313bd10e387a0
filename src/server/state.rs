//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::summarization::abstractive::loader::load_abstractive;
use crate::summarization::core::config::SummarizerConfig;
use crate::summarization::core::errors::SummarizeResult;
use crate::summarization::engine::SummarizationEngine;
use crate::summarization::extractive::analyzer::RuleBasedAnalyzer;

/// Shared application state.
pub struct AppState {
    /// Summarization engine; read-only after startup.
    pub engine: SummarizationEngine,
}

impl AppState {
    /// Wrap an already built engine.
    #[must_use]
    pub fn new(engine: SummarizationEngine) -> Arc<Self> {
        Arc::new(Self { engine })
    }

    /// Build the state from configuration: load the model (if any) and prepare the analyzer.
    ///
    /// Blocks while probing the model; call before starting the async runtime.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the analyzer cannot be prepared.
    pub fn from_config(config: &SummarizerConfig) -> SummarizeResult<Arc<Self>> {
        let analyzer = Arc::new(RuleBasedAnalyzer::new()?);
        let abstractive = load_abstractive(&config.model);
        let engine = SummarizationEngine::new(config, analyzer, abstractive)?;
        Ok(Self::new(engine))
    }
}
