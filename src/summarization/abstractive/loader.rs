//! Startup-time loading of the abstractive model.

use std::sync::Arc;

use tracing::{error, info};

use crate::llm::ollama_probe::OllamaProbe;
use crate::summarization::abstractive::adapter::AbstractiveSummarizer;
use crate::summarization::abstractive::llm_summarizer::OllamaSummarizer;
use crate::summarization::core::config::ModelConfig;
use crate::summarization::core::errors::{SummarizeError, SummarizeResult};

/// Load the abstractive model, or report its absence.
///
/// Returns `None` when the model is disabled by configuration or cannot be
/// reached and warmed up; the process then runs extractive-only for its whole
/// lifetime. Blocks on HTTP: call before starting the async runtime.
#[must_use]
pub fn load_abstractive(config: &ModelConfig) -> Option<Arc<dyn AbstractiveSummarizer>> {
    if !config.enabled {
        info!("Abstractive model disabled by configuration");
        return None;
    }

    info!("Loading model: {}", config.name);
    match try_load(config) {
        Ok(summarizer) => {
            info!("Model loaded successfully");
            Some(summarizer)
        }
        Err(err) => {
            error!("Error loading model: {err}");
            None
        }
    }
}

fn try_load(config: &ModelConfig) -> SummarizeResult<Arc<dyn AbstractiveSummarizer>> {
    let probe = OllamaProbe::new(config.base_url.as_deref())
        .map_err(|err| SummarizeError::ModelUnavailable(err.to_string()))?;

    let version = probe
        .version()
        .map_err(|err| SummarizeError::ModelUnavailable(format!("{}: {err}", probe.base_url())))?;
    info!("Ollama {version} reachable at {}", probe.base_url());

    probe
        .warm_up(&config.name, &config.keep_alive)
        .map_err(|err| SummarizeError::ModelUnavailable(format!("{}: {err}", config.name)))?;

    Ok(Arc::new(OllamaSummarizer::new(config)?))
}
