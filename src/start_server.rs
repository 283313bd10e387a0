//! Startup helpers for the summarization server.

use std::process::ExitCode;
use std::sync::Arc;

use crate::server::{self, AppState};
use crate::summarization::core::config::SummarizerConfig;

/// Run the server (used by both binaries).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting conversation summarizer v{}", env!("CARGO_PKG_VERSION"));

    let (config, state) = match initialize() {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::run_server(state, config.server.port)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Read configuration and build application state without starting the server.
///
/// Probes the model over blocking HTTP, so it must run outside the async runtime.
///
/// # Errors
/// Returns an error if the configuration is invalid or state creation fails.
pub fn initialize() -> Result<(SummarizerConfig, Arc<AppState>), Box<dyn std::error::Error + Send + Sync>> {
    let config = SummarizerConfig::from_env().map_err(|e| format!("Invalid configuration: {e}"))?;
    match &config.model.base_url {
        Some(url) => tracing::info!("Ollama endpoint: {url}"),
        None => tracing::info!("Ollama endpoint: default"),
    }

    let state = AppState::from_config(&config).map_err(|e| format!("Failed to create state: {e}"))?;
    Ok((config, state))
}
