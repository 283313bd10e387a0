//! Blocking Ollama readiness probe and model warm-up.
//!
//! Used once at process start to decide whether the abstractive model is usable:
//! - Check whether Ollama is reachable via `GET /api/version`.
//! - Warm up the configured model via `POST /api/generate` so the first real
//!   request does not pay the load cost.
//!
//! Must run outside the async runtime (blocking HTTP client).

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default Ollama API base URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Warm-up prompt: minimal non-empty prompt.
const WARMUP_PROMPT: &str = " ";
/// Warm-up token budget.
const WARMUP_NUM_PREDICT: u32 = 1;

/// HTTP connect timeout.
const IO_TIMEOUT: Duration = Duration::from_secs(5);
/// HTTP client timeout; a cold model load can take a while.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors produced by the probe.
#[derive(Debug)]
pub enum ProbeError {
    /// Ollama answered `/api/version` with a non-success status.
    NotReady(u16),
    /// HTTP response was not a success.
    HttpStatusNotOk(u16),
    /// HTTP client error when using the blocking client.
    HttpClient(reqwest::Error),
}

impl From<reqwest::Error> for ProbeError {
    fn from(value: reqwest::Error) -> Self {
        Self::HttpClient(value)
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady(status) => write!(f, "ollama not ready (status {status})"),
            Self::HttpStatusNotOk(status) => write!(f, "ollama http status not ok: {status}"),
            Self::HttpClient(err) => write!(f, "http client error: {err}"),
        }
    }
}

impl std::error::Error for ProbeError {}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    keep_alive: &'a str,
    options: GenerateOptions,
}

#[derive(Deserialize)]
struct VersionResponse {
    version: Option<String>,
}

/// Blocking client for checking Ollama and preloading a model.
pub struct OllamaProbe {
    client: Client,
    base_url: String,
}

impl OllamaProbe {
    /// Create a probe for `base_url`, or the local default when `None`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Option<&str>) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .connect_timeout(IO_TIMEOUT)
            .timeout(CLIENT_TIMEOUT)
            .build()?;
        let base_url = base_url
            .unwrap_or(DEFAULT_OLLAMA_URL)
            .trim_end_matches('/')
            .to_string();
        Ok(Self { client, base_url })
    }

    /// Base URL this probe talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that Ollama answers and return its reported version.
    ///
    /// # Errors
    /// Returns an error if Ollama cannot be reached or answers with an error status.
    pub fn version(&self) -> Result<String, ProbeError> {
        let url = format!("{}/api/version", self.base_url);
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::NotReady(status.as_u16()));
        }

        let body = response.json::<VersionResponse>()?;
        Ok(body.version.unwrap_or_else(|| "unknown".to_string()))
    }

    /// Load `model` into memory and keep it resident for `keep_alive`.
    ///
    /// # Errors
    /// Returns an error if the warm-up request fails (e.g. the model is not pulled).
    pub fn warm_up(&self, model: &str, keep_alive: &str) -> Result<(), ProbeError> {
        let request = GenerateRequest {
            model,
            prompt: WARMUP_PROMPT,
            stream: false,
            keep_alive,
            options: GenerateOptions {
                num_predict: WARMUP_NUM_PREDICT,
            },
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = self.client.post(&url).json(&request).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::HttpStatusNotOk(status.as_u16()));
        }

        Ok(())
    }
}
