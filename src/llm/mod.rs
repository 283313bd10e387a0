//! Local LLM runtime helpers.

pub mod ollama_probe;

pub use ollama_probe::{DEFAULT_OLLAMA_URL, OllamaProbe, ProbeError};
