//! Summarization orchestration.

pub mod orchestrator;

pub use orchestrator::{SummarizationEngine, truncate_chars};
