//! Conversation summarization pipeline.
//!
//! - `core`: configuration, errors, messages and results
//! - `format`: conversation to plain-text document
//! - `extractive`: text analysis, stop words and frequency-based ranking
//! - `abstractive`: model adapter, Ollama implementation and startup loader
//! - `engine`: model-or-extractive decision and result labelling

pub mod abstractive;
pub mod core;
pub mod engine;
pub mod extractive;
pub mod format;

pub use abstractive::{AbstractiveOutcome, AbstractiveSummarizer, OllamaSummarizer, load_abstractive};
pub use core::{
    Message, ModelConfig, ServerConfig, SummarizeError, SummarizeResult, SummarizerConfig,
    SummaryConfig, SummaryMethod, SummaryResult,
};
pub use engine::SummarizationEngine;
pub use extractive::{ExtractiveSummarizer, RuleBasedAnalyzer, TextAnalyzer};
pub use format::format_conversation;
