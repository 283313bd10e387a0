//! Optional model-based summarization.

pub mod adapter;
pub mod llm_summarizer;
pub mod loader;

pub use adapter::{AbstractiveOutcome, AbstractiveSummarizer, SummaryFuture, attempt_abstractive};
pub use llm_summarizer::OllamaSummarizer;
pub use loader::load_abstractive;
