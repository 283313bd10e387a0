//! Model-free extractive summarization.

pub mod analyzer;
pub mod stopwords;
pub mod summarizer;

pub use analyzer::{RuleBasedAnalyzer, TextAnalyzer};
pub use summarizer::{DEFAULT_NUM_SENTENCES, ExtractiveSummarizer, ScoredSentence};
