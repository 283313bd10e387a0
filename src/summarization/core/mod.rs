//! Core summarization types.

pub mod config;
pub mod errors;
pub mod message;

pub use config::{ModelConfig, ServerConfig, SummarizerConfig, SummaryConfig};
pub use errors::{SummarizeError, SummarizeResult};
pub use message::{Message, SummaryMethod, SummaryResult};
