//! Conversation formatting.

pub mod conversation;

pub use conversation::{capitalize_role, format_conversation, format_messages};
