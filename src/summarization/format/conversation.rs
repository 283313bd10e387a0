//! Renders a conversation into one plain-text document.

use serde_json::Value;

use crate::summarization::core::message::Message;

/// Separator placed between rendered messages.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Format raw message records into a document, skipping records without a usable
/// role or content. Returns an empty string when every record is skipped.
#[must_use]
pub fn format_conversation(records: &[Value]) -> String {
    let messages: Vec<Message> = records.iter().filter_map(Message::from_record).collect();
    format_messages(&messages)
}

/// Format already-resolved messages as `"Role: content"` paragraphs in turn order.
#[must_use]
pub fn format_messages(messages: &[Message]) -> String {
    messages
        .iter()
        .filter(|msg| !msg.role.is_empty() && !msg.content.is_empty())
        .map(|msg| format!("{}: {}", capitalize_role(&msg.role), msg.content))
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

/// Uppercase the first character and lowercase the rest ("ASSISTANT" -> "Assistant").
#[must_use]
pub fn capitalize_role(role: &str) -> String {
    let mut chars = role.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
