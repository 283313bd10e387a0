//! Conversation messages and summary results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single renderable conversation message.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Speaker role, e.g. "user" or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

impl Message {
    /// Build a message from a role and content.
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Resolve a loosely-shaped JSON record into a message.
    ///
    /// Content is read from `content`, or from `message` when `content` is empty or
    /// absent. Non-string values count as absent. Returns `None` when the record is
    /// not an object or when the resolved role or content is empty.
    #[must_use]
    pub fn from_record(record: &Value) -> Option<Self> {
        let object = record.as_object()?;
        let role = string_field(object.get("role"));
        let content = match string_field(object.get("content")) {
            "" => string_field(object.get("message")),
            content => content,
        };

        if role.is_empty() || content.is_empty() {
            return None;
        }
        Some(Self::new(role, content))
    }
}

fn string_field(value: Option<&Value>) -> &str {
    value.and_then(Value::as_str).unwrap_or_default()
}

/// How a summary was produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMethod {
    /// The abstractive model succeeded on the first try.
    Model,
    /// The model was never available; extractive ranking was used directly.
    Extractive,
    /// The model was available but failed on this request.
    ExtractiveFallback,
}

impl SummaryMethod {
    /// Stable string form used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Extractive => "extractive",
            Self::ExtractiveFallback => "extractive_fallback",
        }
    }

    /// Whether this is the clean model path, which is reported without a `method` field.
    #[must_use]
    pub const fn is_model(&self) -> bool {
        matches!(self, Self::Model)
    }
}

impl fmt::Display for SummaryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of summarizing one conversation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SummaryResult {
    /// Summary text.
    pub summary: String,
    /// Method used; omitted from JSON when the model succeeded cleanly.
    #[serde(skip_serializing_if = "SummaryMethod::is_model")]
    pub method: SummaryMethod,
}

impl SummaryResult {
    /// Build a result.
    #[must_use]
    pub const fn new(summary: String, method: SummaryMethod) -> Self {
        Self { summary, method }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_record_prefers_content() {
        let msg = Message::from_record(&json!({"role": "user", "content": "Hi", "message": "ignored"}));
        assert_eq!(msg, Some(Message::new("user", "Hi")));
    }

    #[test]
    fn test_from_record_falls_back_to_message_field() {
        let msg = Message::from_record(&json!({"role": "assistant", "content": "", "message": "Hello"}));
        assert_eq!(msg, Some(Message::new("assistant", "Hello")));

        let msg = Message::from_record(&json!({"role": "assistant", "message": "Hello"}));
        assert_eq!(msg, Some(Message::new("assistant", "Hello")));
    }

    #[test]
    fn test_from_record_skips_unusable_records() {
        assert_eq!(Message::from_record(&json!({"role": "user"})), None);
        assert_eq!(Message::from_record(&json!({"content": "orphan"})), None);
        assert_eq!(Message::from_record(&json!({"role": "", "content": "x"})), None);
        assert_eq!(Message::from_record(&json!({"role": "user", "content": 42})), None);
        assert_eq!(Message::from_record(&json!("just a string")), None);
    }

    #[test]
    fn test_model_method_is_omitted_from_json() {
        let result = SummaryResult::new("short".to_string(), SummaryMethod::Model);
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"summary": "short"}));
    }

    #[test]
    fn test_extractive_methods_are_serialized() {
        let result = SummaryResult::new("s".to_string(), SummaryMethod::Extractive);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"summary": "s", "method": "extractive"})
        );

        let result = SummaryResult::new("s".to_string(), SummaryMethod::ExtractiveFallback);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"summary": "s", "method": "extractive_fallback"})
        );
    }
}
