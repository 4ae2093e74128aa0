//! Message and session-key domain types.
//!
//! These are the core value objects that flow through the entire system:
//! the operator sends a message → the agent loop processes it → the provider
//! generates a response → tool results fold back in → everything is appended
//! to the session log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a session's persisted history.
///
/// Derived from the operator's display name: trimmed and lower-cased, so
/// "  Maria " and "maria" address the same durable record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey(pub String);

impl SessionKey {
    /// Derive a session key from an operator display name.
    pub fn from_display_name(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The operator
    User,
    /// The AI assistant
    Assistant,
    /// System instructions (persona, rules)
    System,
    /// Tool execution result
    Tool,
}

/// A single message in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Display name of the sender (set on operator messages)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,

    /// Tool calls requested by the assistant (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<MessageToolCall>,

    /// If this is a tool result, the correlation id of the call it answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,

    /// Optional metadata (provider info, raw content, etc.)
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            sender_name: None,
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Create a user message carrying the sender's display name.
    pub fn user_named(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sender_name: Some(name.into()),
            ..Self::user(content)
        }
    }

    /// The synthetic first-contact message that introduces the operator to
    /// the model, persisted once so identity survives process restarts.
    pub fn introduction(display_name: &str) -> Self {
        Self::user_named(
            format!(
                "My name is {display_name}. I am an employee of the company \
                 and I need assistance with HR and IT matters."
            ),
            display_name,
        )
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            sender_name: None,
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::System,
            content: content.into(),
            sender_name: None,
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Create a tool result message answering the given call id.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Tool,
            content: content.into(),
            sender_name: None,
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
            timestamp: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }
}

/// A tool call embedded in an assistant message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageToolCall {
    /// Correlation id for this call (may be empty if the model omitted it)
    pub id: String,

    /// Name of the tool to invoke
    pub name: String,

    /// Arguments as JSON string
    pub arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_normalizes() {
        assert_eq!(SessionKey::from_display_name("  Maria ").0, "maria");
        assert_eq!(
            SessionKey::from_display_name("Maria"),
            SessionKey::from_display_name("MARIA")
        );
    }

    #[test]
    fn create_user_message() {
        let msg = Message::user_named("Hello!", "Ana");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello!");
        assert_eq!(msg.sender_name.as_deref(), Some("Ana"));
        assert!(msg.tool_calls.is_empty());
    }

    #[test]
    fn introduction_carries_name() {
        let msg = Message::introduction("Maria");
        assert_eq!(msg.role, Role::User);
        assert!(msg.content.contains("Maria"));
        assert_eq!(msg.sender_name.as_deref(), Some("Maria"));
    }

    #[test]
    fn tool_result_links_call() {
        let msg = Message::tool_result("call_1", "12 days");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::user("Test message");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "Test message");
        assert_eq!(deserialized.role, Role::User);
    }
}
