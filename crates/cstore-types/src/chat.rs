//! Chat transcript types for cstore.
//!
//! A transcript is an append-only, chronologically ordered list of
//! `ChatMessage`s owned by one session. Error-kind messages are inline
//! notices for the user and are never sent to the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::llm::{Message, MessageRole};

/// Who wrote a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl From<ChatRole> for MessageRole {
    fn from(role: ChatRole) -> Self {
        match role {
            ChatRole::User => MessageRole::User,
            ChatRole::Assistant => MessageRole::Assistant,
        }
    }
}

/// Whether a message is regular conversation or an inline error notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Normal,
    Error,
}

/// A single message within a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// A message typed by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            kind: MessageKind::Normal,
            created_at: Utc::now(),
        }
    }

    /// A completed assistant response.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            kind: MessageKind::Normal,
            created_at: Utc::now(),
        }
    }

    /// An inline error notice shown in the assistant's slot.
    pub fn assistant_error(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            kind: MessageKind::Error,
            created_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }

    /// Convert to the wire shape sent to the completion endpoint.
    pub fn to_llm_message(&self) -> Message {
        Message {
            role: self.role.into(),
            content: self.content.clone(),
        }
    }
}

/// Observable state of a chat session's controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    /// Ready for a submission.
    Idle,
    /// No credential set; submissions short-circuit to an error notice.
    AwaitingCredential,
    /// A completion is in flight; submissions are refused.
    Streaming,
}

impl fmt::Display for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatState::Idle => write!(f, "idle"),
            ChatState::AwaitingCredential => write!(f, "awaiting_credential"),
            ChatState::Streaming => write!(f, "streaming"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_role_and_kind() {
        let user = ChatMessage::user("질문");
        assert_eq!(user.role, ChatRole::User);
        assert!(!user.is_error());

        let err = ChatMessage::assistant_error("오류");
        assert_eq!(err.role, ChatRole::Assistant);
        assert!(err.is_error());
    }

    #[test]
    fn test_to_llm_message() {
        let msg = ChatMessage::assistant("답변").to_llm_message();
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.content, "답변");
    }

    #[test]
    fn test_kind_defaults_to_normal_when_absent() {
        let json = r#"{"role":"user","content":"hi","created_at":"2026-01-01T00:00:00Z"}"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.kind, MessageKind::Normal);
    }

    #[test]
    fn test_chat_state_display() {
        assert_eq!(ChatState::AwaitingCredential.to_string(), "awaiting_credential");
        assert_eq!(ChatState::Streaming.to_string(), "streaming");
    }
}
