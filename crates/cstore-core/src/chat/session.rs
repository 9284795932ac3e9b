//! Per-session chat state.
//!
//! A `ChatSession` owns the transcript, the session-scoped credential, the
//! busy flag, and the recent-keyword list. It is passed by `&mut` into the
//! controller; nothing here is process-wide.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use secrecy::{ExposeSecret, SecretString};

use cstore_types::chat::{ChatMessage, ChatState};
use cstore_types::llm::Message;

/// Maximum number of remembered search keywords.
const RECENT_KEYWORDS_CAP: usize = 10;

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    credential: Option<SecretString>,
    busy: Arc<AtomicBool>,
    recent_keywords: VecDeque<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript in chronological order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Current controller state as seen by a caller.
    pub fn state(&self) -> ChatState {
        if self.is_busy() {
            ChatState::Streaming
        } else if !self.has_credential() {
            ChatState::AwaitingCredential
        } else {
            ChatState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Set the session API key. Blank input clears it.
    ///
    /// Returns whether a credential is now configured.
    pub fn set_credential(&mut self, api_key: &str) -> bool {
        let trimmed = api_key.trim();
        self.credential = if trimmed.is_empty() {
            None
        } else {
            Some(SecretString::from(trimmed.to_string()))
        };
        self.credential.is_some()
    }

    pub fn clear_credential(&mut self) {
        self.credential = None;
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    pub fn credential(&self) -> Option<&SecretString> {
        self.credential
            .as_ref()
            .filter(|c| !c.expose_secret().is_empty())
    }

    /// Drop the transcript. Refused while a response is streaming.
    pub fn clear_transcript(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.messages.clear();
        true
    }

    /// Recent selector keys, most recent first.
    pub fn recent_keywords(&self) -> impl Iterator<Item = &str> {
        self.recent_keywords.iter().map(String::as_str)
    }

    pub(crate) fn record_keyword(&mut self, keyword: &str) {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return;
        }
        self.recent_keywords.retain(|k| k != keyword);
        self.recent_keywords.push_front(keyword.to_string());
        self.recent_keywords.truncate(RECENT_KEYWORDS_CAP);
    }

    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Transcript as sent to the model: error notices are left out.
    pub(crate) fn llm_transcript(&self) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| !m.is_error())
            .map(ChatMessage::to_llm_message)
            .collect()
    }

    /// Claim the busy flag, or `None` if a turn is already in flight.
    pub(crate) fn try_acquire_busy(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                flag: Arc::clone(&self.busy),
            })
    }
}

/// Holds a session's busy flag; releases it on drop.
#[derive(Debug)]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
