//! Entries of the two conversation logs.
//!
//! [`ChatMessage`] is the model-facing record and serialises directly into
//! the chat-completions wire format.  [`DisplayEntry`] is the user-facing
//! record rendered by a display sink.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Role / ChatMessage
// ---------------------------------------------------------------------------

/// Author of a model-history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One `(role, content)` pair of the model history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Speaker / DisplayEntry
// ---------------------------------------------------------------------------

/// Who said a display-log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    pub fn label(self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Bot => "bot",
        }
    }
}

/// One `(speaker, timestamp, text)` line of the display log.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry {
    pub speaker: Speaker,
    pub timestamp: DateTime<Local>,
    pub text: String,
}

impl DisplayEntry {
    /// Entry stamped with the current local time.
    pub fn now(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            timestamp: Local::now(),
            text: text.into(),
        }
    }

    /// Timestamp rendered as `HH:MM`.
    pub fn clock(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
