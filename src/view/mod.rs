//! Rendering surface for a chat session
//!
//! The session controller owns all state and pushes every visible change
//! through the [`ChatView`] trait. A host supplies the implementation: the
//! terminal binary uses [`TerminalView`], tests record calls.

pub mod terminal;

pub use terminal::TerminalView;

use crate::session::ChatMessage;
use std::fmt;

/// Fixed identifiers of the elements a host renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Text input holding the video URL
    UrlInput,
    /// Action that starts ingestion
    InitButton,
    /// Status banner under the URL input
    StatusMessage,
    /// Ordered chat history region
    ChatHistory,
    /// Text input holding the next question
    MessageInput,
    /// Action that sends the question
    SendButton,
}

impl ElementId {
    /// Identifier string used by the host document
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UrlInput => "youtube-url",
            Self::InitButton => "init-btn",
            Self::StatusMessage => "status-message",
            Self::ChatHistory => "chat-history",
            Self::MessageInput => "user-message",
            Self::SendButton => "send-btn",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual class of the status banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    /// No styling
    #[default]
    None,
    /// A request is outstanding
    Loading,
    /// The last request succeeded
    Success,
    /// The last request failed or the input was rejected
    Error,
}

/// Contents of the status banner
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    /// Banner text
    pub text: String,
    /// Banner styling
    pub kind: StatusKind,
}

impl Status {
    /// Banner shown while a request is outstanding
    pub fn loading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Loading,
        }
    }

    /// Banner shown after a successful request
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    /// Banner shown after a failure
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Host rendering surface
///
/// Calls arrive in the order the session performs them. The enable,
/// input-value and focus hooks default to no-ops for hosts without such
/// controls.
pub trait ChatView: Send + Sync {
    /// Replace the status banner
    fn set_status(&self, status: &Status);

    /// Append a message to the end of the chat history
    fn append_message(&self, message: &ChatMessage);

    /// Remove every message from the chat history
    fn clear_history(&self);

    /// Show the transient thinking indicator
    fn show_thinking(&self, text: &str);

    /// Remove the thinking indicator
    fn remove_thinking(&self);

    /// Enable or disable an input or action
    fn set_enabled(&self, _element: ElementId, _enabled: bool) {}

    /// Overwrite the value shown in an input
    fn set_input_value(&self, _element: ElementId, _value: &str) {}

    /// Move keyboard focus to an element
    fn focus(&self, _element: ElementId) {}
}
