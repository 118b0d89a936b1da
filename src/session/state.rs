//! Session state owned by the chat controller

use crate::view::Status;
use colored::Colorize;
use std::fmt;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// Typed by the user
    User,
    /// Answer from the question-answering backend
    Bot,
    /// Client-side notice
    System,
    /// Failure of a message request
    Error,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Bot => write!(f, "bot"),
            Self::System => write!(f, "system"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl Sender {
    /// Colored tag for terminal transcripts
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use tubechat::session::Sender;
    ///
    /// println!("{} hello", Sender::User.colored_tag()); // "[user]" in blue
    /// ```
    pub fn colored_tag(&self) -> String {
        match self {
            Self::User => format!("[{}]", "user".blue()),
            Self::Bot => format!("[{}]", "bot".green()),
            Self::System => format!("[{}]", "system".yellow()),
            Self::Error => format!("[{}]", "error".red()),
        }
    }
}

/// One entry of the chat history
///
/// Immutable once created; the history only ever grows, except for the
/// wholesale clear on a successful ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    text: String,
    sender: Sender,
}

impl ChatMessage {
    /// Create a message
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
        }
    }

    /// Message typed by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    /// Answer from the backend
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    /// Client-side notice
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(text, Sender::System)
    }

    /// Request failure
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Error)
    }

    /// Message text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Message author
    pub fn sender(&self) -> Sender {
        self.sender
    }
}

/// Enablement of the session's interactive controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// The initialize action accepts clicks
    pub init_enabled: bool,
    /// The message input and send action accept input
    pub message_enabled: bool,
}

/// Placeholder shown while a message request is outstanding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThinkingIndicator {
    /// Indicator text
    pub text: &'static str,
}

impl Default for ThinkingIndicator {
    fn default() -> Self {
        Self {
            text: "Thinking...",
        }
    }
}

/// Mutable state of one chat session
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) initialized: bool,
    pub(crate) ingesting: bool,
    pub(crate) awaiting_reply: bool,
    pub(crate) transcript: Vec<ChatMessage>,
    pub(crate) thinking: Option<ThinkingIndicator>,
    pub(crate) status: Status,
    pub(crate) url_input: String,
    pub(crate) message_input: String,
}

impl SessionState {
    /// Message controls are live only after ingestion and while no reply is pending
    pub(crate) fn controls(&self) -> Controls {
        Controls {
            init_enabled: !self.ingesting,
            message_enabled: self.initialized && !self.awaiting_reply,
        }
    }
}
