//! Tubechat - chat with the transcript of a video
//!
//! This library provides a chat client for a question-answering backend:
//! submit a video URL for ingestion, then ask questions answered from that
//! video's content.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: the chat session controller and its state
//! - `backend`: backend abstraction and the HTTP implementation
//! - `response`: normalization of heterogeneous answer payloads
//! - `view`: rendering surface trait and the terminal view
//! - `events`: host UI events and their handler bindings
//! - `commands`: CLI command handlers
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tubechat::{ChatSession, Config, HttpBackend, TerminalView};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let backend = HttpBackend::new(&config.backend, config.chat.thread_id.clone())?;
//!     let session = ChatSession::new(Arc::new(backend), Arc::new(TerminalView::new()));
//!     session.initialize_source("https://www.youtube.com/watch?v=abc").await?;
//!     session.send_message("Summarize the video").await;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod response;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use backend::{Backend, HttpBackend};
pub use config::Config;
pub use error::{Result, TubechatError};
pub use events::{EventDispatcher, UiEvent};
pub use session::{ChatMessage, ChatSession, InitOutcome, SendOutcome, Sender};
pub use view::{ChatView, ElementId, TerminalView};

#[cfg(test)]
pub mod test_utils;
