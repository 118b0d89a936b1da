//! Error types for Tubechat
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Tubechat operations
///
/// Covers input validation, backend requests, configuration loading and
/// the terminal host. Session-level failures (`Validation`, `Ingestion`,
/// `Request`) are always recoverable: the UI stays usable after any of them.
#[derive(Error, Debug)]
pub enum TubechatError {
    /// Input rejected before any network call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Ingestion of a content source failed
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// A backend request failed (non-2xx status, transport or decode failure)
    #[error("Request error: {0}")]
    Request(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid YAML for [`crate::config::Config`]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Line editor errors from the interactive host
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for Tubechat operations
///
/// Uses `anyhow::Error` so callers can attach context; the typed
/// [`TubechatError`] is recovered with `downcast_ref` where the kind matters.
pub type Result<T> = anyhow::Result<T>;
