//! Backend service abstraction
//!
//! The question-answering backend exposes two operations: ingesting a
//! content source and answering a question against it. The [`Backend`]
//! trait is the seam the chat session talks to; [`HttpBackend`] is the
//! production implementation over HTTP.

pub mod http;

pub use http::HttpBackend;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request body for `POST /init`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitRequest {
    /// Video URL to ingest
    pub url: String,
    /// Logical conversation identifier
    pub thread_id: String,
}

/// Outcome of a successful `POST /init`
///
/// The body shape is not fixed: any JSON counts as success as long as the
/// status code is 2xx. Only a non-empty string `message` is picked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitResponse {
    /// Human-readable readiness message
    pub message: Option<String>,
}

impl InitResponse {
    /// Read the readiness message out of a decoded ingest body
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use tubechat::backend::InitResponse;
    ///
    /// let response = InitResponse::from_body(&json!({"message": "Total chunks: 4"}));
    /// assert_eq!(response.message.as_deref(), Some("Total chunks: 4"));
    /// assert_eq!(InitResponse::from_body(&json!({"message": 5})).message, None);
    /// ```
    pub fn from_body(body: &serde_json::Value) -> Self {
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string);
        Self { message }
    }
}

/// Request body for `POST /message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Question text
    pub message: String,
    /// Logical conversation identifier
    pub thread_id: String,
}

/// Response body of `GET /health`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Liveness status, `"ok"` when healthy
    #[serde(default)]
    pub status: String,
}

/// Question-answering backend
///
/// Implementations must not retry: every failure is reported to the caller
/// as-is and the user decides whether to resubmit.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Ingest a content source so later questions can be answered from it
    ///
    /// # Errors
    ///
    /// Returns error on a non-2xx status, a transport failure, or a body
    /// that is not JSON
    async fn init(&self, url: &str) -> Result<InitResponse>;

    /// Ask a question against the ingested source
    ///
    /// Returns the decoded JSON body untouched; its shape is unspecified and
    /// is interpreted by [`crate::response::normalize_response`].
    ///
    /// # Errors
    ///
    /// Returns error on a non-2xx status, a transport failure, or a body
    /// that is not JSON
    async fn message(&self, text: &str) -> Result<serde_json::Value>;

    /// Probe backend liveness
    ///
    /// # Errors
    ///
    /// Returns error if the backend is unreachable or unhealthy
    async fn health(&self) -> Result<HealthResponse>;
}
