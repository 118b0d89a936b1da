//! HTTP implementation of the [`Backend`] trait
//!
//! Talks JSON to the ingestion and question-answering routes of the
//! backend service. Non-2xx responses are reported with their status only;
//! error bodies are never decoded.

use crate::backend::{Backend, ChatRequest, HealthResponse, InitRequest, InitResponse};
use crate::config::BackendConfig;
use crate::error::{Result, TubechatError};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Backend reached over HTTP
///
/// # Examples
///
/// ```
/// use tubechat::backend::HttpBackend;
/// use tubechat::config::BackendConfig;
///
/// let backend = HttpBackend::new(&BackendConfig::default(), "default_user");
/// assert!(backend.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
    thread_id: String,
}

impl HttpBackend {
    /// Create a new HTTP backend client
    ///
    /// # Arguments
    ///
    /// * `config` - Backend location and timeout settings
    /// * `thread_id` - Conversation identifier sent with every request
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &BackendConfig, thread_id: impl Into<String>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("tubechat/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            TubechatError::Config(format!("Failed to create HTTP client: {}", e))
        })?;

        tracing::info!(
            "Initialized HTTP backend: base_url={}, api_prefix={}",
            config.base_url,
            config.api_prefix
        );

        Ok(Self {
            client,
            config: config.clone(),
            thread_id: thread_id.into(),
        })
    }

    /// Base URL of the backend service
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn post_json<B, R>(&self, route: &str, body: &B, failure: &str) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(route);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            TubechatError::Request(format!("{}: {}", failure, e))
        })?;

        decode(response, failure).await
    }
}

async fn decode<R: DeserializeOwned>(response: Response, failure: &str) -> Result<R> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Backend returned error {}", status);
        tracing::debug!("Error body: {}", body);
        return Err(TubechatError::Request(format!("{} ({})", failure, status)).into());
    }

    response.json::<R>().await.map_err(|e| {
        tracing::error!("Failed to parse backend response: {}", e);
        TubechatError::Request(format!("{}: invalid JSON response: {}", failure, e)).into()
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn init(&self, url: &str) -> Result<InitResponse> {
        let request = InitRequest {
            url: url.to_string(),
            thread_id: self.thread_id.clone(),
        };
        let body: serde_json::Value = self
            .post_json("init", &request, "Failed to initialize chat")
            .await?;
        tracing::debug!("Init response: {}", body);
        Ok(InitResponse::from_body(&body))
    }

    async fn message(&self, text: &str) -> Result<serde_json::Value> {
        let request = ChatRequest {
            message: text.to_string(),
            thread_id: self.thread_id.clone(),
        };
        self.post_json("message", &request, "Failed to send message")
            .await
    }

    async fn health(&self) -> Result<HealthResponse> {
        let url = self.config.health_url();
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            TubechatError::Request(format!("Health check failed: {}", e))
        })?;

        decode(response, "Health check failed").await
    }
}
