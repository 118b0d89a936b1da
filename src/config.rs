//! Configuration management for Tubechat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TubechatError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Tubechat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend service connection settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Interactive chat settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Backend service configuration
///
/// Endpoints are built as `{base_url}{api_prefix}/init` and
/// `{base_url}{api_prefix}/message`; the health probe lives at
/// `{base_url}/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Root URL of the backend service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix of the versioned API routes
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Optional request timeout in seconds; unset means no client-side timeout
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_seconds: None,
        }
    }
}

impl BackendConfig {
    /// Full URL of a versioned API route, e.g. `endpoint("init")`
    ///
    /// # Examples
    ///
    /// ```
    /// use tubechat::config::BackendConfig;
    ///
    /// let config = BackendConfig::default();
    /// assert_eq!(config.endpoint("init"), "http://localhost:8000/api/v1/init");
    /// ```
    pub fn endpoint(&self, route: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }

    /// URL of the unversioned liveness endpoint
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url.trim_end_matches('/'))
    }
}

/// Interactive chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Logical conversation identifier sent with every request
    #[serde(default = "default_thread_id")]
    pub thread_id: String,

    /// Prompt shown by the interactive line editor
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_thread_id() -> String {
    "default_user".to_string()
}

fn default_prompt() -> String {
    "> ".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            thread_id: default_thread_id(),
            prompt: default_prompt(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::info!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(TubechatError::from)?;
        let config = serde_yaml::from_str(&contents).map_err(TubechatError::from)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("TUBECHAT_BASE_URL") {
            self.backend.base_url = base_url;
        }

        if let Ok(api_prefix) = std::env::var("TUBECHAT_API_PREFIX") {
            self.backend.api_prefix = api_prefix;
        }

        if let Ok(timeout) = std::env::var("TUBECHAT_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.backend.timeout_seconds = Some(value);
            } else {
                tracing::warn!("Invalid TUBECHAT_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(thread_id) = std::env::var("TUBECHAT_THREAD_ID") {
            self.chat.thread_id = thread_id;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.base_url {
            tracing::debug!("Using backend override from CLI: {}", base_url);
            self.backend.base_url = base_url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.backend.base_url).map_err(|e| {
            TubechatError::Config(format!(
                "Invalid backend.base_url '{}': {}",
                self.backend.base_url, e
            ))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TubechatError::Config(format!(
                "backend.base_url must use http or https, got: {}",
                parsed.scheme()
            ))
            .into());
        }

        if !self.backend.api_prefix.starts_with('/') {
            return Err(TubechatError::Config(
                "backend.api_prefix must start with '/'".to_string(),
            )
            .into());
        }

        if self.backend.timeout_seconds == Some(0) {
            return Err(TubechatError::Config(
                "backend.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.thread_id.trim().is_empty() {
            return Err(
                TubechatError::Config("chat.thread_id cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
