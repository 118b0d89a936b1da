//! Command-line interface definition for Tubechat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot ingestion and
//! questions, and a backend health probe.

use clap::{Parser, Subcommand};

/// Tubechat - chat with the transcript of a video
///
/// Ingest a video URL into a question-answering backend, then ask
/// questions about its content.
#[derive(Parser, Debug, Clone)]
#[command(name = "tubechat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the backend base URL
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Tubechat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Video URL to ingest before the first prompt
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Ingest a video URL and exit
    Init {
        /// Video URL to ingest
        url: String,
    },

    /// Ask one question against the already-ingested video
    Ask {
        /// Question text
        message: String,
    },

    /// Check that the backend is reachable
    Health,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
