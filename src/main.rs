//! Tubechat - chat with the transcript of a video
//!
//! Main entry point for the Tubechat terminal client.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tubechat::cli::{Cli, Commands};
use tubechat::commands;
use tubechat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Chat { url } => {
            if let Some(u) = &url {
                tracing::debug!("Ingesting on startup: {}", u);
            }
            commands::chat::run_chat(config, url).await?;
            Ok(())
        }
        Commands::Init { url } => {
            commands::init::run_init(config, url).await?;
            Ok(())
        }
        Commands::Ask { message } => {
            commands::ask::run_ask(config, message).await?;
            Ok(())
        }
        Commands::Health => {
            commands::health::run_health(config).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with answers on stdout.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "tubechat=debug" } else { "tubechat=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
