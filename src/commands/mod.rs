/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat`   - Interactive chat session
- `init`   - One-shot ingestion of a video URL
- `ask`    - One-shot question against the ingested video
- `health` - Backend liveness probe

The handlers build an `HttpBackend` from configuration and drive the
library components: the chat session, the event dispatcher and the views.
*/

use crate::backend::{Backend, HttpBackend};
use crate::config::Config;
use crate::error::{Result, TubechatError};
use crate::session::ChatSession;
use crate::view::{ChatView, TerminalView};
use std::sync::Arc;

// Special commands parser for the interactive prompt
pub mod special_commands;

fn build_backend(config: &Config) -> Result<Arc<HttpBackend>> {
    Ok(Arc::new(HttpBackend::new(
        &config.backend,
        config.chat.thread_id.clone(),
    )?))
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Creates the session and a readline-based loop that acts as the host
    //! event dispatcher: typed questions become input + Enter events, and
    //! `/init <url>` becomes URL input + initialize click events.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::events::{Dispatched, EventDispatcher, UiEvent, SUBMIT_KEY};
    use crate::session::SendOutcome;
    use crate::view::terminal::format_status;
    use crate::view::ElementId;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `url` - Optional video URL to ingest before the first prompt
    pub async fn run_chat(config: Config, url: Option<String>) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let backend = build_backend(&config)?;
        let view: Arc<dyn ChatView> = Arc::new(TerminalView::new());
        let session = ChatSession::new(backend.clone(), view);
        let dispatcher = EventDispatcher::standard();

        let mut rl = DefaultEditor::new().map_err(TubechatError::from)?;

        print_welcome_banner(&config);

        if let Some(url) = url {
            submit_url(&dispatcher, &session, &url).await?;
        }

        loop {
            match rl.readline(&config.chat.prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(trimmed).map_err(TubechatError::from)?;

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::Init(url)) => {
                            submit_url(&dispatcher, &session, &url).await?;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            print_status_display(&session, &config);
                        }
                        Ok(SpecialCommand::History) => print_history(&session),
                        Ok(SpecialCommand::Health) => match backend.health().await {
                            Ok(health) => println!("Backend status: {}", health.status.green()),
                            Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                        },
                        Ok(SpecialCommand::Help) => print_help(),
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {
                            submit_question(&dispatcher, &session, trimmed).await?;
                        }
                        Err(e) => eprintln!("{}", e.to_string().red()),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Type a URL into the URL input and click the initialize action
    ///
    /// Validation and ingestion failures are already on screen in the
    /// status banner, so they are logged rather than returned.
    async fn submit_url(
        dispatcher: &EventDispatcher,
        session: &ChatSession,
        url: &str,
    ) -> Result<()> {
        dispatcher
            .dispatch(
                session,
                UiEvent::Input {
                    target: ElementId::UrlInput,
                    value: url.to_string(),
                },
            )
            .await?;

        if let Err(e) = dispatcher
            .dispatch(session, UiEvent::Click(ElementId::InitButton))
            .await
        {
            tracing::debug!("Initialization did not complete: {}", e);
        }
        Ok(())
    }

    /// Type a question into the message input and press Enter
    async fn submit_question(
        dispatcher: &EventDispatcher,
        session: &ChatSession,
        text: &str,
    ) -> Result<()> {
        dispatcher
            .dispatch(
                session,
                UiEvent::Input {
                    target: ElementId::MessageInput,
                    value: text.to_string(),
                },
            )
            .await?;

        let outcome = dispatcher
            .dispatch(
                session,
                UiEvent::KeyPress {
                    target: ElementId::MessageInput,
                    key: SUBMIT_KEY.to_string(),
                },
            )
            .await?;

        if outcome == Dispatched::Sent(SendOutcome::Ignored) && !session.is_initialized() {
            println!(
                "{}",
                "No video loaded yet. Use /init <url> to ingest one.".yellow()
            );
        }
        Ok(())
    }

    /// Display welcome banner at the start of interactive chat mode
    fn print_welcome_banner(config: &Config) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║            Tubechat Interactive Chat - Welcome!              ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Backend: {}", config.backend.base_url.cyan());
        println!("Type '/init <url>' to load a video, '/help' for commands, 'exit' to quit\n");
    }

    /// Display session state, as shown by the '/status' command
    fn print_status_display(session: &ChatSession, config: &Config) {
        let controls = session.controls();
        let state = if session.is_initialized() {
            "ready".green()
        } else {
            "no video loaded".yellow()
        };

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Session Status                           ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Backend:        {}", config.backend.base_url);
        println!("Thread:         {}", config.chat.thread_id);
        println!("Knowledge base: {}", state);
        println!("Messages:       {}", session.transcript().len());
        println!(
            "Sending:        {}",
            if controls.message_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        let status = session.status();
        if !status.text.is_empty() {
            println!("Last status:    {}", format_status(&status));
        }
        println!();
    }

    /// Print the chat history with sender tags
    fn print_history(session: &ChatSession) {
        let transcript = session.transcript();
        if transcript.is_empty() {
            println!("{}", "(no messages)".dimmed());
            return;
        }
        for message in transcript {
            println!("{} {}", message.sender().colored_tag(), message.text());
        }
    }
}

// One-shot ingestion
pub mod init {
    //! Ingest a video URL without entering the interactive loop.

    use super::*;

    /// Ingest `url` and print the backend's readiness message
    ///
    /// # Errors
    ///
    /// Returns the validation or ingestion error so the process exits non-zero
    pub async fn run_init(config: Config, url: String) -> Result<()> {
        tracing::info!("Starting one-shot ingestion");
        let backend = build_backend(&config)?;
        let view: Arc<dyn ChatView> = Arc::new(TerminalView::new());
        let session = ChatSession::new(backend, view);

        session.initialize_source(&url).await?;
        Ok(())
    }
}

// One-shot question
pub mod ask {
    //! Ask one question against whatever the backend last ingested.
    //!
    //! The client-side readiness gate belongs to an interactive session, so
    //! this talks to the backend directly.

    use super::*;
    use crate::response::normalize_response;

    /// Send `message` and print the normalized answer
    ///
    /// # Errors
    ///
    /// Returns error if the message is empty or the request fails
    pub async fn run_ask(config: Config, message: String) -> Result<()> {
        let text = message.trim();
        if text.is_empty() {
            return Err(
                TubechatError::Validation("empty input".to_string()).into(),
            );
        }

        let backend = build_backend(&config)?;
        let body = backend.message(text).await?;
        tracing::debug!("API response: {}", body);

        println!("{}", normalize_response(&body));
        Ok(())
    }
}

// Backend liveness probe
pub mod health {
    //! Check that the backend answers on its health endpoint.

    use super::*;
    use colored::Colorize;

    /// Probe the backend and print its status
    ///
    /// # Errors
    ///
    /// Returns error if the backend is unreachable or reports a non-2xx status
    pub async fn run_health(config: Config) -> Result<()> {
        let backend = build_backend(&config)?;
        let health = backend.health().await?;
        println!(
            "{} {}",
            backend.base_url(),
            if health.status == "ok" {
                health.status.green()
            } else {
                health.status.yellow()
            }
        );
        Ok(())
    }
}
