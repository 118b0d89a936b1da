//! Special commands parser for interactive chat mode
//!
//! Lines entered at the chat prompt are either questions or `/`-prefixed
//! commands that act on the session:
//! - Ingest a new video
//! - Show session status or the chat history
//! - Probe backend health
//! - Display help information
//! - Exit the session
//!
//! Command names are case-insensitive; arguments keep their case.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Ingest a video URL, replacing the current one
    Init(String),

    /// Display session state and control enablement
    ShowStatus,

    /// Print the chat history
    History,

    /// Probe backend liveness
    Health,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent as a question.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is
/// not a valid command, and `CommandError::MissingArgument` for `/init`
/// without a URL.
///
/// # Examples
///
/// ```
/// use tubechat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/init https://youtu.be/AbC").unwrap();
/// assert_eq!(cmd, SpecialCommand::Init("https://youtu.be/AbC".to_string()));
///
/// let cmd = parse_special_command("what is this about?").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower, ""),
    };

    match name.as_str() {
        "/init" | "/url" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/init".to_string(),
                    usage: "/init <video-url>".to_string(),
                })
            } else {
                Ok(SpecialCommand::Init(arg.to_string()))
            }
        }
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/history" => Ok(SpecialCommand::History),
        "/health" => Ok(SpecialCommand::Health),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "exit" | "quit" | "/exit" | "/quit" | "/q" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help for the interactive prompt
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

VIDEO:
  /init <url>     - Ingest a video and start a new conversation
  /url <url>      - Same as /init

SESSION INFORMATION:
  /status         - Show session state and backend location
  /history        - Print the conversation so far
  /health         - Check that the backend is reachable

OTHER:
  /help           - Show this help message
  exit, quit      - Exit interactive mode

Any other input is sent as a question about the ingested video.
"#
    );
}
