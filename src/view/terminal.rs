//! Terminal rendering of a chat session
//!
//! Messages and status updates are printed as they happen. The thinking
//! indicator is drawn without a trailing newline and erased in place, so it
//! never lingers in scrollback.

use crate::session::{ChatMessage, Sender};
use crate::view::{ChatView, Status, StatusKind};

use colored::Colorize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

const CLEAR_LINE: &str = "\r\x1b[2K";

/// [`ChatView`] that writes to stdout/stderr
#[derive(Debug, Default)]
pub struct TerminalView {
    thinking: AtomicBool,
}

impl TerminalView {
    /// Create a terminal view
    pub fn new() -> Self {
        Self::default()
    }

    fn erase_thinking(&self) {
        if self.thinking.swap(false, Ordering::SeqCst) {
            print!("{}", CLEAR_LINE);
            let _ = std::io::stdout().flush();
        }
    }
}

/// Format a status banner for terminal output
pub fn format_status(status: &Status) -> String {
    match status.kind {
        StatusKind::None => status.text.clone(),
        StatusKind::Loading => status.text.cyan().to_string(),
        StatusKind::Success => status.text.green().to_string(),
        StatusKind::Error => status.text.red().to_string(),
    }
}

impl ChatView for TerminalView {
    fn set_status(&self, status: &Status) {
        self.erase_thinking();
        if status.text.is_empty() {
            return;
        }
        match status.kind {
            StatusKind::Error => eprintln!("{}", format_status(status)),
            _ => println!("{}", format_status(status)),
        }
    }

    fn append_message(&self, message: &ChatMessage) {
        self.erase_thinking();
        match message.sender() {
            // the line editor already echoed it
            Sender::User => {}
            Sender::Bot => println!("\n{}\n", message.text()),
            Sender::System => println!("{}", message.text().yellow()),
            Sender::Error => eprintln!("{}", message.text().red()),
        }
    }

    fn clear_history(&self) {
        self.erase_thinking();
        println!("{}", "--- new conversation ---".dimmed());
    }

    fn show_thinking(&self, text: &str) {
        print!("{}", text.dimmed());
        let _ = std::io::stdout().flush();
        self.thinking.store(true, Ordering::SeqCst);
    }

    fn remove_thinking(&self) {
        self.erase_thinking();
    }
}
