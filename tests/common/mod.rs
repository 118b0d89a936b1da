use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;
use tubechat::view::{ChatView, Status};
use tubechat::ChatMessage;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// View that keeps what a page would currently display
#[allow(dead_code)]
#[derive(Default)]
pub struct PageView {
    pub status: Mutex<Status>,
    pub history: Mutex<Vec<ChatMessage>>,
    pub thinking: Mutex<bool>,
}

impl ChatView for PageView {
    fn set_status(&self, status: &Status) {
        *self.status.lock().unwrap() = status.clone();
    }

    fn append_message(&self, message: &ChatMessage) {
        self.history.lock().unwrap().push(message.clone());
    }

    fn clear_history(&self) {
        self.history.lock().unwrap().clear();
    }

    fn show_thinking(&self, _text: &str) {
        *self.thinking.lock().unwrap() = true;
    }

    fn remove_thinking(&self) {
        *self.thinking.lock().unwrap() = false;
    }
}
