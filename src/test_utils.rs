//! Test utilities for Tubechat
//!
//! Provides a scripted [`Backend`] whose responses are queued up front and
//! whose calls can be held open to exercise in-flight behavior, and a
//! [`ChatView`] that records every call it receives.

use crate::backend::{Backend, HealthResponse, InitResponse};
use crate::error::{Result, TubechatError};
use crate::session::ChatMessage;
use crate::view::{ChatView, ElementId, Status};

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

/// Queued outcome of a scripted backend call
type Scripted = Result<Value>;

/// Pauses calls until released
#[derive(Default)]
struct Gate {
    held: Mutex<bool>,
    notify: Notify,
}

impl Gate {
    fn hold(&self) {
        *self.held.lock().unwrap() = true;
    }

    fn release(&self) {
        *self.held.lock().unwrap() = false;
        self.notify.notify_one();
    }

    async fn pass(&self) {
        let held = *self.held.lock().unwrap();
        if held {
            self.notify.notified().await;
        }
    }
}

/// Backend that replays queued responses
#[derive(Default)]
pub struct ScriptedBackend {
    init_responses: Mutex<VecDeque<Scripted>>,
    message_responses: Mutex<VecDeque<Scripted>>,
    init_urls: Mutex<Vec<String>>,
    messages: Mutex<Vec<String>>,
    init_gate: Gate,
    message_gate: Gate,
}

impl ScriptedBackend {
    /// Create a backend with empty queues
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next init outcome; `Err` becomes a request error
    pub fn push_init(&self, outcome: std::result::Result<Value, &str>) {
        self.init_responses.lock().unwrap().push_back(scripted(outcome));
    }

    /// Queue the next message outcome; `Err` becomes a request error
    pub fn push_message(&self, outcome: std::result::Result<Value, &str>) {
        self.message_responses
            .lock()
            .unwrap()
            .push_back(scripted(outcome));
    }

    /// Queue an arbitrary message failure
    pub fn push_message_error(&self, error: anyhow::Error) {
        self.message_responses.lock().unwrap().push_back(Err(error));
    }

    /// Park init calls until [`Self::release_inits`]
    pub fn hold_inits(&self) {
        self.init_gate.hold();
    }

    /// Let a parked init call continue
    pub fn release_inits(&self) {
        self.init_gate.release();
    }

    /// Park message calls until [`Self::release_messages`]
    pub fn hold_messages(&self) {
        self.message_gate.hold();
    }

    /// Let a parked message call continue
    pub fn release_messages(&self) {
        self.message_gate.release();
    }

    /// Number of init calls received
    pub fn init_calls(&self) -> usize {
        self.init_urls.lock().unwrap().len()
    }

    /// URLs passed to init, in call order
    pub fn init_urls(&self) -> Vec<String> {
        self.init_urls.lock().unwrap().clone()
    }

    /// Number of message calls received
    pub fn message_calls(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    /// Texts passed to message, in call order
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

fn scripted(outcome: std::result::Result<Value, &str>) -> Scripted {
    outcome.map_err(|message| TubechatError::Request(message.to_string()).into())
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn init(&self, url: &str) -> Result<InitResponse> {
        self.init_urls.lock().unwrap().push(url.to_string());
        self.init_gate.pass().await;
        let next = self.init_responses.lock().unwrap().pop_front();
        let body = next.unwrap_or_else(|| Err(anyhow::anyhow!("no scripted init response")))?;
        Ok(InitResponse::from_body(&body))
    }

    async fn message(&self, text: &str) -> Result<Value> {
        self.messages.lock().unwrap().push(text.to_string());
        self.message_gate.pass().await;
        let next = self.message_responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(anyhow::anyhow!("no scripted message response")))
    }

    async fn health(&self) -> Result<HealthResponse> {
        Ok(HealthResponse {
            status: "ok".to_string(),
        })
    }
}

/// One call received by a [`RecordingView`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Status(Status),
    Append(ChatMessage),
    ClearHistory,
    ShowThinking(String),
    RemoveThinking,
    Enabled(ElementId, bool),
    InputValue(ElementId, String),
    Focus(ElementId),
}

/// View that records calls for later assertions
#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget recorded calls
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ChatView for RecordingView {
    fn set_status(&self, status: &Status) {
        self.record(ViewCall::Status(status.clone()));
    }

    fn append_message(&self, message: &ChatMessage) {
        self.record(ViewCall::Append(message.clone()));
    }

    fn clear_history(&self) {
        self.record(ViewCall::ClearHistory);
    }

    fn show_thinking(&self, text: &str) {
        self.record(ViewCall::ShowThinking(text.to_string()));
    }

    fn remove_thinking(&self) {
        self.record(ViewCall::RemoveThinking);
    }

    fn set_enabled(&self, element: ElementId, enabled: bool) {
        self.record(ViewCall::Enabled(element, enabled));
    }

    fn set_input_value(&self, element: ElementId, value: &str) {
        self.record(ViewCall::InputValue(element, value.to_string()));
    }

    fn focus(&self, element: ElementId) {
        self.record(ViewCall::Focus(element));
    }
}
