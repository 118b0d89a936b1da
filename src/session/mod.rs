//! Chat session controller
//!
//! [`ChatSession`] owns every piece of client state and mediates between
//! the host UI and the backend. It exposes the two user-facing operations,
//! [`ChatSession::initialize_source`] and [`ChatSession::send_message`], and
//! renders every visible change through a [`ChatView`].
//!
//! Operations take `&self`. The state mutex is never held across an
//! `.await`, and controls are disabled before the first suspension point, so
//! a second invocation polled while a request is outstanding sees the
//! disabled control and returns without issuing another request.

mod state;

pub use state::{ChatMessage, Controls, Sender, ThinkingIndicator};

use crate::backend::Backend;
use crate::error::{Result, TubechatError};
use crate::response::normalize_response;
use crate::view::{ChatView, ElementId, Status};
use state::SessionState;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Status shown when the URL input is empty
pub const EMPTY_URL_STATUS: &str = "Please enter a YouTube URL";

/// Status shown while ingestion is running
pub const INGESTING_STATUS: &str = "Initializing knowledge base... This may take a moment.";

/// Status shown when the backend's init response carries no message
pub const DEFAULT_READY_STATUS: &str = "Ready to chat!";

/// System message appended after a successful ingestion
pub const READY_SYSTEM_MESSAGE: &str =
    "Knowledge base initialized. You can now ask questions about the video.";

/// Result of [`ChatSession::initialize_source`] when no error occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Ingestion succeeded; carries the readiness message shown in the status
    Ready(String),
    /// Another ingestion is in flight; nothing was done
    Ignored,
}

/// Result of [`ChatSession::send_message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Not initialized, empty input, or a reply is already pending
    Ignored,
    /// The backend answered; carries the normalized reply
    Answered(String),
    /// The request failed; carries the failure description
    Failed(String),
}

/// Controller of one chat session
///
/// Constructed once at startup and mutated only through its operations.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use tubechat::backend::HttpBackend;
/// use tubechat::config::BackendConfig;
/// use tubechat::session::ChatSession;
/// use tubechat::view::TerminalView;
///
/// # async fn example() -> tubechat::error::Result<()> {
/// let backend = HttpBackend::new(&BackendConfig::default(), "default_user")?;
/// let session = ChatSession::new(Arc::new(backend), Arc::new(TerminalView::new()));
/// session.initialize_source("https://www.youtube.com/watch?v=abc").await?;
/// session.send_message("What is the video about?").await;
/// # Ok(())
/// # }
/// ```
pub struct ChatSession {
    backend: Arc<dyn Backend>,
    view: Arc<dyn ChatView>,
    state: Mutex<SessionState>,
}

impl ChatSession {
    /// Create a session and render its initial controls
    ///
    /// The initialize action starts enabled; the message input and send
    /// action start disabled until an ingestion succeeds.
    pub fn new(backend: Arc<dyn Backend>, view: Arc<dyn ChatView>) -> Self {
        let session = Self {
            backend,
            view,
            state: Mutex::new(SessionState::default()),
        };
        session.render_controls();
        session
    }

    /// Whether an ingestion has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.state().initialized
    }

    /// Current enablement of the controls
    pub fn controls(&self) -> Controls {
        self.state().controls()
    }

    /// Snapshot of the chat history, oldest first
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.state().transcript.clone()
    }

    /// Current status banner
    pub fn status(&self) -> Status {
        self.state().status.clone()
    }

    /// Whether the thinking indicator is displayed
    pub fn is_thinking(&self) -> bool {
        self.state().thinking.is_some()
    }

    /// Write the value of an input element
    ///
    /// Elements other than the URL and message inputs are ignored.
    pub fn set_input(&self, element: ElementId, value: &str) {
        let mut state = self.state();
        match element {
            ElementId::UrlInput => state.url_input = value.to_string(),
            ElementId::MessageInput => state.message_input = value.to_string(),
            other => tracing::debug!("Ignoring input for non-input element {}", other),
        }
    }

    /// Read the value of an input element
    pub fn input_value(&self, element: ElementId) -> String {
        let state = self.state();
        match element {
            ElementId::UrlInput => state.url_input.clone(),
            ElementId::MessageInput => state.message_input.clone(),
            _ => String::new(),
        }
    }

    /// Ingest a content source and prepare the session for questions
    ///
    /// On success the chat history is replaced by a single system message
    /// and the message controls are enabled. The initialize action is
    /// re-enabled on every exit path.
    ///
    /// # Errors
    ///
    /// Returns [`TubechatError::Validation`] when the URL is empty after
    /// trimming (no request is made), and [`TubechatError::Ingestion`] when
    /// the backend call fails. Both are also shown in the status banner.
    pub async fn initialize_source(&self, raw_url: &str) -> Result<InitOutcome> {
        let url = raw_url.trim();

        {
            let mut state = self.state();
            if state.ingesting {
                tracing::debug!("Ingestion already in flight, ignoring request");
                return Ok(InitOutcome::Ignored);
            }
            if !url.is_empty() {
                state.ingesting = true;
            }
        }

        if url.is_empty() {
            self.update_status(Status::error(EMPTY_URL_STATUS));
            return Err(TubechatError::Validation("empty input".to_string()).into());
        }

        self.view.set_enabled(ElementId::InitButton, false);
        self.update_status(Status::loading(INGESTING_STATUS));
        tracing::info!("Ingesting content source: {}", url);

        let outcome = match self.backend.init(url).await {
            Ok(response) => {
                let ready = response
                    .message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| DEFAULT_READY_STATUS.to_string());
                self.update_status(Status::success(ready.clone()));

                {
                    let mut state = self.state();
                    state.initialized = true;
                    state.transcript.clear();
                }
                self.render_message_controls();
                self.view.clear_history();
                self.append(ChatMessage::system(READY_SYSTEM_MESSAGE));

                tracing::info!("Content source ready");
                Ok(InitOutcome::Ready(ready))
            }
            Err(e) => {
                let description = describe(&e);
                tracing::warn!("Ingestion failed: {}", description);
                self.update_status(Status::error(format!("Error: {}", description)));

                self.state().initialized = false;
                self.render_message_controls();

                Err(TubechatError::Ingestion(description).into())
            }
        };

        self.state().ingesting = false;
        self.view.set_enabled(ElementId::InitButton, true);

        outcome
    }

    /// Ask a question against the ingested source
    ///
    /// Silently ignored before a successful ingestion, for empty input, and
    /// while a previous question is still pending. Failures are rendered as
    /// an error message in the history rather than returned; the user's
    /// message stays in place. The thinking indicator is removed and the
    /// message controls re-enabled on every exit path.
    pub async fn send_message(&self, raw_text: &str) -> SendOutcome {
        let text = raw_text.trim();
        let user_message = ChatMessage::user(text);
        let indicator = ThinkingIndicator::default();

        {
            let mut state = self.state();
            if !state.initialized || text.is_empty() || state.awaiting_reply {
                return SendOutcome::Ignored;
            }
            state.awaiting_reply = true;
            state.transcript.push(user_message.clone());
            state.message_input.clear();
            state.thinking = Some(indicator.clone());
        }

        self.view.append_message(&user_message);
        self.view.set_input_value(ElementId::MessageInput, "");
        self.render_message_controls();
        self.view.show_thinking(indicator.text);

        let outcome = match self.backend.message(text).await {
            Ok(body) => {
                tracing::debug!("API response: {}", body);
                let reply = normalize_response(&body);
                self.append(ChatMessage::bot(reply.clone()));
                SendOutcome::Answered(reply)
            }
            Err(e) => {
                let description = describe(&e);
                tracing::warn!("Message request failed: {}", description);
                self.append(ChatMessage::error(format!("Error: {}", description)));
                SendOutcome::Failed(description)
            }
        };

        let had_indicator = {
            let mut state = self.state();
            state.awaiting_reply = false;
            state.thinking.take().is_some()
        };
        if had_indicator {
            self.view.remove_thinking();
        }
        self.render_message_controls();
        self.view.focus(ElementId::MessageInput);

        outcome
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_status(&self, status: Status) {
        self.state().status = status.clone();
        self.view.set_status(&status);
    }

    fn append(&self, message: ChatMessage) {
        self.state().transcript.push(message.clone());
        self.view.append_message(&message);
    }

    fn render_controls(&self) {
        let controls = self.controls();
        self.view
            .set_enabled(ElementId::InitButton, controls.init_enabled);
        self.render_message_controls();
    }

    fn render_message_controls(&self) {
        let enabled = self.controls().message_enabled;
        self.view.set_enabled(ElementId::MessageInput, enabled);
        self.view.set_enabled(ElementId::SendButton, enabled);
    }
}

/// User-facing description of a failed backend call
fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<TubechatError>() {
        Some(TubechatError::Request(message)) => message.clone(),
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingView, ScriptedBackend, ViewCall};
    use serde_json::json;

    fn session_with(backend: &Arc<ScriptedBackend>, view: &Arc<RecordingView>) -> ChatSession {
        ChatSession::new(backend.clone(), view.clone())
    }

    async fn ready_session(
        backend: &Arc<ScriptedBackend>,
        view: &Arc<RecordingView>,
    ) -> ChatSession {
        backend.push_init(Ok(json!({"status": "ready"})));
        let session = session_with(backend, view);
        session
            .initialize_source("https://youtu.be/abc")
            .await
            .unwrap();
        view.clear();
        session
    }

    #[test]
    fn test_new_session_disables_message_controls() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        let session = session_with(&backend, &view);

        assert!(!session.is_initialized());
        assert_eq!(
            session.controls(),
            Controls {
                init_enabled: true,
                message_enabled: false
            }
        );
        assert!(view.calls().contains(&ViewCall::Enabled(ElementId::SendButton, false)));
    }

    #[tokio::test]
    async fn test_empty_url_makes_no_request() {
        for raw in ["", "   ", "\t\n"] {
            let backend = Arc::new(ScriptedBackend::new());
            let view = Arc::new(RecordingView::new());
            let session = session_with(&backend, &view);

            let err = session.initialize_source(raw).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<TubechatError>(),
                Some(TubechatError::Validation(_))
            ));
            assert_eq!(backend.init_calls(), 0);
            assert_eq!(session.status(), Status::error(EMPTY_URL_STATUS));
            assert!(session.controls().init_enabled);
        }
    }

    #[tokio::test]
    async fn test_successful_ingestion() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        backend.push_init(Ok(json!({"status": "ready", "message": "Total chunks: 7"})));
        let session = session_with(&backend, &view);

        let outcome = session
            .initialize_source("  https://youtu.be/abc  ")
            .await
            .unwrap();

        assert_eq!(outcome, InitOutcome::Ready("Total chunks: 7".to_string()));
        assert_eq!(backend.init_urls(), vec!["https://youtu.be/abc".to_string()]);
        assert!(session.is_initialized());
        assert_eq!(session.transcript(), vec![ChatMessage::system(READY_SYSTEM_MESSAGE)]);
        assert_eq!(session.status(), Status::success("Total chunks: 7"));
        assert_eq!(
            session.controls(),
            Controls {
                init_enabled: true,
                message_enabled: true
            }
        );

        let calls = view.calls();
        assert!(calls.contains(&ViewCall::Status(Status::loading(INGESTING_STATUS))));
        assert!(calls.contains(&ViewCall::ClearHistory));
        assert_eq!(
            calls.last(),
            Some(&ViewCall::Enabled(ElementId::InitButton, true))
        );
    }

    #[tokio::test]
    async fn test_ingestion_without_message_uses_default_status() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        backend.push_init(Ok(json!({})));
        let session = session_with(&backend, &view);

        let outcome = session.initialize_source("https://youtu.be/abc").await.unwrap();
        assert_eq!(outcome, InitOutcome::Ready(DEFAULT_READY_STATUS.to_string()));
    }

    #[tokio::test]
    async fn test_ingestion_with_non_string_fields_still_succeeds() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        backend.push_init(Ok(json!({"message": 5, "status": 201})));
        let session = session_with(&backend, &view);

        let outcome = session.initialize_source("https://youtu.be/abc").await.unwrap();
        assert_eq!(outcome, InitOutcome::Ready(DEFAULT_READY_STATUS.to_string()));
        assert!(session.is_initialized());
        assert!(session.controls().message_enabled);
    }

    #[tokio::test]
    async fn test_failed_ingestion_keeps_session_uninitialized() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        backend.push_init(Err("Failed to initialize chat (500 Internal Server Error)"));
        let session = session_with(&backend, &view);

        let err = session
            .initialize_source("https://youtu.be/abc")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TubechatError>(),
            Some(TubechatError::Ingestion(_))
        ));
        assert!(!session.is_initialized());
        assert!(!session.controls().message_enabled);
        assert!(session.controls().init_enabled);
        assert_eq!(
            session.status(),
            Status::error("Error: Failed to initialize chat (500 Internal Server Error)")
        );
    }

    #[tokio::test]
    async fn test_failed_reingestion_returns_to_uninitialized() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        let session = ready_session(&backend, &view).await;

        backend.push_init(Err("Failed to initialize chat (502 Bad Gateway)"));
        assert!(session.initialize_source("https://youtu.be/def").await.is_err());

        assert!(!session.is_initialized());
        assert!(!session.controls().message_enabled);
        assert_eq!(session.send_message("still there?").await, SendOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_reingestion_clears_history() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        let session = ready_session(&backend, &view).await;

        backend.push_message(Ok(json!({"answer": "a"})));
        session.send_message("q").await;
        assert_eq!(session.transcript().len(), 3);

        backend.push_init(Ok(json!({"message": "again"})));
        session.initialize_source("https://youtu.be/def").await.unwrap();
        assert_eq!(session.transcript(), vec![ChatMessage::system(READY_SYSTEM_MESSAGE)]);
    }

    #[tokio::test]
    async fn test_send_before_initialization_is_silent() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        let session = session_with(&backend, &view);
        view.clear();

        assert_eq!(session.send_message("hello").await, SendOutcome::Ignored);
        assert_eq!(backend.message_calls(), 0);
        assert!(view.calls().is_empty());
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_empty_message_is_ignored() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        let session = ready_session(&backend, &view).await;
        let before = session.transcript();

        for raw in ["", "  ", "\n"] {
            assert_eq!(session.send_message(raw).await, SendOutcome::Ignored);
        }
        assert_eq!(backend.message_calls(), 0);
        assert_eq!(session.transcript(), before);
        assert!(view.calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_message_round() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        let session = ready_session(&backend, &view).await;
        session.set_input(ElementId::MessageInput, "What is it about?");

        backend.push_message(Ok(json!({"thread_id": "default_user", "answer": "Rust."})));
        let outcome = session.send_message("  What is it about?  ").await;

        assert_eq!(outcome, SendOutcome::Answered("Rust.".to_string()));
        assert_eq!(backend.messages(), vec!["What is it about?".to_string()]);
        assert_eq!(
            session.transcript(),
            vec![
                ChatMessage::system(READY_SYSTEM_MESSAGE),
                ChatMessage::user("What is it about?"),
                ChatMessage::bot("Rust."),
            ]
        );
        assert_eq!(session.input_value(ElementId::MessageInput), "");
        assert!(!session.is_thinking());
        assert!(session.controls().message_enabled);

        let calls = view.calls();
        assert_eq!(
            calls,
            vec![
                ViewCall::Append(ChatMessage::user("What is it about?")),
                ViewCall::InputValue(ElementId::MessageInput, String::new()),
                ViewCall::Enabled(ElementId::MessageInput, false),
                ViewCall::Enabled(ElementId::SendButton, false),
                ViewCall::ShowThinking("Thinking...".to_string()),
                ViewCall::Append(ChatMessage::bot("Rust.")),
                ViewCall::RemoveThinking,
                ViewCall::Enabled(ElementId::MessageInput, true),
                ViewCall::Enabled(ElementId::SendButton, true),
                ViewCall::Focus(ElementId::MessageInput),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_message_keeps_history_and_reenables() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        let session = ready_session(&backend, &view).await;

        backend.push_message(Err("Failed to send message (500 Internal Server Error)"));
        let outcome = session.send_message("why?").await;

        assert_eq!(
            outcome,
            SendOutcome::Failed("Failed to send message (500 Internal Server Error)".to_string())
        );
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1], ChatMessage::user("why?"));
        assert_eq!(
            transcript[2],
            ChatMessage::error("Error: Failed to send message (500 Internal Server Error)")
        );
        assert!(!session.is_thinking());
        assert!(session.controls().message_enabled);
        assert!(view.calls().contains(&ViewCall::RemoveThinking));
        assert_eq!(
            view.calls().last(),
            Some(&ViewCall::Focus(ElementId::MessageInput))
        );
    }

    #[tokio::test]
    async fn test_concurrent_sends_issue_one_request() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        let session = ready_session(&backend, &view).await;

        backend.push_message(Ok(json!({"answer": "first"})));
        backend.push_message(Ok(json!({"answer": "second"})));
        backend.hold_messages();

        let first = session.send_message("one");
        let second = async {
            // runs once the first call is parked on the backend
            tokio::task::yield_now().await;
            let outcome = session.send_message("two").await;
            backend.release_messages();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, SendOutcome::Answered("first".to_string()));
        assert_eq!(second, SendOutcome::Ignored);
        assert_eq!(backend.message_calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_ingestion_issues_one_request() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        backend.push_init(Ok(json!({"message": "ok"})));
        backend.hold_inits();
        let session = session_with(&backend, &view);

        let first = session.initialize_source("https://youtu.be/abc");
        let second = async {
            tokio::task::yield_now().await;
            assert!(!session.controls().init_enabled);
            let outcome = session.initialize_source("https://youtu.be/abc").await;
            backend.release_inits();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap(), InitOutcome::Ready("ok".to_string()));
        assert_eq!(second.unwrap(), InitOutcome::Ignored);
        assert_eq!(backend.init_calls(), 1);
    }

    #[tokio::test]
    async fn test_non_request_errors_are_described_verbatim() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        let session = ready_session(&backend, &view).await;

        backend.push_message_error(anyhow::anyhow!("connection reset"));
        let outcome = session.send_message("hi").await;
        assert_eq!(outcome, SendOutcome::Failed("connection reset".to_string()));
    }

    #[test]
    fn test_set_input_ignores_non_inputs() {
        let backend = Arc::new(ScriptedBackend::new());
        let view = Arc::new(RecordingView::new());
        let session = session_with(&backend, &view);

        session.set_input(ElementId::UrlInput, "https://youtu.be/abc");
        session.set_input(ElementId::SendButton, "ignored");
        assert_eq!(session.input_value(ElementId::UrlInput), "https://youtu.be/abc");
        assert_eq!(session.input_value(ElementId::SendButton), "");
    }
}
