//! UI events and their handler bindings
//!
//! A host translates its native input into [`UiEvent`]s and hands them to an
//! [`EventDispatcher`]. Bindings are registered explicitly at startup;
//! [`EventDispatcher::standard`] installs the three the chat page needs:
//!
//! - click on `init-btn` ingests the URL input
//! - click on `send-btn` sends the message input
//! - Enter pressed in `user-message` sends the message input

use crate::error::Result;
use crate::session::{ChatSession, InitOutcome, SendOutcome};
use crate::view::ElementId;

/// Key that submits the message input
pub const SUBMIT_KEY: &str = "Enter";

/// Input from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// An element was activated
    Click(ElementId),
    /// A key was pressed while an element had focus
    KeyPress {
        /// Focused element
        target: ElementId,
        /// Key name, e.g. `"Enter"`
        key: String,
    },
    /// The value of an input changed
    Input {
        /// Edited input
        target: ElementId,
        /// New value
        value: String,
    },
}

/// What causes a binding to fire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Activation of the target
    Click,
    /// A specific key pressed in the target
    Key(String),
}

/// Controller operation a binding invokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ingest the current URL input
    InitializeSource,
    /// Send the current message input
    SendMessage,
}

/// Association of an element and trigger with an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Element the event must originate from
    pub target: ElementId,
    /// Kind of event that fires the binding
    pub trigger: Trigger,
    /// Session operation to run
    pub action: Action,
}

/// Effect of dispatching one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// No binding matched
    Unhandled,
    /// An input value was stored
    InputUpdated,
    /// The ingestion action ran
    Initialized(InitOutcome),
    /// The send action ran
    Sent(SendOutcome),
}

/// Routes host events to session operations
#[derive(Debug, Clone, Default)]
pub struct EventDispatcher {
    bindings: Vec<Binding>,
}

impl EventDispatcher {
    /// Create a dispatcher with no bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher with the chat page's bindings installed
    ///
    /// # Examples
    ///
    /// ```
    /// use tubechat::events::{Action, EventDispatcher, UiEvent};
    /// use tubechat::view::ElementId;
    ///
    /// let dispatcher = EventDispatcher::standard();
    /// let enter = UiEvent::KeyPress {
    ///     target: ElementId::MessageInput,
    ///     key: "Enter".to_string(),
    /// };
    /// assert_eq!(dispatcher.resolve(&enter), Some(Action::SendMessage));
    /// ```
    pub fn standard() -> Self {
        let mut dispatcher = Self::new();
        dispatcher
            .bind(ElementId::InitButton, Trigger::Click, Action::InitializeSource)
            .bind(ElementId::SendButton, Trigger::Click, Action::SendMessage)
            .bind(
                ElementId::MessageInput,
                Trigger::Key(SUBMIT_KEY.to_string()),
                Action::SendMessage,
            );
        dispatcher
    }

    /// Register a binding
    pub fn bind(&mut self, target: ElementId, trigger: Trigger, action: Action) -> &mut Self {
        tracing::debug!("Binding {:?} on {} to {:?}", trigger, target, action);
        self.bindings.push(Binding {
            target,
            trigger,
            action,
        });
        self
    }

    /// Registered bindings in registration order
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Action bound to an event, if any
    pub fn resolve(&self, event: &UiEvent) -> Option<Action> {
        self.bindings
            .iter()
            .find(|binding| match (event, &binding.trigger) {
                (UiEvent::Click(target), Trigger::Click) => *target == binding.target,
                (UiEvent::KeyPress { target, key }, Trigger::Key(bound)) => {
                    *target == binding.target && key == bound
                }
                _ => false,
            })
            .map(|binding| binding.action)
    }

    /// Deliver an event to the session
    ///
    /// Input events update the stored input values. Bound events run their
    /// action against the current input value.
    ///
    /// # Errors
    ///
    /// Propagates validation and ingestion errors from
    /// [`ChatSession::initialize_source`]; they have already been rendered
    /// in the status banner when this returns.
    pub async fn dispatch(&self, session: &ChatSession, event: UiEvent) -> Result<Dispatched> {
        if let UiEvent::Input { target, value } = &event {
            session.set_input(*target, value);
            return Ok(Dispatched::InputUpdated);
        }

        match self.resolve(&event) {
            Some(Action::InitializeSource) => {
                let url = session.input_value(ElementId::UrlInput);
                let outcome = session.initialize_source(&url).await?;
                Ok(Dispatched::Initialized(outcome))
            }
            Some(Action::SendMessage) => {
                let text = session.input_value(ElementId::MessageInput);
                Ok(Dispatched::Sent(session.send_message(&text).await))
            }
            None => {
                tracing::trace!("No binding for {:?}", event);
                Ok(Dispatched::Unhandled)
            }
        }
    }
}
