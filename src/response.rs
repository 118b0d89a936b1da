//! Normalization of question-answering responses
//!
//! The message endpoint does not promise a response shape. Known backends
//! answer with `{"answer": ...}`, `{"response": ...}`, `{"content": ...}` or a
//! bare JSON string, so the body is probed in a fixed order and the first
//! usable candidate becomes the bot's reply.

use serde_json::Value;

/// Fields probed for answer text, highest priority first
pub const ANSWER_FIELDS: [&str; 3] = ["answer", "response", "content"];

/// Shown when the body carries nothing that can be rendered
pub const UNRECOGNIZED_RESPONSE: &str = "I couldn't understand the response.";

/// Interpretation of a decoded message response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotReply {
    /// The body itself is a JSON string
    Text(String),

    /// One of [`ANSWER_FIELDS`] carried the answer
    Field {
        /// Name of the field that matched
        name: &'static str,
        /// Rendered field value
        text: String,
    },

    /// No known field matched; the serialized body is shown instead
    Dump(String),

    /// Nothing usable (a `null` body)
    Unrecognized,
}

impl BotReply {
    /// Classify a decoded response body
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use tubechat::response::BotReply;
    ///
    /// let reply = BotReply::from_body(&json!({"answer": "a", "response": "b"}));
    /// assert_eq!(reply, BotReply::Field { name: "answer", text: "a".to_string() });
    /// ```
    pub fn from_body(body: &Value) -> Self {
        match body {
            Value::String(text) => Self::Text(text.clone()),
            Value::Null => Self::Unrecognized,
            _ => {
                let field = ANSWER_FIELDS.iter().find_map(|name| {
                    body.get(*name)
                        .filter(|value| is_present(value))
                        .map(|value| (*name, render_value(value)))
                });

                match field {
                    Some((name, text)) => Self::Field { name, text },
                    None => match serde_json::to_string(body) {
                        Ok(dump) if !dump.is_empty() => Self::Dump(dump),
                        _ => Self::Unrecognized,
                    },
                }
            }
        }
    }

    /// Text to display for this reply
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) | Self::Dump(text) => text,
            Self::Field { text, .. } => text,
            Self::Unrecognized => UNRECOGNIZED_RESPONSE.to_string(),
        }
    }
}

/// Normalize a decoded response body into the text shown as the bot reply
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tubechat::response::normalize_response;
///
/// assert_eq!(normalize_response(&json!("x")), "x");
/// assert_eq!(normalize_response(&json!({"content": "c"})), "c");
/// assert_eq!(normalize_response(&json!({})), "{}");
/// ```
pub fn normalize_response(body: &Value) -> String {
    BotReply::from_body(body).into_text()
}

// Empty strings, null, false and zero do not count as an answer.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
