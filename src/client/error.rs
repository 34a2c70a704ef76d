use std::fmt;

use derive_more::Display;
use serde::Serialize;
use serde_json::Value;

const REDACTED: &str = "***";

/// Everything known about a failed exchange: what was sent, and what (if
/// anything) came back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportDetail {
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub method: String,
    pub url: String,
    pub request_body: Option<Value>,
    pub response_body: Option<String>,
    pub message: String,
}

impl TransportDetail {
    /// The response body when the server sent one, the raw error otherwise.
    pub fn reason(&self) -> &str {
        match self.response_body.as_deref() {
            Some(body) if !body.trim().is_empty() => body,
            _ => &self.message,
        }
    }
}

impl fmt::Display for TransportDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)?;
        if let Some(status) = self.status {
            write!(f, " -> {} {}", status, self.status_text.as_deref().unwrap_or(""))?;
        }
        write!(f, ": {}", self.reason())
    }
}

/// Replaces credential values in a request body before it is kept for
/// error reports.
pub fn redact(body: &Value) -> Value {
    match body {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    if key.eq_ignore_ascii_case("password") {
                        (key.clone(), Value::String(REDACTED.to_string()))
                    } else {
                        (key.clone(), redact(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

#[derive(Debug, Display)]
pub enum ClientError {
    #[display("Authentication failed: {_0}")]
    Unauthorized(TransportDetail),

    #[display("Request rejected: {_0}")]
    Rejected(TransportDetail),

    #[display("Transport error: {_0}")]
    Transport(TransportDetail),

    #[display("Unexpected response: {_0}")]
    Decode(TransportDetail),

    #[display("Not logged in")]
    NotAuthenticated,

    #[display("Invalid base url: {_0}")]
    InvalidUrl(String),

    #[display("Could not encode request: {_0}")]
    Encode(String),
}

impl std::error::Error for ClientError {}

impl ClientError {
    pub fn detail(&self) -> Option<&TransportDetail> {
        match self {
            ClientError::Unauthorized(d)
            | ClientError::Rejected(d)
            | ClientError::Transport(d)
            | ClientError::Decode(d) => Some(d),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.detail().and_then(|d| d.status)
    }
}
