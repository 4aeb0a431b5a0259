//! Failure classification for analysis requests.
//!
//! The backend has no structured error code for "second factor needed"; it
//! is detected by substring match on whatever error text is available. The
//! phrase list below is the compatibility contract with the backend and is
//! matched exactly (case-insensitive).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Phrases that signal the backend wants a two-factor code.
const TWO_FACTOR_PHRASES: &[&str] = &["two factor", "verification code"];

/// Returns true if `text` asks for a two-factor code.
pub fn mentions_two_factor(text: &str) -> bool {
    let lower = text.to_lowercase();
    TWO_FACTOR_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
}

/// Categories of request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection refused, DNS failure, TLS error, ...
    Network,
    /// The request did not complete within the configured timeout.
    Timeout,
    /// A 2xx body that is not a valid analysis result.
    Decode,
    /// Non-2xx HTTP status.
    Server,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "decode"),
            FailureKind::Server => write!(f, "server"),
        }
    }
}

/// A failed request with its best human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFailure {
    pub kind: FailureKind,
    /// One-line summary suitable for display.
    pub message: String,
    /// Raw response body, when there was one.
    pub details: Option<String>,
}

impl RequestFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a failure from a non-2xx response.
    ///
    /// Pulls a cleaner message out of JSON bodies shaped like
    /// `{"detail": ...}`, `{"error": ...}`, `{"message": ...}` or
    /// `{"error": {"message": ...}}`.
    pub fn http_status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let details = (!body.is_empty()).then(|| body.to_string());
        let message = match extract_error_text(body) {
            Some(text) => format!("HTTP {status}: {text}"),
            None if body.is_empty() => format!("HTTP {status}"),
            None => format!("HTTP {status}: {body}"),
        };
        Self {
            kind: FailureKind::Server,
            message,
            details,
        }
    }

    pub fn timeout(after_secs: u64) -> Self {
        Self::new(
            FailureKind::Timeout,
            format!("request timed out after {after_secs}s"),
        )
    }

    /// Text searched for two-factor phrases: the message plus any body.
    fn searchable_text(&self) -> String {
        match &self.details {
            Some(details) => format!("{}\n{details}", self.message),
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn extract_error_text(body: &str) -> Option<String> {
    let json = serde_json::from_str::<Value>(body).ok()?;
    let text = ["detail", "error", "message"].iter().find_map(|key| {
        match json.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj.get("message")?.as_str().map(str::to_string),
            _ => None,
        }
    })?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Outcome of a failed `analyze` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The backend wants a two-factor code before it will continue.
    TwoFactorRequired,
    /// Anything else: network, timeout, decode or server error.
    RequestFailed(RequestFailure),
}

impl ClientError {
    /// Classifies a failure, promoting it to `TwoFactorRequired` when its
    /// text asks for a verification code.
    pub fn classify(failure: RequestFailure) -> Self {
        if mentions_two_factor(&failure.searchable_text()) {
            ClientError::TwoFactorRequired
        } else {
            ClientError::RequestFailed(failure)
        }
    }

    pub fn is_two_factor_required(&self) -> bool {
        matches!(self, ClientError::TwoFactorRequired)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::TwoFactorRequired => write!(f, "two-factor code required"),
            ClientError::RequestFailed(failure) => write!(f, "{failure}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Result type for analysis requests.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
