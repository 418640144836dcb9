use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;
use thiserror::Error;
use tracing_error::SpanTrace;

use crate::constants::{FALLBACK_REPLY, INVALID_MESSAGE_REPLY, UNREADABLE_BODY_REPLY};

/// Inbound `/chat` body. `message` stays optional so a missing field reaches
/// the handler instead of failing inside the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Returns the message when it carries any non-whitespace text.
    pub fn validated_message(&self) -> Result<&str> {
        match self.message.as_deref() {
            Some(m) if !m.trim().is_empty() => Ok(m),
            Some(_) => Err(RelayError::Validation("message is blank".to_string()).into()),
            None => Err(RelayError::Validation("message field is missing".to_string()).into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    pub reply_html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureReply {
    pub reply: String,
}

/// One line of the chat log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub user: String,
    pub bot: String,
}

impl LogEntry {
    /// Stamps the entry with the current UTC time, e.g. `2024-05-01T09:30:00.123Z`.
    pub fn now(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            user: user.into(),
            bot: bot.into(),
        }
    }
}

pub struct UpstreamHealth {
    pub consecutive_failures: AtomicU32,
    pub total_requests: AtomicU64,
    pub failed_requests: AtomicU64,
    pub last_success: std::sync::RwLock<Option<Instant>>,
    pub last_failure: std::sync::RwLock<Option<Instant>>,
}

impl Default for UpstreamHealth {
    fn default() -> Self {
        Self {
            consecutive_failures: AtomicU32::new(0),
            total_requests: AtomicU64::new(0),
            failed_requests: AtomicU64::new(0),
            last_success: std::sync::RwLock::new(None),
            last_failure: std::sync::RwLock::new(None),
        }
    }
}

impl UpstreamHealth {
    pub fn record_success(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.store(0, Ordering::Relaxed);
        if let Ok(mut last) = self.last_success.write() {
            *last = Some(Instant::now());
        }
    }

    pub fn record_failure(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_failure.write() {
            *last = Some(Instant::now());
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.consecutive_failures.load(Ordering::Relaxed) > 0
    }

    pub fn secs_since_success(&self) -> Option<u64> {
        Self::secs_since(&self.last_success)
    }

    pub fn secs_since_failure(&self) -> Option<u64> {
        Self::secs_since(&self.last_failure)
    }

    fn secs_since(slot: &std::sync::RwLock<Option<Instant>>) -> Option<u64> {
        let last = match slot.read() {
            Ok(guard) => *guard,
            Err(_) => None,
        };
        last.map(|t| t.elapsed().as_secs())
    }
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upstream error (status {0}): {1}")]
    Upstream(axum::http::StatusCode, String),

    #[error("Malformed upstream response: {0}")]
    MalformedUpstream(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Unreadable request body (status {0}): {1}")]
    BadBody(axum::http::StatusCode, String),
}

impl RelayError {
    /// Failures of the completion call itself, as opposed to local ones.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            RelayError::Network(_) | RelayError::Upstream(..) | RelayError::MalformedUpstream(_)
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            RelayError::Serialization(_) => "SERIALIZATION_ERROR",
            RelayError::Network(_) => "NETWORK_ERROR",
            RelayError::Io(_) => "IO_ERROR",
            RelayError::Upstream(..) => "UPSTREAM_ERROR",
            RelayError::MalformedUpstream(_) => "MALFORMED_UPSTREAM",
            RelayError::Validation(_) => "VALIDATION_ERROR",
            RelayError::BadBody(..) => "BAD_BODY",
        }
    }
}

/// Callers only ever see a fixed `{ "reply": ... }` body; the details stay in the operator log.
impl axum::response::IntoResponse for ObservedError {
    fn into_response(self) -> axum::response::Response {
        let (status, reply) = match &self.inner {
            RelayError::Validation(_) => (axum::http::StatusCode::BAD_REQUEST, INVALID_MESSAGE_REPLY),
            RelayError::BadBody(status, _) => (*status, UNREADABLE_BODY_REPLY),
            _ => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_REPLY),
        };
        (
            status,
            axum::Json(FailureReply {
                reply: reply.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Debug)]
pub struct ObservedError {
    pub inner: RelayError,
    pub span_trace: SpanTrace,
}

impl std::fmt::Display for ObservedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nSpan Trace:\n{}", self.inner, self.span_trace)
    }
}

impl std::error::Error for ObservedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl<E> From<E> for ObservedError
where
    E: Into<RelayError>,
{
    fn from(error: E) -> Self {
        Self {
            inner: error.into(),
            span_trace: SpanTrace::capture(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ObservedError>;
