mod client;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub use client::{DEFAULT_COLLECTION_PATH, EmployeeClient, Endpoint};

/// Shared client result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid endpoint: {0}")]
    Url(String),
    #[error("request did not complete: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("server responded with {status}")]
    Server {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("unreadable response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// One-line text for the status banner.
    ///
    /// A server-provided `detail` wins; everything else collapses onto the
    /// operation's generic `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Transport(_) => format!("{fallback} (server unreachable)"),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull the human-readable `detail` out of an error body.
///
/// Accepts `{"detail": "text"}` and the validation shape
/// `{"detail": [{"msg": ".."}, ..]}`. Blank or missing details yield `None`.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Array(items) => {
            let messages = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
