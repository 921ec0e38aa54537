//! Client-side error surface.

use thiserror::Error;

use warden_auth::AuthzError;
use warden_core::DomainError;

/// Shown when a failed response carries no usable body.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Every failure a console operation can report.
///
/// `Display` yields the single human-readable message the operator sees.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected by a save gate; nothing was sent.
    #[error("{}", .0.message())]
    Validation(#[from] DomainError),

    #[error("access denied: {0}")]
    AccessDenied(#[from] AuthzError),

    #[error("not authenticated; log in first")]
    NotAuthenticated,

    /// Non-2xx response from the backend.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("session storage error: {0}")]
    Session(String),
}

impl ClientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// HTTP status for backend errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Message for a failed response body.
///
/// `{message}` when present; JSON without it reports the status; anything
/// that is not JSON gets [`FALLBACK_MESSAGE`].
pub(crate) fn error_message(status: u16, body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error! status: {status}")),
        Err(_) => FALLBACK_MESSAGE.to_string(),
    }
}
