//! Client configuration from the environment.

use std::path::PathBuf;

/// Backend used when `WARDEN_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

pub const API_URL_VAR: &str = "WARDEN_API_URL";
pub const SESSION_FILE_VAR: &str = "WARDEN_SESSION_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub api_url: String,
    /// Where the session is persisted; `None` when no data directory exists.
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a closure).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_file = lookup(SESSION_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(default_session_file);

        Self {
            api_url,
            session_file,
        }
    }
}

/// `<data dir>/warden/session.json`.
pub fn default_session_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("warden").join("session.json"))
}
