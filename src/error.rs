//! Custom error types for research-presence.
//!
//! Fatal conditions (missing input, bad config, unwritable outputs) surface as
//! `PresenceError`. Per-researcher lookup failures are folded into
//! [`crate::metric::MetricResult`] by the lookup layer and never reach the caller
//! as an `Err`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for research-presence operations.
#[derive(Debug, Error)]
pub enum PresenceError {
    /// Names file does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Names file exists but cannot be interpreted
    #[error("Input format error: {0}")]
    InputFormat(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Credentials rejected by the remote service
    #[error("Unauthorized: HTTP {0}")]
    Unauthorized(u16),

    /// Usage quota exhausted or request rate exceeded
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// External API returned an error
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from API
        message: String,
    },

    /// Response body did not contain a usable count
    #[error("Parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Chart rendering error
    #[error("Plot error: {0}")]
    Plot(String),
}

/// Result type alias using `PresenceError`
pub type Result<T> = std::result::Result<T, PresenceError>;

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with a parse error message
    fn ok_or_parse(self, msg: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_parse(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| PresenceError::Parse(msg.to_string()))
    }
}
