//! Error types for hubman operations.

use thiserror::Error;

/// The main error type for hubman operations.
#[derive(Error, Debug)]
pub enum HubmanError {
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Cancelled by user")]
    UserCancelled,

    #[error("GitHub API error: {message}")]
    GitHub { message: String },

    #[error("`{program} {args}` exited with {}", code.map(|c| c.to_string()).unwrap_or_else(|| "signal".into()))]
    Process {
        program: String,
        /// Joined argument list with any embedded credentials redacted.
        args: String,
        code: Option<i32>,
    },

    #[error("Clone failed for {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Pull failed: {message}")]
    PullFailed { message: String },

    #[error("Push failed: {message}")]
    PushFailed { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for hubman operations.
pub type Result<T> = std::result::Result<T, HubmanError>;

impl HubmanError {
    /// True for the benign cancellation case, which returns to the menu
    /// without being reported as a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }
}
