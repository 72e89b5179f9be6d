//! Startup configuration.
//!
//! Everything is read once from the process environment at startup. The
//! only mandatory value is `GITHUB_TOKEN`; the rest have overridable
//! defaults.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::error::{HubmanError, Result};

/// Default commit message offered when pushing local changes.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update via hubman";

/// Runtime configuration resolved from the environment.
#[derive(Clone)]
pub struct Config {
    /// Personal access token used for API calls and credentialed clone URLs.
    pub token: String,
    /// Base URL of the GitHub REST API.
    pub api_url: String,
    /// Default local checkout offered by the sync manager prompt.
    pub repo_path: PathBuf,
    /// Default commit message for push and sync.
    pub commit_message: String,
    /// Append-only action log location.
    pub log_file: PathBuf,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// A missing `GITHUB_TOKEN` is a fatal startup error.
    pub fn from_env() -> Result<Self> {
        let token = env::var("GITHUB_TOKEN").map_err(|_| HubmanError::Auth {
            message: "GITHUB_TOKEN not set in the environment".into(),
        })?;

        let api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| "https://api.github.com".to_owned());

        let repo_path = env::var("HUBMAN_REPO_PATH")
            .map(PathBuf::from)
            .or_else(|_| env::current_dir())?;

        let commit_message = env::var("HUBMAN_COMMIT_MESSAGE")
            .unwrap_or_else(|_| DEFAULT_COMMIT_MESSAGE.to_owned());

        let log_file = env::var("HUBMAN_LOG_FILE").map(PathBuf::from).unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".hubman")
                .join("actions.log")
        });

        Ok(Self {
            token,
            api_url,
            repo_path,
            commit_message,
            log_file,
        })
    }
}

// The token must never reach logs or the terminal.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"***")
            .field("api_url", &self.api_url)
            .field("repo_path", &self.repo_path)
            .field("commit_message", &self.commit_message)
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// Expand a leading `~` in a user-entered path.
pub fn expand_tilde(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_token() {
        let config = Config {
            token: "ghp_secret".into(),
            api_url: "https://api.github.com".into(),
            repo_path: PathBuf::from("/tmp"),
            commit_message: DEFAULT_COMMIT_MESSAGE.into(),
            log_file: PathBuf::from("/tmp/actions.log"),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths_alone() {
        assert_eq!(expand_tilde("/var/repo"), PathBuf::from("/var/repo"));
    }
}
