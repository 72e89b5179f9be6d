//! Local sync orchestration: ensure a checkout exists, then pull, push,
//! or sync it against its configured remote.
//!
//! Every step is one git invocation with a status check between steps.
//! There is no retry or backoff anywhere in this flow, and a completed
//! step is never rolled back when a later one fails.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::audit::ActionLog;
use crate::error::{HubmanError, Result};
use crate::ui::prompt::Prompter;
use crate::vcs::runner::{GitRunner, process_failure};
use crate::vcs::url::{redact, with_token};

/// Result of a push or sync that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// A commit was created and pushed.
    Pushed,
    /// The working tree was clean; nothing was committed or pushed.
    NothingToCommit,
}

/// Commit identity used when the checkout has none configured.
const IDENTITY_NAME: &str = "hubman";
const IDENTITY_EMAIL: &str = "hubman@localhost";

/// Orchestrates pull/push/sync for one local checkout at a time.
pub struct SyncManager<'a> {
    git: &'a dyn GitRunner,
    log: &'a ActionLog,
}

impl<'a> SyncManager<'a> {
    pub fn new(git: &'a dyn GitRunner, log: &'a ActionLog) -> Self {
        Self { git, log }
    }

    /// Guarantee that `path` is a git checkout, cloning after confirmation
    /// when it is not.
    ///
    /// Idempotent: an existing checkout succeeds immediately without any
    /// git invocation. A declined prompt fails with `UserCancelled` and
    /// creates no directories.
    pub fn ensure_checkout(
        &self,
        prompt: &mut dyn Prompter,
        path: &Path,
        clone_url: Option<&str>,
        token: Option<&str>,
    ) -> Result<()> {
        if path.join(".git").is_dir() {
            return Ok(());
        }

        let cloning = prompt.confirm(
            &format!("Repository not found at {}. Clone a new repository?", path.display()),
            false,
        )?;
        if !cloning {
            return Err(HubmanError::UserCancelled);
        }

        let url = match clone_url {
            Some(url) => url.to_owned(),
            None => {
                let answer =
                    prompt.ask("GitHub repository URL to clone (HTTPS preferred)", None)?;
                if answer.is_empty() {
                    return Err(HubmanError::UserCancelled);
                }
                answer
            }
        };

        let credentialed = match token {
            Some(token) => with_token(&url, token),
            None => url.clone(),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let target = path.to_string_lossy();
        let args = ["clone", credentialed.as_str(), target.as_ref()];
        let result = self.git.run(None, &args)?;
        if !result.success() {
            let _ = self
                .log
                .record(&format!("Failed to clone repository from {}", redact(&url)));
            return Err(HubmanError::CloneFailed {
                url: redact(&url),
                message: redact(result.stderr.trim()),
            });
        }

        info!(path = %path.display(), "repository cloned");
        let _ = self.log.record(&format!(
            "Cloned repository from {} to {}",
            redact(&url),
            path.display()
        ));
        Ok(())
    }

    /// Set a commit identity on the checkout.
    ///
    /// Callers discard the result and continue without a forced identity
    /// when this fails.
    pub fn configure_identity(&self, path: &Path) -> Result<()> {
        self.run_checked(path, &["config", "user.name", IDENTITY_NAME])?;
        self.run_checked(path, &["config", "user.email", IDENTITY_EMAIL])?;
        Ok(())
    }

    /// Rewrite a plain HTTPS `origin` URL in place to embed the token,
    /// enabling non-interactive pull and push.
    ///
    /// A URL that already carries user-info is left untouched. Callers
    /// discard the result; failure here is non-fatal.
    pub fn repair_remote(&self, path: &Path, token: &str) -> Result<()> {
        let current = self.run_checked(path, &["remote", "get-url", "origin"])?;
        let origin = current.trim();
        if origin.starts_with("https://") && !origin.contains('@') {
            let credentialed = with_token(origin, token);
            self.run_checked(path, &["remote", "set-url", "origin", &credentialed])?;
            let _ = self
                .log
                .record(&format!("Updated origin remote for {}", path.display()));
        }
        Ok(())
    }

    /// Pull from the current branch's upstream.
    pub fn pull(&self, path: &Path) -> Result<()> {
        let result = self.git.run(Some(path), &["pull"])?;
        if !result.success() {
            let _ = self.log.record(&format!("Pull failed in {}", path.display()));
            return Err(HubmanError::PullFailed {
                message: redact(result.stderr.trim()),
            });
        }
        let _ = self
            .log
            .record(&format!("Pulled latest changes in {}", path.display()));
        Ok(())
    }

    /// Stage everything and push a commit with `message`.
    ///
    /// A clean working tree is a successful no-op: the commit step decides
    /// via its exit status, and no push process is launched.
    pub fn push(&self, path: &Path, message: &str) -> Result<PushOutcome> {
        let outcome = stage_commit_push(self.git, path, message)?;
        outcome.log_push(self.log, path, message);
        Ok(outcome)
    }

    /// Pull, then stage/commit/push, with the same semantics as `pull` and
    /// `push`. The first failing step aborts the remainder.
    pub fn sync(&self, path: &Path, message: &str) -> Result<PushOutcome> {
        self.pull(path)?;
        let outcome = stage_commit_push(self.git, path, message)?;
        outcome.log_push(self.log, path, message);
        Ok(outcome)
    }

    fn run_checked(&self, path: &Path, args: &[&str]) -> Result<String> {
        let result = self.git.run(Some(path), args)?;
        if !result.success() {
            return Err(process_failure(args, &result));
        }
        Ok(result.stdout)
    }
}

impl PushOutcome {
    fn log_push(self, log: &ActionLog, path: &Path, message: &str) {
        match self {
            Self::Pushed => {
                info!(path = %path.display(), "pushed");
                let _ = log.record(&format!(
                    "Pushed changes in {} with message: {message}",
                    path.display()
                ));
            }
            Self::NothingToCommit => {
                let _ = log.record(&format!("Nothing to commit in {}", path.display()));
            }
        }
    }
}

/// Stage all working-tree changes, commit, and push.
///
/// Shared by the sync manager and the upload-via-temporary-clone helper.
/// A non-zero exit from the commit step means the tree was clean; the
/// push step then never runs.
pub fn stage_commit_push(
    git: &dyn GitRunner,
    path: &Path,
    message: &str,
) -> Result<PushOutcome> {
    let add_args = ["add", "."];
    let add = git.run(Some(path), &add_args)?;
    if !add.success() {
        return Err(process_failure(&add_args, &add));
    }

    let commit = git.run(Some(path), &["commit", "-m", message])?;
    if !commit.success() {
        return Ok(PushOutcome::NothingToCommit);
    }

    let push = git.run(Some(path), &["push"])?;
    if !push.success() {
        warn!(path = %path.display(), "push rejected; local commit kept");
        return Err(HubmanError::PushFailed {
            message: redact(push.stderr.trim()),
        });
    }
    Ok(PushOutcome::Pushed)
}
