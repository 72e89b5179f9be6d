//! Execution of the `git` binary.
//!
//! Success is defined purely by process exit status; callers never
//! interpret command output to decide whether a step worked.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{HubmanError, Result};
use crate::vcs::url::redact;

/// Outcome of one git invocation.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Seam for running git commands.
///
/// The orchestrator only ever talks to git through this trait, so tests
/// can substitute a recording implementation.
pub trait GitRunner {
    /// Run `git <args>`, in `cwd` when given, and wait for it to exit.
    fn run(&self, cwd: Option<&Path>, args: &[&str]) -> Result<ExecResult>;
}

/// Production runner backed by `std::process::Command`.
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&self, cwd: Option<&Path>, args: &[&str]) -> Result<ExecResult> {
        debug!(command = %redact(&format!("git {}", args.join(" "))), "running");
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        let output = command.output()?;
        Ok(ExecResult {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Build the error for a git command that exited non-zero.
///
/// The argument list is redacted before it is embedded, so a credentialed
/// clone URL never leaks through an error message.
pub fn process_failure(args: &[&str], result: &ExecResult) -> HubmanError {
    HubmanError::Process {
        program: "git".into(),
        args: redact(&args.join(" ")),
        code: result.code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_failure_redacts_credentialed_urls() {
        let result = ExecResult {
            code: Some(128),
            stdout: String::new(),
            stderr: String::new(),
        };
        let err = process_failure(&["clone", "https://tok@github.com/o/r.git", "/tmp/x"], &result);
        let rendered = err.to_string();
        assert!(!rendered.contains("tok"));
        assert!(rendered.contains("https://***@github.com/o/r.git"));
    }
}
