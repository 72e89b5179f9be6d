//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use hubman::error::Result;
use hubman::vcs::{ExecResult, GitRunner};

/// Git runner that records every invocation and answers from a script.
///
/// Outcomes and stdout are keyed by git subcommand (the first argument);
/// anything not scripted succeeds with empty output.
#[derive(Default)]
pub struct RecordingGit {
    pub calls: RefCell<Vec<Vec<String>>>,
    exit_codes: HashMap<String, i32>,
    stdout: HashMap<String, String>,
}

impl RecordingGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a non-default exit code for one subcommand.
    pub fn with_exit(mut self, subcommand: &str, code: i32) -> Self {
        self.exit_codes.insert(subcommand.to_owned(), code);
        self
    }

    /// Script stdout for one subcommand.
    pub fn with_stdout(mut self, subcommand: &str, out: &str) -> Self {
        self.stdout.insert(subcommand.to_owned(), out.to_owned());
        self
    }

    /// How many times a subcommand was invoked.
    pub fn invocations_of(&self, subcommand: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|args| args.first().map(String::as_str) == Some(subcommand))
            .count()
    }

    /// The recorded argument list of the first invocation of a subcommand.
    pub fn first_invocation_of(&self, subcommand: &str) -> Option<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .find(|args| args.first().map(String::as_str) == Some(subcommand))
            .cloned()
    }
}

impl GitRunner for RecordingGit {
    fn run(&self, _cwd: Option<&Path>, args: &[&str]) -> Result<ExecResult> {
        self.calls
            .borrow_mut()
            .push(args.iter().map(|s| (*s).to_owned()).collect());
        let subcommand = args.first().copied().unwrap_or_default();
        let code = self.exit_codes.get(subcommand).copied().unwrap_or(0);
        Ok(ExecResult {
            code: Some(code),
            stdout: self.stdout.get(subcommand).cloned().unwrap_or_default(),
            stderr: String::new(),
        })
    }
}
