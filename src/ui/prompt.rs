//! Single-line interactive prompts.

use std::io::{self, BufRead, Write};

use crate::error::{HubmanError, Result};

/// Seam for interactive input, so flows that prompt mid-operation can be
/// driven by scripted answers in tests.
pub trait Prompter {
    /// Ask a free-text question. An empty answer falls back to `default`
    /// when one is given.
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String>;

    /// Ask a yes/no question. An empty or unrecognised answer falls back
    /// to `default`.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;
}

/// Prompter backed by stdin/stdout.
pub struct ConsolePrompter;

impl ConsolePrompter {
    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        let bytes = io::stdin().lock().read_line(&mut line)?;
        if bytes == 0 {
            // EOF on stdin: treat as the user walking away.
            return Err(HubmanError::UserCancelled);
        }
        Ok(line.trim().to_owned())
    }
}

impl Prompter for ConsolePrompter {
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(value) => print!("{question} [{value}]: "),
            None => print!("{question}: "),
        }
        io::stdout().flush()?;
        let answer = self.read_line()?;
        if answer.is_empty()
            && let Some(value) = default
        {
            return Ok(value.to_owned());
        }
        Ok(answer)
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        print!("{question} [{hint}]: ");
        io::stdout().flush()?;
        let answer = self.read_line()?.to_lowercase();
        Ok(match answer.as_str() {
            "y" | "yes" => true,
            "n" | "no" => false,
            _ => default,
        })
    }
}

/// Prompter that replays a fixed script of answers.
///
/// `ask` answers are consumed in order; `confirm` answers likewise. Used
/// by the integration tests to drive interactive flows.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Vec<String>,
    confirmations: Vec<bool>,
}

impl ScriptedPrompter {
    pub fn new(
        answers: impl IntoIterator<Item = impl Into<String>>,
        confirmations: impl IntoIterator<Item = bool>,
    ) -> Self {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            confirmations: confirmations.into_iter().collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, _question: &str, default: Option<&str>) -> Result<String> {
        if self.answers.is_empty() {
            return Ok(default.unwrap_or_default().to_owned());
        }
        Ok(self.answers.remove(0))
    }

    fn confirm(&mut self, _question: &str, default: bool) -> Result<bool> {
        if self.confirmations.is_empty() {
            return Ok(default);
        }
        Ok(self.confirmations.remove(0))
    }
}
