//! Append-only action log.
//!
//! One timestamped line per user-visible action. Logging is best-effort:
//! `record` returns a `Result` so failures stay visible in the signature,
//! and call sites discard it explicitly.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Handle to the append-only action log file.
#[derive(Debug, Clone)]
pub struct ActionLog {
    path: PathBuf,
}

impl ActionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line describing an action.
    ///
    /// Call sites are expected to discard the result (`let _ = ...`): a
    /// failed log write never fails the action it describes.
    pub fn record(&self, action: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(
            file,
            "[{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            action
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn record_appends_timestamped_lines() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::new(dir.path().join("actions.log"));

        log.record("Created repository demo").unwrap();
        log.record("Deleted branch old").unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("Created repository demo"));
        assert!(lines[1].ends_with("Deleted branch old"));
    }

    #[test]
    fn record_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::new(dir.path().join("nested").join("deep").join("actions.log"));

        log.record("first entry").unwrap();
        assert!(log.path().exists());
    }

    #[test]
    fn record_failure_is_an_error_not_a_panic() {
        // A directory path cannot be opened for appending.
        let dir = TempDir::new().unwrap();
        let log = ActionLog::new(dir.path());
        assert!(log.record("never written").is_err());
    }
}
