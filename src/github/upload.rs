//! Upload a local file or directory tree via a temporary clone.
//!
//! The repository branch is cloned into a scratch directory, the local
//! tree is overlaid onto it (a merge, not a replace), a fixed set of
//! sensitive paths is stripped, and the result is committed and pushed.
//! The scratch directory is removed exactly once whatever the outcome.

use std::fs;
use std::io;
use std::path::Path;

use tempfile::TempDir;
use tracing::info;

use crate::audit::ActionLog;
use crate::error::{HubmanError, Result};
use crate::github::{GitHubClient, Repo};
use crate::vcs::url::redact;
use crate::vcs::{GitRunner, PushOutcome, stage_commit_push};

/// Paths stripped from the scratch tree before committing.
const STRIPPED_PATHS: &[&str] = &[".env", ".gitignore"];

/// Clone `repo`/`branch` into a scratch directory, overlay `source`,
/// commit, and push.
///
/// A clean tree after the overlay is a successful no-op. Any failure is
/// returned to the caller after the scratch directory is cleaned up (the
/// `TempDir` guard drops on every path out of this function).
pub fn upload_path(
    client: &GitHubClient,
    git: &dyn GitRunner,
    log: &ActionLog,
    repo: &Repo,
    branch: &str,
    source: &Path,
    message: &str,
) -> Result<PushOutcome> {
    if !source.exists() {
        return Err(HubmanError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("local path does not exist: {}", source.display()),
        )));
    }

    let scratch = TempDir::with_prefix("hubman-clone-")?;
    let outcome = upload_into_scratch(client, git, repo, branch, source, message, scratch.path());

    match &outcome {
        Ok(PushOutcome::Pushed) => {
            info!(repo = %repo.full_name, branch, "upload pushed");
            let _ = log.record(&format!(
                "Pushed to {}@{branch} with message: {message}",
                repo.full_name
            ));
        }
        Ok(PushOutcome::NothingToCommit) => {
            let _ = log.record(&format!(
                "Nothing to upload to {}@{branch}",
                repo.full_name
            ));
        }
        Err(e) => {
            let _ = log.record(&format!("Error uploading to {}: {e}", repo.full_name));
        }
    }

    outcome
}

fn upload_into_scratch(
    client: &GitHubClient,
    git: &dyn GitRunner,
    repo: &Repo,
    branch: &str,
    source: &Path,
    message: &str,
    scratch: &Path,
) -> Result<PushOutcome> {
    let url = client.authenticated_url(&repo.clone_url);
    let target = scratch.to_string_lossy();
    let clone = git.run(None, &["clone", "--branch", branch, &url, target.as_ref()])?;
    if !clone.success() {
        return Err(HubmanError::CloneFailed {
            url: redact(&url),
            message: redact(clone.stderr.trim()),
        });
    }

    overlay(source, scratch)?;
    strip_ignored(scratch)?;

    // Commit identity is best-effort, as in the sync manager.
    let _ = git.run(Some(scratch), &["config", "user.name", "hubman"]);
    let _ = git.run(Some(scratch), &["config", "user.email", "hubman@localhost"]);

    stage_commit_push(git, scratch, message)
}

/// Copy `source` into `dest_root`. A file lands under its file name; a
/// directory is merged into `dest_root/<basename>`, keeping whatever the
/// clone already has.
fn overlay(source: &Path, dest_root: &Path) -> io::Result<()> {
    if source.is_dir() {
        let dest = match source.file_name() {
            Some(name) => dest_root.join(name),
            // `.` and friends have no basename: merge straight into the root.
            None => dest_root.to_path_buf(),
        };
        copy_dir_merge(source, &dest)
    } else {
        let name = source
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
        fs::copy(source, dest_root.join(name)).map(|_| ())
    }
}

fn copy_dir_merge(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_merge(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Remove the fixed set of sensitive/ignorable paths from the scratch
/// tree root, whether files or directories.
fn strip_ignored(root: &Path) -> io::Result<()> {
    for name in STRIPPED_PATHS {
        let path = root.join(name);
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else if path.exists() {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn overlay_merges_directories_instead_of_replacing() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        fs::create_dir_all(src.path().join("tree/sub")).unwrap();
        fs::write(src.path().join("tree/sub/new.txt"), "new").unwrap();

        let merged = dest.path().join("tree");
        fs::create_dir_all(merged.join("kept")).unwrap();
        fs::write(merged.join("kept/old.txt"), "old").unwrap();

        overlay(&src.path().join("tree"), dest.path()).unwrap();

        assert_eq!(fs::read_to_string(merged.join("sub/new.txt")).unwrap(), "new");
        assert_eq!(fs::read_to_string(merged.join("kept/old.txt")).unwrap(), "old");
    }

    #[test]
    fn overlay_copies_a_single_file_under_its_name() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(src.path().join("notes.md"), "hi").unwrap();

        overlay(&src.path().join("notes.md"), dest.path()).unwrap();

        assert_eq!(fs::read_to_string(dest.path().join("notes.md")).unwrap(), "hi");
    }

    #[test]
    fn strip_ignored_removes_files_and_directories() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(".env"), "SECRET=1").unwrap();
        fs::write(root.path().join(".gitignore"), "target/").unwrap();
        fs::write(root.path().join("keep.txt"), "keep").unwrap();

        strip_ignored(root.path()).unwrap();

        assert!(!root.path().join(".env").exists());
        assert!(!root.path().join(".gitignore").exists());
        assert!(root.path().join("keep.txt").exists());
    }
}
