//! # hubman
//!
//! An interactive command-line manager for GitHub repositories and local
//! git checkouts.
//!
//! The crate splits into two halves:
//! - [`github`] talks to the GitHub REST API: repository CRUD and
//!   settings, branch refs, file contents, and an upload helper that
//!   pushes a local tree through a temporary clone.
//! - [`vcs`] drives the `git` executable as a subprocess for the local
//!   sync flows (clone, pull, push, sync), with success defined purely by
//!   exit status.
//!
//! Everything is strictly sequential and blocking; one menu choice runs
//! one operation. Each user-visible action appends one line to the
//! [`audit::ActionLog`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use hubman::prelude::*;
//!
//! let client = GitHubClient::new("ghp_your_token_here");
//! for repo in client.list_repos(50)? {
//!     println!("{}: {}", repo.name, repo.visibility());
//! }
//! # Ok::<(), hubman::error::HubmanError>(())
//! ```
//!
//! ## Local sync
//!
//! ```rust,no_run
//! use hubman::prelude::*;
//! use std::path::Path;
//!
//! let log = ActionLog::new("/tmp/actions.log");
//! let git = SystemGit;
//! let manager = SyncManager::new(&git, &log);
//!
//! manager.pull(Path::new("./my-checkout"))?;
//! match manager.push(Path::new("./my-checkout"), "update")? {
//!     PushOutcome::Pushed => {}
//!     PushOutcome::NothingToCommit => {}
//! }
//! # Ok::<(), hubman::error::HubmanError>(())
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod github;
pub mod ui;
pub mod vcs;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::audit::ActionLog;
    pub use crate::config::Config;
    pub use crate::error::{HubmanError, Result};
    pub use crate::github::{
        Branch, BranchOps, ContentEntry, ContentOps, Contents, CreateRepo, FileAction,
        GitHubClient, Repo, RepoOps, User, upload_path,
    };
    pub use crate::ui::{App, ConsolePrompter, Prompter};
    pub use crate::vcs::{ExecResult, GitRunner, PushOutcome, SyncManager, SystemGit};
}

pub use prelude::*;
