//! GitHub API integration.
//!
//! One trait per operation group, all implemented on `GitHubClient`:
//! repository CRUD and settings, branch refs, file contents, and the
//! upload-via-temporary-clone helper.

mod branches;
mod client;
mod files;
mod repos;
mod upload;

pub use branches::{Branch, BranchCommit, BranchOps};
pub use client::{GitHubClient, User};
pub use files::{ContentEntry, ContentOps, Contents, FileAction};
pub use repos::{CreateRepo, Repo, RepoOps, RepoOwner};
pub use upload::upload_path;
