//! GitHub repository operations.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::error::Result;
use crate::github::GitHubClient;

/// Repository information from GitHub API.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: RepoOwner,
    pub clone_url: String,
    pub default_branch: String,
    pub description: Option<String>,
    #[serde(rename = "private")]
    pub is_private: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

impl Repo {
    pub fn visibility(&self) -> &'static str {
        if self.is_private { "Private" } else { "Public" }
    }

    fn endpoint(&self, tail: &str) -> String {
        format!("/repos/{}/{}{}", self.owner.login, self.name, tail)
    }
}

/// Request body for creating a repository.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepo {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub auto_init: bool,
}

/// Repository CRUD and settings operations.
///
/// Every method issues exactly one remote call and returns the updated
/// resource handle (or unit); nothing is cached between calls.
pub trait RepoOps {
    /// List repositories of the authenticated user (first `limit`).
    fn list_repos(&self, limit: usize) -> Result<Vec<Repo>>;

    /// Create a new repository for the authenticated user.
    fn create_repo(&self, request: &CreateRepo) -> Result<Repo>;

    /// Rename a repository.
    fn rename_repo(&self, repo: &Repo, new_name: &str) -> Result<Repo>;

    /// Replace the repository description.
    fn update_description(&self, repo: &Repo, description: &str) -> Result<Repo>;

    /// Switch the repository between public and private.
    fn set_visibility(&self, repo: &Repo, private: bool) -> Result<Repo>;

    /// Change which branch is the default.
    fn set_default_branch(&self, repo: &Repo, branch: &str) -> Result<Repo>;

    /// Delete a repository. Irreversible.
    fn delete_repo(&self, repo: &Repo) -> Result<()>;

    /// Request transfer of the repository to another owner.
    fn transfer_repo(&self, repo: &Repo, new_owner: &str) -> Result<()>;
}

impl RepoOps for GitHubClient {
    fn list_repos(&self, limit: usize) -> Result<Vec<Repo>> {
        let mut all_repos = Vec::new();
        let mut page = 1;

        while all_repos.len() < limit {
            let endpoint = format!("/user/repos?per_page=100&page={page}&affiliation=owner");
            let repos: Vec<Repo> = self.get(&endpoint)?;

            if repos.is_empty() {
                break;
            }

            all_repos.extend(repos);
            page += 1;

            // Safety limit to prevent infinite loops
            if page > 100 {
                break;
            }
        }

        all_repos.truncate(limit);
        Ok(all_repos)
    }

    fn create_repo(&self, request: &CreateRepo) -> Result<Repo> {
        let repo: Repo = self.post("/user/repos", request)?;
        info!(repo = %repo.full_name, "repository created");
        Ok(repo)
    }

    fn rename_repo(&self, repo: &Repo, new_name: &str) -> Result<Repo> {
        self.patch(&repo.endpoint(""), &json!({ "name": new_name }))
    }

    fn update_description(&self, repo: &Repo, description: &str) -> Result<Repo> {
        self.patch(&repo.endpoint(""), &json!({ "description": description }))
    }

    fn set_visibility(&self, repo: &Repo, private: bool) -> Result<Repo> {
        self.patch(&repo.endpoint(""), &json!({ "private": private }))
    }

    fn set_default_branch(&self, repo: &Repo, branch: &str) -> Result<Repo> {
        self.patch(&repo.endpoint(""), &json!({ "default_branch": branch }))
    }

    fn delete_repo(&self, repo: &Repo) -> Result<()> {
        self.delete(&repo.endpoint(""))
    }

    fn transfer_repo(&self, repo: &Repo, new_owner: &str) -> Result<()> {
        // The transfer endpoint answers 202 with the repository body.
        let _: serde_json::Value =
            self.post(&repo.endpoint("/transfer"), &json!({ "new_owner": new_owner }))?;
        Ok(())
    }
}
