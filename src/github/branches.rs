//! GitHub branch ref operations.

use serde::Deserialize;
use serde_json::json;

use crate::error::{HubmanError, Result};
use crate::github::{GitHubClient, Repo};

/// A branch as returned by the branches endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: BranchCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchCommit {
    pub sha: String,
}

/// Branch ref CRUD.
pub trait BranchOps {
    /// List branches of a repository.
    fn list_branches(&self, repo: &Repo) -> Result<Vec<Branch>>;

    /// Fetch one branch, typically to resolve its head sha.
    fn get_branch(&self, repo: &Repo, name: &str) -> Result<Branch>;

    /// Create a branch pointing at the head of `base`.
    fn create_branch(&self, repo: &Repo, name: &str, base: &str) -> Result<()>;

    /// Delete a branch ref. The default branch is refused before any
    /// remote call is made.
    fn delete_branch(&self, repo: &Repo, name: &str) -> Result<()>;
}

impl BranchOps for GitHubClient {
    fn list_branches(&self, repo: &Repo) -> Result<Vec<Branch>> {
        let endpoint = format!(
            "/repos/{}/{}/branches?per_page=100",
            repo.owner.login, repo.name
        );
        self.get(&endpoint)
    }

    fn get_branch(&self, repo: &Repo, name: &str) -> Result<Branch> {
        let endpoint = format!("/repos/{}/{}/branches/{}", repo.owner.login, repo.name, name);
        self.get(&endpoint)
    }

    fn create_branch(&self, repo: &Repo, name: &str, base: &str) -> Result<()> {
        let base_branch = self.get_branch(repo, base)?;
        let endpoint = format!("/repos/{}/{}/git/refs", repo.owner.login, repo.name);
        let _: serde_json::Value = self.post(
            &endpoint,
            &json!({
                "ref": format!("refs/heads/{name}"),
                "sha": base_branch.commit.sha,
            }),
        )?;
        Ok(())
    }

    fn delete_branch(&self, repo: &Repo, name: &str) -> Result<()> {
        if name == repo.default_branch {
            return Err(HubmanError::GitHub {
                message: format!(
                    "'{name}' is the default branch; change the default before deleting it"
                ),
            });
        }
        let endpoint = format!(
            "/repos/{}/{}/git/refs/heads/{}",
            repo.owner.login, repo.name, name
        );
        self.delete(&endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::RepoOwner;

    #[test]
    fn deleting_the_default_branch_is_refused_locally() {
        let client = GitHubClient::new("token");
        let repo = Repo {
            id: 1,
            name: "demo".into(),
            full_name: "octocat/demo".into(),
            owner: RepoOwner { login: "octocat".into() },
            clone_url: "https://github.com/octocat/demo.git".into(),
            default_branch: "main".into(),
            description: None,
            is_private: false,
        };

        let err = client.delete_branch(&repo, "main").unwrap_err();
        assert!(matches!(err, HubmanError::GitHub { .. }));
    }
}
