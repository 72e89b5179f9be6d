//! Repository contents operations (files and folders via the API).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::json;

use crate::error::{HubmanError, Result};
use crate::github::{GitHubClient, Repo};

/// One entry under a repository path.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub size: Option<u64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Option<String>,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }

    /// Decode the base64 payload of a file entry.
    pub fn decoded_content(&self) -> Result<String> {
        let raw = self.content.as_deref().ok_or_else(|| HubmanError::GitHub {
            message: format!("no content returned for {}", self.path),
        })?;
        // The API wraps base64 payloads across lines.
        let compact: String = raw.split_whitespace().collect();
        let bytes = BASE64.decode(compact).map_err(|e| HubmanError::GitHub {
            message: format!("invalid base64 content for {}: {e}", self.path),
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// A contents endpoint answers with an object for a file and an array for
/// a directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    File(ContentEntry),
    Directory(Vec<ContentEntry>),
}

/// Whether `put_file` created a new file or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Created,
    Updated,
}

/// File and folder operations through the contents API.
pub trait ContentOps {
    /// Fetch a file, or the listing of a directory (empty path = root).
    fn get_content(&self, repo: &Repo, path: &str, branch: &str) -> Result<Contents>;

    /// Create or update a file, probing for an existing blob sha first.
    fn put_file(&self, repo: &Repo, path: &str, content: &str, branch: &str)
    -> Result<FileAction>;

    /// Delete a file.
    fn delete_file(&self, repo: &Repo, path: &str, branch: &str) -> Result<()>;

    /// Create an empty `.gitkeep` placeholder so the folder exists.
    /// Returns the placeholder path.
    fn create_folder_placeholder(&self, repo: &Repo, folder: &str, branch: &str)
    -> Result<String>;
}

impl ContentOps for GitHubClient {
    fn get_content(&self, repo: &Repo, path: &str, branch: &str) -> Result<Contents> {
        self.get(&contents_endpoint(repo, path, Some(branch)))
    }

    fn put_file(
        &self,
        repo: &Repo,
        path: &str,
        content: &str,
        branch: &str,
    ) -> Result<FileAction> {
        let existing: Option<Contents> =
            self.get_optional(&contents_endpoint(repo, path, Some(branch)))?;
        let existing_sha = match existing {
            Some(Contents::File(entry)) => Some(entry.sha),
            Some(Contents::Directory(_)) => {
                return Err(HubmanError::GitHub {
                    message: format!("{path} is a directory"),
                });
            }
            None => None,
        };

        let encoded = BASE64.encode(content.as_bytes());
        let action = if existing_sha.is_some() { FileAction::Updated } else { FileAction::Created };
        let verb = match action {
            FileAction::Created => "Create",
            FileAction::Updated => "Update",
        };

        let mut body = json!({
            "message": format!("{verb} {path}"),
            "content": encoded,
            "branch": branch,
        });
        if let Some(sha) = existing_sha {
            body["sha"] = json!(sha);
        }

        let _: serde_json::Value = self.put(&contents_endpoint(repo, path, None), &body)?;
        Ok(action)
    }

    fn delete_file(&self, repo: &Repo, path: &str, branch: &str) -> Result<()> {
        let existing = self.get_content(repo, path, branch)?;
        let entry = match existing {
            Contents::File(entry) => entry,
            Contents::Directory(_) => {
                return Err(HubmanError::GitHub {
                    message: format!("{path} is a directory, not a file"),
                });
            }
        };

        self.delete_with_body(
            &contents_endpoint(repo, path, None),
            &json!({
                "message": format!("Delete {path}"),
                "sha": entry.sha,
                "branch": branch,
            }),
        )
    }

    fn create_folder_placeholder(
        &self,
        repo: &Repo,
        folder: &str,
        branch: &str,
    ) -> Result<String> {
        let placeholder = format!("{}/.gitkeep", folder.trim_end_matches('/'));
        self.put_file(repo, &placeholder, "", branch)?;
        Ok(placeholder)
    }
}

/// Contents endpoint for `path`, with each segment URL-encoded.
fn contents_endpoint(repo: &Repo, path: &str, branch: Option<&str>) -> String {
    let encoded: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    let mut endpoint = format!(
        "/repos/{}/{}/contents/{}",
        repo.owner.login,
        repo.name,
        encoded.join("/")
    );
    if let Some(branch) = branch {
        endpoint.push_str(&format!("?ref={}", urlencoding::encode(branch)));
    }
    endpoint
}
