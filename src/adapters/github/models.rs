//! GitHub REST API request and response models.
//!
//! Only the fields the push flow reads are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Body for `POST /user/repos`.
#[derive(Debug, Clone, Serialize)]
pub struct GitHubCreateRepoRequest {
    pub name: String,
    pub private: bool,
    /// Create an initial commit so the default branch exists.
    pub auto_init: bool,
}

/// Repository payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default = "default_branch")]
    pub default_branch: String,
    pub owner: GitHubAccount,
}

fn default_branch() -> String {
    "main".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubAccount {
    pub login: String,
}

/// `GET /repos/{owner}/{repo}/git/ref/heads/{branch}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRef {
    pub object: GitHubObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubObject {
    pub sha: String,
}

/// Commit payload; `tree` is the root tree of the commit.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommit {
    pub sha: String,
    pub tree: GitHubObject,
}

/// Body for `POST /repos/{owner}/{repo}/git/trees`.
#[derive(Debug, Clone, Serialize)]
pub struct GitHubCreateTreeRequest {
    pub base_tree: String,
    pub tree: Vec<GitHubTreeEntry>,
}

/// Inline blob entry of a new tree.
#[derive(Debug, Clone, Serialize)]
pub struct GitHubTreeEntry {
    pub path: String,
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub content: String,
}

impl GitHubTreeEntry {
    pub fn file(path: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            mode: "100644",
            kind: "blob",
            content: content.to_string(),
        }
    }
}

/// Body for `POST /repos/{owner}/{repo}/git/commits`.
#[derive(Debug, Clone, Serialize)]
pub struct GitHubCreateCommitRequest {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
}

/// Body for `PATCH /repos/{owner}/{repo}/git/refs/heads/{branch}`.
#[derive(Debug, Clone, Serialize)]
pub struct GitHubUpdateRefRequest {
    pub sha: String,
    pub force: bool,
}
