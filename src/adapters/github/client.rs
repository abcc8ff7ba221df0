//! GitHub HTTP client.
//!
//! Creates repositories and commits a whole file set in one commit through
//! the Git Data API: read the branch ref, read its commit, create a tree on
//! top of that commit's tree, create a commit, move the ref.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use super::models::{
    GitHubCommit, GitHubCreateCommitRequest, GitHubCreateRepoRequest, GitHubCreateTreeRequest,
    GitHubObject, GitHubRef, GitHubRepo, GitHubTreeEntry, GitHubUpdateRefRequest,
};
use crate::domain::errors::ProviderError;
use crate::domain::models::{GithubConfig, ProjectFileSet};
use crate::domain::ports::{CommitRef, Repository, SourceHost};

const PROVIDER: &str = "GitHub";

/// Errors returned by [`GitHubClient`]
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub {operation} returned HTTP {status}: {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("GitHub {operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("GitHub {operation} response could not be parsed: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

impl From<GitHubError> for ProviderError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Api { status, body, .. } => Self::Api {
                provider: PROVIDER,
                status,
                body,
            },
            transport @ GitHubError::Transport { .. } => Self::Transport {
                provider: PROVIDER,
                message: transport.to_string(),
            },
            decode @ GitHubError::Decode { .. } => Self::Decode {
                provider: PROVIDER,
                message: decode.to_string(),
            },
        }
    }
}

/// HTTP client for the GitHub REST API v3.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
    user_agent: String,
    private: bool,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .field("private", &self.private)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Create a client with an explicitly supplied token.
    pub fn new(config: &GithubConfig, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            user_agent: config.user_agent.clone(),
            private: config.private,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.api_url))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", &self.user_agent)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, GitHubError> {
        let resp = request
            .send()
            .await
            .map_err(|source| GitHubError::Transport { operation, source })?;
        Self::decode(operation, resp).await
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, GitHubError> {
        self.send(operation, self.request(method, path).json(body))
            .await
    }

    async fn decode<T: DeserializeOwned>(
        operation: &'static str,
        resp: Response,
    ) -> Result<T, GitHubError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GitHubError::Api {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>().await.map_err(|e| GitHubError::Decode {
            operation,
            message: e.to_string(),
        })
    }

    /// Create a repository for the authenticated user.
    #[instrument(skip(self))]
    pub async fn create_repo(&self, name: &str) -> Result<GitHubRepo, GitHubError> {
        let body = GitHubCreateRepoRequest {
            name: name.to_string(),
            private: self.private,
            auto_init: true,
        };
        let repo: GitHubRepo = self
            .send_json("create_repo", Method::POST, "/user/repos", &body)
            .await?;
        info!(full_name = %repo.full_name, "repository created");
        Ok(repo)
    }

    /// Commit `files` on top of `branch`, returning the new commit sha.
    #[instrument(skip(self, files, message), fields(files = files.len()))]
    pub async fn commit_tree(
        &self,
        full_name: &str,
        branch: &str,
        files: &ProjectFileSet,
        message: &str,
    ) -> Result<String, GitHubError> {
        let base = format!("/repos/{full_name}/git");

        let head: GitHubRef = self
            .send(
                "get_ref",
                self.request(Method::GET, &format!("{base}/ref/heads/{branch}")),
            )
            .await?;
        let parent: GitHubCommit = self
            .send(
                "get_commit",
                self.request(Method::GET, &format!("{base}/commits/{}", head.object.sha)),
            )
            .await?;
        debug!(parent = %parent.sha, "resolved branch head");

        let tree_request = GitHubCreateTreeRequest {
            base_tree: parent.tree.sha.clone(),
            tree: files
                .iter()
                .map(|(path, content)| GitHubTreeEntry::file(path, content))
                .collect(),
        };
        let tree: GitHubObject = self
            .send_json("create_tree", Method::POST, &format!("{base}/trees"), &tree_request)
            .await?;

        let commit_request = GitHubCreateCommitRequest {
            message: message.to_string(),
            tree: tree.sha,
            parents: vec![parent.sha],
        };
        let commit: GitHubCommit = self
            .send_json("create_commit", Method::POST, &format!("{base}/commits"), &commit_request)
            .await?;

        let update = GitHubUpdateRefRequest {
            sha: commit.sha.clone(),
            force: false,
        };
        let _: GitHubRef = self
            .send_json(
                "update_ref",
                Method::PATCH,
                &format!("{base}/refs/heads/{branch}"),
                &update,
            )
            .await?;

        info!(sha = %commit.sha, "files committed");
        Ok(commit.sha)
    }
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn create_repository(&self, name: &str) -> Result<Repository, ProviderError> {
        let repo = self.create_repo(name).await?;
        Ok(Repository {
            owner: repo.owner.login,
            name: repo.name,
            full_name: repo.full_name,
            html_url: repo.html_url,
            default_branch: repo.default_branch,
        })
    }

    async fn commit_files(
        &self,
        repository: &Repository,
        files: &ProjectFileSet,
        message: &str,
    ) -> Result<CommitRef, ProviderError> {
        let sha = self
            .commit_tree(
                &repository.full_name,
                &repository.default_branch,
                files,
                message,
            )
            .await?;
        Ok(CommitRef {
            sha,
            files: files.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_maps_to_provider_error() {
        let err: ProviderError = GitHubError::Api {
            operation: "create_repo",
            status: 422,
            body: "name already exists on this account".to_string(),
        }
        .into();

        match err {
            ProviderError::Api {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, "GitHub");
                assert_eq!(status, 422);
                assert!(body.contains("already exists"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_tree_entry_is_inline_blob() {
        let entry = GitHubTreeEntry::file("src/app.py", "print(1)");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["mode"], "100644");
        assert_eq!(value["type"], "blob");
        assert_eq!(value["content"], "print(1)");
    }

    #[test]
    fn test_debug_hides_token() {
        let client = GitHubClient::new(&GithubConfig::default(), "ghp_secretsecretsecret");
        let printed = format!("{client:?}");
        assert!(!printed.contains("ghp_secret"));
    }
}
