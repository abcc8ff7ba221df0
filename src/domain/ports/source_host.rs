use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ProviderError;
use crate::domain::models::ProjectFileSet;

/// A repository created on the source-hosting provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub default_branch: String,
}

/// Result of committing a file mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
    pub files: usize,
}

/// Port for the source-hosting provider (GitHub).
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// Create a repository under the authenticated account.
    async fn create_repository(&self, name: &str) -> Result<Repository, ProviderError>;

    /// Commit every file of `files` to the default branch in one commit.
    async fn commit_files(
        &self,
        repository: &Repository,
        files: &ProjectFileSet,
        message: &str,
    ) -> Result<CommitRef, ProviderError>;
}
