//! Push to GitHub and deploy on Render.
//!
//! Both flows are straight sequences of provider calls; no step is retried.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::domain::errors::PublishError;
use crate::domain::models::ProjectFileSet;
use crate::domain::ports::{
    CommitRef, CreatedService, HostingProvider, Owner, Repository, ServiceRequest, SourceHost,
};
use crate::infrastructure::logging::SecretScrubber;
use crate::services::error_diagnosis::ErrorDiagnosis;

/// Result of a successful push
#[derive(Debug, Clone, Serialize)]
pub struct PushOutcome {
    pub repository: Repository,
    pub commit: CommitRef,
}

/// Creates a repository and commits a file set to it
pub struct RepositoryPublisher {
    host: Arc<dyn SourceHost>,
    diagnosis: ErrorDiagnosis,
    scrubber: SecretScrubber,
    commit_message: String,
}

impl RepositoryPublisher {
    pub fn new(
        host: Arc<dyn SourceHost>,
        diagnosis: ErrorDiagnosis,
        scrubber: SecretScrubber,
        commit_message: impl Into<String>,
    ) -> Self {
        Self {
            host,
            diagnosis,
            scrubber,
            commit_message: commit_message.into(),
        }
    }

    /// Create `repo_name` and commit every file in `files` in one commit.
    ///
    /// A creation failure is explained by the diagnosis model; the guidance
    /// travels with the raw error.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn push(
        &self,
        repo_name: &str,
        files: &ProjectFileSet,
    ) -> Result<PushOutcome, PublishError> {
        let repository = match self.host.create_repository(repo_name).await {
            Ok(repository) => repository,
            Err(err) => {
                let raw = self.scrubber.scrub(&err.to_string());
                warn!(error = %raw, "repository creation failed");
                let guidance = self.diagnosis.diagnose(&raw, repo_name).await;
                return Err(PublishError::RepositoryCreation {
                    repo: repo_name.to_string(),
                    raw,
                    guidance,
                });
            }
        };

        let commit = self
            .host
            .commit_files(&repository, files, &self.commit_message)
            .await
            .map_err(|source| PublishError::Commit {
                repo: repository.full_name.clone(),
                source,
            })?;

        info!(repo = %repository.full_name, sha = %commit.sha, "push complete");
        Ok(PushOutcome { repository, commit })
    }
}

/// Result of a successful deploy request
#[derive(Debug, Clone, Serialize)]
pub struct DeployOutcome {
    pub service: CreatedService,
    pub owner: Owner,
    pub dashboard_url: String,
}

/// Service name derived from a repository URL, e.g. `.../ada/app.git` → `app`.
pub fn service_name_from_repo_url(repo_url: &str) -> String {
    let last = repo_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        "app".to_string()
    } else {
        name.to_string()
    }
}

/// Creates a blueprint service on the hosting provider
pub struct DeploymentTrigger {
    hosting: Arc<dyn HostingProvider>,
    auto_deploy: bool,
}

impl DeploymentTrigger {
    pub fn new(hosting: Arc<dyn HostingProvider>, auto_deploy: bool) -> Self {
        Self {
            hosting,
            auto_deploy,
        }
    }

    pub async fn owners(&self) -> Result<Vec<Owner>, PublishError> {
        Ok(self.hosting.list_owners().await?)
    }

    /// Deploy `repo_url` under `owner_id`, or the first owner when unset.
    #[instrument(skip(self))]
    pub async fn deploy(
        &self,
        repo_url: &str,
        owner_id: Option<&str>,
        name: Option<&str>,
    ) -> Result<DeployOutcome, PublishError> {
        let owners = self.hosting.list_owners().await?;
        let owner = match owner_id {
            Some(id) => owners
                .into_iter()
                .find(|o| o.id == id)
                .ok_or_else(|| PublishError::OwnerNotFound(id.to_string()))?,
            None => owners.into_iter().next().ok_or(PublishError::NoOwners)?,
        };

        let request = ServiceRequest {
            owner_id: owner.id.clone(),
            name: name.map_or_else(|| service_name_from_repo_url(repo_url), str::to_string),
            repo_url: repo_url.to_string(),
            branch: None,
            auto_deploy: self.auto_deploy,
        };

        let service = self.hosting.create_blueprint_service(&request).await?;
        let dashboard_url = self.hosting.dashboard_url(&service.id);
        info!(service_id = %service.id, owner = %owner.id, "deploy requested");

        Ok(DeployOutcome {
            service,
            owner,
            dashboard_url,
        })
    }
}
