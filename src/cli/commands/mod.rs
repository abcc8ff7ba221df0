//! CLI command implementations.

pub mod analyze;
pub mod deploy;
pub mod owners;
pub mod push;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::github::GitHubClient;
use crate::adapters::render::RenderClient;
use crate::application::{DeploymentTrigger, RepositoryPublisher};
use crate::domain::models::Config;
use crate::domain::ports::DeploymentModel;
use crate::infrastructure::claude::ClaudeDeploymentModel;
use crate::infrastructure::credentials::SessionCredentials;
use crate::infrastructure::logging::SecretScrubber;
use crate::services::ErrorDiagnosis;

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub config: Config,
    pub credentials: SessionCredentials,
    pub json: bool,
}

impl CommandContext {
    pub const fn new(config: Config, credentials: SessionCredentials, json: bool) -> Self {
        Self {
            config,
            credentials,
            json,
        }
    }

    /// Scrubber seeded with every token supplied to this invocation
    pub fn scrubber(&self) -> Result<SecretScrubber> {
        Ok(SecretScrubber::new()
            .context("Failed to compile secret patterns")?
            .with_literals(self.credentials.secrets()))
    }

    pub fn model(&self) -> Result<Arc<dyn DeploymentModel>> {
        let api_key = self.credentials.require_anthropic()?;
        let model = ClaudeDeploymentModel::new(&self.config.model, api_key)
            .context("Failed to build the Anthropic client")?;
        Ok(Arc::new(model))
    }

    /// Publisher for GitHub; diagnosis uses the model only when a key was given.
    pub fn publisher(&self) -> Result<RepositoryPublisher> {
        let token = self.credentials.require_github()?;
        let diagnosis = if self.credentials.require_anthropic().is_ok() {
            ErrorDiagnosis::new(self.model()?)
        } else {
            ErrorDiagnosis::fallback_only()
        };

        Ok(RepositoryPublisher::new(
            Arc::new(GitHubClient::new(&self.config.github, token)),
            diagnosis,
            self.scrubber()?,
            self.config.github.commit_message.clone(),
        ))
    }

    pub fn deployment_trigger(&self) -> Result<DeploymentTrigger> {
        let api_key = self.credentials.require_render()?;
        Ok(DeploymentTrigger::new(
            Arc::new(RenderClient::new(&self.config.render, api_key)),
            self.config.render.auto_deploy,
        ))
    }
}
