use async_trait::async_trait;

use crate::domain::errors::ModelError;
use crate::domain::models::{AssembledPrompt, ModelAnalysis};

/// Port for the generative model that analyzes and repairs projects.
///
/// The convergence loop depends only on this trait, which lets tests drive
/// it with scripted responses and lets the Anthropic adapter own every HTTP
/// and schema detail.
///
/// Implementations must not retry: a transport failure is reported once
/// and ends the run.
#[async_trait]
pub trait DeploymentModel: Send + Sync {
    /// Analyze the prompt's files and return a schema-validated result.
    ///
    /// # Errors
    /// * `ModelError::Transport` - network, HTTP or timeout failure
    /// * `ModelError::Schema` - the response did not match the plan schema
    async fn analyze(&self, prompt: &AssembledPrompt) -> Result<ModelAnalysis, ModelError>;

    /// Explain a publish failure in plain language.
    ///
    /// Callers treat any error as "no guidance available" and fall back to a
    /// canned message.
    async fn diagnose(&self, raw_error: &str, repo_name: &str) -> Result<String, ModelError>;
}
