//! Plain-language guidance for publish failures.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::DeploymentModel;

/// Canned guidance used when the model cannot be reached or returns nothing.
pub fn fallback_message(raw_error: &str, repo_name: &str) -> String {
    format!(
        "Could not create the repository \"{repo_name}\". GitHub reported: {raw_error}\n\
         Check that the name is not already taken on your account, that it only \
         uses letters, digits, '-', '_' and '.', and that your token has the \
         'repo' scope."
    )
}

/// Secondary model call that explains a raw provider error.
pub struct ErrorDiagnosis {
    model: Option<Arc<dyn DeploymentModel>>,
}

impl ErrorDiagnosis {
    pub fn new(model: Arc<dyn DeploymentModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Diagnosis without a model; always yields [`fallback_message`].
    pub const fn fallback_only() -> Self {
        Self { model: None }
    }

    /// Never fails; degrades to [`fallback_message`].
    pub async fn diagnose(&self, raw_error: &str, repo_name: &str) -> String {
        let Some(model) = &self.model else {
            return fallback_message(raw_error, repo_name);
        };

        match model.diagnose(raw_error, repo_name).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!(repo = repo_name, "diagnosis produced");
                text.trim().to_string()
            }
            Ok(_) => {
                warn!(repo = repo_name, "diagnosis was empty, using fallback");
                fallback_message(raw_error, repo_name)
            }
            Err(err) => {
                warn!(repo = repo_name, error = %err, "diagnosis failed, using fallback");
                fallback_message(raw_error, repo_name)
            }
        }
    }
}
