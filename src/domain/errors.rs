//! Domain errors for the shipwright analysis and publish flows.

use thiserror::Error;

/// Errors that halt an analysis run.
///
/// Only model-call failures and the archive precondition stop a run.
/// `InvalidFixPath` exists so a dropped fix entry can be described with the
/// same vocabulary, but the convergence loop records it as a skip event and
/// never returns it.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Required file '{file}' was not found in the project archive")]
    PreconditionMissing { file: String },

    #[error("Model request failed on iteration {iteration}: {message}")]
    ModelTransport { iteration: u32, message: String },

    #[error("Model returned a malformed deployment plan on iteration {iteration}: {reason}")]
    ModelSchema {
        iteration: u32,
        reason: String,
        raw: String,
    },

    #[error("Invalid fix path from model: {raw:?}")]
    InvalidFixPath { raw: String },

    #[error("Analysis finished without producing a deployment plan")]
    NoPlanProduced,

    #[error("Archive error: {0}")]
    Archive(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Failure of a single generative model call, before the loop attaches
/// the iteration it happened on.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Transport(String),

    #[error("response did not match the deployment plan schema: {reason}")]
    Schema { reason: String, raw: String },
}

impl ModelError {
    /// Attach the iteration index and lift into the run-level error.
    pub fn at_iteration(self, iteration: u32) -> AnalysisError {
        match self {
            Self::Transport(message) => AnalysisError::ModelTransport { iteration, message },
            Self::Schema { reason, raw } => AnalysisError::ModelSchema {
                iteration,
                reason,
                raw,
            },
        }
    }
}

/// Error returned by a source-hosting or hosting-provider adapter.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} API returned HTTP {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} response could not be decoded: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

/// Errors from the push and deploy orchestration.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to create repository '{repo}': {raw}\n\n{guidance}")]
    RepositoryCreation {
        repo: String,
        raw: String,
        guidance: String,
    },

    #[error("Failed to commit files to '{repo}': {source}")]
    Commit {
        repo: String,
        #[source]
        source: ProviderError,
    },

    #[error("No owners are available for this Render API key")]
    NoOwners,

    #[error("Render owner '{0}' is not accessible with this API key")]
    OwnerNotFound(String),

    #[error("Deployment failed: {0}")]
    Hosting(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_transport_at_iteration() {
        let err = ModelError::Transport("connection reset".to_string()).at_iteration(2);
        match err {
            AnalysisError::ModelTransport { iteration, message } => {
                assert_eq!(iteration, 2);
                assert_eq!(message, "connection reset");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_model_error_schema_keeps_raw_payload() {
        let err = ModelError::Schema {
            reason: "missing field `renderYaml`".to_string(),
            raw: r#"{"projectType":"node"}"#.to_string(),
        }
        .at_iteration(0);

        assert!(err.to_string().contains("iteration 0"));
        match err {
            AnalysisError::ModelSchema { raw, .. } => assert!(raw.contains("projectType")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_repository_creation_message_includes_guidance() {
        let err = PublishError::RepositoryCreation {
            repo: "demo".to_string(),
            raw: "name already exists".to_string(),
            guidance: "Pick another name.".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("demo"));
        assert!(message.contains("Pick another name."));
    }
}
