//! Credentials management infrastructure
//!
//! Per-invocation credential holding:
//! - Model API key, GitHub token, Render API key
//! - Supplied by CLI flag or environment at the edge, never persisted
//! - Redacted `Debug` output

use std::fmt;

use thiserror::Error;

/// A credential required by the requested operation was not supplied
#[derive(Debug, Error)]
#[error("{name} is required for this command; pass --{flag} or set {env}")]
pub struct MissingCredential {
    pub name: &'static str,
    pub flag: &'static str,
    pub env: &'static str,
}

/// Tokens for one CLI invocation, held only in memory
#[derive(Clone, Default)]
pub struct SessionCredentials {
    anthropic_api_key: Option<String>,
    github_token: Option<String>,
    render_api_key: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl SessionCredentials {
    pub fn new(
        anthropic_api_key: Option<String>,
        github_token: Option<String>,
        render_api_key: Option<String>,
    ) -> Self {
        Self {
            anthropic_api_key: non_empty(anthropic_api_key),
            github_token: non_empty(github_token),
            render_api_key: non_empty(render_api_key),
        }
    }

    pub fn require_anthropic(&self) -> Result<&str, MissingCredential> {
        self.anthropic_api_key
            .as_deref()
            .ok_or(MissingCredential {
                name: "Anthropic API key",
                flag: "anthropic-api-key",
                env: "ANTHROPIC_API_KEY",
            })
    }

    pub fn require_github(&self) -> Result<&str, MissingCredential> {
        self.github_token.as_deref().ok_or(MissingCredential {
            name: "GitHub token",
            flag: "github-token",
            env: "GITHUB_TOKEN",
        })
    }

    pub fn require_render(&self) -> Result<&str, MissingCredential> {
        self.render_api_key.as_deref().ok_or(MissingCredential {
            name: "Render API key",
            flag: "render-api-key",
            env: "RENDER_API_KEY",
        })
    }

    /// Every supplied secret, for literal scrubbing
    pub fn secrets(&self) -> Vec<String> {
        [
            &self.anthropic_api_key,
            &self.github_token,
            &self.render_api_key,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |v: &Option<String>| if v.is_some() { "[REDACTED]" } else { "<unset>" };
        f.debug_struct("SessionCredentials")
            .field("anthropic_api_key", &mark(&self.anthropic_api_key))
            .field("github_token", &mark(&self.github_token))
            .field("render_api_key", &mark(&self.render_api_key))
            .finish()
    }
}
