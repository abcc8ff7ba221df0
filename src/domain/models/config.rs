use serde::{Deserialize, Serialize};

use super::convergence::MAX_ITERATIONS;

/// Main configuration structure for shipwright
///
/// Secrets (model API key, GitHub and Render tokens) are deliberately absent;
/// they are supplied per invocation and held in `SessionCredentials`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Generative model settings
    #[serde(default)]
    pub model: ModelConfig,

    /// Convergence loop settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// GitHub push settings
    #[serde(default)]
    pub github: GithubConfig,

    /// Render deploy settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generative model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModelConfig {
    /// Model identifier
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Maximum tokens to generate per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (optional)
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Base URL for the Anthropic API
    #[serde(default = "default_model_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model_name() -> String {
    "claude-sonnet-4-5-20250929".to_string()
}

const fn default_max_tokens() -> u32 {
    32_000
}

fn default_model_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    600
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            max_tokens: default_max_tokens(),
            temperature: None,
            base_url: default_model_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Convergence loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisConfig {
    /// Maximum model calls per run (1-3)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Content budget per prompt, in bytes
    #[serde(default = "default_prompt_budget")]
    pub prompt_budget: usize,
}

const fn default_max_iterations() -> u32 {
    MAX_ITERATIONS
}

const fn default_prompt_budget() -> usize {
    200_000
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            prompt_budget: default_prompt_budget(),
        }
    }
}

/// GitHub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GithubConfig {
    /// REST API base URL
    #[serde(default = "default_github_api_url")]
    pub api_url: String,

    /// Create repositories as private
    #[serde(default)]
    pub private: bool,

    /// Message for the single commit carrying the project files
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// User-Agent header (GitHub rejects requests without one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_commit_message() -> String {
    "Add deployment fixes and render.yaml".to_string()
}

fn default_user_agent() -> String {
    concat!("shipwright/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            private: false,
            commit_message: default_commit_message(),
            user_agent: default_user_agent(),
        }
    }
}

/// Render configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RenderConfig {
    /// REST API base URL
    #[serde(default = "default_render_api_url")]
    pub api_url: String,

    /// Dashboard base URL used to build service links
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,

    /// Redeploy automatically on push
    #[serde(default = "default_true")]
    pub auto_deploy: bool,
}

fn default_render_api_url() -> String {
    "https://api.render.com".to_string()
}

fn default_dashboard_url() -> String {
    "https://dashboard.render.com".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            api_url: default_render_api_url(),
            dashboard_url: default_dashboard_url(),
            auto_deploy: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation for file logs: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
