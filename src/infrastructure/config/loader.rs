use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::MAX_ITERATIONS;

/// Project config file, relative to the working directory
pub const PROJECT_CONFIG_PATH: &str = ".shipwright/config.yaml";

/// Optional local overrides, relative to the working directory
pub const LOCAL_CONFIG_PATH: &str = ".shipwright/local.yaml";

/// Prefix for environment overrides, e.g. `SHIPWRIGHT_MODEL__NAME`
pub const ENV_PREFIX: &str = "SHIPWRIGHT_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_iterations: {0}. Must be between 1 and {MAX_ITERATIONS}")]
    InvalidMaxIterations(u32),

    #[error("Invalid prompt_budget: must be greater than 0")]
    ZeroPromptBudget,

    #[error("Invalid max_tokens: must be greater than 0")]
    ZeroMaxTokens,

    #[error("Invalid timeout_secs: must be greater than 0")]
    ZeroTimeout,

    #[error("Invalid temperature: {0}. Must be between 0.0 and 1.0")]
    InvalidTemperature(f32),

    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .shipwright/config.yaml
    /// 3. .shipwright/local.yaml
    /// 4. Environment variables (SHIPWRIGHT_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Self::base()
            .merge(Yaml::file(PROJECT_CONFIG_PATH))
            .merge(Yaml::file(LOCAL_CONFIG_PATH))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Environment overrides still apply on top of the file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Self::base()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let analysis = &config.analysis;
        if analysis.max_iterations == 0 || analysis.max_iterations > MAX_ITERATIONS {
            return Err(ConfigError::InvalidMaxIterations(analysis.max_iterations));
        }
        if analysis.prompt_budget == 0 {
            return Err(ConfigError::ZeroPromptBudget);
        }

        let model = &config.model;
        if model.name.trim().is_empty() {
            return Err(ConfigError::EmptyValue("model.name"));
        }
        if model.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue("model.base_url"));
        }
        if model.max_tokens == 0 {
            return Err(ConfigError::ZeroMaxTokens);
        }
        if model.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if let Some(t) = model.temperature {
            if !(0.0..=1.0).contains(&t) {
                return Err(ConfigError::InvalidTemperature(t));
            }
        }

        if config.github.api_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue("github.api_url"));
        }
        if config.github.commit_message.trim().is_empty() {
            return Err(ConfigError::EmptyValue("github.commit_message"));
        }
        if config.render.api_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue("render.api_url"));
        }
        if config.render.dashboard_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue("render.dashboard_url"));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
