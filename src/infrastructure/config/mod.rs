//! Configuration loading for shipwright
//!
//! Defaults, then `.shipwright/config.yaml` and `local.yaml`, then
//! `SHIPWRIGHT_*` environment overrides, merged with figment and validated.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX, LOCAL_CONFIG_PATH, PROJECT_CONFIG_PATH};
