//! Infrastructure layer module
//!
//! This module contains the infrastructure adapters:
//! - Claude API client and `DeploymentModel` adapter
//! - Zip archive reading and writing
//! - Configuration management
//! - Logging infrastructure
//! - Credentials management
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod archive;
pub mod claude;
pub mod config;
pub mod credentials;
pub mod logging;
