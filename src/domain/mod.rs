//! Domain layer for shipwright
//!
//! This module contains the project file model, the convergence state
//! machine, the deployment plan types and the ports adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{AnalysisError, AnalysisResult, ModelError, ProviderError, PublishError};
