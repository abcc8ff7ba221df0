//! Shipwright - deployment planning for Replit project archives
//!
//! Shipwright reads a zipped Replit project, asks a generative model for a
//! Render deployment plan and file fixes, applies those fixes in a bounded
//! convergence loop, and packages the repaired project with a `render.yaml`.
//! The result can optionally be pushed to GitHub and deployed on Render.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): file sets, plans, the convergence state machine, ports
//! - **Service Layer** (`services`): prompt assembly, the convergence loop, diff reconciliation
//! - **Application Layer** (`application`): the analysis pipeline and publish flows
//! - **Infrastructure Layer** (`infrastructure`): Anthropic client, archives, config, logging
//! - **Adapters** (`adapters`): GitHub and Render REST clients
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use shipwright::{AnalysisPipeline, ClaudeDeploymentModel, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let model = ClaudeDeploymentModel::new(&config.model, "sk-ant-...")?;
//!     let pipeline = AnalysisPipeline::new(Arc::new(model), &config.analysis);
//!     let report = pipeline
//!         .analyze_archive("app.zip", &std::fs::read("app.zip")?)
//!         .await?;
//!     println!("{}", report.plan.render_yaml);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{AnalysisPipeline, AnalysisReport, DeploymentTrigger, RepositoryPublisher};
pub use domain::errors::{AnalysisError, ModelError, ProviderError, PublishError};
pub use domain::models::{
    Config, ConvergenceReason, DeploymentPlan, FixKind, ModelAnalysis, ProjectFileSet,
    SuggestedFix,
};
pub use domain::ports::{DeploymentModel, HostingProvider, SourceHost};
pub use infrastructure::claude::ClaudeDeploymentModel;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ConvergenceLoop, PromptAssembler};
