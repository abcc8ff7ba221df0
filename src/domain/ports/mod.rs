//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - DeploymentModel: generative model analysis and error diagnosis
//! - SourceHost: repository creation and multi-file commits
//! - HostingProvider: owner listing and service creation

pub mod deployment_model;
pub mod hosting_provider;
pub mod source_host;

pub use deployment_model::DeploymentModel;
pub use hosting_provider::{CreatedService, HostingProvider, Owner, ServiceRequest};
pub use source_host::{CommitRef, Repository, SourceHost};
