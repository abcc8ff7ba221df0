//! GitHub adapter: repository creation and single-commit uploads.

pub mod client;
pub mod models;

pub use client::{GitHubClient, GitHubError};
