//! Adapters for the external services a project is published to.

pub mod github;
pub mod render;
