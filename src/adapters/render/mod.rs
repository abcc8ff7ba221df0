//! Render adapter: owner listing and blueprint service creation.

pub mod client;
pub mod models;

pub use client::{RenderClient, RenderError};
