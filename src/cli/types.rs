//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::credentials::SessionCredentials;

#[derive(Parser, Debug)]
#[command(name = "shipwright")]
#[command(about = "Shipwright - analyze a Replit project, repair it, and deploy it to Render", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .shipwright/
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub tokens: TokenArgs,
}

/// Provider tokens for this invocation; never written to disk
#[derive(Args, Clone, Default)]
pub struct TokenArgs {
    /// Anthropic API key
    #[arg(long, global = true, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// GitHub personal access token
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Render API key
    #[arg(long, global = true, env = "RENDER_API_KEY", hide_env_values = true)]
    pub render_api_key: Option<String>,
}

impl TokenArgs {
    pub fn into_credentials(self) -> SessionCredentials {
        SessionCredentials::new(self.anthropic_api_key, self.github_token, self.render_api_key)
    }
}

impl std::fmt::Debug for TokenArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenArgs([REDACTED])")
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a project archive and write the fixed archive
    Analyze(AnalyzeArgs),

    /// Push an archive's files to a new GitHub repository
    Push(PushArgs),

    /// Create a Render blueprint service for a repository
    Deploy(DeployArgs),

    /// List the Render owners (users and teams) the key can deploy under
    Owners,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Project zip exported from Replit
    pub archive: PathBuf,

    /// Directory for `<name>-fixed.zip` (defaults to the archive's directory)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Push the fixed files to a new GitHub repository with this name
    #[arg(long, value_name = "NAME")]
    pub push_repo: Option<String>,

    /// Deploy the pushed repository on Render (requires --push-repo)
    #[arg(long, requires = "push_repo")]
    pub deploy: bool,

    /// Render owner ID to deploy under (defaults to the first owner)
    #[arg(long, value_name = "ID", requires = "deploy")]
    pub owner: Option<String>,
}

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Project zip to push as-is
    pub archive: PathBuf,

    /// Name of the repository to create
    #[arg(short, long, value_name = "NAME")]
    pub repo: String,
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Git URL of the repository holding render.yaml
    #[arg(long, value_name = "URL")]
    pub repo_url: String,

    /// Render owner ID (defaults to the first owner)
    #[arg(long, value_name = "ID")]
    pub owner: Option<String>,

    /// Service name (defaults to the repository name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}
