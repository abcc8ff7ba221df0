//! Shipwright CLI entry point.

use anyhow::Result;
use clap::Parser;

use shipwright::cli::commands::{self, CommandContext};
use shipwright::cli::{Cli, Commands};
use shipwright::infrastructure::config::ConfigLoader;
use shipwright::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        shipwright::cli::handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&config.logging)?;

    let ctx = CommandContext::new(config, cli.tokens.into_credentials(), cli.json);

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &ctx).await,
        Commands::Push(args) => commands::push::execute(args, &ctx).await,
        Commands::Deploy(args) => commands::deploy::execute(args, &ctx).await,
        Commands::Owners => commands::owners::execute(&ctx).await,
    }
}
