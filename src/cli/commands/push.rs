//! Implementation of the `shipwright push` command.

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs;

use super::CommandContext;
use crate::application::PushOutcome;
use crate::cli::output::{create_spinner, output, CommandOutput, ProgressBarExt};
use crate::cli::types::PushArgs;
use crate::infrastructure::archive::ArchiveReader;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushOutput {
    #[serde(flatten)]
    pub outcome: PushOutcome,
    pub files_pushed: usize,
}

impl CommandOutput for PushOutput {
    fn to_human(&self) -> String {
        format!(
            "Pushed {} file(s) to {}\nCommit: {}\nBranch: {}",
            self.files_pushed,
            self.outcome.repository.html_url,
            self.outcome.commit.sha,
            self.outcome.repository.default_branch
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: PushArgs, ctx: &CommandContext) -> Result<()> {
    let bytes = fs::read(&args.archive)
        .await
        .with_context(|| format!("Failed to read archive {}", args.archive.display()))?;
    let files = ArchiveReader::lenient()
        .read(&bytes)
        .with_context(|| format!("Failed to extract {}", args.archive.display()))?;
    if files.is_empty() {
        anyhow::bail!("{} contains no text files to push", args.archive.display());
    }

    let publisher = ctx.publisher()?;
    let spinner = create_spinner(format!("Pushing to GitHub repository {}", args.repo), ctx.json);
    let outcome = match publisher.push(&args.repo, &files).await {
        Ok(outcome) => {
            spinner.finish_success(format!("Pushed {}", outcome.repository.full_name));
            outcome
        }
        Err(err) => {
            spinner.finish_error("Push failed");
            return Err(err.into());
        }
    };

    let result = PushOutput {
        files_pushed: files.len(),
        outcome,
    };
    output(&result, ctx.json);
    Ok(())
}
