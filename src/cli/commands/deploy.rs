//! Implementation of the `shipwright deploy` command.

use anyhow::Result;
use serde::Serialize;

use super::CommandContext;
use crate::application::DeployOutcome;
use crate::cli::output::{create_spinner, output, CommandOutput, ProgressBarExt};
use crate::cli::types::DeployArgs;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct DeployOutput(pub DeployOutcome);

impl CommandOutput for DeployOutput {
    fn to_human(&self) -> String {
        let outcome = &self.0;
        format!(
            "Created Render service {} ({}) under {}\nDashboard: {}",
            outcome.service.name, outcome.service.id, outcome.owner.name, outcome.dashboard_url
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: DeployArgs, ctx: &CommandContext) -> Result<()> {
    let trigger = ctx.deployment_trigger()?;

    let spinner = create_spinner("Creating Render service", ctx.json);
    let outcome = match trigger
        .deploy(&args.repo_url, args.owner.as_deref(), args.name.as_deref())
        .await
    {
        Ok(outcome) => {
            spinner.finish_success(format!("Service {} created", outcome.service.id));
            outcome
        }
        Err(err) => {
            spinner.finish_error("Deploy failed");
            return Err(err.into());
        }
    };

    output(&DeployOutput(outcome), ctx.json);
    Ok(())
}
