//! Implementation of the `shipwright owners` command.

use anyhow::{Context, Result};
use serde::Serialize;

use super::CommandContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::ports::Owner;

#[derive(Debug, Serialize)]
pub struct OwnersOutput {
    pub owners: Vec<Owner>,
}

impl CommandOutput for OwnersOutput {
    fn to_human(&self) -> String {
        if self.owners.is_empty() {
            return "No owners are available for this Render API key.".to_string();
        }
        TableFormatter::new().format_owners(&self.owners)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(ctx: &CommandContext) -> Result<()> {
    let owners = ctx
        .deployment_trigger()?
        .owners()
        .await
        .context("Failed to list Render owners")?;

    output(&OwnersOutput { owners }, ctx.json);
    Ok(())
}
