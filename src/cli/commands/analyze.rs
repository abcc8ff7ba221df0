//! Implementation of the `shipwright analyze` command.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::CommandContext;
use crate::application::{AnalysisPipeline, AnalysisReport, DeployOutcome, PushOutcome};
use crate::cli::output::{create_spinner, output, truncate, CommandOutput, ProgressBarExt, TableFormatter};
use crate::cli::types::AnalyzeArgs;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOutput {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub fixed_archive_path: PathBuf,
    pub push: Option<PushOutcome>,
    pub deploy: Option<DeployOutcome>,
}

impl CommandOutput for AnalyzeOutput {
    fn to_human(&self) -> String {
        let plan = &self.report.plan;
        let formatter = TableFormatter::new();
        let mut lines = vec![
            format!("{} {}", style("Project type:").bold(), plan.project_type),
            format!("{} {}", style("Build command:").bold(), plan.build_command),
            format!(
                "{} {}",
                style("Start command:").bold(),
                if plan.start_command.is_empty() { "(none)" } else { plan.start_command.as_str() }
            ),
            String::new(),
            plan.explanation.clone(),
            String::new(),
            format!("{}", style("render.yaml").bold()),
            plan.render_yaml.trim_end().to_string(),
        ];

        if let Some(warning) = &self.report.manifest_warning {
            lines.push(format!("\n{} {warning}", style("warning:").yellow()));
        }

        lines.push(format!(
            "\nConverged after {} model call(s): {}",
            self.report.model_calls, self.report.convergence
        ));
        if !self.report.iterations.is_empty() {
            lines.push(formatter.format_iterations(&self.report.iterations));
        }

        if plan.suggested_fixes.is_empty() {
            lines.push("\nNo file changes were needed.".to_string());
        } else {
            lines.push(format!("\n{} suggested fix(es):", plan.suggested_fixes.len()));
            lines.push(formatter.format_fixes(&plan.suggested_fixes));
        }

        for skip in &self.report.skipped {
            lines.push(format!(
                "{} skipped {:?} (iteration {}): {}",
                style("warning:").yellow(),
                truncate(&skip.raw_file_name, 60),
                skip.iteration + 1,
                skip.reason
            ));
        }

        lines.push(format!("\nFixed archive written to {}", self.fixed_archive_path.display()));

        if let Some(push) = &self.push {
            lines.push(format!(
                "Pushed to {} ({})",
                push.repository.html_url,
                &push.commit.sha[..push.commit.sha.len().min(7)]
            ));
        }
        if let Some(deploy) = &self.deploy {
            lines.push(format!(
                "Render service {} created under {}: {}",
                deploy.service.name, deploy.owner.name, deploy.dashboard_url
            ));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Where `<name>-fixed.zip` goes: `--out-dir`, else next to the input archive.
fn output_dir(archive: &Path, out_dir: Option<&Path>) -> PathBuf {
    out_dir
        .map(Path::to_path_buf)
        .or_else(|| archive.parent().map(Path::to_path_buf))
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub async fn execute(args: AnalyzeArgs, ctx: &CommandContext) -> Result<()> {
    let bytes = fs::read(&args.archive)
        .await
        .with_context(|| format!("Failed to read archive {}", args.archive.display()))?;
    let archive_name = args
        .archive
        .file_name()
        .map_or_else(|| "project.zip".to_string(), |n| n.to_string_lossy().into_owned());

    let pipeline = AnalysisPipeline::new(ctx.model()?, &ctx.config.analysis);

    let spinner = create_spinner(
        format!("Analyzing {archive_name} with {}", ctx.config.model.name),
        ctx.json,
    );
    let report = match pipeline.analyze_archive(&archive_name, &bytes).await {
        Ok(report) => {
            spinner.finish_success(format!("Plan ready after {} model call(s)", report.model_calls));
            report
        }
        Err(err) => {
            spinner.finish_error("Analysis failed");
            return Err(err).context("Analysis failed");
        }
    };

    let dir = output_dir(&args.archive, args.out_dir.as_deref());
    fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let fixed_archive_path = dir.join(&report.fixed_archive_name);
    fs::write(&fixed_archive_path, &report.fixed_archive)
        .await
        .with_context(|| format!("Failed to write {}", fixed_archive_path.display()))?;

    let mut push = None;
    let mut deploy = None;
    if let Some(repo) = args.push_repo.as_deref() {
        let publisher = ctx.publisher()?;
        let spinner = create_spinner(format!("Pushing to GitHub repository {repo}"), ctx.json);
        let pushed = match publisher.push(repo, &report.shipped_files()).await {
            Ok(pushed) => {
                spinner.finish_success(format!("Pushed {}", pushed.repository.full_name));
                pushed
            }
            Err(err) => {
                spinner.finish_error("Push failed");
                return Err(err.into());
            }
        };

        if args.deploy {
            let trigger = ctx.deployment_trigger()?;
            let spinner = create_spinner("Creating Render service", ctx.json);
            let deployed = trigger
                .deploy(&pushed.repository.html_url, args.owner.as_deref(), None)
                .await;
            match deployed {
                Ok(outcome) => {
                    spinner.finish_success(format!("Service {} created", outcome.service.id));
                    deploy = Some(outcome);
                }
                Err(err) => {
                    spinner.finish_error("Deploy failed");
                    return Err(err.into());
                }
            }
        }
        push = Some(pushed);
    }

    let result = AnalyzeOutput {
        report,
        fixed_archive_path,
        push,
        deploy,
    };
    output(&result, ctx.json);
    Ok(())
}
