//! End-to-end analysis of one project archive.
//!
//! archive bytes → file set → convergence loop → diff reconciliation →
//! deployment plan → fixed archive.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::errors::AnalysisResult;
use crate::domain::models::{
    AnalysisConfig, ConvergenceReason, DeploymentPlan, IterationRecord, ProjectFileSet, SkipEvent,
    MANIFEST_FILE_NAME,
};
use crate::domain::ports::DeploymentModel;
use crate::infrastructure::archive::{fixed_archive_name, write_archive, ArchiveReader};
use crate::services::convergence_loop::ConvergenceLoop;
use crate::services::diff_reconciler::reconcile;
use crate::services::prompt_assembler::PromptAssembler;

/// Everything produced by one analysis run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub plan: DeploymentPlan,
    pub convergence: ConvergenceReason,
    pub model_calls: u32,
    pub iterations: Vec<IterationRecord>,
    pub skipped: Vec<SkipEvent>,
    /// Set when the manifest does not parse as YAML; never fatal
    pub manifest_warning: Option<String>,
    #[serde(skip)]
    pub final_files: ProjectFileSet,
    pub fixed_archive_name: String,
    #[serde(skip)]
    pub fixed_archive: Vec<u8>,
}

impl AnalysisReport {
    /// The repaired files plus the generated manifest, as shipped in the fixed archive.
    pub fn shipped_files(&self) -> ProjectFileSet {
        self.final_files
            .with_file(MANIFEST_FILE_NAME, self.plan.render_yaml.as_str())
    }
}

/// Check that the manifest is YAML; returns a warning instead of failing.
pub fn manifest_warning(render_yaml: &str) -> Option<String> {
    if render_yaml.trim().is_empty() {
        return Some("render.yaml is empty".to_string());
    }
    serde_yaml::from_str::<serde_yaml::Value>(render_yaml)
        .err()
        .map(|e| format!("render.yaml may not be valid YAML: {e}"))
}

/// Runs the convergence loop over archives and packages the result
pub struct AnalysisPipeline {
    convergence: ConvergenceLoop,
    reader: ArchiveReader,
}

impl AnalysisPipeline {
    pub fn new(model: Arc<dyn DeploymentModel>, config: &AnalysisConfig) -> Self {
        Self {
            convergence: ConvergenceLoop::new(
                model,
                PromptAssembler::new(config.prompt_budget),
                config.max_iterations,
            ),
            reader: ArchiveReader::strict(),
        }
    }

    /// Analyze a zip upload named `archive_name`.
    ///
    /// Fails with `PreconditionMissing` before any model call when the
    /// archive has no `.replit`.
    pub async fn analyze_archive(
        &self,
        archive_name: &str,
        bytes: &[u8],
    ) -> AnalysisResult<AnalysisReport> {
        let files = self.reader.read(bytes)?;
        self.analyze_files(archive_name, files).await
    }

    /// Analyze an already extracted file set.
    pub async fn analyze_files(
        &self,
        archive_name: &str,
        files: ProjectFileSet,
    ) -> AnalysisResult<AnalysisReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("analysis_run", %run_id, archive = archive_name);
        self.run(run_id, archive_name, files).instrument(span).await
    }

    async fn run(
        &self,
        run_id: Uuid,
        archive_name: &str,
        original: ProjectFileSet,
    ) -> AnalysisResult<AnalysisReport> {
        let started_at = Utc::now();
        info!(files = original.len(), bytes = original.total_size(), "analysis started");

        let outcome = self.convergence.run(&original).await?;

        let fixes = reconcile(&original, &outcome.files);
        let plan = outcome.draft.finalize(fixes);

        let manifest_warning = manifest_warning(&plan.render_yaml);
        if let Some(ref warning) = manifest_warning {
            warn!(%warning, "manifest check");
        }

        let fixed_archive = write_archive(&outcome.files, &plan.render_yaml)?;

        info!(
            reason = %outcome.reason,
            model_calls = outcome.model_calls,
            suggested_fixes = plan.suggested_fixes.len(),
            skipped = outcome.skipped.len(),
            "analysis finished"
        );

        Ok(AnalysisReport {
            run_id,
            started_at,
            completed_at: Utc::now(),
            plan,
            convergence: outcome.reason,
            model_calls: outcome.model_calls,
            iterations: outcome.iterations,
            skipped: outcome.skipped,
            manifest_warning,
            final_files: outcome.files,
            fixed_archive_name: fixed_archive_name(archive_name),
            fixed_archive,
        })
    }
}
