//! Iterative plan-and-repair loop.
//!
//! The `ConvergenceLoop` drives up to `max_iterations` request/apply cycles:
//!
//! - **ASSEMBLE** -- build a budget-bounded prompt from the working set.
//! - **ANALYZE** -- one model call; any failure ends the run.
//! - **MERGE** -- sanitize proposed paths and write changed content into a
//!   fresh `ProjectFileSet`.
//! - **DECIDE** -- feed the iteration outcome to [`next_state`].
//!
//! The caller's file set is never modified. Model calls are strictly
//! sequential within a run.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{AnalysisError, AnalysisResult};
use crate::domain::models::{
    next_state, ConvergenceReason, DeploymentPlanDraft, FixBatch, IterationOutcome,
    IterationRecord, LoopState, ProjectFileSet, SkipEvent, MAX_ITERATIONS,
};
use crate::domain::ports::DeploymentModel;
use crate::services::path_sanitizer::sanitize_path;
use crate::services::prompt_assembler::PromptAssembler;

/// Result of a converged run.
#[derive(Debug, Clone)]
pub struct ConvergenceOutcome {
    /// Working set after the last applied batch
    pub files: ProjectFileSet,
    /// Draft from the last successful model call
    pub draft: DeploymentPlanDraft,
    pub reason: ConvergenceReason,
    /// Number of model calls made (1..=max_iterations)
    pub model_calls: u32,
    pub iterations: Vec<IterationRecord>,
    pub skipped: Vec<SkipEvent>,
}

/// Result of merging one fix batch.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub files: ProjectFileSet,
    /// Paths whose content was written, in batch order
    pub changed: Vec<String>,
    pub skipped: Vec<SkipEvent>,
}

/// Merge `batch` into `files`, producing a new set.
///
/// Entries whose name sanitizes to nothing are dropped and reported. An entry
/// counts as a change only when the path is new or its content differs; later
/// entries for the same path override earlier ones.
pub fn apply_fix_batch(files: &ProjectFileSet, batch: &FixBatch, iteration: u32) -> MergeResult {
    let mut touched: Vec<String> = Vec::new();
    let mut staged: BTreeMap<String, &str> = BTreeMap::new();
    let mut skipped = Vec::new();

    for entry in batch {
        let path = sanitize_path(&entry.file_name);
        if path.is_empty() {
            let reason = AnalysisError::InvalidFixPath {
                raw: entry.file_name.clone(),
            }
            .to_string();
            warn!(iteration, raw = %entry.file_name, "dropping fix with invalid path");
            skipped.push(SkipEvent {
                iteration,
                raw_file_name: entry.file_name.clone(),
                reason,
            });
            continue;
        }

        if !touched.contains(&path) {
            touched.push(path.clone());
        }
        staged.insert(path, entry.file_content.as_str());
    }

    // a path rewritten back to its original content is not a change
    let changed: Vec<String> = touched
        .into_iter()
        .filter(|path| files.get(path) != staged.get(path).copied())
        .collect();

    if changed.len() < staged.len() {
        debug!(
            iteration,
            unchanged = staged.len() - changed.len(),
            "fix content identical, not a change"
        );
    }

    let next = if changed.is_empty() {
        files.clone()
    } else {
        files.with_files(
            changed
                .iter()
                .filter_map(|path| staged.get(path).map(|content| (path.as_str(), *content))),
        )
    };

    MergeResult {
        files: next,
        changed,
        skipped,
    }
}

/// Bounded convergence loop over a [`DeploymentModel`].
pub struct ConvergenceLoop {
    model: Arc<dyn DeploymentModel>,
    assembler: PromptAssembler,
    max_iterations: u32,
}

impl ConvergenceLoop {
    /// Create a loop; `max_iterations` is clamped to `1..=MAX_ITERATIONS`.
    pub fn new(
        model: Arc<dyn DeploymentModel>,
        assembler: PromptAssembler,
        max_iterations: u32,
    ) -> Self {
        Self {
            model,
            assembler,
            max_iterations: max_iterations.clamp(1, MAX_ITERATIONS),
        }
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Run the loop over `original` until it converges or fails.
    ///
    /// # Errors
    /// * `AnalysisError::ModelTransport` / `ModelSchema` - a model call failed
    /// * `AnalysisError::NoPlanProduced` - the loop ended without a draft
    #[instrument(skip(self, original), fields(files = original.len(), max_iterations = self.max_iterations))]
    pub async fn run(&self, original: &ProjectFileSet) -> AnalysisResult<ConvergenceOutcome> {
        let mut state = LoopState::Iterating(0);
        let mut working = original.clone();
        let mut draft: Option<DeploymentPlanDraft> = None;
        let mut iterations = Vec::new();
        let mut skipped = Vec::new();
        let mut model_calls = 0_u32;

        while let LoopState::Iterating(k) = state {
            let prompt = self.assembler.assemble(&working);
            info!(
                iteration = k,
                files_sent = prompt.files.len(),
                prompt_size = prompt.total_size,
                omitted = prompt.omitted.len(),
                "requesting deployment plan"
            );

            model_calls += 1;
            let analysis = match self.model.analyze(&prompt).await {
                Ok(analysis) => analysis,
                Err(err) => {
                    state = next_state(state, IterationOutcome::ModelFailed, self.max_iterations);
                    warn!(iteration = k, error = %err, ?state, "model call failed");
                    return Err(err.at_iteration(k));
                }
            };

            let (iteration_draft, batch) = analysis.into_parts();
            draft = Some(iteration_draft);

            let mut record = IterationRecord {
                iteration: k,
                files_sent: prompt.files.len(),
                prompt_size: prompt.total_size,
                files_omitted: prompt.omitted.len(),
                fixes_proposed: batch.len(),
                files_changed: Vec::new(),
            };

            let outcome = if batch.is_empty() {
                IterationOutcome::NoFixesProposed
            } else {
                let merge = apply_fix_batch(&working, &batch, k);
                skipped.extend(merge.skipped);
                record.files_changed.clone_from(&merge.changed);
                working = merge.files;
                IterationOutcome::Applied {
                    changed: merge.changed.len(),
                }
            };

            iterations.push(record);
            state = next_state(state, outcome, self.max_iterations);
            debug!(iteration = k, ?outcome, ?state, "iteration complete");
        }

        let LoopState::Converged(reason) = state else {
            return Err(AnalysisError::NoPlanProduced);
        };
        let draft = draft.ok_or(AnalysisError::NoPlanProduced)?;

        info!(%reason, model_calls, "analysis converged");

        Ok(ConvergenceOutcome {
            files: working,
            draft,
            reason,
            model_calls,
            iterations,
            skipped,
        })
    }
}
