//! Deployment plan and model result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// File name the generated manifest is written under in the fixed archive.
pub const MANIFEST_FILE_NAME: &str = "render.yaml";

/// One file replacement proposed by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedFile {
    /// Path exactly as the model returned it (not yet sanitized)
    pub file_name: String,

    /// Full replacement content
    pub file_content: String,
}

/// Structured result of one analysis call.
///
/// Every field is required; a response missing any of them is a schema
/// failure. An empty `fixed_files` is the model's "no more changes" signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAnalysis {
    pub project_type: String,
    pub render_yaml: String,
    pub build_command: String,
    pub start_command: String,
    pub explanation: String,
    pub fixed_files: Vec<FixedFile>,
}

impl ModelAnalysis {
    /// Split into the plan draft and the fix batch for this iteration.
    pub fn into_parts(self) -> (DeploymentPlanDraft, FixBatch) {
        let draft = DeploymentPlanDraft {
            project_type: self.project_type,
            render_yaml: self.render_yaml,
            build_command: self.build_command,
            start_command: self.start_command,
            explanation: self.explanation,
        };
        (draft, FixBatch::new(self.fixed_files))
    }
}

/// Ordered file replacements produced by one model call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixBatch {
    entries: Vec<FixedFile>,
}

impl FixBatch {
    pub fn new(entries: Vec<FixedFile>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FixedFile> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FixBatch {
    type Item = &'a FixedFile;
    type IntoIter = std::slice::Iter<'a, FixedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Plan produced by a single iteration.
///
/// Drafts carry no suggested fixes; those only exist on the final
/// [`DeploymentPlan`], computed once from the original and converged sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPlanDraft {
    pub project_type: String,
    pub render_yaml: String,
    pub build_command: String,
    pub start_command: String,
    pub explanation: String,
}

impl DeploymentPlanDraft {
    /// Promote the draft to the final plan.
    pub fn finalize(self, suggested_fixes: Vec<SuggestedFix>) -> DeploymentPlan {
        DeploymentPlan {
            project_type: self.project_type,
            render_yaml: self.render_yaml,
            build_command: self.build_command,
            start_command: self.start_command,
            explanation: self.explanation,
            suggested_fixes,
        }
    }
}

/// Whether a suggested fix creates a file or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixKind {
    Added,
    Modified,
}

impl fmt::Display for FixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Modified => write!(f, "modified"),
        }
    }
}

/// A file change presented to the user for review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedFix {
    pub file_name: String,
    pub description: String,
    pub suggested_code: String,
    pub kind: FixKind,
}

/// Final deployment plan returned to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPlan {
    pub project_type: String,
    pub render_yaml: String,
    pub build_command: String,
    pub start_command: String,
    pub explanation: String,
    pub suggested_fixes: Vec<SuggestedFix>,
}
