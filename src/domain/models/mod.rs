pub mod config;
pub mod convergence;
pub mod file_set;
pub mod plan;
pub mod prompt;

pub use config::{AnalysisConfig, Config, GithubConfig, LoggingConfig, ModelConfig, RenderConfig};
pub use convergence::{
    next_state, ConvergenceReason, IterationOutcome, IterationRecord, LoopState, SkipEvent,
    MAX_ITERATIONS,
};
pub use file_set::ProjectFileSet;
pub use plan::{
    DeploymentPlan, DeploymentPlanDraft, FixBatch, FixKind, FixedFile, ModelAnalysis,
    SuggestedFix, MANIFEST_FILE_NAME,
};
pub use prompt::{AssembledPrompt, PromptFile};
