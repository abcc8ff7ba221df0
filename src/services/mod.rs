pub mod convergence_loop;
pub mod diff_reconciler;
pub mod error_diagnosis;
pub mod path_sanitizer;
pub mod prompt_assembler;

pub use convergence_loop::{apply_fix_batch, ConvergenceLoop, ConvergenceOutcome, MergeResult};
pub use diff_reconciler::reconcile;
pub use error_diagnosis::{fallback_message, ErrorDiagnosis};
pub use path_sanitizer::{sanitize_path, try_sanitize_path};
pub use prompt_assembler::{PromptAssembler, DEFAULT_PROMPT_BUDGET, PRIORITY_FILES};
