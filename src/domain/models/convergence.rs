//! Convergence loop states and transitions.
//!
//! The loop is an explicit state machine:
//!
//! ```text
//! Iterating(0) ──▶ Iterating(1) ──▶ Iterating(2)
//!      │                │                │
//!      ├────────────────┴────────────────┴──▶ Converged(reason)
//!      └──────────────────────────────────────▶ Failed
//! ```
//!
//! [`next_state`] is pure so every transition can be tested without a model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on model calls per analysis run.
pub const MAX_ITERATIONS: u32 = 3;

/// Why a run stopped iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceReason {
    /// The model returned an empty `fixedFiles` list.
    NoFixesProposed,
    /// The model proposed fixes but none changed any file content.
    NoEffectiveChanges,
    /// The iteration bound was reached; the last draft is accepted as-is.
    IterationBudgetExhausted,
}

impl fmt::Display for ConvergenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFixesProposed => write!(f, "model proposed no further fixes"),
            Self::NoEffectiveChanges => write!(f, "proposed fixes changed nothing"),
            Self::IterationBudgetExhausted => write!(f, "iteration budget exhausted"),
        }
    }
}

/// State of a convergence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// About to run iteration `k` (zero-based).
    Iterating(u32),
    Converged(ConvergenceReason),
    Failed,
}

impl LoopState {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Iterating(_))
    }
}

/// What a single iteration observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// The model call failed (transport or schema).
    ModelFailed,
    /// `fixedFiles` was empty.
    NoFixesProposed,
    /// The fix batch was merged; `changed` files actually differed.
    Applied { changed: usize },
}

/// Compute the state that follows `current` given an iteration's outcome.
///
/// Terminal states are absorbing.
pub fn next_state(
    current: LoopState,
    outcome: IterationOutcome,
    max_iterations: u32,
) -> LoopState {
    let LoopState::Iterating(k) = current else {
        return current;
    };

    match outcome {
        IterationOutcome::ModelFailed => LoopState::Failed,
        IterationOutcome::NoFixesProposed => {
            LoopState::Converged(ConvergenceReason::NoFixesProposed)
        }
        IterationOutcome::Applied { changed: 0 } => {
            LoopState::Converged(ConvergenceReason::NoEffectiveChanges)
        }
        IterationOutcome::Applied { .. } if k + 1 >= max_iterations => {
            LoopState::Converged(ConvergenceReason::IterationBudgetExhausted)
        }
        IterationOutcome::Applied { .. } => LoopState::Iterating(k + 1),
    }
}

/// A fix entry that was dropped instead of merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipEvent {
    pub iteration: u32,
    pub raw_file_name: String,
    pub reason: String,
}

/// Summary of one iteration, kept for the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IterationRecord {
    pub iteration: u32,
    pub files_sent: usize,
    pub prompt_size: usize,
    pub files_omitted: usize,
    pub fixes_proposed: usize,
    pub files_changed: Vec<String>,
}
