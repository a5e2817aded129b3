//! errand agent core
//!
//! Drives a model through repeated plan -> action -> observe -> output
//! turns and returns the final answer together with the recorded steps.

use thiserror::Error;

pub mod loop_agent;
pub mod step;
pub mod tools;
pub mod trace;
pub mod transcript;

pub use loop_agent::{AgentLoop, DEFAULT_FALLBACK_ANSWER, DEFAULT_MAX_ITERATIONS};
pub use step::{parse_turn, Step, Turn};
pub use tools::{default_registry, ToolRegistry, ToolTrait};
pub use trace::{AgentOutcome, StepLog};
pub use transcript::TranscriptBuilder;

/// Agent run errors
///
/// Malformed model output, unknown tools, and iteration exhaustion are
/// not errors: they terminate a run with a returned outcome. Only a
/// failed model call aborts the run itself.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;
