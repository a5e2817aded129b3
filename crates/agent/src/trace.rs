//! Step accumulation and result assembly

use serde::{Deserialize, Serialize};

use crate::step::Step;

/// The result of one agent run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutcome {
    /// Final answer text
    pub answer: String,
    /// Every step recorded during the run, in order
    pub trace: Vec<Step>,
}

/// Accumulates steps as a run progresses
#[derive(Debug, Default)]
pub struct StepLog {
    steps: Vec<Step>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Package the accumulated steps with the final answer.
    pub fn finish(self, answer: impl Into<String>) -> AgentOutcome {
        AgentOutcome {
            answer: answer.into(),
            trace: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_log_accumulates_in_order() {
        let mut log = StepLog::new();
        assert!(log.is_empty());

        log.push(Step::Plan {
            content: "a".to_string(),
        });
        log.push(Step::Output {
            content: "b".to_string(),
        });
        assert_eq!(log.len(), 2);

        let outcome = log.finish("b");
        assert_eq!(outcome.answer, "b");
        assert_eq!(outcome.trace.len(), 2);
        assert!(matches!(outcome.trace[0], Step::Plan { .. }));
        assert!(matches!(outcome.trace[1], Step::Output { .. }));
    }

    #[test]
    fn test_outcome_serializes_steps_with_tags() {
        let mut log = StepLog::new();
        log.push(Step::Error {
            content: "Unknown tool: frobnicate".to_string(),
        });
        let outcome = log.finish("Could not complete the loop.");

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["answer"], "Could not complete the loop.");
        assert_eq!(value["trace"][0]["step"], "error");
        assert_eq!(value["trace"][0]["content"], "Unknown tool: frobnicate");
    }
}
