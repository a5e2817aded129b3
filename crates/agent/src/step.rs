//! Step protocol and turn parsing
//!
//! The model is expected to reply with exactly one JSON object per turn,
//! discriminated by a `step` field. A reply that is not JSON, or whose
//! `step` value is not one the model may emit, produces a terminal
//! `Error` step; there is no repair or retry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Longest raw-text excerpt carried into a parse-failure step.
const RAW_EXCERPT_CHARS: usize = 400;

/// One recorded step of an agent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum Step {
    Plan { content: String },
    Action { function: String, input: Value },
    Observe { output: Value },
    Output { content: String },
    Error { content: String },
}

/// One model invocation's parsed reply
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// The reply parsed as JSON; `step` was read from it. The raw value
    /// is kept so the loop can replay it to the model verbatim.
    Structured { json: Value, step: Step },
    /// The reply was not JSON at all. Terminal for the run.
    Malformed(Step),
}

/// Interpret one raw model reply.
pub fn parse_turn(raw: &str) -> Turn {
    let json: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => {
            return Turn::Malformed(Step::Error {
                content: format!("Non-JSON output: {}", truncate_chars(raw, RAW_EXCERPT_CHARS)),
            })
        }
    };

    let step = Step::from_value(&json);
    Turn::Structured { json, step }
}

impl Step {
    /// Read a step out of a parsed model reply.
    ///
    /// The model may emit `plan`, `action`, or `output`; `observe` is
    /// fed back by the loop, never accepted from the model. Anything
    /// else, including a missing discriminator, is an `Error` step.
    pub fn from_value(value: &Value) -> Step {
        let kind = value
            .get("step")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_lowercase();

        match kind.as_str() {
            "plan" => Step::Plan {
                content: text_field(value, "content"),
            },
            "action" => Step::Action {
                function: text_field(value, "function"),
                input: value.get("input").cloned().unwrap_or(Value::Null),
            },
            "output" => Step::Output {
                content: text_field(value, "content"),
            },
            _ => Step::Error {
                content: format!("Unexpected step: {}", value),
            },
        }
    }
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
