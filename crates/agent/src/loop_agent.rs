//! Agent loop - core processing engine

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use errand_config::Config;
use errand_provider::{ChatParams, Message, Provider};

use crate::step::{parse_turn, Step, Turn};
use crate::tools::ToolRegistry;
use crate::trace::{AgentOutcome, StepLog};
use crate::transcript::TranscriptBuilder;

pub const DEFAULT_MAX_ITERATIONS: u32 = 6;
pub const DEFAULT_FALLBACK_ANSWER: &str = "Could not complete the loop.";

/// Drives one query through plan/action/observe/output turns.
///
/// Holds only read-only state; each `run` owns its own transcript and
/// step log, so one loop can serve concurrent runs.
pub struct AgentLoop<P: Provider> {
    provider: Arc<P>,
    tools: ToolRegistry,
    transcript: TranscriptBuilder,
    model: String,
    max_tokens: u32,
    temperature: f32,
    max_iterations: u32,
    fallback_answer: String,
}

impl<P: Provider> AgentLoop<P> {
    /// Create an agent loop with built-in defaults.
    pub fn new(provider: P, tools: ToolRegistry, model: impl Into<String>) -> Self {
        let transcript = TranscriptBuilder::new(&tools);
        let defaults = ChatParams::default();
        Self {
            provider: Arc::new(provider),
            tools,
            transcript,
            model: model.into(),
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            fallback_answer: DEFAULT_FALLBACK_ANSWER.to_string(),
        }
    }

    /// Create an agent loop from configuration.
    pub fn with_config(provider: P, tools: ToolRegistry, config: &Config) -> Self {
        let mut agent = Self::new(provider, tools, config.default_model());
        agent.max_tokens = config.agent.max_tokens;
        agent.temperature = config.agent.temperature;
        agent.max_iterations = config.agent.max_iterations;
        agent.fallback_answer = config.agent.fallback_answer.clone();
        agent
    }

    pub fn set_max_iterations(&mut self, max_iterations: u32) {
        self.max_iterations = max_iterations;
    }

    pub fn set_fallback_answer(&mut self, answer: impl Into<String>) {
        self.fallback_answer = answer.into();
    }

    /// Run one query to completion.
    ///
    /// `history` is the caller's prior conversation as arbitrary JSON
    /// records; anything without string role/content is dropped.
    ///
    /// Returns `Err` only when the model call itself fails; every other
    /// terminal condition produces an outcome with a trace.
    pub async fn run(&self, query: &str, history: &[Value]) -> crate::Result<AgentOutcome> {
        let mut messages = self.transcript.build(history, query);
        let mut log = StepLog::new();

        for iteration in 1..=self.max_iterations {
            debug!("agent iteration {}", iteration);

            let params = ChatParams {
                model: self.model.clone(),
                messages: messages.clone(),
                max_tokens: self.max_tokens,
                temperature: self.temperature,
                json_mode: true,
            };

            let response = self
                .provider
                .chat(params)
                .await
                .map_err(|e| crate::AgentError::Provider(e.to_string()))?;

            let raw = response.content.unwrap_or_default();

            let (value, step) = match parse_turn(&raw) {
                Turn::Structured { json, step } => (json, step),
                Turn::Malformed(step) => {
                    warn!("model reply was not JSON");
                    log.push(step);
                    break;
                }
            };

            // Replay the parsed reply to the model verbatim; the
            // transcript is its only memory between calls.
            messages.push(Message::assistant(value.to_string()));

            match step {
                Step::Plan { content } => {
                    debug!("plan: {}", content);
                    log.push(Step::Plan { content });
                }
                Step::Action { function, input } => {
                    log.push(Step::Action {
                        function: function.clone(),
                        input: input.clone(),
                    });

                    let Some(tool) = self.tools.get(&function) else {
                        warn!("unknown tool requested: {}", function);
                        log.push(Step::Error {
                            content: format!("Unknown tool: {}", function),
                        });
                        break;
                    };

                    debug!("invoking tool: {}", function);
                    let output = tool.invoke(input).await;

                    messages.push(Message::assistant(
                        json!({"step": "observe", "output": output.clone()}).to_string(),
                    ));
                    log.push(Step::Observe {
                        output: Value::String(output),
                    });
                }
                Step::Output { content } => {
                    info!("run finished after {} iterations", iteration);
                    log.push(Step::Output {
                        content: content.clone(),
                    });
                    return Ok(log.finish(content));
                }
                other => {
                    warn!("terminal step: {:?}", other);
                    log.push(other);
                    break;
                }
            }
        }

        Ok(log.finish(self.fallback_answer.clone()))
    }
}
