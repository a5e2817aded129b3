//! Transcript assembly for model calls

use serde_json::Value;

use errand_provider::Message;

use crate::tools::ToolRegistry;

const PROMPT_HEADER: &str = r#"You are a helpful AI assistant specialized in resolving user queries.
You work in start -> plan -> action -> observe -> output mode.

Rules:
- Emit exactly one JSON object per turn following the schema below.
- Only one step at a time: plan OR action OR output (observe is fed back to you).
- Think carefully before choosing tools.

Output JSON format:
{
  "step": "string",
  "content": "string",
  "function": "The name of the function if the step is action",
  "input": "The input parameter for the function"
}"#;

const PROMPT_EXAMPLE: &str = r#"Example:
User: What is the weather of new york?
Assistant: { "step": "plan", "content": "User wants weather for New York" }
Assistant: { "step": "action", "function": "get_weather", "input": "new york" }
Assistant: { "step": "observe", "output": "12 Degree Cel" }
Assistant: { "step": "output", "content": "The weather for New York is 12 Degree Cel." }"#;

/// Builds the ordered message sequence fed to the model
pub struct TranscriptBuilder {
    system_prompt: String,
}

impl TranscriptBuilder {
    /// Create a builder whose system prompt lists the registry's tools.
    pub fn new(registry: &ToolRegistry) -> Self {
        let mut tool_lines = vec!["Available tools:".to_string()];
        for (name, description) in registry.descriptions() {
            tool_lines.push(format!("- {}: {}", name, description));
        }

        let system_prompt = format!(
            "{}\n\n{}\n\n{}",
            PROMPT_HEADER,
            tool_lines.join("\n"),
            PROMPT_EXAMPLE
        );

        Self { system_prompt }
    }

    /// Create a builder with a caller-supplied system prompt.
    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Keep only history entries where both role and content are strings.
    ///
    /// Bad history never fails a request; malformed entries are dropped
    /// silently, in-order survivors keep their original order.
    pub fn sanitize_history(raw: &[Value]) -> Vec<Message> {
        let mut safe = Vec::new();
        for entry in raw {
            let role = entry.get("role").and_then(Value::as_str);
            let content = entry.get("content").and_then(Value::as_str);
            if let (Some(role), Some(content)) = (role, content) {
                safe.push(Message {
                    role: role.to_string(),
                    content: content.to_string(),
                });
            }
        }
        safe
    }

    /// Assemble: one system message, sanitized history, then the query.
    pub fn build(&self, history: &[Value], query: &str) -> Vec<Message> {
        let mut messages = vec![Message::system(self.system_prompt.clone())];
        messages.extend(Self::sanitize_history(history));
        messages.push(Message::user(query));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_prompt_lists_registered_tools() {
        let config = errand_config::Config::default();
        let registry = crate::tools::default_registry(&config);
        let builder = TranscriptBuilder::new(&registry);

        let prompt = builder.system_prompt();
        assert!(prompt.contains("plan -> action -> observe -> output"));
        assert!(prompt.contains("- get_weather: Returns current weather for a city"));
        assert!(prompt.contains("- run_command: Executes a shell command on the server"));
    }

    #[test]
    fn test_build_orders_system_history_query() {
        let builder = TranscriptBuilder::with_system_prompt("sys");
        let history = vec![
            json!({"role": "user", "content": "earlier question"}),
            json!({"role": "assistant", "content": "earlier answer"}),
        ];

        let messages = builder.build(&history, "current question");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "sys");
        assert_eq!(messages[1].content, "earlier question");
        assert_eq!(messages[2].content, "earlier answer");
        assert_eq!(messages[3].role, "user");
        assert_eq!(messages[3].content, "current question");
    }

    #[test]
    fn test_sanitize_drops_malformed_entries() {
        let history = vec![
            json!({"role": "user", "content": "keep me"}),
            json!({"role": "user"}),
            json!({"content": "no role"}),
            json!({"role": 5, "content": "numeric role"}),
            json!({"role": "assistant", "content": ["not", "a", "string"]}),
            json!("not an object"),
            json!({"role": "assistant", "content": "keep me too", "turn_id": "xyz"}),
        ];

        let safe = TranscriptBuilder::sanitize_history(&history);

        assert_eq!(safe.len(), 2);
        assert_eq!(safe[0].content, "keep me");
        assert_eq!(safe[1].role, "assistant");
        assert_eq!(safe[1].content, "keep me too");
    }

    #[test]
    fn test_sanitize_empty_history() {
        assert!(TranscriptBuilder::sanitize_history(&[]).is_empty());
    }

    #[test]
    fn test_sanitize_never_grows_history() {
        let history = vec![
            json!({"role": "user", "content": "a"}),
            json!({"bogus": true}),
        ];
        let safe = TranscriptBuilder::sanitize_history(&history);
        assert!(safe.len() <= history.len());
    }
}
