//! Agent tool registry

pub mod shell;
pub mod weather;

pub use shell::RunCommandTool;
pub use weather::GetWeatherTool;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

type BoxedTool = Box<dyn ToolTrait + Send + Sync>;

/// A capability the agent can invoke as an action.
///
/// `invoke` always produces a usable observation: internal failures
/// (network, OS, parsing) are converted to descriptive text inside the
/// capability and never cross this boundary.
#[async_trait]
pub trait ToolTrait: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    async fn invoke(&self, input: Value) -> String;
}

/// Fixed name-to-capability mapping, read-only after startup
pub struct ToolRegistry {
    tools: HashMap<String, BoxedTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register<T: ToolTrait + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&(dyn ToolTrait + Send + Sync)> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Name/description pairs in stable order, for prompt assembly.
    pub fn descriptions(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .tools
            .values()
            .map(|t| (t.name().to_string(), t.description().to_string()))
            .collect();
        entries.sort();
        entries
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the standard registry from configuration.
pub fn default_registry(config: &errand_config::Config) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(GetWeatherTool::from_config(config));
    registry.register(RunCommandTool::from_config(config));
    registry
}

/// Coerce a tool input to text: either a bare JSON string or an object
/// carrying the named key.
pub(crate) fn text_input(input: &Value, key: &str) -> Option<String> {
    match input {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get(key).and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}
