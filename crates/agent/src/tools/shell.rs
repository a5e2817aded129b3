//! Shell command tool

use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::{text_input, ToolTrait};

const MAX_OUTPUT_LEN: usize = 10000;

/// Runs a shell command on the server
pub struct RunCommandTool {
    timeout_secs: u64,
}

impl RunCommandTool {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    pub fn from_config(config: &errand_config::Config) -> Self {
        Self::new(config.command_timeout_secs())
    }
}

impl Default for RunCommandTool {
    fn default() -> Self {
        Self::new(60)
    }
}

#[async_trait]
impl ToolTrait for RunCommandTool {
    fn name(&self) -> &str {
        "run_command"
    }

    fn description(&self) -> &str {
        "Executes a shell command on the server"
    }

    async fn invoke(&self, input: Value) -> String {
        let Some(command) = text_input(&input, "command") else {
            return format!("Error: run_command expects a command string, got: {}", input);
        };

        debug!("executing: {}", command);

        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(&command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = match tokio::time::timeout(
            tokio::time::Duration::from_secs(self.timeout_secs),
            cmd.output(),
        )
        .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return format!("Error running command: {}", e),
            Err(_) => {
                return format!("Command timed out after {} seconds", self.timeout_secs)
            }
        };

        let mut parts = Vec::new();
        if !output.stdout.is_empty() {
            parts.push(String::from_utf8_lossy(&output.stdout).to_string());
        }
        if !output.stderr.is_empty() {
            parts.push(format!(
                "STDERR:\n{}",
                String::from_utf8_lossy(&output.stderr)
            ));
        }
        if output.status.code() != Some(0) {
            parts.push(format!("EXIT CODE: {}", output.status.code().unwrap_or(-1)));
        }

        let result = if parts.is_empty() {
            "(no output)".to_string()
        } else {
            parts.join("\n")
        };

        if result.len() > MAX_OUTPUT_LEN {
            let mut end = MAX_OUTPUT_LEN;
            while !result.is_char_boundary(end) {
                end -= 1;
            }
            format!(
                "{}\n[output truncated: {} bytes remaining]",
                &result[..end],
                result.len() - end
            )
        } else {
            result
        }
    }
}
