//! errand command implementations

use anyhow::{Context, Result};
use std::path::PathBuf;

use errand_agent::{default_registry, AgentLoop};
use errand_config::Config;
use errand_provider::OpenRouterProvider;

/// Initialize config and print next steps
pub async fn init_command() -> Result<()> {
    let config = errand_config::init().await?;

    println!("Config ready at {:?}", errand_config::config_path());
    if !config.has_api_key() {
        println!("Set providers.openai.api_key (or OPENAI_API_KEY) to get started");
    }

    Ok(())
}

/// Run one query through the agent loop
pub async fn ask_command(
    query: String,
    history_path: Option<PathBuf>,
    show_trace: bool,
) -> Result<()> {
    let config = Config::load().await?;

    let api_key = config.api_key().context(
        "no API key configured; run `errand init`, then set providers.openai.api_key or OPENAI_API_KEY",
    )?;

    let history = load_history(history_path).await?;

    let provider =
        OpenRouterProvider::new(api_key, config.api_base(), Some(config.default_model()));
    let tools = default_registry(&config);
    let agent = AgentLoop::with_config(provider, tools, &config);

    let outcome = agent.run(&query, &history).await?;

    println!("{}", outcome.answer);

    if show_trace {
        for step in &outcome.trace {
            println!("  {}", serde_json::to_string(step)?);
        }
    }

    Ok(())
}

async fn load_history(path: Option<PathBuf>) -> Result<Vec<serde_json::Value>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("reading history file {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("parsing history file {:?}", path))
}

/// Show configuration status
pub async fn status_command() -> Result<()> {
    let config = Config::load().await?;

    println!("errand status");
    println!("  config: {:?}", errand_config::config_path());
    println!("  model: {}", config.default_model());
    println!(
        "  llm key: {}",
        if config.has_api_key() {
            "[set]"
        } else {
            "[not set]"
        }
    );
    println!(
        "  weather key: {}",
        if config.weather_api_key().is_some() {
            "[set]"
        } else {
            "[not set]"
        }
    );
    println!("  max iterations: {}", config.agent.max_iterations);

    Ok(())
}
