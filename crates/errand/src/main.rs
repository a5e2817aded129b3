//! errand - a minimal step-wise AI agent

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

mod commands;

use commands::{ask_command, init_command, status_command};

/// errand - runs your errands through an AI agent
#[derive(Parser)]
#[command(name = "errand")]
#[command(about = "A minimal step-wise AI agent for your terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config
    Init,
    /// Ask the agent a question
    Ask {
        /// The query to resolve
        query: String,
        /// Path to a JSON file with prior {role, content} history
        #[arg(long)]
        history: Option<PathBuf>,
        /// Print the recorded steps after the answer
        #[arg(long)]
        show_trace: bool,
    },
    /// Show configuration status
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    } else {
        tracing_subscriber::fmt::init();
    }

    match cli.command {
        Commands::Init => {
            if let Err(e) = init_command().await {
                error!("Init failed: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Ask {
            query,
            history,
            show_trace,
        } => {
            if let Err(e) = ask_command(query, history, show_trace).await {
                error!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Status => {
            if let Err(e) = status_command().await {
                error!("Status failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
