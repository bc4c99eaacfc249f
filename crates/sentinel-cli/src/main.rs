//! Sentinel CLI - demonstration front end for the detection orchestrator.
//!
//! Not a production gateway: real deployments embed `sentinel-core`
//! directly behind whatever transport they already run (HTTP, gRPC, an
//! in-process call from an MCP server). This binary exists to exercise
//! the orchestrator from a config file and a single piece of text.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use sentinel_core::{DetectionRequest, Orchestrator, OrchestratorConfig};
use sentinel_registry::ModelDescriptor;

#[derive(Parser)]
#[command(name = "sentinel")]
#[command(about = "Prompt-injection detection orchestrator - demonstration CLI")]
struct Cli {
    /// Path to a JSON config file listing the model fallback chain.
    #[arg(short, long, global = true, default_value = "config/sentinel.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run detection on a single piece of text.
    Detect {
        /// The text to classify.
        text: String,
        /// Override the default confidence threshold for this call.
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Print the current health snapshot as JSON.
    Health,
    /// Print the full diagnostic dump (per-model breaker state, fallback chain).
    Diagnostic,
    /// Print raw request counters and per-threat-tag counts as JSON.
    Metrics,
    /// Reset a named model's circuit breaker back to CLOSED.
    ResetBreaker {
        /// Name of the model, as it appears in the config file.
        name: String,
    },
}

#[derive(Deserialize)]
struct CliConfig {
    models: Vec<ModelDescriptor>,
    #[serde(default)]
    orchestrator: OrchestratorConfig,
}

fn load_config(path: &PathBuf) -> Result<CliConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config file at {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let orchestrator = Orchestrator::new(config.models, config.orchestrator)?;

    match cli.command {
        Commands::Detect { text, threshold } => {
            let mut request = DetectionRequest::new(text);
            if let Some(t) = threshold {
                request = request.with_confidence_threshold(t);
            }
            let outcome = orchestrator.detect(request).await;
            println!("{}", serde_json::to_string_pretty(&outcome.verdict)?);
            if outcome.all_models_failed.is_some() {
                std::process::exit(2);
            }
        }
        Commands::Health => {
            let snapshot = orchestrator.health_snapshot().await;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Diagnostic => {
            let diagnostic = orchestrator.diagnostic().await;
            println!("{}", serde_json::to_string_pretty(&diagnostic)?);
        }
        Commands::Metrics => {
            let metrics = orchestrator.metrics_snapshot();
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        Commands::ResetBreaker { name } => {
            orchestrator.reset_breaker(&name).await?;
            println!("breaker '{name}' reset");
        }
    }

    Ok(())
}
