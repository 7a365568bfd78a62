//! Console entry point for sociograph.
//!
//! Loads configuration, resolves the custom-attribute name, connects to the
//! store, and hands control to the interactive menu loop. Logs go to stderr
//! so they never interleave with menu output.

mod menu;

use clap::Parser;
use dialoguer::Input;
use tracing_subscriber::{fmt, EnvFilter};

use sociograph_core::{AppConfig, AttributeName};
use sociograph_graph::{GraphClient, MemoryStore, SocialStore};

#[derive(Parser)]
#[command(name = "sociograph")]
#[command(about = "Console social-graph manager backed by Neo4j")]
struct Cli {
    /// Config file prefix (default: sociograph).
    #[arg(short, long, default_value = "sociograph")]
    config: String,

    /// Custom attribute name, overriding config file and environment.
    #[arg(long)]
    attribute: Option<String>,

    /// Run against an ephemeral in-memory store instead of Neo4j.
    #[arg(long)]
    memory: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    let attribute = resolve_attribute(&cli, &config)?;

    if cli.memory {
        tracing::info!("Using ephemeral in-memory store");
        let store = MemoryStore::new(attribute);
        store.ensure_schema().await?;
        menu::run_session(&store).await
    } else {
        let client = GraphClient::connect(&config, attribute).await?;
        client.ensure_schema().await?;
        menu::run_session(&client).await
    }
}

/// Resolution order: CLI flag, then config/environment, then an interactive
/// prompt with "hobby" as the blank-input fallback.
fn resolve_attribute(cli: &Cli, config: &AppConfig) -> anyhow::Result<AttributeName> {
    if let Some(raw) = &cli.attribute {
        return Ok(AttributeName::new(raw)?);
    }
    if let Some(attribute) = &config.custom_attribute {
        return Ok(attribute.clone());
    }
    let raw: String = Input::new()
        .with_prompt("Custom attribute for persons (e.g. profession, hobby, age)")
        .allow_empty(true)
        .interact_text()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(AttributeName::new("hobby")?);
    }
    Ok(AttributeName::new(raw)?)
}
