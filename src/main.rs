//! # oobot — ambient presence agent
//!
//! Watches a set of channels and speaks up on an adaptive schedule: up to 72
//! hours of silence on a dead channel, tightening toward seconds while a
//! conversation is busy, always relaxing back after each send. DMs and
//! mentions get an immediate reply.
//!
//! Usage:
//!   oobot                          # channels from ~/.oobot/config.toml or $OOBOT_CHANNELS
//!   oobot --channels 111,222       # explicit channel list
//!   oobot -v                       # verbose scheduling logs
//!
//! This binary hosts the core against the built-in console gateway; a real
//! chat transport plugs in through the same `Gateway` trait.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use futures::StreamExt;
use oobot_core::config::{OobotConfig, parse_channel_list};
use oobot_core::traits::Gateway;
use oobot_scheduler::EventRouter;
use tracing_subscriber::EnvFilter;

mod console;

#[derive(Parser)]
#[command(name = "oobot", version, about = "🤖 oobot — ambient presence agent")]
struct Cli {
    /// Comma-separated channel ids to watch (overrides config and env)
    #[arg(long)]
    channels: Option<String>,

    /// Path to a config file (default ~/.oobot/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "oobot=debug,oobot_scheduler=debug"
    } else {
        "oobot=info,oobot_scheduler=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let path = shellexpand::tilde(path).to_string();
            OobotConfig::load_from(std::path::Path::new(&path))?
        }
        None => OobotConfig::load()?,
    };
    config.apply_env();
    if let Some(raw) = &cli.channels {
        config.channels = parse_channel_list(raw);
    }
    if config.channels.is_empty() {
        anyhow::bail!(
            "no channels configured — set `channels` in config.toml, $OOBOT_CHANNELS, or --channels"
        );
    }

    println!("🤖 oobot v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "   📺 channels: {}",
        config
            .channels
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    );
    println!("   ⌨️  type `<channel> <text>`, `@<channel> <text>` to mention, `dm <text>`");

    let gateway: Arc<dyn Gateway> = Arc::new(console::ConsoleGateway::new());
    let router = EventRouter::new(gateway.clone(), config.channel_ids(), config.ambient.clone());

    let mut events = gateway.listen().await?;
    while let Some(event) = events.next().await {
        if let Err(e) = router.handle(event).await {
            tracing::warn!("⚠️ dispatch failed: {e}");
        }
    }

    Ok(())
}
