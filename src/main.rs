//! Wabase Bot entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use wabase_bot::config::Settings;
use wabase_bot::dispatch::{
    Dispatcher, ExpiringLedger, InMemoryConversationStore, ReplyCatalog, spawn_sweeper,
};
use wabase_bot::logging;
use wabase_bot::whatsapp::WhatsAppAgent;

/// Interactive WhatsApp menu bot
#[derive(Debug, Parser)]
#[command(name = "wabase-bot", version, about)]
struct Cli {
    /// Config file (TOML) layered over the user config
    #[arg(short, long, env = "WABASE_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (overrides config)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let level = cli.log_level.as_deref().unwrap_or(&settings.log_level);
    let _log_guard = logging::init(level, settings.log_json, settings.filter_noise)
        .context("Failed to initialize logging")?;

    tracing::info!("Wabase Bot starting");

    let ledger = Arc::new(ExpiringLedger::new(settings.dedup.window()));
    let _sweeper = spawn_sweeper(ledger.clone(), settings.dedup.sweep_interval());

    let dispatcher = Dispatcher::new(
        ledger,
        Arc::new(InMemoryConversationStore::new()),
        ReplyCatalog::from_config(&settings.replies, &settings.menu.footer),
    );

    let agent = WhatsAppAgent::new(Arc::new(dispatcher), settings.session_db_path());
    let handle = agent.start();

    tokio::select! {
        res = handle => {
            res.context("WhatsApp agent task panicked")?
                .context("WhatsApp agent stopped")?;
            tracing::info!("WhatsApp agent stopped");
        }
        res = tokio::signal::ctrl_c() => {
            res.context("Failed to listen for ctrl-c")?;
            tracing::info!("Shutting down");
        }
    }

    Ok(())
}
