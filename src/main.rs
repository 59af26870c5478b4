mod app;
mod components;
mod config;
mod data;
mod events;
mod loader;
mod router;
mod theme;
mod utils;

use std::fs::{self, File};
use std::sync::{Arc, Mutex};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::app::{App, WindowSettings};
use crate::config::Config;
use crate::data::DataService;
use crate::data::provider::EthProvider;
use crate::events::SearchTarget;

/// Send diagnostics to a file; the terminal belongs to the UI.
fn init_tracing(config: &Config) -> Result<()> {
    let path = config.log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("creating log directory {}", dir.display()))?;
    }
    let file =
        File::create(&path).wrap_err_with(|| format!("opening log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .wrap_err("initializing tracing")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::parse();
    init_tracing(&config)?;

    let provider = EthProvider::new(&config.rpc_url)
        .wrap_err_with(|| format!("invalid RPC URL {}", config.rpc_url))?;
    info!(
        rpc_url = %config.rpc_url,
        start_block = ?config.start_block,
        window = config.window,
        timeout_ms = config.fetch_timeout_ms,
        "starting explorer"
    );

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let data_service = DataService::new(Arc::new(provider), event_tx, config.fetch_timeout());

    let settings = WindowSettings {
        start_block: config.start_block,
        window: config.window,
    };
    let mut app = App::new(data_service, settings, event_rx, config.tick_rate_ms);

    if let Some(ref query) = config.search {
        match SearchTarget::parse(query) {
            Some(target) => app.dispatch(target.into_event()),
            None => warn!("ignoring empty --search query"),
        }
    }

    // Initialize terminal
    let terminal = ratatui::init();
    let result = app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    result
}
