mod commands;

use clap::Parser;
use commands::{AppState, Command};
use dpt_catalog::{JsonCatalog, RecordSource, SampleCatalog};
use dpt_core::config::Config;
use dpt_core::score::scorer_from_config;
use dpt_core::{FileStore, SearchHistory, SearchSession, Watchlists};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dpt", about = "DesignPatTrack: search and curate design-patent records")]
struct Cli {
    /// Write debug logs to /tmp/dpt-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,
    /// Record catalog (JSON array). Overrides `[catalog] path`.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// History and watchlist store. Overrides `[storage] data_file`.
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/dpt-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("dpt debug log started, tail -f /tmp/dpt-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config: falling back to defaults");
        Config::defaults()
    });

    let records = match cli.catalog.or_else(|| config.catalog.path.clone()) {
        Some(path) => JsonCatalog::new(path).load()?,
        None => SampleCatalog.load()?,
    };

    let store = FileStore::new(cli.data.unwrap_or_else(|| config.storage.data_file()));
    tracing::debug!(store = %store.path().display(), records = records.len(), "dpt: starting");

    let session = SearchSession::new(records, SearchHistory::load(store.clone()))
        .with_scorer(scorer_from_config(&config.search));
    let watchlists = Watchlists::load(store);

    let mut state = AppState {
        config,
        session,
        watchlists,
    };
    commands::execute_command(&mut state, cli.command)
}
