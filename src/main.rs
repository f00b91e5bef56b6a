// FIREnet Explorer - linked galaxy charts in the terminal
//
// Loads the FIREnet SED table and the uncertainty-validation table, builds
// three linked views (SED, Predicted vs True, uncertainty scatter) and lets
// the user pick a galaxy in any of them to highlight it everywhere.
//
// Architecture:
// - Data: CSV tables from disk or HTTP, parsed into typed datasets
// - Analysis: fit metrics, KDE density, sliding-window RMS
// - Charts: in-memory figures that views restyle on selection
// - Selection: one coordinator fans each selection out to every view
// - TUI (ratatui): draws the figures and turns clicks into selections
// - Storage: writes every selection to a JSON Lines session log

mod analysis;
mod charts;
mod cli;
mod config;
mod data;
mod events;
mod explorer;
mod logging;
mod palette;
mod selection;
mod startup;
mod storage;
mod tui;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation};
use events::SelectionEvent;
use explorer::{Datasets, Explorer};
use logging::{LogBuffer, TuiLogLayer};
use selection::EntityKey;
use std::path::PathBuf;
use storage::Storage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Generate a unique session ID for log file naming
/// Format: YYYYMMDD-HHMMSS-XXXX (timestamp + 4 random hex chars)
fn generate_session_id() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let timestamp = Utc::now().format("%Y%m%d-%H%M%S");
    let random = RandomState::new().build_hasher().finish();
    let short_hash = format!("{:04x}", random & 0xFFFF);

    format!("{}-{}", timestamp, short_hash)
}

/// Initialize tracing
///
/// In TUI mode logs go to the in-memory buffer (printing would garble the
/// display); headless they go to stderr so stdout stays clean for `list`
/// and `select`. File logging adds a rotating JSON writer on top.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("firenet_explorer={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = config
        .enable_tui
        .then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer = (!config.enable_tui)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let mut guard = None;
    let file_layer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let logging = &config.logging;
                let file_appender = match logging.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
                    }
                };

                // Writes happen on a background thread; the guard flushes on drop
                let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
                guard = Some(file_guard);
                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Open the session log and subscribe it to the coordinator.
///
/// Returns the log file and the writer task. The task ends once the
/// explorer (which holds the sender through its subscription) is dropped.
fn start_session_log(
    config: &Config,
    explorer: &mut Explorer,
    initial: Option<&EntityKey>,
) -> Option<(PathBuf, JoinHandle<Result<()>>)> {
    let session_id = generate_session_id();
    let (tx, rx) = mpsc::channel(storage::CHANNEL_CAPACITY);

    let storage = match Storage::new(&config.session_log_dir, &session_id, rx) {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!("Session log disabled: {:?}", e);
            return None;
        }
    };

    let started = SelectionEvent::SessionStarted {
        timestamp: Utc::now(),
        session_id,
        version: config::VERSION.to_string(),
        sed_source: config.data.sed_source.clone(),
        uncertainty_source: config.data.uncertainty_source.clone(),
        initial_galaxy: initial.map(|k| k.to_string()),
    };
    if let Err(e) = tx.try_send(started) {
        tracing::warn!("Could not record session start: {}", e);
    }

    storage::attach(explorer.coordinator_mut(), tx);
    let path = storage.log_path().to_path_buf();
    Some((path, tokio::spawn(storage.run())))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management never loads data or starts logging
    if let Some(Commands::Config { show, reset, path }) = cli.command {
        cli::handle_config(show, reset, path);
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    cli.apply_overrides(&mut config);
    if cli.command.is_some() {
        config.enable_tui = false;
    }

    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config, &log_buffer);

    match &cli.command {
        Some(Commands::List) => return cli::run_list(&config).await,
        Some(Commands::Select { name, json }) => {
            return cli::run_select(&config, name, *json).await
        }
        _ => {}
    }

    let datasets = Datasets::load(&config.data).await?;

    let initial = Some(config.data.default_galaxy.trim())
        .filter(|name| !name.is_empty())
        .map(EntityKey::from);

    let mut explorer = Explorer::new(
        &datasets,
        &config.style.view_style(),
        &config.data.properties,
        initial.clone(),
    );

    let (session_log, storage_handle) = if config.features.selection_log {
        start_session_log(&config, &mut explorer, initial.as_ref()).unzip()
    } else {
        (None, None)
    };

    startup::print_startup(
        &config,
        &datasets.status,
        initial.as_ref().map(|k| k.as_str()),
        session_log.as_deref(),
    );
    startup::log_startup(&datasets.status, initial.as_ref().map(|k| k.as_str()));

    // Datasets are shared with the views from here on
    drop(datasets);

    if config.enable_tui {
        tracing::info!("Starting TUI");
        match tui::run_tui(explorer, log_buffer, &config).await {
            Ok(explorer) => drop(explorer),
            Err(e) => tracing::error!("TUI error: {:?}", e),
        }
    } else {
        tracing::info!("TUI disabled, running in headless mode");
        // In headless mode, just wait for Ctrl+C
        tokio::signal::ctrl_c().await?;
        drop(explorer);
    }

    tracing::info!("Shutting down...");

    // The explorer is gone, so the session log sender is closed
    if let Some(handle) = storage_handle {
        match handle.await {
            Ok(Err(e)) => tracing::error!("Session log error: {:?}", e),
            Err(e) => tracing::error!("Session log task failed: {}", e),
            Ok(Ok(())) => {}
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
