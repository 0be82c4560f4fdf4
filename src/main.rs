// invite - event site server with a terminal media gallery
//
// Architecture:
// - Site server (axum): RSVP and guestbook endpoints over a tabular datastore
// - Datastore: Airtable REST backend, or in-memory tables for offline runs
// - Carousel: the media gallery state machine (autoplay, swipe, cross-fade)
// - TUI (ratatui): hosts the carousel in the terminal
//
// The server runs as a background task; the gallery owns the main task and
// quitting it shuts the server down.

mod carousel;
mod cli;
mod config;
mod datastore;
mod logging;
mod site;
mod startup;
mod tui;

use anyhow::Result;
use cli::RunMode;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing
///
/// With a gallery on screen, events go to the in-memory buffer (stdout would
/// garble the alternate screen); otherwise to stdout. JSON file output is
/// added when enabled. The returned guard must live until exit so the file
/// writer flushes.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_logging(config: &Config, capture: Option<LogBuffer>) -> Option<WorkerGuard> {
    let default_filter = format!("invite={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_writer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (Some(writer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let stdout_layer = capture.is_none().then(|| tracing_subscriber::fmt::layer());
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(capture.map(TuiLogLayer::new))
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle one-shot commands first (config --show, --reset, --path)
    let mode = cli::handle_cli();
    if mode == RunMode::Done {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();

    let server = mode == RunMode::Site;
    let gallery = mode == RunMode::GalleryOnly || config.enable_tui;

    let log_buffer = LogBuffer::new();
    let _file_guard = init_logging(&config, gallery.then(|| log_buffer.clone()));

    startup::print_startup(&config, server);
    startup::log_startup(&config, server);

    if !server {
        return tui::run_gallery(&config.gallery, Some(log_buffer)).await;
    }

    // Oneshot: quitting the gallery (or Ctrl+C) stops the server
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let site_config = config.clone();
    let site_handle = tokio::spawn(async move {
        if let Err(e) = site::start_site(site_config, shutdown_rx).await {
            tracing::error!("Site server failed: {:?}", e);
        }
    });

    if gallery {
        tracing::info!("Starting gallery");
        if let Err(e) = tui::run_gallery(&config.gallery, Some(log_buffer)).await {
            tracing::error!("Gallery error: {:?}", e);
        }
    } else {
        tracing::info!("Gallery disabled, running in headless mode");
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Shutting down...");

    // If the send fails, the server already stopped
    let _ = shutdown_tx.send(());
    let _ = site_handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
