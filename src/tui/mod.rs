// TUI module - terminal gallery
//
// Hosts the media carousel in the terminal:
// - Terminal initialization and cleanup
// - Mouse and focus reporting, so drags become swipe gestures
// - Running the carousel driver until the user quits

pub mod components;
pub mod gallery;
pub mod layout;
pub mod theme;
pub mod ui;

use crate::carousel::{drive, Carousel};
use crate::config::GalleryConfig;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gallery::TerminalHost;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::time::Instant;

/// Run the gallery until the user quits
///
/// Local assets are checked once here; anything missing stays hidden for the
/// whole session.
pub async fn run_gallery(config: &GalleryConfig, log_buffer: Option<LogBuffer>) -> Result<()> {
    let playlist = config.playlist();
    let assets = playlist.probe_assets(&config.asset_root);
    tracing::info!(
        items = playlist.len(),
        missing = assets.missing_count(),
        "Gallery loaded"
    );

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )
    .context("Failed to setup terminal")?;
    let terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;

    let mut host = TerminalHost::new(terminal, assets, log_buffer, config.cell_width_px);
    let carousel = Carousel::mount(playlist, config.carousel_config(), Instant::now());
    if carousel.is_empty() {
        tracing::warn!("Gallery has no media items; configure [gallery] items or photos");
    }

    let result = drive(carousel, &mut host).await;

    // Restore terminal
    let terminal = host.terminal_mut();
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}
