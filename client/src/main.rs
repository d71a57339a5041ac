//! Palaver - terminal Matrix chat client.
//!
//! # Commands
//!
//! - `palaver run`: start the client
//! - `palaver logout`: clear the stored session without starting the TUI
//!
//! # Environment Variables
//!
//! See the [`palaver::config`] module for available configuration options.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use palaver::client::OfflineAuthenticator;
use palaver::config::Config;
use palaver::settings::SettingsStore;
use palaver::tui::{install_panic_hook, ui, EventHandler, MainWindow, Tui, TuiEvent};

/// Event channel capacity between the pump and the main loop.
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Palaver - terminal Matrix chat client.
#[derive(Parser, Debug)]
#[command(name = "palaver")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    PALAVER_CONFIG_DIR     Directory holding settings.json (default: platform config dir)
    PALAVER_WINDOW_WIDTH   Default window width in columns (default: 120)
    PALAVER_WINDOW_HEIGHT  Default window height in rows (default: 40)
    PALAVER_TICK_RATE_MS   Event loop tick interval (default: 60)
    PALAVER_LOG            Log filter when RUST_LOG is unset

EXAMPLES:
    # Start the client
    palaver run

    # Drop the stored session
    palaver logout
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the client.
    Run,

    /// Clear the stored session credentials.
    ///
    /// The next start will come up on the welcome page.
    Logout,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Logout => run_logout(),
        Command::Run => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to create tokio runtime")?;
            runtime.block_on(run_client())
        }
    }
}

/// Clears the stored session from the settings file.
fn run_logout() -> Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    let mut settings =
        SettingsStore::open(&config.settings_path).context("failed to open settings")?;

    if !settings.has_active_session() {
        println!("No stored session at {}", config.settings_path.display());
        return Ok(());
    }

    settings.clear_session();
    settings.save().context("failed to save settings")?;
    println!("Stored session cleared.");
    Ok(())
}

/// Runs the TUI until the user quits.
async fn run_client() -> Result<()> {
    palaver::logging::init();
    info!("starting palaver");

    let config = Config::from_env().context("failed to load configuration")?;
    let settings =
        SettingsStore::open(&config.settings_path).context("failed to open settings")?;
    info!(settings = %config.settings_path.display(), "configuration loaded");

    let mut window = MainWindow::new(&config, settings, Box::new(OfflineAuthenticator::new()));

    install_panic_hook();
    let mut tui = Tui::new().context("failed to initialize terminal")?;
    if let Ok((width, height)) = tui.size() {
        window.set_terminal_size(width, height);
    }

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(EVENT_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handler = EventHandler::new(
        event_tx,
        shutdown_rx,
        Duration::from_millis(config.tick_rate_ms),
    );
    let pump = tokio::spawn(handler.run());

    tui.draw(|frame| ui::render(frame, &window))
        .context("failed to render")?;

    while let Some(event) = event_rx.recv().await {
        window.handle_event(event, Instant::now());
        if window.should_quit() {
            break;
        }
        tui.draw(|frame| ui::render(frame, &window))
            .context("failed to render")?;
    }

    // Normal shutdown: persist the window geometry, then restore the
    // terminal before reporting any error.
    if let Err(err) = window.persist_geometry() {
        warn!(%err, "failed to persist window geometry");
    }

    let _ = shutdown_tx.send(());
    if let Err(err) = pump.await {
        warn!(%err, "event pump did not shut down cleanly");
    }

    tui.restore().context("failed to restore terminal")?;
    info!("palaver stopped");
    Ok(())
}
