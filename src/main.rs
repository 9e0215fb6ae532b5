// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Background Music Panel TUI.
//!
//! A terminal panel for picking the background music of a live session: a
//! short list of tracks, each with a start/stop control and a delete control.
//!
//! This application coordinates a TUI frontend built with `ratatui`, a music
//! service that owns the track list, and an MPV audio worker.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, the music service and
//!   UI rendering.
//! * The **Audio Worker** opens and plays track URLs off the main thread.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of an error. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod actions;
mod commander;
mod components;
mod config;
mod i18n;
mod logging;
mod model;
mod player;
mod render;
mod service;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::{info, warn};

use crate::{
    actions::events::{AppEvent, process_events},
    commander::Commander,
    components::MusicListView,
    config::AppConfig,
    i18n::Strings,
    player::{AudioPlayer, PlayerState},
    service::{MusicService, PlaybackBackend},
    theme::Theme,
};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// A one-line message shown in the footer until the next one replaces it.
pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) is_error: bool,
}

impl StatusMessage {
    pub(crate) fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Application state.
pub(crate) struct App {
    pub(crate) theme: Theme,

    pub(crate) event_tx: Sender<AppEvent>,
    pub(crate) event_rx: Receiver<AppEvent>,

    pub(crate) audio_player: AudioPlayer,
    pub(crate) service: MusicService,

    pub(crate) music_list_view: MusicListView,
    pub(crate) commander: Commander,

    pub(crate) player_state: PlayerState,
    pub(crate) volume: Option<u32>,
    pub(crate) status: Option<StatusMessage>,
}

impl App {
    /// Create a new instance of application state.
    ///
    /// The music list is seeded here, the first time the list view is built.
    pub(crate) fn new(config: &AppConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let audio_player = AudioPlayer::new(event_tx.clone(), config.volume);
        let backend = Box::new(audio_player.clone());

        Self::from_parts(config, event_tx, event_rx, audio_player, backend)
    }

    /// Application state around a playback backend other than the MPV worker.
    #[cfg(test)]
    pub(crate) fn with_backend(
        config: &AppConfig,
        audio_player: AudioPlayer,
        backend: Box<dyn PlaybackBackend>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self::from_parts(config, event_tx, event_rx, audio_player, backend)
    }

    fn from_parts(
        config: &AppConfig,
        event_tx: Sender<AppEvent>,
        event_rx: Receiver<AppEvent>,
        audio_player: AudioPlayer,
        backend: Box<dyn PlaybackBackend>,
    ) -> Self {
        let mut service = MusicService::new(backend, config.loop_playback);
        let music_list_view = MusicListView::new(&mut service, Strings::new(config.locale));

        Self {
            theme: Theme::default(),
            event_tx,
            event_rx,
            audio_player,
            service,
            music_list_view,
            commander: Commander::new(),
            player_state: PlayerState::Stopped,
            volume: Some(config.volume),
            status: None,
        }
    }
}

/// The entry point of the application.
///
/// Loads the configuration, starts logging, initializes the application
/// state, manages the terminal lifecycle, and returns an error if any part of
/// the execution fails.
fn main() -> Result<()> {
    let (config, config_error) = config::load_config();

    let _log_guard = logging::init_logging(&config::log_dir(&config)).context("Failed to initialise logging")?;

    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }
    info!(version = env!("CARGO_PKG_VERSION"), locale = ?config.locale, "Starting music panel");

    let mut app = App::new(&config);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    info!("Music panel stopped");

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads and enters the main event loop.
///
/// * An input thread polls for terminal key presses.
/// * A tick thread triggers periodic UI refreshes.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key presses to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx_keys.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    let _ = tx_keys.send(AppEvent::FatalError(format!("Failed to read terminal input: {}", e)));
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    // Draw once before the first event arrives
    terminal.draw(|f| render::draw(f, app))?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
