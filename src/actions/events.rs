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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging user input (keyboard, command line), background worker updates
//! (audio player) and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through a
//!    channel.
//! 2. **Process**: The [`process_events`] function updates the [`App`] state,
//!    calls into the music service and tells the music list which rows
//!    changed.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::{debug, error, info, warn};

use crate::{App, StatusMessage, components::ListChange, player::PlayerState, render::draw};

const VOLUME_DELTA: i32 = 5;

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    AddMusic { name: String, url: String },
    StopAll,

    AdjustVolume(i32),
    ToggleMute,

    PlayerStateChanged(PlayerState),
    VolumeChanged(u32),
    TrackFinished(i32),

    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed. A fatal error event ends the loop with an error.
pub(crate) fn process_events(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(message) => {
                error!(%message, "Fatal error");
                return Err(anyhow!(message));
            }
            event => process_event(app, event)?,
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    if let Err(e) = app.service.stop_all() {
        warn!(error = %e, "Failed to stop playback on exit");
    }

    Ok(())
}

fn process_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,

        AppEvent::AddMusic { name, url } => {
            let music = app.service.add_music(&name, &url);
            let position = app.service.music_list().len() - 1;
            app.music_list_view.notify(ListChange::ItemInserted(position));
            app.status = Some(StatusMessage::info(format!("Added {}", music.name)));
        }

        AppEvent::StopAll => match app.service.stop_all() {
            Ok(changed) => notify_changed(app, changed),
            Err(e) => report_error(app, "Failed to stop music", &e),
        },

        AppEvent::AdjustVolume(delta) => {
            if let Err(e) = app.audio_player.adjust_volume(delta) {
                report_error(app, "Failed to change volume", &e);
            }
        }
        AppEvent::ToggleMute => {
            if let Err(e) = app.audio_player.toggle_mute() {
                report_error(app, "Failed to toggle mute", &e);
            }
        }

        AppEvent::TrackFinished(music_id) => match app.service.on_track_finished(music_id) {
            Ok(changed) => notify_changed(app, changed),
            Err(e) => report_error(app, "Failed to restart music", &e),
        },

        AppEvent::PlayerStateChanged(state) => {
            debug!(?state, "Player state changed");
            app.player_state = state;
        }
        AppEvent::VolumeChanged(volume) => app.volume = Some(volume),

        AppEvent::Error(message) => {
            warn!(%message, "Error reported");
            app.status = Some(StatusMessage::error(message));
        }

        AppEvent::Tick => {}

        AppEvent::ExitApplication | AppEvent::FatalError(_) => {}
    }

    Ok(())
}

/// Routes a key to the command line, then the music list, then the global
/// key bindings, stopping at the first that consumes it.
///
/// While the delete confirmation is showing, only the music list sees keys.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);

    let dialog_showing = app.music_list_view.adapter.is_dialog_showing();

    if !dialog_showing && app.commander.handle_event(&event, &app.event_tx)? {
        return Ok(());
    }

    match app.music_list_view.process_event(&event, &mut app.service) {
        Ok(true) => return Ok(()),
        Ok(false) => {}
        Err(e) => {
            report_error(app, "Music operation failed", &e);
            return Ok(());
        }
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => {
            info!("Exit requested");
            app.event_tx.send(AppEvent::ExitApplication)?;
        }
        KeyCode::Char('s') => app.event_tx.send(AppEvent::StopAll)?,
        KeyCode::Char('-') => app.event_tx.send(AppEvent::AdjustVolume(-VOLUME_DELTA))?,
        KeyCode::Char('=') | KeyCode::Char('+') => app.event_tx.send(AppEvent::AdjustVolume(VOLUME_DELTA))?,
        KeyCode::Char('m') => app.event_tx.send(AppEvent::ToggleMute)?,
        _ => {}
    }

    Ok(())
}

fn notify_changed(app: &mut App, changed: Vec<usize>) {
    for index in changed {
        app.music_list_view.notify(ListChange::ItemChanged(index));
    }
}

fn report_error(app: &mut App, context: &str, error: &dyn std::error::Error) {
    warn!(error = %error, "{}", context);
    app.status = Some(StatusMessage::error(format!("{}: {}", context, error)));
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::{config::AppConfig, player::AudioPlayer, service::testing::RecordingBackend};

    fn app() -> App {
        App::with_backend(
            &AppConfig::default(),
            AudioPlayer::detached(),
            Box::new(RecordingBackend::default()),
        )
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for &code in codes {
            process_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        }
    }

    fn pending_events(app: &App) -> Vec<AppEvent> {
        app.event_rx.try_iter().collect()
    }

    #[test]
    fn command_line_is_closed_while_dialog_shows() {
        let mut app = app();

        press(&mut app, &[KeyCode::Char('d')]);
        assert!(app.music_list_view.adapter.is_dialog_showing());

        press(&mut app, &[KeyCode::Char(':'), KeyCode::Char('q'), KeyCode::Enter]);

        assert!(!app.commander.active());
        assert!(pending_events(&app).is_empty());
        assert_eq!(app.service.music_list().len(), 3);
    }

    #[test]
    fn global_keys_are_ignored_while_dialog_shows() {
        let mut app = app();

        press(&mut app, &[KeyCode::Char('d'), KeyCode::Char('q'), KeyCode::Char('s'), KeyCode::Char('m')]);

        assert!(app.music_list_view.adapter.is_dialog_showing());
        assert!(pending_events(&app).is_empty());
    }

    #[test]
    fn command_line_works_once_dialog_is_answered() {
        let mut app = app();

        press(&mut app, &[KeyCode::Char('d'), KeyCode::Esc]);
        press(&mut app, &[KeyCode::Char(':'), KeyCode::Char('q'), KeyCode::Enter]);

        assert!(matches!(pending_events(&app).as_slice(), [AppEvent::ExitApplication]));
    }

    #[test]
    fn stale_finish_leaves_the_new_track_playing() {
        let mut app = app();

        press(&mut app, &[KeyCode::Enter]);
        press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        let first_id = app.service.music_list()[0].id;

        process_event(&mut app, AppEvent::TrackFinished(first_id)).unwrap();

        assert_eq!(app.service.state().playing_position(), Some(1));
    }
}
