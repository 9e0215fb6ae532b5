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

//! MPV-backed audio playback engine and event processing.
//!
//! This module provides the core audio playback logic, leveraging `libmpv` to
//! open and decode remote audio files. It manages a background worker thread
//! that bridges the gap between the application's command-based interface and
//! the low-level MPV property observation system.
//!
//! # Architecture
//!
//! The engine operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`AudioPlayerCommand`]s from the service
//!    to control playback (play, stop, volume).
//! 2. **Event Channel**: Broadcasts [`AppEvent`]s to notify the UI of state
//!    changes, volume updates and finished tracks.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    collections::VecDeque,
    sync::mpsc::{self, Receiver, Sender},
    thread,
};
use tracing::{debug, error, info};

use crate::{
    actions::events::AppEvent,
    player::{AudioPlayer, PlayerState},
};

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    PlayUrl { music_id: i32, url: String },
    Stop,
    AdjustVolume(i32),
    ToggleMute,
}

/// Spawns the audio worker thread to process playback commands.
///
/// If the internal worker returns an error, it is caught here and broadcast as
/// a fatal application event.
pub(crate) fn spawn_player_worker(command_rx: Receiver<AudioPlayerCommand>, event_tx: Sender<AppEvent>, volume: u32) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx, volume) {
            error!("MPV worker failure: {:?}", e);
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// The primary execution loop for the audio player backend.
///
/// This function initializes a local `libmpv` context and alternates between
/// draining incoming commands and waiting for MPV events.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize or if the internal
/// command/event loops encounter an unrecoverable failure.
fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
    volume: u32,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder.set_option("vo", "null").context("Failed to set no video output")?;
        builder
            .set_option("volume", i64::from(volume.min(100)))
            .context("Failed to set initial volume")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<bool>("idle-active", 0)
        .context("Failed to observe idle-active")?;
    handler
        .observe_property::<f64>("volume", 0)
        .context("Failed to observe volume")?;

    info!(volume, "Audio worker started");

    let mut is_paused = false;
    let mut is_idle = true;

    let mut player_state = PlayerState::Stopped;
    let mut tracks = LoadedTracks::default();

    loop {
        if !process_commands(&mut handler, &command_rx, &mut tracks)? {
            debug!("Audio command channel closed, stopping worker");
            return Ok(());
        }
        process_mpv_events(
            &mut handler,
            &mut is_paused,
            &mut is_idle,
            &mut player_state,
            &mut tracks,
            &event_tx,
        )?;
    }
}

/// Which music id each MPV file belongs to.
///
/// MPV reports `StartFile` once per `loadfile`, in order, so ids queue up
/// until their file starts. An end of file always refers to the file that
/// started last, even when a newer `loadfile` is already queued.
#[derive(Debug, Default)]
struct LoadedTracks {
    pending: VecDeque<i32>,
    current: Option<i32>,
}

impl LoadedTracks {
    fn on_load(&mut self, music_id: i32) {
        self.pending.push_back(music_id);
    }

    fn on_stop(&mut self) {
        self.pending.clear();
    }

    fn on_start(&mut self) {
        self.current = self.pending.pop_front();
    }

    fn on_end_of_file(&mut self) -> Option<i32> {
        self.current.take()
    }
}

/// Drains and executes all pending commands from the application channel.
///
/// Returns `false` once every command sender has gone away.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &Receiver<AudioPlayerCommand>,
    tracks: &mut LoadedTracks,
) -> Result<bool> {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(mpsc::TryRecvError::Empty) => return Ok(true),
            Err(mpsc::TryRecvError::Disconnected) => return Ok(false),
        };

        debug!(?command, "Audio command");

        match command {
            AudioPlayerCommand::PlayUrl { music_id, url } => {
                handler
                    .command(&["loadfile", &url, "replace"])
                    .context(format!("Failed to load url: {}", &url))?;
                handler.set_property("pause", false)?;
                tracks.on_load(music_id);
            }
            AudioPlayerCommand::Stop => {
                handler.command(&["stop"])?;
                tracks.on_stop();
            }
            AudioPlayerCommand::AdjustVolume(delta) => {
                handler.command(&["add", "volume", &delta.to_string()])?;
            }
            AudioPlayerCommand::ToggleMute => {
                handler.command(&["cycle", "mute"])?;
            }
        }
    }
}

/// Polls for MPV events and synchronizes the application state.
///
/// This function waits for up to 50ms for an event from the MPV context.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    is_paused: &mut bool,
    is_idle: &mut bool,
    current_state: &mut PlayerState,
    tracks: &mut LoadedTracks,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        let app_event = match mpv_event {
            mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                ("pause", Format::Flag(pause)) => {
                    *is_paused = pause;
                    None
                }
                ("idle-active", Format::Flag(idle_active)) => {
                    *is_idle = idle_active;
                    None
                }
                ("volume", Format::Double(volume)) => Some(AppEvent::VolumeChanged(volume.round() as u32)),
                _ => None,
            },
            mpv::Event::StartFile => {
                tracks.on_start();
                None
            }
            mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF)) => {
                tracks.on_end_of_file().map(AppEvent::TrackFinished)
            }
            _ => None,
        };

        let new_player_state = AudioPlayer::player_state(*is_paused, *is_idle);

        if new_player_state != *current_state {
            *current_state = new_player_state;
            event_tx
                .send(AppEvent::PlayerStateChanged(new_player_state))
                .context("Failed to send player state event")?;
        }

        if let Some(event) = app_event {
            event_tx.send(event).context("Failed to send event")?;
        }
    }

    Ok(())
}
