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

//! Audio playback control and state management.
//!
//! This module provides the high-level [`AudioPlayer`] interface used by the
//! music service to control playback. It manages a background worker thread
//! that interfaces with the underlying audio library (MPV), so that opening
//! remote audio files never blocks the UI thread.

mod commands;

use std::sync::mpsc;

use thiserror::Error;

use crate::{actions::events::AppEvent, player::commands::AudioPlayerCommand, service::PlaybackBackend};

/// Represents the current playback status of the audio engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

#[derive(Debug, Error)]
pub(crate) enum PlayerError {
    #[error("audio worker has stopped")]
    WorkerStopped,
}

impl<T> From<mpsc::SendError<T>> for PlayerError {
    fn from(_: mpsc::SendError<T>) -> Self {
        PlayerError::WorkerStopped
    }
}

/// A handle to the audio playback engine.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread.
/// Clones share the same worker.
#[derive(Clone)]
pub(crate) struct AudioPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<AudioPlayerCommand>,
}

impl AudioPlayer {
    /// Spawns the audio worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (like state
    ///   changes or errors) back to the main event loop.
    /// * `volume` - The initial output volume, 0 to 100.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>, volume: u32) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx, volume);

        Self { command_tx }
    }

    /// A handle whose worker is already gone; every command fails.
    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        let (command_tx, _) = mpsc::channel::<AudioPlayerCommand>();
        Self { command_tx }
    }

    // Maps internal audio backend flags to a simplified [`PlayerState`].
    fn player_state(is_paused: bool, is_idle: bool) -> PlayerState {
        if is_idle {
            PlayerState::Stopped
        } else if is_paused {
            PlayerState::Paused
        } else {
            PlayerState::Playing
        }
    }

    /// Adjusts the playback volume relative to the current level.
    ///
    /// # Arguments
    ///
    /// * `delta` - The amount to change the volume (positive or negative).
    pub(crate) fn adjust_volume(&self, delta: i32) -> Result<(), PlayerError> {
        self.command_tx.send(AudioPlayerCommand::AdjustVolume(delta))?;
        Ok(())
    }

    /// Toggles the audio output between muted and unmuted.
    pub(crate) fn toggle_mute(&self) -> Result<(), PlayerError> {
        self.command_tx.send(AudioPlayerCommand::ToggleMute)?;
        Ok(())
    }
}

impl PlaybackBackend for AudioPlayer {
    /// Instructs the worker to open and play an audio URL, replacing whatever
    /// is currently playing.
    fn play_url(&self, music_id: i32, url: &str) -> Result<(), PlayerError> {
        self.command_tx.send(AudioPlayerCommand::PlayUrl {
            music_id,
            url: url.to_string(),
        })?;
        Ok(())
    }

    fn stop(&self) -> Result<(), PlayerError> {
        self.command_tx.send(AudioPlayerCommand::Stop)?;
        Ok(())
    }
}
