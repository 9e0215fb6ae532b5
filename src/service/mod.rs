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

//! Background music service.
//!
//! The [`MusicService`] owns the music list and is the only place where
//! records are removed or their playing flag changes. Views read the list
//! through [`MusicService::music_list`] and request changes through the
//! service, then redraw what changed.
//!
//! Audio output goes through a single [`PlaybackBackend`] stream, so starting
//! a track stops whichever track was playing before.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    model::{MusicInfo, MusicPanelState},
    player::PlayerError,
};

#[derive(Debug, Error)]
pub(crate) enum ServiceError {
    #[error("music {0} is not in the list")]
    NotFound(i32),

    #[error("playback failed: {0}")]
    Playback(#[from] PlayerError),
}

/// The audio output driven by the service.
pub(crate) trait PlaybackBackend {
    /// Plays `url`, tagging the stream with `music_id` so that its end of
    /// file can be traced back to the track.
    fn play_url(&self, music_id: i32, url: &str) -> Result<(), PlayerError>;
    fn stop(&self) -> Result<(), PlayerError>;
}

pub(crate) struct MusicService {
    state: MusicPanelState,
    backend: Box<dyn PlaybackBackend>,
    loop_playback: bool,
}

impl MusicService {
    pub(crate) fn new(backend: Box<dyn PlaybackBackend>, loop_playback: bool) -> Self {
        Self {
            state: MusicPanelState::new(),
            backend,
            loop_playback,
        }
    }

    pub(crate) fn state(&self) -> &MusicPanelState {
        &self.state
    }

    pub(crate) fn music_list(&self) -> &[MusicInfo] {
        &self.state.music_list
    }

    /// Appends a record exactly as given, keeping its id.
    pub(crate) fn append_music(&mut self, music: MusicInfo) {
        debug!(id = music.id, name = %music.name, "Appending music");
        self.state.music_list.push(music);
    }

    /// Appends a new track with the next free id.
    pub(crate) fn add_music(&mut self, name: &str, url: &str) -> MusicInfo {
        let music = MusicInfo::new(self.state.next_id(), name, url);
        info!(id = music.id, name = %music.name, url = %music.url, "Adding music");
        self.state.music_list.push(music.clone());
        music
    }

    /// Removes a track from the list, stopping it first if it is playing.
    pub(crate) fn delete_music(&mut self, music: &MusicInfo) -> Result<(), ServiceError> {
        let position = self
            .state
            .position_of(music.id)
            .ok_or(ServiceError::NotFound(music.id))?;

        if self.state.music_list[position].is_playing {
            self.backend.stop()?;
        }

        let removed = self.state.music_list.remove(position);
        info!(id = removed.id, name = %removed.name, position, "Deleted music");
        Ok(())
    }

    /// Starts the track if it is stopped, stops it if it is playing.
    pub(crate) fn operate_play_music(&mut self, music: &MusicInfo) -> Result<(), ServiceError> {
        let position = self
            .state
            .position_of(music.id)
            .ok_or(ServiceError::NotFound(music.id))?;

        if self.state.music_list[position].is_playing {
            self.backend.stop()?;
            self.state.music_list[position].is_playing = false;
            info!(id = music.id, "Stopped music");
        } else {
            let url = self.state.music_list[position].url.clone();
            self.backend.play_url(music.id, &url)?;
            for (i, m) in self.state.music_list.iter_mut().enumerate() {
                m.is_playing = i == position;
            }
            info!(id = music.id, url = %url, "Started music");
        }

        Ok(())
    }

    /// Handles the audio backend reaching the end of track `music_id`.
    ///
    /// A finish for a track that was deleted, stopped or replaced since is
    /// stale and ignored. Returns the positions of the rows whose state
    /// changed.
    pub(crate) fn on_track_finished(&mut self, music_id: i32) -> Result<Vec<usize>, ServiceError> {
        let position = match self.state.position_of(music_id) {
            Some(position) if self.state.music_list[position].is_playing => position,
            _ => {
                debug!(id = music_id, "Ignoring finish of a track that is no longer playing");
                return Ok(vec![]);
            }
        };

        if self.loop_playback {
            let url = self.state.music_list[position].url.clone();
            debug!(id = music_id, position, "Looping music");
            self.backend.play_url(music_id, &url)?;
            return Ok(vec![]);
        }

        self.state.music_list[position].is_playing = false;
        info!(id = music_id, "Music finished");
        Ok(vec![position])
    }

    /// Stops playback and clears every playing flag.
    pub(crate) fn stop_all(&mut self) -> Result<Vec<usize>, ServiceError> {
        if self.state.playing_position().is_none() {
            return Ok(vec![]);
        }

        self.backend.stop()?;
        Ok(self.clear_playing())
    }

    fn clear_playing(&mut self) -> Vec<usize> {
        let mut changed = vec![];
        for (i, m) in self.state.music_list.iter_mut().enumerate() {
            if m.is_playing {
                m.is_playing = false;
                changed.push(i);
            }
        }
        if changed.len() > 1 {
            warn!(count = changed.len(), "More than one track was marked as playing");
        }
        changed
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{cell::RefCell, rc::Rc};

    use super::PlaybackBackend;
    use crate::player::PlayerError;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum BackendCall {
        Play(String),
        Stop,
    }

    /// A backend that records every call instead of producing sound.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingBackend {
        pub(crate) calls: Rc<RefCell<Vec<BackendCall>>>,
        pub(crate) fail: Rc<RefCell<bool>>,
    }

    impl RecordingBackend {
        pub(crate) fn calls(&self) -> Vec<BackendCall> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: BackendCall) -> Result<(), PlayerError> {
            if *self.fail.borrow() {
                return Err(PlayerError::WorkerStopped);
            }
            self.calls.borrow_mut().push(call);
            Ok(())
        }
    }

    impl PlaybackBackend for RecordingBackend {
        fn play_url(&self, _music_id: i32, url: &str) -> Result<(), PlayerError> {
            self.record(BackendCall::Play(url.to_string()))
        }

        fn stop(&self) -> Result<(), PlayerError> {
            self.record(BackendCall::Stop)
        }
    }
}
