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

//! Domain models and core data structures.
//!
//! This module defines the music track record shown in the panel and the list
//! state that holds those records, in display order.

/// A single background music track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MusicInfo {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) is_playing: bool,
}

impl MusicInfo {
    pub(crate) fn new(id: i32, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            is_playing: false,
        }
    }
}

/// The ordered list of tracks shown in the music panel.
///
/// Only the music service mutates this state, everything else reads it.
#[derive(Debug, Default)]
pub(crate) struct MusicPanelState {
    pub(crate) music_list: Vec<MusicInfo>,
}

impl MusicPanelState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Current index of the track with the given id, if it is still listed.
    pub(crate) fn position_of(&self, music_id: i32) -> Option<usize> {
        self.music_list.iter().position(|m| m.id == music_id)
    }

    /// Index of the last playing track in list order.
    pub(crate) fn playing_position(&self) -> Option<usize> {
        self.music_list.iter().rposition(|m| m.is_playing)
    }

    /// One past the highest id in the list. Once that would overflow, the
    /// lowest positive id not in use.
    pub(crate) fn next_id(&self) -> i32 {
        let highest = self.music_list.iter().map(|m| m.id).max().unwrap_or(0);
        highest
            .checked_add(1)
            .unwrap_or_else(|| (1..i32::MAX).find(|&id| self.position_of(id).is_none()).unwrap_or(i32::MAX))
    }
}
