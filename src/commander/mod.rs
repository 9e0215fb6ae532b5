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

//! Command-line input logic and state management.
//!
//! This module implements the `:` command line, handling a text input
//! component and dispatching the corresponding application event when a
//! command is submitted.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tracing::debug;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::actions::events::AppEvent;

const VOLUME_DELTA: i32 = 5;

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Handles a key event, returning whether the command line consumed it.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;
                if !buffer.is_empty() {
                    self.run_command(&buffer, event_tx)?;
                }
            }

            _ => {
                // Delegate all other keys to the managed input component.
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }

    fn run_command(&self, buffer: &str, event_tx: &Sender<AppEvent>) -> Result<()> {
        debug!(command = buffer, "Running command");

        let parts: Vec<&str> = buffer.split_whitespace().collect();

        match parts.as_slice() {
            ["q"] => event_tx.send(AppEvent::ExitApplication)?,

            ["add", url] => event_tx.send(AppEvent::AddMusic {
                name: name_from_url(url),
                url: url.to_string(),
            })?,
            ["add", url, name_parts @ ..] => event_tx.send(AppEvent::AddMusic {
                name: name_parts.join(" "),
                url: url.to_string(),
            })?,

            ["stop"] => event_tx.send(AppEvent::StopAll)?,

            ["v+"] => event_tx.send(AppEvent::AdjustVolume(VOLUME_DELTA))?,
            ["v-"] => event_tx.send(AppEvent::AdjustVolume(-VOLUME_DELTA))?,
            ["m"] => event_tx.send(AppEvent::ToggleMute)?,

            [] => {}

            [cmd, ..] => event_tx.send(AppEvent::Error(format!("Unknown command: {}", cmd)))?,
        }

        Ok(())
    }
}

/// Display name for a track added without one: the file name without its
/// extension, or the whole URL if it has no usable path.
fn name_from_url(url: &str) -> String {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let rest = rest.split(['?', '#']).next().unwrap_or(rest);

    let Some((_, path)) = rest.split_once('/') else {
        return url.to_string();
    };

    let file = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    let stem = file.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file);

    if stem.is_empty() { url.to_string() } else { stem.to_string() }
}
