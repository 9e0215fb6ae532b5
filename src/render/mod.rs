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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called on every
//! terminal tick or state change to provide a reactive user interface.

mod commander;
pub(crate) mod icons;
mod player;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use crate::{
    App,
    render::{commander::draw_commander, player::draw_player},
    theme::Theme,
};

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the music list, the player bar and the footer
/// line. The delete confirmation, when showing, is drawn last so it sits on
/// top of everything else.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let [main, player, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3), Constraint::Length(1)]).areas(area);

    app.music_list_view.draw(f, main, &app.service, &app.theme);

    draw_player(f, player, app);

    draw_commander(f, footer, app);

    app.music_list_view.draw_dialog(f, area, &app.theme);
}
