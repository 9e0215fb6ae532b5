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

//! Render the command-line interface.
//!
//! This module renders the visual representation of the command line, the
//! current text and the cursor. When the command line is idle the footer
//! shows the latest status message or the key hints instead.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

const KEY_HINTS: &str = "enter play/stop  d delete  s stop  -/+ volume  m mute  : command  q quit";

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;

    let [container] = Layout::horizontal([Constraint::Min(1)]).horizontal_margin(1).areas(area);

    let style = Style::default().fg(app.theme.commander_colour).bg(app.theme.gauge_track_colour);

    if commander.active() {
        let line = Line::from(vec![Span::raw(":"), Span::raw(commander.input.value())]);
        f.render_widget(Paragraph::new(line).style(style), container);

        let cursor_x = container.x + 1 + commander.input.cursor() as u16;
        f.set_cursor_position((cursor_x, container.y));
        return;
    }

    let footer = match &app.status {
        Some(status) if status.is_error => {
            Paragraph::new(status.text.as_str()).style(style.fg(app.theme.error_colour))
        }
        Some(status) => Paragraph::new(status.text.as_str()).style(style),
        None => Paragraph::new(KEY_HINTS).style(style.fg(app.theme.border_colour)),
    };

    f.render_widget(footer, container);
}
