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

//! UI rendering logic for the confirmation dialog.
//!
//! The dialog is drawn as a centered popup over whatever is underneath,
//! clearing its own area first.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::{
    components::{ConfirmDialog, confirm_dialog::DialogButton},
    render::Render,
    theme::Theme,
};

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 8;

impl Render for ConfirmDialog {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let popup = centered(area, DIALOG_WIDTH, DIALOG_HEIGHT);

        let block = Block::default()
            .title(Line::from(self.title.as_str()).bold())
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent_colour))
            .style(Style::default().bg(theme.background_colour))
            .padding(Padding::horizontal(1));

        let inner = block.inner(popup);

        let [content_area, buttons_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        let content = Paragraph::new(self.content())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        let buttons = Line::from(vec![
            self.button(&self.negative_text, DialogButton::Negative, theme),
            Span::raw("    "),
            self.button(&self.positive_text, DialogButton::Positive, theme),
        ])
        .alignment(Alignment::Center);

        f.render_widget(Clear, popup);
        f.render_widget(block, popup);
        f.render_widget(content, content_area);
        f.render_widget(Paragraph::new(buttons), buttons_area);
    }
}

impl ConfirmDialog {
    fn button(&self, text: &str, button: DialogButton, theme: &Theme) -> Span<'static> {
        let label = format!("[ {} ]", text);
        if self.focused == button {
            Span::styled(label, Style::default().fg(Color::Black).bg(theme.accent_colour))
        } else {
            Span::raw(label)
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(row);
    popup
}
