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

//! UI rendering logic for the music list view.
//!
//! Each row shows the start/stop icon, the track name and the delete icon.
//! Rows come from the view's binding cache, which is brought up to date with
//! the service just before drawing.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::{
    components::{MusicListView, PlayIcon},
    i18n::StringId,
    render::{
        Render,
        icons::{ICON_DELETE, ICON_PAUSE, ICON_PLAY},
    },
    service::MusicService,
    theme::Theme,
};

impl MusicListView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, service: &MusicService, theme: &Theme) {
        self.rows.sync(&self.adapter, service);

        let [header_area, table_area] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let header_text = format!(
            "{} | {} tracks",
            self.adapter.strings().get(StringId::MusicPanelTitle),
            self.rows.bound.len()
        );

        f.render_widget(Paragraph::new(header_text).block(header_block), header_area);

        let rows = self.rows.bound.iter().map(|binding| {
            let (icon, name_style) = match binding.icon {
                PlayIcon::Pause => (ICON_PAUSE, Style::default().fg(theme.accent_colour).bold()),
                PlayIcon::Play => (ICON_PLAY, Style::default().fg(theme.table_track_fg)),
            };

            Row::new(vec![
                Cell::from(Line::from(icon).style(Style::default().fg(theme.accent_colour)).alignment(Alignment::Center)),
                Cell::from(Line::from(binding.name.as_str()).style(name_style)),
                Cell::from(Line::from(ICON_DELETE).style(Style::default().fg(theme.table_delete_fg)).alignment(Alignment::Center)),
            ])
        });

        let table = Table::new(rows, [Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .block(Block::default().padding(Padding::horizontal(1)));

        f.render_stateful_widget(table, table_area, &mut self.rows.table_state);
    }

    /// Draws the delete confirmation on top of everything else, if showing.
    pub(crate) fn draw_dialog(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        self.adapter.dialog_mut().draw(f, area, theme);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::{
        i18n::{Locale, Strings},
        service::testing::RecordingBackend,
    };

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal.backend().buffer().content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn rows_show_names_and_play_state() {
        let mut service = MusicService::new(Box::new(RecordingBackend::default()), false);
        let mut view = MusicListView::new(&mut service, Strings::new(Locale::En));
        view.adapter.on_start_stop_tap(&mut service, 1, &mut view.rows).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                view.draw(f, area, &service, &Theme::default());
            })
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Background Music | 3 tracks"));
        assert!(text.contains("Cheerful"));
        assert!(text.contains("Wonder World"));
        assert!(text.contains(ICON_PAUSE));
        assert!(text.contains(ICON_DELETE));
    }

    #[test]
    fn dialog_is_drawn_over_the_list() {
        let mut service = MusicService::new(Box::new(RecordingBackend::default()), false);
        let mut view = MusicListView::new(&mut service, Strings::new(Locale::En));
        view.adapter.on_delete_tap(&service, 0);

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                view.draw(f, area, &service, &Theme::default());
                view.draw_dialog(f, area, &Theme::default());
            })
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Tips"));
        assert!(text.contains("[ Cancel ]"));
        assert!(text.contains("[ Confirm ]"));
    }
}
