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

//! Render the music player status bar.
//!
//! This module renders the playback state, the playing track and the volume
//! gauge underneath the music list.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::PlayerState,
    render::icons::{ICON_PAUSE, ICON_PLAY, ICON_STOP, ICON_VOLUME},
};

const MAX_VOLUME: f64 = 130.0;

/// Renders the player bar with the now playing track and the volume.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let [track_area, volume_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(26)]).areas(inner_area);

    let icon = match app.player_state {
        PlayerState::Playing => ICON_PLAY,
        PlayerState::Paused => ICON_PAUSE,
        PlayerState::Stopped => ICON_STOP,
    };

    let mut spans = vec![Span::styled(format!(" {} ", icon), Style::default().add_modifier(Modifier::BOLD)).fg(Color::White)];

    let playing = app.service.state().playing_position().and_then(|i| app.service.music_list().get(i));
    if let Some(music) = playing {
        spans.push(Span::styled(music.name.as_str(), Style::default().add_modifier(Modifier::BOLD)).fg(app.theme.accent_colour));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), track_area);

    let [icon_area, gauge_area, label_area] = Layout::horizontal([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(5),
    ])
    .areas(volume_area);

    let volume = app.volume.unwrap_or(0);
    let vol_ratio = (volume as f64 / MAX_VOLUME).clamp(0.0, 1.0);

    f.render_widget(Paragraph::new(ICON_VOLUME), icon_area);

    let volume_gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.accent_colour).bg(app.theme.gauge_track_colour))
        .ratio(vol_ratio)
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, gauge_area);

    let volume_label = Paragraph::new(format!(" {}%", volume))
        .alignment(Alignment::Right)
        .fg(Color::White);
    f.render_widget(volume_label, label_area);
}
