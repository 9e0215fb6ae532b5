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

//! Input handling for the music list view.
//!
//! This module maps terminal keyboard events to cursor movement and to taps on
//! the controls of the row under the cursor. While the delete confirmation is
//! showing every key belongs to the dialog.

use crossterm::event::{Event, KeyCode};

use crate::{components::MusicListView, service::{MusicService, ServiceError}};

impl MusicListView {
    /// Handles a key event, returning whether the view consumed it.
    pub(crate) fn process_event(&mut self, event: &Event, service: &mut MusicService) -> Result<bool, ServiceError> {
        if self.adapter.is_dialog_showing() {
            self.adapter.process_dialog_event(event, service, &mut self.rows)?;
            return Ok(true);
        }

        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        let len = self.adapter.item_count(service);

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.rows.goto_next(len),
            KeyCode::Char('k') | KeyCode::Up => self.rows.goto_previous(len),
            KeyCode::Char('g') | KeyCode::Home => self.rows.goto_first(len),
            KeyCode::Char('G') | KeyCode::End => self.rows.goto_last(len),

            // Start/stop icon
            KeyCode::Enter | KeyCode::Char('p') => {
                if let Some(selected) = self.rows.selected() {
                    self.adapter.on_start_stop_tap(service, selected, &mut self.rows)?;
                }
            }

            // Delete icon
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(selected) = self.rows.selected() {
                    self.adapter.on_delete_tap(service, selected);
                }
            }

            _ => return Ok(false),
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use crate::{
        components::PlayIcon,
        i18n::{Locale, Strings},
        service::testing::{BackendCall, RecordingBackend},
    };

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn view() -> (MusicService, MusicListView, RecordingBackend) {
        let backend = RecordingBackend::default();
        let mut service = MusicService::new(Box::new(backend.clone()), false);
        let view = MusicListView::new(&mut service, Strings::new(Locale::En));
        (service, view, backend)
    }

    fn press(view: &mut MusicListView, service: &mut MusicService, codes: &[KeyCode]) {
        for &code in codes {
            view.process_event(&key(code), service).unwrap();
        }
    }

    #[test]
    fn enter_plays_the_row_under_the_cursor() {
        let (mut service, mut view, backend) = view();

        press(&mut view, &mut service, &[KeyCode::Down, KeyCode::Enter]);
        view.rows.sync(&view.adapter, &service);

        assert_eq!(
            backend.calls(),
            vec![BackendCall::Play(
                "https://dldir1.qq.com/hudongzhibo/TUIKit/resource/music/SadCinematicPiano.mp3".into()
            )]
        );
        assert_eq!(view.rows.rows()[1].icon, PlayIcon::Pause);
    }

    #[test]
    fn delete_needs_confirmation() {
        let (mut service, mut view, _backend) = view();

        press(&mut view, &mut service, &[KeyCode::Char('G'), KeyCode::Char('d')]);
        assert!(view.adapter.is_dialog_showing());
        assert_eq!(service.music_list().len(), 3);

        press(&mut view, &mut service, &[KeyCode::Right, KeyCode::Enter]);
        view.rows.sync(&view.adapter, &service);

        assert!(!view.adapter.is_dialog_showing());
        let names: Vec<&str> = view.rows.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cheerful", "Melancholy"]);
        assert_eq!(view.rows.selected(), Some(1));
    }

    #[test]
    fn open_dialog_swallows_other_keys() {
        let (mut service, mut view, backend) = view();

        press(&mut view, &mut service, &[KeyCode::Char('d')]);

        assert!(view.process_event(&key(KeyCode::Char('q')), &mut service).unwrap());
        assert!(view.process_event(&key(KeyCode::Char('p')), &mut service).unwrap());
        assert!(backend.calls().is_empty());
        assert!(view.adapter.is_dialog_showing());
    }

    #[test]
    fn unrelated_keys_are_not_consumed() {
        let (mut service, mut view, _backend) = view();
        assert!(!view.process_event(&key(KeyCode::Char('q')), &mut service).unwrap());
    }
}
