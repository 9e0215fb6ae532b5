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

//! Binds the service's music list to rows of the music panel.
//!
//! The adapter never owns the list. Every operation receives the
//! [`MusicService`] it reads from, requests mutations through it, and then
//! tells a [`ListObserver`] exactly which rows need to be redrawn.

use crossterm::event::Event;
use tracing::debug;

use crate::{
    components::{ConfirmDialog, DialogAction, ListChange, ListObserver},
    i18n::{StringId, Strings},
    model::MusicInfo,
    service::{MusicService, ServiceError},
};

/// Tracks added to an empty list the first time the panel is shown.
const SEED_MUSIC: [(i32, StringId, &str); 3] = [
    (
        1,
        StringId::MusicCheerful,
        "https://dldir1.qq.com/hudongzhibo/TUIKit/resource/music/PositiveHappyAdvertising.mp3",
    ),
    (
        2,
        StringId::MusicMelancholy,
        "https://dldir1.qq.com/hudongzhibo/TUIKit/resource/music/SadCinematicPiano.mp3",
    ),
    (
        3,
        StringId::MusicWonderWorld,
        "https://dldir1.qq.com/hudongzhibo/TUIKit/resource/music/WonderWorld.mp3",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayIcon {
    Play,
    Pause,
}

/// What a single row shows: the name label and the start/stop icon. The
/// delete icon is the same on every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowBinding {
    pub(crate) name: String,
    pub(crate) icon: PlayIcon,
}

pub(crate) struct MusicListAdapter {
    strings: Strings,
    dialog: ConfirmDialog,
    pending_delete: Option<MusicInfo>,
}

impl MusicListAdapter {
    pub(crate) fn new(service: &mut MusicService, strings: Strings) -> Self {
        Self::init_data(service, &strings);

        Self {
            strings,
            dialog: ConfirmDialog::new(),
            pending_delete: None,
        }
    }

    fn init_data(service: &mut MusicService, strings: &Strings) {
        if !service.music_list().is_empty() {
            return;
        }

        for (id, name, url) in SEED_MUSIC {
            service.append_music(MusicInfo::new(id, strings.get(name), url));
        }
        debug!(count = SEED_MUSIC.len(), "Seeded empty music list");
    }

    pub(crate) fn strings(&self) -> &Strings {
        &self.strings
    }

    pub(crate) fn item_count(&self, service: &MusicService) -> usize {
        service.music_list().len()
    }

    pub(crate) fn bind_row(&self, service: &MusicService, position: usize) -> Option<RowBinding> {
        let music = service.music_list().get(position)?;
        let icon = if music.is_playing { PlayIcon::Pause } else { PlayIcon::Play };

        Some(RowBinding {
            name: music.name.clone(),
            icon,
        })
    }

    /// Row index of the playing track whose row must be reset when another
    /// track starts.
    pub(crate) fn selected_position(&self, service: &MusicService) -> Option<usize> {
        service.state().playing_position()
    }

    /// Asks for confirmation before deleting the track at `position`.
    pub(crate) fn on_delete_tap(&mut self, service: &MusicService, position: usize) {
        let Some(music) = service.music_list().get(position) else {
            return;
        };

        self.dialog.set_title(self.strings.get(StringId::MusicTipsTitle));
        self.dialog.set_content(self.strings.delete_tips(&music.name));
        self.dialog.set_negative_text(self.strings.get(StringId::MusicCancel));
        self.dialog.set_positive_text(self.strings.get(StringId::MusicConfirm));
        self.pending_delete = Some(music.clone());
        self.dialog.show();
    }

    /// Starts or stops the track at `position`, then refreshes its row and
    /// the row that was playing before.
    pub(crate) fn on_start_stop_tap(
        &mut self,
        service: &mut MusicService,
        position: usize,
        observer: &mut dyn ListObserver,
    ) -> Result<(), ServiceError> {
        let Some(music) = service.music_list().get(position).cloned() else {
            return Ok(());
        };

        let previous = self.selected_position(service);

        service.operate_play_music(&music)?;

        observer.on_list_change(ListChange::ItemChanged(position));
        if let Some(previous) = previous.filter(|&p| p != position) {
            observer.on_list_change(ListChange::ItemChanged(previous));
        }

        Ok(())
    }

    pub(crate) fn is_dialog_showing(&self) -> bool {
        self.dialog.is_showing()
    }

    pub(crate) fn dialog_mut(&mut self) -> &mut ConfirmDialog {
        &mut self.dialog
    }

    /// Routes a key to the confirmation dialog and carries out its answer.
    pub(crate) fn process_dialog_event(
        &mut self,
        event: &Event,
        service: &mut MusicService,
        observer: &mut dyn ListObserver,
    ) -> Result<(), ServiceError> {
        match self.dialog.process_event(event) {
            Some(DialogAction::Negative) => {
                self.pending_delete = None;
                self.dialog.dismiss();
                Ok(())
            }
            Some(DialogAction::Positive) => {
                self.dialog.dismiss();
                match self.pending_delete.take() {
                    Some(music) => self.confirm_delete(&music, service, observer),
                    None => Ok(()),
                }
            }
            None => Ok(()),
        }
    }

    fn confirm_delete(
        &mut self,
        music: &MusicInfo,
        service: &mut MusicService,
        observer: &mut dyn ListObserver,
    ) -> Result<(), ServiceError> {
        let Some(index) = service.state().position_of(music.id) else {
            debug!(id = music.id, "Track left the list before delete was confirmed");
            return Ok(());
        };

        service.delete_music(music)?;
        observer.on_list_change(ListChange::ItemRemoved(index));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::{
        i18n::Locale,
        service::testing::{BackendCall, RecordingBackend},
    };

    #[derive(Default)]
    struct RecordingObserver {
        changes: Vec<ListChange>,
    }

    impl ListObserver for RecordingObserver {
        fn on_list_change(&mut self, change: ListChange) {
            self.changes.push(change);
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn seeded() -> (MusicService, MusicListAdapter, RecordingBackend) {
        let backend = RecordingBackend::default();
        let mut service = MusicService::new(Box::new(backend.clone()), false);
        let adapter = MusicListAdapter::new(&mut service, Strings::new(Locale::En));
        (service, adapter, backend)
    }

    #[test]
    fn empty_list_is_seeded_with_three_tracks() {
        let (service, _adapter, _backend) = seeded();

        let ids: Vec<i32> = service.music_list().iter().map(|m| m.id).collect();
        let names: Vec<&str> = service.music_list().iter().map(|m| m.name.as_str()).collect();

        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(names, vec!["Cheerful", "Melancholy", "Wonder World"]);
        assert!(service.music_list()[2].url.ends_with("/WonderWorld.mp3"));
        assert!(service.music_list().iter().all(|m| !m.is_playing));
    }

    #[test]
    fn seed_names_follow_locale() {
        let mut service = MusicService::new(Box::new(RecordingBackend::default()), false);
        MusicListAdapter::new(&mut service, Strings::new(Locale::Zh));
        assert_eq!(service.music_list()[0].name, "欢快");
    }

    #[test]
    fn non_empty_list_is_left_alone() {
        let mut service = MusicService::new(Box::new(RecordingBackend::default()), false);
        service.add_music("Mine", "https://example.com/mine.mp3");

        let adapter = MusicListAdapter::new(&mut service, Strings::new(Locale::En));

        assert_eq!(adapter.item_count(&service), 1);
        assert_eq!(service.music_list()[0].name, "Mine");
    }

    #[test]
    fn second_adapter_does_not_seed_again() {
        let (mut service, _adapter, _backend) = seeded();
        let again = MusicListAdapter::new(&mut service, Strings::new(Locale::En));
        assert_eq!(again.item_count(&service), 3);
    }

    #[test]
    fn row_count_tracks_list_length() {
        let (mut service, adapter, _backend) = seeded();
        service.add_music("Four", "https://example.com/4.mp3");
        assert_eq!(adapter.item_count(&service), 4);
    }

    #[test]
    fn bound_icon_reflects_playing_flag() {
        let (mut service, mut adapter, _backend) = seeded();
        let mut observer = RecordingObserver::default();

        adapter.on_start_stop_tap(&mut service, 1, &mut observer).unwrap();

        assert_eq!(adapter.bind_row(&service, 0).unwrap().icon, PlayIcon::Play);
        assert_eq!(
            adapter.bind_row(&service, 1),
            Some(RowBinding {
                name: "Melancholy".into(),
                icon: PlayIcon::Pause
            })
        );
        assert_eq!(adapter.bind_row(&service, 3), None);
    }

    #[test]
    fn play_tap_refreshes_only_the_tapped_row_when_nothing_played() {
        let (mut service, mut adapter, backend) = seeded();
        let mut observer = RecordingObserver::default();

        adapter.on_start_stop_tap(&mut service, 2, &mut observer).unwrap();

        assert_eq!(observer.changes, vec![ListChange::ItemChanged(2)]);
        assert_eq!(backend.calls().len(), 1);
    }

    #[test]
    fn play_tap_refreshes_tapped_and_previous_rows() {
        let (mut service, mut adapter, backend) = seeded();
        let mut observer = RecordingObserver::default();

        adapter.on_start_stop_tap(&mut service, 0, &mut observer).unwrap();
        observer.changes.clear();
        adapter.on_start_stop_tap(&mut service, 2, &mut observer).unwrap();

        assert_eq!(
            observer.changes,
            vec![ListChange::ItemChanged(2), ListChange::ItemChanged(0)]
        );
        assert_eq!(adapter.selected_position(&service), Some(2));
        assert_eq!(backend.calls().len(), 2);
    }

    #[test]
    fn stop_tap_on_playing_row_refreshes_once() {
        let (mut service, mut adapter, backend) = seeded();
        let mut observer = RecordingObserver::default();

        adapter.on_start_stop_tap(&mut service, 1, &mut observer).unwrap();
        observer.changes.clear();
        adapter.on_start_stop_tap(&mut service, 1, &mut observer).unwrap();

        assert_eq!(observer.changes, vec![ListChange::ItemChanged(1)]);
        assert_eq!(backend.calls().last(), Some(&BackendCall::Stop));
        assert_eq!(adapter.selected_position(&service), None);
    }

    #[test]
    fn play_tap_on_missing_row_does_nothing() {
        let (mut service, mut adapter, backend) = seeded();
        let mut observer = RecordingObserver::default();

        adapter.on_start_stop_tap(&mut service, 9, &mut observer).unwrap();

        assert!(observer.changes.is_empty());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn delete_tap_fills_in_the_dialog() {
        let (service, mut adapter, _backend) = seeded();

        adapter.on_delete_tap(&service, 1);

        assert!(adapter.is_dialog_showing());
        assert_eq!(adapter.dialog_mut().content(), "Delete \"Melancholy\" from the music list?");
    }

    #[test]
    fn confirmed_delete_removes_exactly_one_row() {
        let (mut service, mut adapter, _backend) = seeded();
        let mut observer = RecordingObserver::default();

        adapter.on_delete_tap(&service, 1);
        adapter
            .process_dialog_event(&key(KeyCode::Char('y')), &mut service, &mut observer)
            .unwrap();

        let ids: Vec<i32> = service.music_list().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(observer.changes, vec![ListChange::ItemRemoved(1)]);
        assert!(!adapter.is_dialog_showing());
    }

    #[test]
    fn cancelled_delete_keeps_the_row() {
        let (mut service, mut adapter, _backend) = seeded();
        let mut observer = RecordingObserver::default();

        adapter.on_delete_tap(&service, 0);
        adapter
            .process_dialog_event(&key(KeyCode::Esc), &mut service, &mut observer)
            .unwrap();

        assert_eq!(adapter.item_count(&service), 3);
        assert!(observer.changes.is_empty());
        assert!(!adapter.is_dialog_showing());
    }

    #[test]
    fn confirm_after_row_vanished_does_nothing() {
        let (mut service, mut adapter, _backend) = seeded();
        let mut observer = RecordingObserver::default();

        adapter.on_delete_tap(&service, 0);
        let first = service.music_list()[0].clone();
        service.delete_music(&first).unwrap();

        adapter
            .process_dialog_event(&key(KeyCode::Char('y')), &mut service, &mut observer)
            .unwrap();

        assert_eq!(adapter.item_count(&service), 2);
        assert!(observer.changes.is_empty());
        assert!(!adapter.is_dialog_showing());
    }

    #[test]
    fn last_playing_row_wins_when_several_are_marked() {
        let backend = RecordingBackend::default();
        let mut service = MusicService::new(Box::new(backend), false);
        let mut first = MusicInfo::new(1, "One", "https://example.com/1.mp3");
        first.is_playing = true;
        let mut second = MusicInfo::new(2, "Two", "https://example.com/2.mp3");
        second.is_playing = true;
        service.append_music(first);
        service.append_music(second);
        service.append_music(MusicInfo::new(3, "Three", "https://example.com/3.mp3"));

        let mut adapter = MusicListAdapter::new(&mut service, Strings::new(Locale::En));
        let mut observer = RecordingObserver::default();

        assert_eq!(adapter.selected_position(&service), Some(1));

        adapter.on_start_stop_tap(&mut service, 2, &mut observer).unwrap();
        assert_eq!(
            observer.changes,
            vec![ListChange::ItemChanged(2), ListChange::ItemChanged(1)]
        );
    }
}
