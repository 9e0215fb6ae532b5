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

//! Music panel list view.
//!
//! This module pairs the [`MusicListAdapter`] with the view state that shows
//! its rows. Rendered rows are cached as [`RowBinding`]s and only the rows the
//! adapter reports through [`ListObserver`] are bound again, so a play/pause
//! tap redraws at most the tapped row and the one that was playing.

mod adapter;
mod event;
mod render;

use std::collections::BTreeSet;

use ratatui::widgets::TableState;
use tracing::trace;

pub(crate) use adapter::{MusicListAdapter, PlayIcon, RowBinding};

use crate::{i18n::Strings, service::MusicService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListChange {
    ItemChanged(usize),
    ItemInserted(usize),
    ItemRemoved(usize),
}

/// Receives row-level change notifications from the adapter.
pub(crate) trait ListObserver {
    fn on_list_change(&mut self, change: ListChange);
}

/// Cached row bindings plus cursor state for the list view.
#[derive(Debug, Default)]
pub(crate) struct RowCache {
    bound: Vec<RowBinding>,
    stale: BTreeSet<usize>,
    table_state: TableState,
}

impl ListObserver for RowCache {
    fn on_list_change(&mut self, change: ListChange) {
        trace!(?change, "List change");

        match change {
            ListChange::ItemChanged(index) => {
                self.stale.insert(index);
            }

            ListChange::ItemInserted(index) => {
                if index <= self.bound.len() {
                    self.bound.insert(index, RowBinding { name: String::new(), icon: PlayIcon::Play });
                }
                self.stale = self.stale.iter().map(|&i| if i >= index { i + 1 } else { i }).collect();
                self.stale.insert(index);
                if let Some(selected) = self.table_state.selected() {
                    if selected >= index {
                        self.table_state.select(Some(selected + 1));
                    }
                }
            }

            ListChange::ItemRemoved(index) => {
                if index < self.bound.len() {
                    self.bound.remove(index);
                }
                self.stale = self
                    .stale
                    .iter()
                    .filter(|&&i| i != index)
                    .map(|&i| if i > index { i - 1 } else { i })
                    .collect();
                if let Some(selected) = self.table_state.selected() {
                    if selected > index {
                        self.table_state.select(Some(selected - 1));
                    }
                }
            }
        }
    }
}

impl RowCache {
    /// Brings the cached rows up to date with the service's list.
    ///
    /// Rows are bound in full on first use or whenever the cached row count
    /// no longer matches, otherwise only stale rows are bound again.
    pub(crate) fn sync(&mut self, adapter: &MusicListAdapter, service: &MusicService) {
        let count = adapter.item_count(service);

        if self.bound.len() != count {
            self.bound = (0..count).filter_map(|i| adapter.bind_row(service, i)).collect();
        } else {
            for index in std::mem::take(&mut self.stale) {
                if let Some(binding) = adapter.bind_row(service, index) {
                    self.bound[index] = binding;
                }
            }
        }
        self.stale.clear();

        match self.table_state.selected() {
            _ if count == 0 => self.table_state.select(None),
            Some(selected) if selected >= count => self.table_state.select(Some(count - 1)),
            None => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    #[cfg(test)]
    pub(crate) fn rows(&self) -> &[RowBinding] {
        &self.bound
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    fn goto_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }
}

pub(crate) struct MusicListView {
    pub(crate) adapter: MusicListAdapter,
    pub(crate) rows: RowCache,
}

impl MusicListView {
    pub(crate) fn new(service: &mut MusicService, strings: Strings) -> Self {
        let adapter = MusicListAdapter::new(service, strings);
        let mut rows = RowCache::default();
        rows.sync(&adapter, service);

        Self { adapter, rows }
    }

    /// Records changes made to the list outside of the adapter, such as a
    /// finished track or a track added from the command line.
    pub(crate) fn notify(&mut self, change: ListChange) {
        self.rows.on_list_change(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{i18n::Locale, service::testing::RecordingBackend};

    fn view() -> (MusicService, MusicListView) {
        let mut service = MusicService::new(Box::new(RecordingBackend::default()), false);
        let view = MusicListView::new(&mut service, Strings::new(Locale::En));
        (service, view)
    }

    fn icons(rows: &RowCache) -> Vec<PlayIcon> {
        rows.rows().iter().map(|r| r.icon).collect()
    }

    #[test]
    fn new_view_binds_every_row_and_selects_the_first() {
        let (_service, view) = view();
        assert_eq!(view.rows.rows().len(), 3);
        assert_eq!(view.rows.selected(), Some(0));
    }

    #[test]
    fn partial_refresh_updates_tapped_and_previous_rows() {
        let (mut service, mut view) = view();

        view.adapter.on_start_stop_tap(&mut service, 0, &mut view.rows).unwrap();
        view.rows.sync(&view.adapter, &service);
        assert_eq!(icons(&view.rows), vec![PlayIcon::Pause, PlayIcon::Play, PlayIcon::Play]);

        view.adapter.on_start_stop_tap(&mut service, 2, &mut view.rows).unwrap();
        view.rows.sync(&view.adapter, &service);
        assert_eq!(icons(&view.rows), vec![PlayIcon::Play, PlayIcon::Play, PlayIcon::Pause]);
    }

    #[test]
    fn unreported_changes_are_not_rebound() {
        let (mut service, mut view) = view();
        let second = service.music_list()[1].clone();

        service.operate_play_music(&second).unwrap();
        view.rows.sync(&view.adapter, &service);
        assert_eq!(icons(&view.rows), vec![PlayIcon::Play; 3]);

        view.notify(ListChange::ItemChanged(1));
        view.rows.sync(&view.adapter, &service);
        assert_eq!(icons(&view.rows)[1], PlayIcon::Pause);
    }

    #[test]
    fn removal_shifts_rows_and_cursor() {
        let (mut service, mut view) = view();
        view.rows.goto_last(3);

        let first = service.music_list()[0].clone();
        service.delete_music(&first).unwrap();
        view.notify(ListChange::ItemRemoved(0));
        view.rows.sync(&view.adapter, &service);

        let names: Vec<&str> = view.rows.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Melancholy", "Wonder World"]);
        assert_eq!(view.rows.selected(), Some(1));
    }

    #[test]
    fn insertion_binds_the_new_row() {
        let (mut service, mut view) = view();

        service.add_music("Four", "https://example.com/4.mp3");
        view.notify(ListChange::ItemInserted(3));
        view.rows.sync(&view.adapter, &service);

        assert_eq!(view.rows.rows()[3].name, "Four");
    }

    #[test]
    fn insertion_above_the_cursor_keeps_it_on_its_row() {
        let (_service, mut view) = view();
        view.rows.goto_next(3);

        view.notify(ListChange::ItemInserted(0));
        assert_eq!(view.rows.selected(), Some(2));
        assert_eq!(view.rows.rows()[2].name, "Melancholy");

        view.notify(ListChange::ItemInserted(4));
        assert_eq!(view.rows.selected(), Some(2));
    }

    #[test]
    fn cursor_is_clamped_when_the_list_empties() {
        let (mut service, mut view) = view();

        for _ in 0..3 {
            let music = service.music_list()[0].clone();
            service.delete_music(&music).unwrap();
            view.notify(ListChange::ItemRemoved(0));
        }
        view.rows.sync(&view.adapter, &service);

        assert!(view.rows.rows().is_empty());
        assert_eq!(view.rows.selected(), None);
    }

    #[test]
    fn cursor_wraps_around() {
        let (_service, mut view) = view();
        view.rows.goto_previous(3);
        assert_eq!(view.rows.selected(), Some(2));
        view.rows.goto_next(3);
        assert_eq!(view.rows.selected(), Some(0));
    }
}
