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

//! Localized resource strings.
//!
//! All user-facing text in the music panel is looked up here by
//! [`StringId`], so the seed track names and dialog texts follow the
//! configured locale.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Locale {
    #[default]
    En,
    Zh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringId {
    MusicCheerful,
    MusicMelancholy,
    MusicWonderWorld,
    MusicTipsTitle,
    MusicDeleteTips,
    MusicCancel,
    MusicConfirm,
    MusicPanelTitle,
}

const NAME_PLACEHOLDER: &str = "{name}";

#[derive(Debug, Clone, Copy)]
pub(crate) struct Strings {
    locale: Locale,
}

impl Strings {
    pub(crate) fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub(crate) fn get(&self, id: StringId) -> &'static str {
        match self.locale {
            Locale::En => english(id),
            Locale::Zh => chinese(id),
        }
    }

    /// The delete confirmation prompt for the named track.
    pub(crate) fn delete_tips(&self, name: &str) -> String {
        self.get(StringId::MusicDeleteTips).replace(NAME_PLACEHOLDER, name)
    }
}

fn english(id: StringId) -> &'static str {
    match id {
        StringId::MusicCheerful => "Cheerful",
        StringId::MusicMelancholy => "Melancholy",
        StringId::MusicWonderWorld => "Wonder World",
        StringId::MusicTipsTitle => "Tips",
        StringId::MusicDeleteTips => "Delete \"{name}\" from the music list?",
        StringId::MusicCancel => "Cancel",
        StringId::MusicConfirm => "Confirm",
        StringId::MusicPanelTitle => "Background Music",
    }
}

fn chinese(id: StringId) -> &'static str {
    match id {
        StringId::MusicCheerful => "欢快",
        StringId::MusicMelancholy => "忧郁",
        StringId::MusicWonderWorld => "奇妙世界",
        StringId::MusicTipsTitle => "提示",
        StringId::MusicDeleteTips => "确定删除「{name}」吗？",
        StringId::MusicCancel => "取消",
        StringId::MusicConfirm => "确定",
        StringId::MusicPanelTitle => "背景音乐",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_tips_embeds_track_name() {
        let strings = Strings::new(Locale::En);
        assert_eq!(strings.delete_tips("Wonder World"), "Delete \"Wonder World\" from the music list?");
    }

    #[test]
    fn lookup_follows_locale() {
        assert_eq!(Strings::new(Locale::En).get(StringId::MusicConfirm), "Confirm");
        assert_eq!(Strings::new(Locale::Zh).get(StringId::MusicConfirm), "确定");
    }
}
