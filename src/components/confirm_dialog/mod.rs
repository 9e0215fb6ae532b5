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

//! Yes/no confirmation dialog.
//!
//! A modal popup with a title, a content line and two buttons. Instead of
//! click callbacks the dialog reports which button was activated as a
//! [`DialogAction`] from its event processing, and the owner decides what
//! to do with it.

mod event;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DialogAction {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum DialogButton {
    #[default]
    Negative,
    Positive,
}

#[derive(Debug, Default)]
pub(crate) struct ConfirmDialog {
    title: String,
    content: String,
    negative_text: String,
    positive_text: String,
    focused: DialogButton,
    visible: bool,
}

impl ConfirmDialog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub(crate) fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub(crate) fn set_negative_text(&mut self, text: impl Into<String>) {
        self.negative_text = text.into();
    }

    pub(crate) fn set_positive_text(&mut self, text: impl Into<String>) {
        self.positive_text = text.into();
    }

    /// Makes the dialog visible with focus on the negative button.
    pub(crate) fn show(&mut self) {
        self.focused = DialogButton::Negative;
        self.visible = true;
    }

    pub(crate) fn dismiss(&mut self) {
        self.visible = false;
    }

    pub(crate) fn is_showing(&self) -> bool {
        self.visible
    }

    pub(crate) fn content(&self) -> &str {
        &self.content
    }

    fn toggle_focus(&mut self) {
        self.focused = match self.focused {
            DialogButton::Negative => DialogButton::Positive,
            DialogButton::Positive => DialogButton::Negative,
        };
    }
}
