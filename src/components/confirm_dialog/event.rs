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

//! Keyboard handling for the confirmation dialog.

use crossterm::event::{Event, KeyCode};

use crate::components::{ConfirmDialog, DialogAction, confirm_dialog::DialogButton};

impl ConfirmDialog {
    /// Handles a key while the dialog is showing.
    ///
    /// Returns the activated button, if any. The dialog stays visible, it is
    /// up to the owner to dismiss it.
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<DialogAction> {
        if !self.visible {
            return None;
        }

        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.toggle_focus();
                None
            }

            KeyCode::Enter => Some(match self.focused {
                DialogButton::Negative => DialogAction::Negative,
                DialogButton::Positive => DialogAction::Positive,
            }),

            KeyCode::Char('y') => Some(DialogAction::Positive),
            KeyCode::Char('n') | KeyCode::Esc => Some(DialogAction::Negative),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn shown_dialog() -> ConfirmDialog {
        let mut dialog = ConfirmDialog::new();
        dialog.set_title("Tips");
        dialog.set_content("Delete?");
        dialog.set_negative_text("Cancel");
        dialog.set_positive_text("Confirm");
        dialog.show();
        dialog
    }

    #[test]
    fn hidden_dialog_ignores_keys() {
        let mut dialog = ConfirmDialog::new();
        assert_eq!(dialog.process_event(&key(KeyCode::Char('y'))), None);
    }

    #[test]
    fn enter_defaults_to_negative() {
        let mut dialog = shown_dialog();
        assert_eq!(dialog.process_event(&key(KeyCode::Enter)), Some(DialogAction::Negative));
    }

    #[test]
    fn moving_focus_then_enter_confirms() {
        let mut dialog = shown_dialog();
        assert_eq!(dialog.process_event(&key(KeyCode::Right)), None);
        assert_eq!(dialog.process_event(&key(KeyCode::Enter)), Some(DialogAction::Positive));
    }

    #[test]
    fn shortcut_keys_answer_directly() {
        let mut dialog = shown_dialog();
        assert_eq!(dialog.process_event(&key(KeyCode::Char('y'))), Some(DialogAction::Positive));
        assert_eq!(dialog.process_event(&key(KeyCode::Esc)), Some(DialogAction::Negative));
        assert!(dialog.is_showing());
    }

    #[test]
    fn show_resets_focus() {
        let mut dialog = shown_dialog();
        dialog.process_event(&key(KeyCode::Tab));
        dialog.dismiss();
        dialog.show();
        assert_eq!(dialog.process_event(&key(KeyCode::Enter)), Some(DialogAction::Negative));
    }
}
