//! Room-settings dialog: edits a room's name and topic.
//!
//! Parameterized on the target room, rebuilt per open with the room's
//! current values prefilled.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::{Dialog, DialogOutcome};
use crate::tui::input::TextInput;
use crate::tui::theme::Theme;

/// Edited room fields handed to the window callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSettingsUpdate {
    /// New display name.
    pub name: String,
    /// New topic.
    pub topic: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RoomSettingsField {
    #[default]
    Name,
    Topic,
}

/// Dialog editing the settings of one room.
#[derive(Debug)]
pub struct RoomSettingsDialog {
    room_id: String,
    name: TextInput,
    topic: TextInput,
    focus: RoomSettingsField,
}

impl RoomSettingsDialog {
    /// Creates the dialog for `room_id`, prefilled with current values.
    #[must_use]
    pub fn new(
        room_id: impl Into<String>,
        name: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            name: TextInput::with_value(name),
            topic: TextInput::with_value(topic),
            focus: RoomSettingsField::default(),
        }
    }

    /// The room this instance was built for (test hook).
    #[must_use]
    pub fn room_id(&self) -> &str {
        &self.room_id
    }
}

impl Dialog for RoomSettingsDialog {
    type Payload = RoomSettingsUpdate;

    fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome<RoomSettingsUpdate>> {
        match key.code {
            KeyCode::Enter => Some(DialogOutcome::Accepted(RoomSettingsUpdate {
                name: self.name.value().trim().to_string(),
                topic: self.topic.value().trim().to_string(),
            })),
            KeyCode::Esc => Some(DialogOutcome::Cancelled),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.focus = match self.focus {
                    RoomSettingsField::Name => RoomSettingsField::Topic,
                    RoomSettingsField::Topic => RoomSettingsField::Name,
                };
                None
            }
            _ => {
                match self.focus {
                    RoomSettingsField::Name => self.name.handle_key(key),
                    RoomSettingsField::Topic => self.topic.handle_key(key),
                };
                None
            }
        }
    }

    fn preferred_size(&self) -> (u16, u16) {
        (50, 10)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(format!(" Room Settings: {} ", self.room_id))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

        let style = |field| {
            if self.focus == field {
                theme.input_focused
            } else {
                theme.input_unfocused
            }
        };

        Paragraph::new("Name").style(theme.label).render(rows[0], buf);
        Paragraph::new(self.name.display(self.focus == RoomSettingsField::Name))
            .style(style(RoomSettingsField::Name))
            .render(rows[1], buf);
        Paragraph::new("Topic").style(theme.label).render(rows[2], buf);
        Paragraph::new(self.topic.display(self.focus == RoomSettingsField::Topic))
            .style(style(RoomSettingsField::Topic))
            .render(rows[3], buf);

        Paragraph::new(Line::styled("[Enter] save   [Esc] cancel", theme.text_muted))
            .alignment(Alignment::Right)
            .render(rows[5], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn prefilled_values_are_editable() {
        let mut dialog = RoomSettingsDialog::new("!r:x", "Rust", "general");
        dialog.handle_key(&key(KeyCode::Char('y')));

        let outcome = dialog.handle_key(&key(KeyCode::Enter));
        assert_eq!(
            outcome,
            Some(DialogOutcome::Accepted(RoomSettingsUpdate {
                name: "Rusty".to_string(),
                topic: "general".to_string(),
            }))
        );
    }

    #[test]
    fn tab_switches_the_edited_field() {
        let mut dialog = RoomSettingsDialog::new("!r:x", "Rust", "");
        dialog.handle_key(&key(KeyCode::Tab));
        dialog.handle_key(&key(KeyCode::Char('t')));

        match dialog.handle_key(&key(KeyCode::Enter)) {
            Some(DialogOutcome::Accepted(update)) => {
                assert_eq!(update.name, "Rust");
                assert_eq!(update.topic, "t");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn escape_discards_edits() {
        let mut dialog = RoomSettingsDialog::new("!r:x", "Rust", "");
        dialog.handle_key(&key(KeyCode::Backspace));
        assert_eq!(
            dialog.handle_key(&key(KeyCode::Esc)),
            Some(DialogOutcome::Cancelled)
        );
    }
}
