//! Create-room dialog: collects name, topic, and visibility.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::{Dialog, DialogOutcome};
use crate::tui::input::TextInput;
use crate::tui::theme::Theme;

/// Parameters of a room to create, handed to the window callback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateRoomRequest {
    /// Display name of the new room.
    pub name: String,
    /// Optional topic.
    pub topic: String,
    /// Whether the room is publicly joinable.
    pub public: bool,
}

/// Field currently focused in the create-room form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CreateRoomField {
    #[default]
    Name,
    Topic,
    Visibility,
}

impl CreateRoomField {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Topic,
            Self::Topic => Self::Visibility,
            Self::Visibility => Self::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Name => Self::Visibility,
            Self::Topic => Self::Name,
            Self::Visibility => Self::Topic,
        }
    }
}

/// Dialog collecting the parameters of a new room.
///
/// Tab cycles the fields, space toggles visibility, Enter confirms from any
/// field, Escape cancels. The form is cleared after a confirmation.
#[derive(Debug, Default)]
pub struct CreateRoomDialog {
    name: TextInput,
    topic: TextInput,
    public: bool,
    focus: CreateRoomField,
}

impl CreateRoomDialog {
    /// Creates the dialog with an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn take_request(&mut self) -> CreateRoomRequest {
        let request = CreateRoomRequest {
            name: self.name.value().trim().to_string(),
            topic: self.topic.value().trim().to_string(),
            public: self.public,
        };
        self.name.clear();
        self.topic.clear();
        self.public = false;
        self.focus = CreateRoomField::Name;
        request
    }
}

impl Dialog for CreateRoomDialog {
    type Payload = CreateRoomRequest;

    fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome<CreateRoomRequest>> {
        match key.code {
            KeyCode::Enter => return Some(DialogOutcome::Accepted(self.take_request())),
            KeyCode::Esc => return Some(DialogOutcome::Cancelled),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Char(' ') if self.focus == CreateRoomField::Visibility => {
                self.public = !self.public;
            }
            _ => match self.focus {
                CreateRoomField::Name => {
                    self.name.handle_key(key);
                }
                CreateRoomField::Topic => {
                    self.topic.handle_key(key);
                }
                CreateRoomField::Visibility => {}
            },
        }
        None
    }

    fn preferred_size(&self) -> (u16, u16) {
        (50, 12)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(" Create Room ")
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
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

        let field_style = |field| {
            if self.focus == field {
                theme.input_focused
            } else {
                theme.input_unfocused
            }
        };

        Paragraph::new("Name").style(theme.label).render(rows[0], buf);
        Paragraph::new(self.name.display(self.focus == CreateRoomField::Name))
            .style(field_style(CreateRoomField::Name))
            .render(rows[1], buf);

        Paragraph::new("Topic").style(theme.label).render(rows[2], buf);
        Paragraph::new(self.topic.display(self.focus == CreateRoomField::Topic))
            .style(field_style(CreateRoomField::Topic))
            .render(rows[3], buf);

        let visibility = if self.public {
            "[x] Public  (space toggles)"
        } else {
            "[ ] Public  (space toggles)"
        };
        Paragraph::new(visibility)
            .style(field_style(CreateRoomField::Visibility))
            .render(rows[5], buf);

        Paragraph::new(Line::styled("[Enter] create   [Esc] cancel", theme.text_muted))
            .alignment(Alignment::Right)
            .render(rows[7], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(dialog: &mut CreateRoomDialog, s: &str) {
        for c in s.chars() {
            dialog.handle_key(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn collects_all_fields() {
        let mut dialog = CreateRoomDialog::new();
        type_str(&mut dialog, "Rustaceans");
        dialog.handle_key(&key(KeyCode::Tab));
        type_str(&mut dialog, "all things rust");
        dialog.handle_key(&key(KeyCode::Tab));
        dialog.handle_key(&key(KeyCode::Char(' ')));

        let outcome = dialog.handle_key(&key(KeyCode::Enter));
        assert_eq!(
            outcome,
            Some(DialogOutcome::Accepted(CreateRoomRequest {
                name: "Rustaceans".to_string(),
                topic: "all things rust".to_string(),
                public: true,
            }))
        );
    }

    #[test]
    fn form_resets_after_confirmation() {
        let mut dialog = CreateRoomDialog::new();
        type_str(&mut dialog, "Once");
        dialog.handle_key(&key(KeyCode::Enter));

        let outcome = dialog.handle_key(&key(KeyCode::Enter));
        assert_eq!(
            outcome,
            Some(DialogOutcome::Accepted(CreateRoomRequest::default()))
        );
    }

    #[test]
    fn space_only_toggles_on_visibility_field() {
        let mut dialog = CreateRoomDialog::new();
        dialog.handle_key(&key(KeyCode::Char(' ')));
        let outcome = dialog.handle_key(&key(KeyCode::Enter));
        match outcome {
            Some(DialogOutcome::Accepted(request)) => {
                assert!(!request.public);
                assert_eq!(request.name, "");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut dialog = CreateRoomDialog::new();
        assert_eq!(dialog.focus, CreateRoomField::Name);
        dialog.handle_key(&key(KeyCode::Tab));
        assert_eq!(dialog.focus, CreateRoomField::Topic);
        dialog.handle_key(&key(KeyCode::Tab));
        assert_eq!(dialog.focus, CreateRoomField::Visibility);
        dialog.handle_key(&key(KeyCode::Tab));
        assert_eq!(dialog.focus, CreateRoomField::Name);
        dialog.handle_key(&key(KeyCode::BackTab));
        assert_eq!(dialog.focus, CreateRoomField::Visibility);
    }
}
