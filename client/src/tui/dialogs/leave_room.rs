//! Leave-room confirmation dialog.
//!
//! Parameterized on the room being left, so the window rebuilds it on every
//! open instead of reusing a retained instance.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use super::{Dialog, DialogOutcome};
use crate::tui::theme::Theme;

/// Asks the user to confirm leaving a specific room.
#[derive(Debug)]
pub struct LeaveRoomDialog {
    room_name: String,
    confirm_focused: bool,
}

impl LeaveRoomDialog {
    /// Creates the dialog for the room shown in the prompt.
    #[must_use]
    pub fn new(room_name: impl Into<String>) -> Self {
        Self {
            room_name: room_name.into(),
            confirm_focused: false,
        }
    }

    /// The room this instance was built for (test hook).
    #[must_use]
    pub fn room_name(&self) -> &str {
        &self.room_name
    }
}

impl Dialog for LeaveRoomDialog {
    type Payload = ();

    fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome<()>> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(DialogOutcome::Accepted(())),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(DialogOutcome::Cancelled)
            }
            KeyCode::Enter => Some(if self.confirm_focused {
                DialogOutcome::Accepted(())
            } else {
                DialogOutcome::Cancelled
            }),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.confirm_focused = !self.confirm_focused;
                None
            }
            _ => None,
        }
    }

    fn preferred_size(&self) -> (u16, u16) {
        (48, 7)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(" Leave Room ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        Paragraph::new(format!("Leave {}?", self.room_name))
            .style(theme.text_primary)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(rows[0], buf);

        let (yes, no) = if self.confirm_focused {
            (theme.input_focused, theme.input_unfocused)
        } else {
            (theme.input_unfocused, theme.input_focused)
        };
        let buttons = Line::from(vec![
            Span::styled("[ Leave ]", yes),
            Span::raw("   "),
            Span::styled("[ Cancel ]", no),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(rows[1], buf);
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
    fn confirm_and_cancel_terminate_once() {
        let mut dialog = LeaveRoomDialog::new("#rust:example.org");
        assert!(dialog.handle_key(&key(KeyCode::Char('x'))).is_none());
        assert_eq!(
            dialog.handle_key(&key(KeyCode::Char('y'))),
            Some(DialogOutcome::Accepted(()))
        );

        let mut dialog = LeaveRoomDialog::new("#rust:example.org");
        assert_eq!(
            dialog.handle_key(&key(KeyCode::Esc)),
            Some(DialogOutcome::Cancelled)
        );
    }

    #[test]
    fn carries_its_target_room() {
        let dialog = LeaveRoomDialog::new("#rust:example.org");
        assert_eq!(dialog.room_name(), "#rust:example.org");
    }
}
