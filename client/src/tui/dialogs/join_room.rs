//! Join-room dialog: collects a room id or alias.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::{Dialog, DialogOutcome};
use crate::tui::input::TextInput;
use crate::tui::theme::Theme;

/// Dialog asking for the room to join.
///
/// Enter confirms with whatever was typed (the window decides whether an
/// empty value goes anywhere); Escape cancels. The input is cleared after a
/// confirmation so the reused instance comes up blank next time.
#[derive(Debug, Default)]
pub struct JoinRoomDialog {
    room_input: TextInput,
}

impl JoinRoomDialog {
    /// Creates the dialog with an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content of the room input (test hook).
    #[must_use]
    pub fn room_input(&self) -> &str {
        self.room_input.value()
    }
}

impl Dialog for JoinRoomDialog {
    type Payload = String;

    fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome<String>> {
        match key.code {
            KeyCode::Enter => {
                let room = self.room_input.value().trim().to_string();
                self.room_input.clear();
                Some(DialogOutcome::Accepted(room))
            }
            KeyCode::Esc => Some(DialogOutcome::Cancelled),
            _ => {
                self.room_input.handle_key(key);
                None
            }
        }
    }

    fn preferred_size(&self) -> (u16, u16) {
        (46, 8)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(" Join Room ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

        Paragraph::new("Room ID or alias")
            .style(theme.label)
            .render(rows[0], buf);
        Paragraph::new(self.room_input.display(true))
            .style(theme.input_focused)
            .render(rows[1], buf);
        Paragraph::new(Line::styled("[Enter] join   [Esc] cancel", theme.text_muted))
            .alignment(Alignment::Right)
            .render(rows[3], buf);
    }
}
