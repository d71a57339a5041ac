//! Member-list dialog: read-only roster of a room.
//!
//! Parameterized on the room, rebuilt per open.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::{Dialog, DialogOutcome};
use crate::tui::theme::Theme;

/// Scrollable list of a room's members.
#[derive(Debug)]
pub struct MemberListDialog {
    room_name: String,
    members: Vec<String>,
    scroll: u16,
}

impl MemberListDialog {
    /// Creates the dialog for `room_name` with its current `members`.
    #[must_use]
    pub fn new(room_name: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            room_name: room_name.into(),
            members,
            scroll: 0,
        }
    }

    /// The room this instance was built for (test hook).
    #[must_use]
    pub fn room_name(&self) -> &str {
        &self.room_name
    }
}

impl Dialog for MemberListDialog {
    type Payload = ();

    fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome<()>> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(DialogOutcome::Cancelled),
            KeyCode::Down => {
                let max = self.members.len().saturating_sub(1) as u16;
                self.scroll = (self.scroll + 1).min(max);
                None
            }
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            _ => None,
        }
    }

    fn preferred_size(&self) -> (u16, u16) {
        (44, 14)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(format!(" Members: {} ", self.room_name))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .members
            .iter()
            .map(|member| Line::styled(member.clone(), theme.text_primary))
            .collect();
        Paragraph::new(lines)
            .scroll((self.scroll, 0))
            .render(inner, buf);
    }
}
