//! User-profile dialog: read-only card for one user.
//!
//! The instance is retained by the window and re-targeted with
//! [`UserProfileDialog::init`] on every open.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::{Dialog, DialogOutcome};
use crate::tui::theme::Theme;

/// Read-only profile card shown near the top of the frame.
#[derive(Debug, Default)]
pub struct UserProfileDialog {
    user_id: String,
    room_id: String,
}

impl UserProfileDialog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retargets the card before it is shown.
    pub fn init(&mut self, user_id: impl Into<String>, room_id: impl Into<String>) {
        self.user_id = user_id.into();
        self.room_id = room_id.into();
    }

    /// Currently displayed user (test hook).
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl Dialog for UserProfileDialog {
    type Payload = ();

    fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome<()>> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(DialogOutcome::Cancelled),
            _ => None,
        }
    }

    fn preferred_size(&self) -> (u16, u16) {
        (40, 8)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(" Profile ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let initial = self
            .user_id
            .chars()
            .nth(1)
            .unwrap_or('?')
            .to_ascii_uppercase();

        let rows = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        Paragraph::new(format!("({initial})"))
            .style(theme.sender)
            .alignment(Alignment::Center)
            .render(rows[0], buf);
        Paragraph::new(self.user_id.clone())
            .style(theme.text_primary)
            .alignment(Alignment::Center)
            .render(rows[1], buf);
        Paragraph::new(format!("seen in {}", self.room_id))
            .style(theme.text_muted)
            .alignment(Alignment::Center)
            .render(rows[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn init_retargets_the_retained_instance() {
        let mut dialog = UserProfileDialog::new();
        dialog.init("@alice:example.org", "!r:x");
        assert_eq!(dialog.user_id(), "@alice:example.org");

        dialog.init("@bob:example.org", "!r:x");
        assert_eq!(dialog.user_id(), "@bob:example.org");
    }

    #[test]
    fn any_dismiss_key_cancels() {
        let mut dialog = UserProfileDialog::new();
        for code in [KeyCode::Esc, KeyCode::Enter, KeyCode::Char('q')] {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(dialog.handle_key(&key), Some(DialogOutcome::Cancelled));
        }
    }
}
