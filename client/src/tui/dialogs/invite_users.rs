//! Invite-users dialog: collects a list of user ids to invite.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::{Dialog, DialogOutcome};
use crate::tui::input::TextInput;
use crate::tui::theme::Theme;

/// Dialog accumulating invitees one user id at a time.
///
/// Enter with text in the input adds it to the list; Enter with an empty
/// input sends the collected list (possibly empty; the window drops empty
/// lists). Escape cancels and keeps nothing.
#[derive(Debug, Default)]
pub struct InviteUsersDialog {
    input: TextInput,
    invitees: Vec<String>,
}

impl InviteUsersDialog {
    /// Creates the dialog with an empty invitee list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invitees collected so far (test hook).
    #[must_use]
    pub fn invitees(&self) -> &[String] {
        &self.invitees
    }
}

impl Dialog for InviteUsersDialog {
    type Payload = Vec<String>;

    fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome<Vec<String>>> {
        match key.code {
            KeyCode::Enter => {
                let entry = self.input.value().trim().to_string();
                if entry.is_empty() {
                    let invitees = std::mem::take(&mut self.invitees);
                    return Some(DialogOutcome::Accepted(invitees));
                }
                if !self.invitees.contains(&entry) {
                    self.invitees.push(entry);
                }
                self.input.clear();
                None
            }
            KeyCode::Esc => {
                self.input.clear();
                self.invitees.clear();
                Some(DialogOutcome::Cancelled)
            }
            _ => {
                self.input.handle_key(key);
                None
            }
        }
    }

    fn preferred_size(&self) -> (u16, u16) {
        (50, 14)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(" Invite Users ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        Paragraph::new("User ID").style(theme.label).render(rows[0], buf);
        Paragraph::new(self.input.display(true))
            .style(theme.input_focused)
            .render(rows[1], buf);

        let list: Vec<Line> = self
            .invitees
            .iter()
            .map(|user| Line::styled(format!("• {user}"), theme.text_secondary))
            .collect();
        Paragraph::new(list).render(rows[3], buf);

        Paragraph::new(Line::styled(
            "[Enter] add / send   [Esc] cancel",
            theme.text_muted,
        ))
        .alignment(Alignment::Right)
        .render(rows[4], buf);
    }
}
