//! Logout confirmation dialog.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::{Dialog, DialogOutcome};
use crate::tui::theme::Theme;

/// Asks the user to confirm logging out.
#[derive(Debug, Default)]
pub struct LogoutDialog {
    confirm_focused: bool,
}

impl LogoutDialog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dialog for LogoutDialog {
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
        (44, 7)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(" Logout ")
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

        Paragraph::new("Log out of this session?")
            .style(theme.text_primary)
            .alignment(Alignment::Center)
            .render(rows[0], buf);

        let (yes, no) = if self.confirm_focused {
            (theme.input_focused, theme.input_unfocused)
        } else {
            (theme.input_unfocused, theme.input_focused)
        };
        let buttons = Line::from(vec![
            Span::styled("[ Logout ]", yes),
            Span::raw("   "),
            Span::styled("[ Cancel ]", no),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(rows[1], buf);
    }
}
