//! Recaptcha dialog shown during registration.
//!
//! The terminal cannot embed the captcha widget, so the dialog shows the
//! fallback URL for the registration session and asks for confirmation once
//! the captcha has been solved in a browser.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use super::{Dialog, DialogOutcome};
use crate::tui::theme::Theme;

/// Confirmation step for the browser-based captcha fallback.
#[derive(Debug)]
pub struct RecaptchaDialog {
    fallback_url: String,
    confirm_focused: bool,
}

impl RecaptchaDialog {
    /// Creates the dialog for a registration `session` on `homeserver`.
    #[must_use]
    pub fn new(homeserver: &str, session: &str) -> Self {
        Self {
            fallback_url: format!(
                "https://{homeserver}/_matrix/client/r0/auth/m.login.recaptcha/fallback/web?session={session}"
            ),
            confirm_focused: true,
        }
    }

    /// The fallback URL shown to the user (test hook).
    #[must_use]
    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }
}

impl Dialog for RecaptchaDialog {
    type Payload = ();

    fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome<()>> {
        match key.code {
            KeyCode::Enter if self.confirm_focused => Some(DialogOutcome::Accepted(())),
            KeyCode::Enter => Some(DialogOutcome::Cancelled),
            KeyCode::Esc => Some(DialogOutcome::Cancelled),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.confirm_focused = !self.confirm_focused;
                None
            }
            _ => None,
        }
    }

    fn preferred_size(&self) -> (u16, u16) {
        (56, 9)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(" Verification ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        Paragraph::new("Solve the captcha in your browser, then confirm:")
            .style(theme.text_primary)
            .render(rows[0], buf);
        Paragraph::new(self.fallback_url.clone())
            .style(theme.text_secondary)
            .wrap(Wrap { trim: true })
            .render(rows[1], buf);

        let (yes, no) = if self.confirm_focused {
            (theme.input_focused, theme.input_unfocused)
        } else {
            (theme.input_unfocused, theme.input_focused)
        };
        let buttons = Line::from(vec![
            Span::styled("[ Confirm ]", yes),
            Span::raw("   "),
            Span::styled("[ Cancel ]", no),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(rows[2], buf);
    }
}
