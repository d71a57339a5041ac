//! Welcome page: entry point offering login or registration.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::tui::theme::Theme;

const WORDMARK: &[&str] = &[
    r" _ __   __ _| | __ ___   _____ _ __ ",
    r"| '_ \ / _` | |/ _` \ \ / / _ \ '__|",
    r"| |_) | (_| | | (_| |\ V /  __/ |   ",
    r"| .__/ \__,_|_|\__,_| \_/ \___|_|   ",
    r"|_|                                 ",
];

/// Navigation choice made on the welcome page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeEvent {
    /// Go to the login page.
    Login,
    /// Go to the register page.
    Register,
}

/// The page itself: two buttons and a wordmark.
#[derive(Debug, Default)]
pub struct WelcomePage {
    register_focused: bool,
}

impl WelcomePage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a key press, yielding the chosen navigation event.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<WelcomeEvent> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.register_focused = !self.register_focused;
                None
            }
            KeyCode::Enter => Some(if self.register_focused {
                WelcomeEvent::Register
            } else {
                WelcomeEvent::Login
            }),
            KeyCode::Char('l') => Some(WelcomeEvent::Login),
            KeyCode::Char('r') => Some(WelcomeEvent::Register),
            _ => None,
        }
    }

    /// Renders the page into the full frame area.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let rows = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(WORDMARK.len() as u16),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        let wordmark: Vec<Line> = WORDMARK
            .iter()
            .map(|row| Line::styled(*row, theme.title))
            .collect();
        Paragraph::new(wordmark)
            .alignment(Alignment::Center)
            .render(rows[1], buf);

        Paragraph::new("a terminal for talking")
            .style(theme.text_muted)
            .alignment(Alignment::Center)
            .render(rows[3], buf);

        let (login, register) = if self.register_focused {
            (theme.input_unfocused, theme.input_focused)
        } else {
            (theme.input_focused, theme.input_unfocused)
        };
        let buttons = Line::from(vec![
            Span::styled("[ Login ]", login),
            Span::raw("    "),
            Span::styled("[ Register ]", register),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(rows[5], buf);
    }
}
