//! Register page: username, password, and homeserver form.
//!
//! Successful local validation emits [`RegisterEvent::Submit`]; the window
//! then runs the captcha verification dialog before handing the request to
//! the authentication collaborator.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::tui::input::TextInput;
use crate::tui::theme::Theme;

const DEFAULT_HOMESERVER: &str = "matrix.org";
const MIN_PASSWORD_LEN: usize = 8;

const FORM_WIDTH: u16 = 52;
const FORM_HEIGHT: u16 = 15;

/// Data collected by the register form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Homeserver as typed, `host[:port]`.
    pub homeserver: String,
    /// Bare localpart, without `@` or domain.
    pub username: String,
    /// Password as typed.
    pub password: String,
}

/// Event emitted by the register page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterEvent {
    /// Back to the welcome page.
    Back,
    /// Form data ready for verification and registration.
    Submit(RegisterRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RegisterField {
    #[default]
    Username,
    Password,
    Homeserver,
    Submit,
}

impl RegisterField {
    fn next(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Homeserver,
            Self::Homeserver => Self::Submit,
            Self::Submit => Self::Username,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Username => Self::Submit,
            Self::Password => Self::Username,
            Self::Homeserver => Self::Password,
            Self::Submit => Self::Homeserver,
        }
    }
}

/// The register form.
#[derive(Debug)]
pub struct RegisterPage {
    username: TextInput,
    password: TextInput,
    homeserver: TextInput,
    focus: RegisterField,
    error: Option<String>,
}

impl Default for RegisterPage {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterPage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            username: TextInput::new(),
            password: TextInput::masked(),
            homeserver: TextInput::with_value(DEFAULT_HOMESERVER),
            focus: RegisterField::default(),
            error: None,
        }
    }

    /// Clears the form back to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Surfaces a collaborator-reported registration failure.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Current error line (test hook).
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn validate(&mut self) -> Option<RegisterRequest> {
        let username = self.username.value().trim().to_string();
        if username.is_empty()
            || !username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '=' | '-'))
        {
            self.error = Some(
                "username may only contain letters, digits, and . _ = -".to_string(),
            );
            return None;
        }
        if self.password.value().len() < MIN_PASSWORD_LEN {
            self.error = Some(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ));
            return None;
        }
        let homeserver = self.homeserver.value().trim().to_string();
        if homeserver.is_empty() {
            self.error = Some("homeserver must not be empty".to_string());
            return None;
        }
        self.error = None;
        Some(RegisterRequest {
            homeserver,
            username,
            password: self.password.value().to_string(),
        })
    }

    /// Handles a key press, yielding a terminal event when the form is done.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<RegisterEvent> {
        match key.code {
            KeyCode::Esc => return Some(RegisterEvent::Back),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Enter => {
                if let Some(request) = self.validate() {
                    return Some(RegisterEvent::Submit(request));
                }
            }
            _ => {
                match self.focus {
                    RegisterField::Username => self.username.handle_key(key),
                    RegisterField::Password => self.password.handle_key(key),
                    RegisterField::Homeserver => self.homeserver.handle_key(key),
                    RegisterField::Submit => false,
                };
            }
        }
        None
    }

    /// Renders the centered form.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let form = centered_form(area);
        let block = Block::default()
            .title(" Register ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(form);
        block.render(form, buf);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        let style = |field| {
            if self.focus == field {
                theme.input_focused
            } else {
                theme.input_unfocused
            }
        };

        Paragraph::new("Username").style(theme.label).render(rows[0], buf);
        Paragraph::new(self.username.display(self.focus == RegisterField::Username))
            .style(style(RegisterField::Username))
            .render(rows[1], buf);
        Paragraph::new("Password").style(theme.label).render(rows[2], buf);
        Paragraph::new(self.password.display(self.focus == RegisterField::Password))
            .style(style(RegisterField::Password))
            .render(rows[3], buf);
        Paragraph::new("Homeserver").style(theme.label).render(rows[4], buf);
        Paragraph::new(self.homeserver.display(self.focus == RegisterField::Homeserver))
            .style(style(RegisterField::Homeserver))
            .render(rows[5], buf);

        if let Some(ref error) = self.error {
            Paragraph::new(error.as_str())
                .style(theme.error)
                .render(rows[7], buf);
        }

        let button = if self.focus == RegisterField::Submit {
            "→ Register ←"
        } else {
            "  Register  "
        };
        Paragraph::new(button)
            .style(style(RegisterField::Submit))
            .alignment(Alignment::Center)
            .render(rows[8], buf);

        Paragraph::new(Line::styled("[Esc] back", theme.text_muted))
            .alignment(Alignment::Right)
            .render(rows[9], buf);
    }
}

fn centered_form(area: Rect) -> Rect {
    let width = FORM_WIDTH.min(area.width);
    let height = FORM_HEIGHT.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(page: &mut RegisterPage, s: &str) {
        for c in s.chars() {
            page.handle_key(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn valid_form_submits() {
        let mut page = RegisterPage::new();
        type_str(&mut page, "carol");
        page.handle_key(&key(KeyCode::Tab));
        type_str(&mut page, "longenough");

        match page.handle_key(&key(KeyCode::Enter)) {
            Some(RegisterEvent::Submit(request)) => {
                assert_eq!(request.username, "carol");
                assert_eq!(request.homeserver, "matrix.org");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn short_password_blocks_submission() {
        let mut page = RegisterPage::new();
        type_str(&mut page, "carol");
        page.handle_key(&key(KeyCode::Tab));
        type_str(&mut page, "short");

        assert!(page.handle_key(&key(KeyCode::Enter)).is_none());
        assert!(page.error().unwrap().contains("at least"));
    }

    #[test]
    fn bad_username_characters_block_submission() {
        let mut page = RegisterPage::new();
        type_str(&mut page, "bad name!");
        page.handle_key(&key(KeyCode::Tab));
        type_str(&mut page, "longenough");

        assert!(page.handle_key(&key(KeyCode::Enter)).is_none());
        assert!(page.error().is_some());
    }

    #[test]
    fn escape_goes_back() {
        let mut page = RegisterPage::new();
        assert_eq!(page.handle_key(&key(KeyCode::Esc)), Some(RegisterEvent::Back));
    }
}
