//! Login page: homeserver, user id, and password form.
//!
//! The form validates locally (the user id must parse, nothing may be
//! blank) and then emits [`LoginEvent::Submit`]; the authentication
//! collaborator's verdict comes back through the window, which either moves
//! on to the chat page or pushes an error back in via
//! [`LoginPage::set_error`].

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::client::UserId;
use crate::tui::input::TextInput;
use crate::tui::theme::Theme;

/// Homeserver suggested when the form is blank.
const DEFAULT_HOMESERVER: &str = "matrix.org";

const FORM_WIDTH: u16 = 52;
const FORM_HEIGHT: u16 = 15;

/// Credentials collected by the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Homeserver as typed, `host[:port]`.
    pub homeserver: String,
    /// Parsed user id.
    pub user_id: UserId,
    /// Password as typed.
    pub password: String,
}

/// Event emitted by the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    /// Back to the welcome page.
    Back,
    /// Credentials ready for the authentication collaborator.
    Submit(LoginRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoginField {
    #[default]
    Homeserver,
    UserId,
    Password,
    Submit,
}

impl LoginField {
    fn next(self) -> Self {
        match self {
            Self::Homeserver => Self::UserId,
            Self::UserId => Self::Password,
            Self::Password => Self::Submit,
            Self::Submit => Self::Homeserver,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Homeserver => Self::Submit,
            Self::UserId => Self::Homeserver,
            Self::Password => Self::UserId,
            Self::Submit => Self::Password,
        }
    }
}

/// The login form.
#[derive(Debug)]
pub struct LoginPage {
    homeserver: TextInput,
    user_id: TextInput,
    password: TextInput,
    focus: LoginField,
    error: Option<String>,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginPage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            homeserver: TextInput::with_value(DEFAULT_HOMESERVER),
            user_id: TextInput::new(),
            password: TextInput::masked(),
            focus: LoginField::default(),
            error: None,
        }
    }

    /// Clears the form back to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Surfaces a collaborator-reported login failure.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Current error line (test hook).
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn validate(&mut self) -> Option<LoginRequest> {
        let homeserver = self.homeserver.value().trim().to_string();
        if homeserver.is_empty() {
            self.error = Some("homeserver must not be empty".to_string());
            return None;
        }
        let user_id = match self.user_id.value().trim().parse::<UserId>() {
            Ok(id) => id,
            Err(err) => {
                self.error = Some(err.to_string());
                return None;
            }
        };
        if self.password.is_empty() {
            self.error = Some("password must not be empty".to_string());
            return None;
        }
        self.error = None;
        Some(LoginRequest {
            homeserver,
            user_id,
            password: self.password.value().to_string(),
        })
    }

    /// Handles a key press, yielding a terminal event when the form is done.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<LoginEvent> {
        match key.code {
            KeyCode::Esc => return Some(LoginEvent::Back),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Enter => {
                if let Some(request) = self.validate() {
                    return Some(LoginEvent::Submit(request));
                }
            }
            _ => {
                match self.focus {
                    LoginField::Homeserver => self.homeserver.handle_key(key),
                    LoginField::UserId => self.user_id.handle_key(key),
                    LoginField::Password => self.password.handle_key(key),
                    LoginField::Submit => false,
                };
            }
        }
        None
    }

    /// Renders the centered form.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let form = centered_form(area);
        let block = Block::default()
            .title(" Login ")
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

        Paragraph::new("Homeserver").style(theme.label).render(rows[0], buf);
        Paragraph::new(self.homeserver.display(self.focus == LoginField::Homeserver))
            .style(style(LoginField::Homeserver))
            .render(rows[1], buf);
        Paragraph::new("User ID").style(theme.label).render(rows[2], buf);
        Paragraph::new(self.user_id.display(self.focus == LoginField::UserId))
            .style(style(LoginField::UserId))
            .render(rows[3], buf);
        Paragraph::new("Password").style(theme.label).render(rows[4], buf);
        Paragraph::new(self.password.display(self.focus == LoginField::Password))
            .style(style(LoginField::Password))
            .render(rows[5], buf);

        if let Some(ref error) = self.error {
            Paragraph::new(error.as_str())
                .style(theme.error)
                .render(rows[7], buf);
        }

        let button = if self.focus == LoginField::Submit {
            "→ Login ←"
        } else {
            "  Login  "
        };
        Paragraph::new(button)
            .style(style(LoginField::Submit))
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
