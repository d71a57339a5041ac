//! Theme configuration for the TUI.
//!
//! Colors and styles used throughout the interface. A monochrome variant is
//! provided for terminals where colors are disabled per the
//! [NO_COLOR standard](https://no-color.org/); status and focus cues always
//! pair a modifier with the color so they survive the monochrome theme.

use ratatui::style::{Color, Modifier, Style};

/// Style set shared by all pages, dialogs, and overlays.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for focused input fields.
    pub input_focused: Style,
    /// Style for unfocused input fields.
    pub input_unfocused: Style,
    /// Style for validation/error text.
    pub error: Style,
    /// Style for form labels.
    pub label: Style,

    /// Style for unfocused borders.
    pub border: Style,
    /// Style for focused borders.
    pub border_focused: Style,
    /// Style for titles.
    pub title: Style,
    /// Style for primary text.
    pub text_primary: Style,
    /// Style for secondary text.
    pub text_secondary: Style,
    /// Style for muted text.
    pub text_muted: Style,

    /// Style for the selected room row.
    pub room_selected: Style,
    /// Style for rooms with unread messages.
    pub room_unread: Style,
    /// Style for timeline timestamps.
    pub timestamp: Style,
    /// Style for message senders.
    pub sender: Style,
    /// Style for the transient status line.
    pub status: Style,

    /// Backdrop style applied to every cell under a modal overlay.
    pub modal_backdrop: Style,
    /// Backdrop style for the progress overlay.
    pub progress_backdrop: Style,
    /// Style for the progress spinner glyphs.
    pub spinner: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            input_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            input_unfocused: Style::default().fg(Color::Gray),
            error: Style::default().fg(Color::Red),
            label: Style::default().fg(Color::White),

            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().fg(Color::Gray),
            text_muted: Style::default().fg(Color::DarkGray),

            room_selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            room_unread: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            timestamp: Style::default().fg(Color::DarkGray),
            sender: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            status: Style::default().fg(Color::Green),

            modal_backdrop: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            progress_backdrop: Style::default()
                .fg(Color::DarkGray)
                .bg(Color::Black)
                .add_modifier(Modifier::DIM),
            spinner: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// Modifier-only theme for `NO_COLOR` environments.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            input_focused: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            input_unfocused: Style::default().add_modifier(Modifier::DIM),
            error: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            label: Style::default(),

            border: Style::default(),
            border_focused: Style::default().add_modifier(Modifier::BOLD),
            title: Style::default().add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().add_modifier(Modifier::DIM),
            text_muted: Style::default().add_modifier(Modifier::DIM),

            room_selected: Style::default().add_modifier(Modifier::REVERSED),
            room_unread: Style::default().add_modifier(Modifier::BOLD),
            timestamp: Style::default().add_modifier(Modifier::DIM),
            sender: Style::default().add_modifier(Modifier::BOLD),
            status: Style::default().add_modifier(Modifier::ITALIC),

            modal_backdrop: Style::default().add_modifier(Modifier::DIM),
            progress_backdrop: Style::default().add_modifier(Modifier::DIM),
            spinner: Style::default().add_modifier(Modifier::BOLD),
        }
    }

    /// Theme based on the environment: monochrome when `NO_COLOR` is set.
    #[must_use]
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            Self::monochrome()
        } else {
            Self::default()
        }
    }
}
