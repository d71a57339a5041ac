//! Settings page: persisted user-preference toggles.
//!
//! A sub-view reachable only from the chat page; backing out always lands
//! on chat again. Toggles are reported to the window, which persists them
//! and pushes the relevant ones back into the chat page.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::tui::theme::Theme;

const FORM_WIDTH: u16 = 48;
const FORM_HEIGHT: u16 = 9;

/// Preference flags the page can flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefToggle {
    /// Show timestamps in the timeline.
    ShowTimestamps,
    /// Send typing notifications.
    TypingNotifications,
}

/// Event emitted by the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Back to the chat page.
    Back,
    /// A preference was flipped to the given value.
    Toggled(PrefToggle, bool),
}

/// The settings page.
#[derive(Debug)]
pub struct SettingsPage {
    show_timestamps: bool,
    typing_notifications: bool,
    selected: usize,
}

impl Default for SettingsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_timestamps: true,
            typing_notifications: true,
            selected: 0,
        }
    }

    /// Seeds the toggles from the persisted values on page entry.
    pub fn load(&mut self, show_timestamps: bool, typing_notifications: bool) {
        self.show_timestamps = show_timestamps;
        self.typing_notifications = typing_notifications;
        self.selected = 0;
    }

    /// Handles a key press, yielding an event for the window.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<SettingsEvent> {
        match key.code {
            KeyCode::Esc => Some(SettingsEvent::Back),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.selected {
                0 => {
                    self.show_timestamps = !self.show_timestamps;
                    Some(SettingsEvent::Toggled(
                        PrefToggle::ShowTimestamps,
                        self.show_timestamps,
                    ))
                }
                _ => {
                    self.typing_notifications = !self.typing_notifications;
                    Some(SettingsEvent::Toggled(
                        PrefToggle::TypingNotifications,
                        self.typing_notifications,
                    ))
                }
            },
            _ => None,
        }
    }

    /// Renders the centered toggle list.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let width = FORM_WIDTH.min(area.width);
        let height = FORM_HEIGHT.min(area.height);
        let form = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let block = Block::default()
            .title(" Settings ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(form);
        block.render(form, buf);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

        let entries = [
            ("Show timestamps", self.show_timestamps),
            ("Typing notifications", self.typing_notifications),
        ];
        for (index, (label, value)) in entries.iter().enumerate() {
            let style = if index == self.selected {
                theme.input_focused
            } else {
                theme.text_primary
            };
            let mark = if *value { "[x]" } else { "[ ]" };
            Paragraph::new(format!("{mark} {label}"))
                .style(style)
                .render(rows[index], buf);
        }

        Paragraph::new(Line::styled(
            "[space] toggle   [Esc] back to chat",
            theme.text_muted,
        ))
        .alignment(Alignment::Right)
        .render(rows[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn toggles_report_their_new_value() {
        let mut page = SettingsPage::new();
        page.load(true, false);

        assert_eq!(
            page.handle_key(&key(KeyCode::Char(' '))),
            Some(SettingsEvent::Toggled(PrefToggle::ShowTimestamps, false))
        );

        page.handle_key(&key(KeyCode::Down));
        assert_eq!(
            page.handle_key(&key(KeyCode::Enter)),
            Some(SettingsEvent::Toggled(PrefToggle::TypingNotifications, true))
        );
    }

    #[test]
    fn escape_returns_to_chat() {
        let mut page = SettingsPage::new();
        assert_eq!(page.handle_key(&key(KeyCode::Esc)), Some(SettingsEvent::Back));
    }

    #[test]
    fn selection_is_clamped() {
        let mut page = SettingsPage::new();
        page.handle_key(&key(KeyCode::Up));
        assert_eq!(page.selected, 0);
        for _ in 0..5 {
            page.handle_key(&key(KeyCode::Down));
        }
        assert_eq!(page.selected, 1);
    }
}
