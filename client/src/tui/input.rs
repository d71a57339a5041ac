//! Single-line text input shared by forms and dialogs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Append-only line editor with optional masking for passwords.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    masked: bool,
}

impl TextInput {
    /// Creates an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty input that renders its content masked.
    #[must_use]
    pub fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    /// Creates an input prefilled with `value`.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            masked: false,
        }
    }

    /// Current content.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the content.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Empties the input.
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Whether the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Applies a key press; returns whether the key edited the content.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c)
                if key
                    .modifiers
                    .difference(KeyModifiers::SHIFT)
                    .is_empty() =>
            {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }

    /// Text shown for this input; masked content renders as bullets, and a
    /// cursor marker is appended while focused.
    #[must_use]
    pub fn display(&self, focused: bool) -> String {
        let shown: String = if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        };
        if focused {
            format!("{shown}_")
        } else {
            shown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_appends_and_backspace_removes() {
        let mut input = TextInput::new();
        for c in "hey".chars() {
            assert!(input.handle_key(&key(KeyCode::Char(c))));
        }
        assert_eq!(input.value(), "hey");

        input.handle_key(&key(KeyCode::Backspace));
        assert_eq!(input.value(), "he");
    }

    #[test]
    fn control_chords_are_not_text() {
        let mut input = TextInput::new();
        let chord = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert!(!input.handle_key(&chord));
        assert!(input.is_empty());
    }

    #[test]
    fn shifted_characters_are_text() {
        let mut input = TextInput::new();
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert!(input.handle_key(&shifted));
        assert_eq!(input.value(), "A");
    }

    #[test]
    fn masked_display_hides_content() {
        let mut input = TextInput::masked();
        input.set_value("secret");
        assert_eq!(input.display(false), "••••••");
        assert_eq!(input.display(true), "••••••_");
    }
}
