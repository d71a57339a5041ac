//! Modal overlay hosting a single content widget over the active page.
//!
//! The overlay dims every cell of the frame, clears a content rectangle
//! computed from the hosted widget's preferred size and the configured
//! alignment, and lets the host draw the content into that rectangle. It
//! owns the dismiss gestures: Escape and a mouse press outside the content
//! rectangle both hide the overlay, and both only when it is dismissible.
//!
//! The overlay renders and hit-tests; it never interprets content input.
//! Dialog keys are routed to the content first and reach the overlay only
//! when left unconsumed.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

/// Vertical offset applied to top-aligned content.
const TOP_ALIGN_MARGIN: u16 = 2;

/// Placement of the content rectangle within the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentAlignment {
    /// Centered both ways.
    #[default]
    Center,
    /// Horizontally centered, near the top edge.
    TopCenter,
}

/// Outcome of feeding an input event to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalResponse {
    /// The event hid the overlay.
    Hidden,
    /// The event was not a dismiss gesture, or dismissal is disabled.
    Ignored,
}

/// Dimmed full-frame overlay with one centered content slot.
#[derive(Debug, Clone)]
pub struct OverlayModal {
    visible: bool,
    dismissible: bool,
    alignment: ContentAlignment,
    backdrop: Style,
    content_width: u16,
    content_height: u16,
}

impl OverlayModal {
    /// Creates a hidden, dismissible overlay sized for its content.
    #[must_use]
    pub fn new(content_width: u16, content_height: u16) -> Self {
        Self {
            visible: false,
            dismissible: true,
            alignment: ContentAlignment::default(),
            backdrop: Style::default(),
            content_width,
            content_height,
        }
    }

    /// Toggles whether Escape and click-outside hide the overlay.
    pub fn set_dismissible(&mut self, dismissible: bool) {
        self.dismissible = dismissible;
    }

    /// Whether dismiss gestures are honored.
    #[must_use]
    pub fn is_dismissible(&self) -> bool {
        self.dismissible
    }

    /// Sets the content placement.
    pub fn set_alignment(&mut self, alignment: ContentAlignment) {
        self.alignment = alignment;
    }

    /// Sets the style painted over every backdrop cell.
    pub fn set_backdrop(&mut self, backdrop: Style) {
        self.backdrop = backdrop;
    }

    /// Replaces the content's preferred size (used when a parameterized
    /// dialog is rebuilt into an existing wrapper).
    pub fn set_content_size(&mut self, width: u16, height: u16) {
        self.content_width = width;
        self.content_height = height;
    }

    /// Shows the overlay.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the overlay.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the overlay is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The rectangle the content occupies within `area`.
    ///
    /// The preferred size is clamped to the frame so small terminals still
    /// get a usable, fully visible content box.
    #[must_use]
    pub fn content_rect(&self, area: Rect) -> Rect {
        let width = self.content_width.min(area.width);
        let height = self.content_height.min(area.height);
        let x = area.x + (area.width - width) / 2;
        let y = match self.alignment {
            ContentAlignment::Center => area.y + (area.height - height) / 2,
            ContentAlignment::TopCenter => {
                area.y + TOP_ALIGN_MARGIN.min(area.height.saturating_sub(height))
            }
        };
        Rect::new(x, y, width, height)
    }

    /// Feeds a key event left unconsumed by the content.
    ///
    /// Escape hides the overlay when it is dismissible; every other key is
    /// ignored.
    pub fn handle_key(&mut self, key: &KeyEvent) -> ModalResponse {
        if key.code == KeyCode::Esc && self.dismissible && self.visible {
            self.hide();
            return ModalResponse::Hidden;
        }
        ModalResponse::Ignored
    }

    /// Feeds a mouse press at `(column, row)` within `area`.
    ///
    /// A press outside the content rectangle hides the overlay when it is
    /// dismissible; presses inside the content are the content's business.
    pub fn handle_click(&mut self, column: u16, row: u16, area: Rect) -> ModalResponse {
        if !self.visible {
            return ModalResponse::Ignored;
        }
        let content = self.content_rect(area);
        let inside = column >= content.x
            && column < content.x + content.width
            && row >= content.y
            && row < content.y + content.height;
        if !inside && self.dismissible {
            self.hide();
            return ModalResponse::Hidden;
        }
        ModalResponse::Ignored
    }

    /// Dims the whole frame and clears the content rectangle.
    ///
    /// The host draws the content into [`OverlayModal::content_rect`] right
    /// after this.
    pub fn render_backdrop(&self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.backdrop);
        Clear.render(self.content_rect(area), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn shown(dismissible: bool) -> OverlayModal {
        let mut modal = OverlayModal::new(40, 10);
        modal.set_dismissible(dismissible);
        modal.show();
        modal
    }

    fn esc() -> KeyEvent {
        KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)
    }

    #[test]
    fn content_rect_is_centered() {
        let modal = OverlayModal::new(40, 10);
        let rect = modal.content_rect(Rect::new(0, 0, 100, 30));
        assert_eq!(rect, Rect::new(30, 10, 40, 10));
    }

    #[test]
    fn content_rect_top_alignment() {
        let mut modal = OverlayModal::new(40, 10);
        modal.set_alignment(ContentAlignment::TopCenter);
        let rect = modal.content_rect(Rect::new(0, 0, 100, 30));
        assert_eq!(rect, Rect::new(30, 2, 40, 10));
    }

    #[test]
    fn content_rect_clamps_to_small_frames() {
        let modal = OverlayModal::new(40, 10);
        let rect = modal.content_rect(Rect::new(0, 0, 20, 6));
        assert_eq!(rect, Rect::new(0, 0, 20, 6));
    }

    #[test]
    fn escape_hides_only_when_dismissible() {
        let mut modal = shown(true);
        assert_eq!(modal.handle_key(&esc()), ModalResponse::Hidden);
        assert!(!modal.is_visible());

        let mut modal = shown(false);
        assert_eq!(modal.handle_key(&esc()), ModalResponse::Ignored);
        assert!(modal.is_visible());
    }

    #[test]
    fn non_escape_keys_are_ignored() {
        let mut modal = shown(true);
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(modal.handle_key(&key), ModalResponse::Ignored);
        assert!(modal.is_visible());
    }

    #[test]
    fn click_outside_hides_only_when_dismissible() {
        let area = Rect::new(0, 0, 100, 30);

        let mut modal = shown(true);
        assert_eq!(modal.handle_click(0, 0, area), ModalResponse::Hidden);
        assert!(!modal.is_visible());

        let mut modal = shown(false);
        assert_eq!(modal.handle_click(0, 0, area), ModalResponse::Ignored);
        assert!(modal.is_visible());
    }

    #[test]
    fn click_inside_content_never_dismisses() {
        let area = Rect::new(0, 0, 100, 30);
        let mut modal = shown(true);
        let content = modal.content_rect(area);
        assert_eq!(
            modal.handle_click(content.x, content.y, area),
            ModalResponse::Ignored
        );
        assert!(modal.is_visible());
    }

    #[test]
    fn hidden_overlay_ignores_input() {
        let mut modal = OverlayModal::new(40, 10);
        assert_eq!(modal.handle_key(&esc()), ModalResponse::Ignored);
        assert_eq!(
            modal.handle_click(0, 0, Rect::new(0, 0, 100, 30)),
            ModalResponse::Ignored
        );
    }
}
