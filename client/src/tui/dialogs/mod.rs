//! Short-lived decision dialogs and their modal lifecycle plumbing.
//!
//! Every dialog is a form that terminates in exactly one [`DialogOutcome`]:
//! accepted with a payload, or cancelled. The main window keeps at most one
//! live `(dialog, modal)` pair per kind inside a [`ModalSlot`]; reusable
//! kinds are retained across opens, parameterized kinds (leave-room,
//! member-list, room-settings) are rebuilt per open with fresh open-time
//! state.
//!
//! When the outcome arrives the slot hides its modal and, only for an
//! accepted outcome whose required payload is non-empty, invokes the typed
//! callback registered at open time. Cancellation is a normal event, never
//! an error, and never reaches the callback.

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::client::ClientHandle;
use crate::settings::SettingsStore;
use crate::tui::overlay::OverlayModal;
use crate::tui::pages::chat::ChatPage;
use crate::tui::theme::Theme;

pub mod create_room;
pub mod invite_users;
pub mod join_room;
pub mod leave_room;
pub mod logout;
pub mod member_list;
pub mod recaptcha;
pub mod room_settings;
pub mod user_profile;

pub use create_room::{CreateRoomDialog, CreateRoomRequest};
pub use invite_users::InviteUsersDialog;
pub use join_room::JoinRoomDialog;
pub use leave_room::LeaveRoomDialog;
pub use logout::LogoutDialog;
pub use member_list::MemberListDialog;
pub use recaptcha::RecaptchaDialog;
pub use room_settings::{RoomSettingsDialog, RoomSettingsUpdate};
pub use user_profile::UserProfileDialog;

/// Terminal event of a dialog: one decision, then the dialog is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    /// The user confirmed; the payload carries the collected data.
    Accepted(T),
    /// The user backed out. Not an error.
    Cancelled,
}

/// A decision-collecting form hosted inside a modal overlay.
pub trait Dialog {
    /// Data the dialog collects.
    type Payload;

    /// Applies a key press; yields the terminal outcome when the dialog is
    /// done, `None` while it is still collecting input.
    fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome<Self::Payload>>;

    /// Content size in `(width, height)` terminal cells.
    fn preferred_size(&self) -> (u16, u16);

    /// Draws the dialog into the modal's content rectangle.
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme);
}

/// Requests dialog callbacks hand back to the main window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Navigate back to the welcome page (session torn down).
    ShowWelcomePage,
    /// Finish a registration that was gated behind the recaptcha dialog.
    CompleteRegistration,
}

/// Mutable state a dialog callback may act on.
///
/// Built from disjoint borrows of the main window, so callbacks never reach
/// for a global window instance. Page transitions are requested through
/// `actions` and applied by the window after the callback returns.
pub struct DialogContext<'a> {
    /// The chat page, target of most dialog results.
    pub chat: &'a mut ChatPage,
    /// The session handle.
    pub client: &'a mut ClientHandle,
    /// The persisted settings store.
    pub settings: &'a mut SettingsStore,
    /// Deferred window-level requests.
    pub actions: &'a mut Vec<AppAction>,
}

/// Callback registered when a dialog is opened, invoked at most once.
pub type DialogCallback<T> = Box<dyn FnOnce(T, &mut DialogContext<'_>)>;

/// One live `(dialog, modal)` pair owned by the main window.
pub struct ModalSlot<D: Dialog> {
    /// The hosted dialog.
    pub dialog: D,
    /// The wrapping overlay.
    pub modal: OverlayModal,
    callback: Option<DialogCallback<D::Payload>>,
}

impl<D: Dialog> ModalSlot<D> {
    /// Wraps `dialog` in a fresh modal sized to its content.
    pub fn new(dialog: D) -> Self {
        let (width, height) = dialog.preferred_size();
        Self {
            dialog,
            modal: OverlayModal::new(width, height),
            callback: None,
        }
    }

    /// Shows the modal and registers the callback for this open.
    pub fn open(&mut self, callback: impl FnOnce(D::Payload, &mut DialogContext<'_>) + 'static) {
        self.callback = Some(Box::new(callback));
        self.modal.show();
    }

    /// Shows the modal for a dialog that reports nothing back.
    pub fn open_without_callback(&mut self) {
        self.callback = None;
        self.modal.show();
    }

    /// Whether this slot's modal is currently visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.modal.is_visible()
    }

    /// Routes a key press to the dialog, falling back to the modal's own
    /// dismiss handling when the dialog leaves it unconsumed.
    ///
    /// `required` gates the callback: an accepted outcome whose payload
    /// fails the check hides the modal without invoking anything.
    ///
    /// Returns whether the key was consumed by this slot. While the modal is
    /// visible all keys are consumed; it blocks the page underneath.
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        ctx: &mut DialogContext<'_>,
        required: impl Fn(&D::Payload) -> bool,
    ) -> bool {
        if !self.modal.is_visible() {
            return false;
        }

        if let Some(outcome) = self.dialog.handle_key(key) {
            self.modal.hide();
            if let DialogOutcome::Accepted(payload) = outcome {
                if required(&payload) {
                    if let Some(callback) = self.callback.take() {
                        callback(payload, ctx);
                    }
                }
            }
            return true;
        }

        // Unconsumed key: give the overlay its dismiss gesture.
        let _ = self.modal.handle_key(key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Minimal dialog that accepts on Enter with a fixed payload and cancels
    /// on 'c'.
    struct Probe {
        payload: String,
    }

    impl Dialog for Probe {
        type Payload = String;

        fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome<String>> {
            match key.code {
                KeyCode::Enter => Some(DialogOutcome::Accepted(self.payload.clone())),
                KeyCode::Char('c') => Some(DialogOutcome::Cancelled),
                _ => None,
            }
        }

        fn preferred_size(&self) -> (u16, u16) {
            (20, 5)
        }

        fn render(&self, _area: Rect, _buf: &mut Buffer, _theme: &Theme) {}
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with_context<R>(f: impl FnOnce(&mut DialogContext<'_>) -> R) -> R {
        let dir = TempDir::new().unwrap();
        let mut chat = ChatPage::new();
        let mut client = ClientHandle::new();
        let mut settings = SettingsStore::empty(dir.path().join("settings.json"));
        let mut actions = Vec::new();
        let mut ctx = DialogContext {
            chat: &mut chat,
            client: &mut client,
            settings: &mut settings,
            actions: &mut actions,
        };
        f(&mut ctx)
    }

    #[test]
    fn accepted_payload_reaches_callback_once() {
        let mut slot = ModalSlot::new(Probe {
            payload: "!room:x".into(),
        });
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        slot.open(move |payload, _ctx| {
            assert_eq!(payload, "!room:x");
            seen.set(seen.get() + 1);
        });

        with_context(|ctx| {
            assert!(slot.handle_key(&key(KeyCode::Enter), ctx, |p| !p.is_empty()));
        });
        assert_eq!(calls.get(), 1);
        assert!(!slot.is_open());
    }

    #[test]
    fn cancelled_outcome_never_invokes_callback() {
        let mut slot = ModalSlot::new(Probe {
            payload: "!room:x".into(),
        });
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        slot.open(move |_, _| seen.set(seen.get() + 1));

        with_context(|ctx| {
            slot.handle_key(&key(KeyCode::Char('c')), ctx, |_| true);
        });
        assert_eq!(calls.get(), 0);
        assert!(!slot.is_open());
    }

    #[test]
    fn empty_required_payload_skips_callback_but_hides() {
        let mut slot = ModalSlot::new(Probe {
            payload: String::new(),
        });
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        slot.open(move |_, _| seen.set(seen.get() + 1));

        with_context(|ctx| {
            slot.handle_key(&key(KeyCode::Enter), ctx, |p| !p.is_empty());
        });
        assert_eq!(calls.get(), 0);
        assert!(!slot.is_open());
    }

    #[test]
    fn keys_are_swallowed_while_open() {
        let mut slot = ModalSlot::new(Probe {
            payload: String::new(),
        });
        slot.open_without_callback();
        with_context(|ctx| {
            assert!(slot.handle_key(&key(KeyCode::Char('x')), ctx, |_| true));
            assert!(slot.is_open());
        });
    }

    #[test]
    fn closed_slot_does_not_consume_keys() {
        let mut slot = ModalSlot::new(Probe {
            payload: String::new(),
        });
        with_context(|ctx| {
            assert!(!slot.handle_key(&key(KeyCode::Enter), ctx, |_| true));
        });
    }

    #[test]
    fn unconsumed_escape_falls_back_to_modal_dismissal() {
        let mut slot = ModalSlot::new(Probe {
            payload: String::new(),
        });
        slot.open_without_callback();
        with_context(|ctx| {
            assert!(slot.handle_key(&key(KeyCode::Esc), ctx, |_| true));
        });
        assert!(!slot.is_open());
    }
}
