//! Main window: page navigation, dialog lifecycle, and the progress
//! overlay.
//!
//! [`MainWindow`] is the controller behind the whole TUI. It owns the five
//! pages, at most one `(dialog, modal)` pair per dialog kind, the session
//! handle, and the settings store, and it is the only place state
//! transitions happen.
//!
//! # Navigation
//!
//! Exactly one of {welcome, login, register, chat, settings} is visible.
//! The window starts on chat when a stored session restores cleanly,
//! otherwise on welcome. Transitions are driven solely by typed page
//! events:
//!
//! ```text
//!             login ok / register ok
//! welcome --> login -----------------> chat <--> settings
//!    |   \                             |
//!    |    -> register ----------------/  (chat closing
//!    <-----------------------------------    -> welcome)
//! ```
//!
//! A successful login or registration persists the session credentials,
//! shows the progress overlay, switches to chat, resets the pre-session
//! pages, and bootstraps the chat page with the persisted credentials.
//!
//! # Dialogs
//!
//! Reusable dialogs are constructed on first open and shown thereafter;
//! parameterized dialogs (leave-room, member-list, room-settings) are
//! rebuilt on every open. Several dialog kinds may be open at once; keys go
//! to the most recently opened visible one. [`MainWindow::has_active_dialogs`]
//! reports whether any tracked modal is visible and gates the quick-switch
//! accelerator.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Paragraph, Widget};

use crate::client::{Authenticator, ClientHandle};
use crate::config::Config;
use crate::settings::{SettingsStore, KEY_SHOW_TIMESTAMPS, KEY_TYPING_NOTIFICATIONS};
use crate::tui::dialogs::{
    AppAction, CreateRoomDialog, Dialog, DialogContext, InviteUsersDialog, JoinRoomDialog,
    LeaveRoomDialog, LogoutDialog, MemberListDialog, ModalSlot, RecaptchaDialog,
    RoomSettingsDialog, UserProfileDialog,
};
use crate::tui::event::TuiEvent;
use crate::tui::overlay::{ContentAlignment, OverlayModal};
use crate::tui::pages::{
    ChatEvent, ChatPage, LoginEvent, LoginPage, LoginRequest, PrefToggle, RegisterEvent,
    RegisterPage, RegisterRequest, SettingsEvent, SettingsPage, WelcomeEvent, WelcomePage,
};
use crate::tui::scheduler::{Scheduler, TaskId, TaskKind};
use crate::tui::theme::Theme;

/// Delay between a completion event and the progress overlay actually
/// hiding. Smooths perceived latency on fast operations.
const PROGRESS_HIDE_DELAY: Duration = Duration::from_millis(500);

/// How long a transient chat status message lingers.
const STATUS_LINGER: Duration = Duration::from_secs(4);

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The currently visible page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Entry page offering login or registration.
    #[default]
    Welcome,
    /// Login form.
    Login,
    /// Registration form.
    Register,
    /// The chat view.
    Chat,
    /// Preferences, reachable only from chat.
    Settings,
}

/// One tracked dialog kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    JoinRoom,
    CreateRoom,
    InviteUsers,
    Logout,
    Recaptcha,
    LeaveRoom,
    MemberList,
    RoomSettings,
    UserProfile,
}

/// The five pages, all alive for the window's lifetime.
#[derive(Debug)]
pub struct Pages {
    pub welcome: WelcomePage,
    pub login: LoginPage,
    pub register: RegisterPage,
    pub chat: ChatPage,
    pub settings: SettingsPage,
}

impl Default for Pages {
    fn default() -> Self {
        Self {
            welcome: WelcomePage::new(),
            login: LoginPage::new(),
            register: RegisterPage::new(),
            chat: ChatPage::new(),
            settings: SettingsPage::new(),
        }
    }
}

/// Busy spinner inside a non-dismissible modal.
#[derive(Debug)]
pub struct ProgressOverlay {
    /// The wrapping modal; never dismissible.
    pub modal: OverlayModal,
    frame: usize,
}

impl ProgressOverlay {
    fn new(theme: &Theme) -> Self {
        let mut modal = OverlayModal::new(24, 5);
        modal.set_dismissible(false);
        modal.set_backdrop(theme.progress_backdrop);
        modal.show();
        Self { modal, frame: 0 }
    }

    /// Advances the spinner animation.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    /// Animation progress (test hook).
    #[must_use]
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Draws the spinner into the modal's content rectangle.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.modal.render_backdrop(area, buf);
        let content = self.modal.content_rect(area);
        let line = format!("{} loading", SPINNER_FRAMES[self.frame]);
        Paragraph::new(line)
            .style(theme.spinner)
            .alignment(Alignment::Center)
            .render(content, buf);
    }
}

/// Owned slots for every dialog kind plus the progress overlay.
#[derive(Default)]
pub struct DialogSet {
    pub join_room: Option<ModalSlot<JoinRoomDialog>>,
    pub create_room: Option<ModalSlot<CreateRoomDialog>>,
    pub invite_users: Option<ModalSlot<InviteUsersDialog>>,
    pub logout: Option<ModalSlot<LogoutDialog>>,
    pub recaptcha: Option<ModalSlot<RecaptchaDialog>>,
    pub leave_room: Option<ModalSlot<LeaveRoomDialog>>,
    pub member_list: Option<ModalSlot<MemberListDialog>>,
    pub room_settings: Option<ModalSlot<RoomSettingsDialog>>,
    pub user_profile: Option<ModalSlot<UserProfileDialog>>,
    pub progress: Option<ProgressOverlay>,
}

impl DialogSet {
    fn is_open(&self, kind: DialogKind) -> bool {
        match kind {
            DialogKind::JoinRoom => self.join_room.as_ref().is_some_and(|s| s.is_open()),
            DialogKind::CreateRoom => self.create_room.as_ref().is_some_and(|s| s.is_open()),
            DialogKind::InviteUsers => self.invite_users.as_ref().is_some_and(|s| s.is_open()),
            DialogKind::Logout => self.logout.as_ref().is_some_and(|s| s.is_open()),
            DialogKind::Recaptcha => self.recaptcha.as_ref().is_some_and(|s| s.is_open()),
            DialogKind::LeaveRoom => self.leave_room.as_ref().is_some_and(|s| s.is_open()),
            DialogKind::MemberList => self.member_list.as_ref().is_some_and(|s| s.is_open()),
            DialogKind::RoomSettings => self.room_settings.as_ref().is_some_and(|s| s.is_open()),
            DialogKind::UserProfile => self.user_profile.as_ref().is_some_and(|s| s.is_open()),
        }
    }

    fn progress_visible(&self) -> bool {
        self.progress
            .as_ref()
            .is_some_and(|overlay| overlay.modal.is_visible())
    }
}

/// The main window controller.
pub struct MainWindow {
    /// Page widgets.
    pub pages: Pages,
    /// Dialog slots.
    pub dialogs: DialogSet,
    /// Style set shared with every render call.
    pub theme: Theme,
    page: Page,
    dialog_order: Vec<DialogKind>,
    client: ClientHandle,
    settings: SettingsStore,
    auth: Box<dyn Authenticator>,
    scheduler: Scheduler,
    pending_progress_hide: Option<TaskId>,
    pending_status_clear: Option<TaskId>,
    last_status_generation: u64,
    pending_registration: Option<RegisterRequest>,
    actions: Vec<AppAction>,
    should_quit: bool,
    terminal_size: (u16, u16),
    preferred_size: (u16, u16),
}

impl MainWindow {
    /// Builds the window and restores any stored session.
    ///
    /// With all session keys present and a well-formed stored user id the
    /// window comes up on the chat page; a malformed stored user id is
    /// logged, the session is cleared, and the window comes up on welcome
    /// so the user re-authenticates.
    pub fn new(config: &Config, settings: SettingsStore, auth: Box<dyn Authenticator>) -> Self {
        let preferred_size = settings
            .window_size()
            .unwrap_or_else(|| config.default_window_size());

        let mut window = Self {
            pages: Pages::default(),
            dialogs: DialogSet::default(),
            theme: Theme::from_env(),
            page: Page::Welcome,
            dialog_order: Vec::new(),
            client: ClientHandle::new(),
            settings,
            auth,
            scheduler: Scheduler::new(),
            pending_progress_hide: None,
            pending_status_clear: None,
            last_status_generation: 0,
            pending_registration: None,
            actions: Vec::new(),
            should_quit: false,
            terminal_size: preferred_size,
            preferred_size,
        };
        window.restore_session(Instant::now());
        window
    }

    fn restore_session(&mut self, now: Instant) {
        if !self.settings.has_active_session() {
            return;
        }
        let Some(stored) = self.settings.stored_session() else {
            return;
        };
        match self.client.restore(&stored) {
            Ok(()) => {
                tracing::info!(user_id = %stored.user_id, "restored stored session");
                self.show_chat_page(now);
            }
            Err(err) => {
                tracing::error!(
                    user_id = %stored.user_id,
                    %err,
                    "stored session has a malformed user id; forcing re-authentication"
                );
                self.settings.clear_session();
                if let Err(save_err) = self.settings.save() {
                    tracing::warn!(%save_err, "failed to persist cleared session");
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The currently visible page.
    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    /// Whether the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Window size restored at startup, defaults applied.
    #[must_use]
    pub fn preferred_size(&self) -> (u16, u16) {
        self.preferred_size
    }

    /// Last observed terminal size.
    #[must_use]
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Seeds the terminal size before the first resize event.
    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// The session handle (test hook).
    #[must_use]
    pub fn client(&self) -> &ClientHandle {
        &self.client
    }

    /// The settings store.
    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// True iff at least one tracked modal, the progress overlay included,
    /// is currently visible.
    #[must_use]
    pub fn has_active_dialogs(&self) -> bool {
        self.dialogs.progress_visible()
            || self
                .dialog_order
                .iter()
                .any(|&kind| self.dialogs.is_open(kind))
    }

    /// Visible dialogs, oldest first. The render path draws them in this
    /// order so the most recently opened ends up on top.
    #[must_use]
    pub fn open_dialogs(&self) -> Vec<DialogKind> {
        self.dialog_order
            .iter()
            .copied()
            .filter(|&kind| self.dialogs.is_open(kind))
            .collect()
    }

    /// Saves the last observed terminal size for the next startup.
    ///
    /// # Errors
    ///
    /// Propagates settings persistence failures.
    pub fn persist_geometry(&mut self) -> Result<(), crate::settings::SettingsError> {
        let (width, height) = self.terminal_size;
        self.settings.set_window_size(width, height);
        self.settings.save()
    }

    // -------------------------------------------------------------------------
    // Event handling
    // -------------------------------------------------------------------------

    /// Applies one event from the pump.
    pub fn handle_event(&mut self, event: TuiEvent, now: Instant) {
        match event {
            TuiEvent::Tick => self.on_tick(now),
            TuiEvent::Key(key) => self.handle_key(key, now),
            TuiEvent::Mouse(mouse) => self.handle_mouse(mouse),
            TuiEvent::Resize(width, height) => self.terminal_size = (width, height),
        }
    }

    fn on_tick(&mut self, now: Instant) {
        if let Some(ref mut progress) = self.dialogs.progress {
            progress.tick();
        }

        for (id, kind) in self.scheduler.due(now) {
            match kind {
                TaskKind::HideProgress => {
                    // Stale fires (superseded by a newer show) are no-ops.
                    if self.pending_progress_hide == Some(id) {
                        self.pending_progress_hide = None;
                        self.dialogs.progress = None;
                    }
                }
                TaskKind::ClearStatus => {
                    if self.pending_status_clear == Some(id) {
                        self.pending_status_clear = None;
                        self.pages.chat.clear_status();
                    }
                }
            }
        }

        self.refresh_status_expiry(now);
    }

    fn refresh_status_expiry(&mut self, now: Instant) {
        let generation = self.pages.chat.status_generation();
        if generation == self.last_status_generation {
            return;
        }
        self.last_status_generation = generation;
        if let Some(id) = self.pending_status_clear.take() {
            self.scheduler.cancel(id);
        }
        if self.pages.chat.status().is_some() {
            self.pending_status_clear =
                Some(self.scheduler.schedule(TaskKind::ClearStatus, STATUS_LINGER, now));
        }
    }

    /// Routes a key press to the progress overlay, the top dialog, or the
    /// active page, in that order.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        // Quick switch, suppressed while any dialog is up.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('k') {
            if self.page == Page::Chat && !self.has_active_dialogs() {
                self.pages.chat.open_quick_switcher();
            }
            return;
        }

        // The progress modal blocks all input while visible.
        if self.dialogs.progress_visible() {
            return;
        }

        if let Some(kind) = self.top_open_dialog() {
            self.route_dialog_key(kind, &key);
            self.process_actions(now);
            self.prune_dialog_order();
            return;
        }

        self.route_page_key(&key, now);
        self.process_actions(now);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        let area = self.frame_rect();

        if let Some(ref mut progress) = self.dialogs.progress {
            if progress.modal.is_visible() {
                // Never dismissible; the click is simply swallowed.
                let _ = progress.modal.handle_click(mouse.column, mouse.row, area);
                return;
            }
        }

        if let Some(kind) = self.top_open_dialog() {
            let dialogs = &mut self.dialogs;
            match kind {
                DialogKind::JoinRoom => click_slot(&mut dialogs.join_room, &mouse, area),
                DialogKind::CreateRoom => click_slot(&mut dialogs.create_room, &mouse, area),
                DialogKind::InviteUsers => click_slot(&mut dialogs.invite_users, &mouse, area),
                DialogKind::Logout => click_slot(&mut dialogs.logout, &mouse, area),
                DialogKind::Recaptcha => click_slot(&mut dialogs.recaptcha, &mouse, area),
                DialogKind::LeaveRoom => click_slot(&mut dialogs.leave_room, &mouse, area),
                DialogKind::MemberList => click_slot(&mut dialogs.member_list, &mouse, area),
                DialogKind::RoomSettings => click_slot(&mut dialogs.room_settings, &mouse, area),
                DialogKind::UserProfile => click_slot(&mut dialogs.user_profile, &mouse, area),
            }
            self.prune_dialog_order();
        }
    }

    fn frame_rect(&self) -> Rect {
        Rect::new(0, 0, self.terminal_size.0, self.terminal_size.1)
    }

    fn top_open_dialog(&mut self) -> Option<DialogKind> {
        while let Some(&kind) = self.dialog_order.last() {
            if self.dialogs.is_open(kind) {
                return Some(kind);
            }
            self.dialog_order.pop();
        }
        None
    }

    fn prune_dialog_order(&mut self) {
        let dialogs = &self.dialogs;
        self.dialog_order.retain(|&kind| dialogs.is_open(kind));
    }

    fn note_opened(&mut self, kind: DialogKind) {
        self.dialog_order.retain(|&k| k != kind);
        self.dialog_order.push(kind);
    }

    fn route_dialog_key(&mut self, kind: DialogKind, key: &KeyEvent) {
        let Self {
            pages,
            dialogs,
            client,
            settings,
            actions,
            ..
        } = self;
        let mut ctx = DialogContext {
            chat: &mut pages.chat,
            client,
            settings,
            actions,
        };
        match kind {
            DialogKind::JoinRoom => {
                if let Some(slot) = dialogs.join_room.as_mut() {
                    slot.handle_key(key, &mut ctx, |room| !room.is_empty());
                }
            }
            DialogKind::CreateRoom => {
                if let Some(slot) = dialogs.create_room.as_mut() {
                    slot.handle_key(key, &mut ctx, |_| true);
                }
            }
            DialogKind::InviteUsers => {
                if let Some(slot) = dialogs.invite_users.as_mut() {
                    slot.handle_key(key, &mut ctx, |invitees| !invitees.is_empty());
                }
            }
            DialogKind::Logout => {
                if let Some(slot) = dialogs.logout.as_mut() {
                    slot.handle_key(key, &mut ctx, |_| true);
                }
            }
            DialogKind::Recaptcha => {
                if let Some(slot) = dialogs.recaptcha.as_mut() {
                    slot.handle_key(key, &mut ctx, |_| true);
                }
            }
            DialogKind::LeaveRoom => {
                if let Some(slot) = dialogs.leave_room.as_mut() {
                    slot.handle_key(key, &mut ctx, |_| true);
                }
            }
            DialogKind::MemberList => {
                if let Some(slot) = dialogs.member_list.as_mut() {
                    slot.handle_key(key, &mut ctx, |_| true);
                }
            }
            DialogKind::RoomSettings => {
                if let Some(slot) = dialogs.room_settings.as_mut() {
                    slot.handle_key(key, &mut ctx, |update| !update.name.is_empty());
                }
            }
            DialogKind::UserProfile => {
                if let Some(slot) = dialogs.user_profile.as_mut() {
                    slot.handle_key(key, &mut ctx, |_| true);
                }
            }
        }
    }

    fn process_actions(&mut self, now: Instant) {
        let actions = std::mem::take(&mut self.actions);
        for action in actions {
            match action {
                AppAction::ShowWelcomePage => self.show_welcome_page(),
                AppAction::CompleteRegistration => self.complete_registration(now),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Page navigation
    // -------------------------------------------------------------------------

    fn route_page_key(&mut self, key: &KeyEvent, now: Instant) {
        match self.page {
            Page::Welcome => {
                if let Some(event) = self.pages.welcome.handle_key(key) {
                    match event {
                        WelcomeEvent::Login => self.page = Page::Login,
                        WelcomeEvent::Register => self.page = Page::Register,
                    }
                }
            }
            Page::Login => {
                if let Some(event) = self.pages.login.handle_key(key) {
                    match event {
                        LoginEvent::Back => self.page = Page::Welcome,
                        LoginEvent::Submit(request) => self.submit_login(request, now),
                    }
                }
            }
            Page::Register => {
                if let Some(event) = self.pages.register.handle_key(key) {
                    match event {
                        RegisterEvent::Back => self.page = Page::Welcome,
                        RegisterEvent::Submit(request) => self.submit_registration(request),
                    }
                }
            }
            Page::Chat => {
                if let Some(event) = self.pages.chat.handle_key(key) {
                    self.handle_chat_event(event);
                }
            }
            Page::Settings => {
                if let Some(event) = self.pages.settings.handle_key(key) {
                    match event {
                        SettingsEvent::Back => self.page = Page::Chat,
                        SettingsEvent::Toggled(toggle, value) => self.apply_pref(toggle, value),
                    }
                }
            }
        }
    }

    fn handle_chat_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::OpenJoinRoom => self.open_join_room_dialog(),
            ChatEvent::OpenCreateRoom => self.open_create_room_dialog(),
            ChatEvent::OpenInviteUsers => self.open_invite_users_dialog(),
            ChatEvent::OpenLogout => self.open_logout_dialog(),
            ChatEvent::OpenLeaveRoom(room_id) => self.open_leave_room_dialog(Some(room_id)),
            ChatEvent::OpenMemberList(room_id) => self.open_member_list_dialog(Some(room_id)),
            ChatEvent::OpenRoomSettings(room_id) => self.open_room_settings_dialog(Some(room_id)),
            ChatEvent::OpenUserProfile { user_id, room_id } => {
                self.open_user_profile(&user_id, &room_id);
            }
            ChatEvent::ShowSettings => self.show_settings_page(),
        }
    }

    fn submit_login(&mut self, request: LoginRequest, now: Instant) {
        self.show_overlay_progress();
        match self
            .auth
            .login(&request.homeserver, &request.user_id, &request.password)
        {
            Ok(session) => {
                self.client.adopt(&session);
                self.show_chat_page(now);
            }
            Err(err) => {
                tracing::warn!(%err, "login failed");
                self.pages.login.set_error(err.to_string());
                self.remove_overlay_progress(now);
            }
        }
    }

    fn submit_registration(&mut self, request: RegisterRequest) {
        // The captcha verification dialog gates the actual registration.
        let homeserver = request.homeserver.clone();
        self.pending_registration = Some(request);
        self.open_recaptcha_dialog(&homeserver);
    }

    fn complete_registration(&mut self, now: Instant) {
        let Some(request) = self.pending_registration.take() else {
            return;
        };
        self.show_overlay_progress();
        match self
            .auth
            .register(&request.homeserver, &request.username, &request.password)
        {
            Ok(session) => {
                self.client.adopt(&session);
                self.show_chat_page(now);
            }
            Err(err) => {
                tracing::warn!(%err, "registration failed");
                self.pages.register.set_error(err.to_string());
                self.remove_overlay_progress(now);
            }
        }
    }

    /// Persists the established session and switches to the chat page.
    fn show_chat_page(&mut self, now: Instant) {
        let Some(session) = self.client.session() else {
            tracing::warn!("chat page requested without an established session");
            return;
        };

        self.settings.set_session(&session);
        if let Err(err) = self.settings.save() {
            tracing::warn!(%err, "failed to persist session credentials");
        }

        self.show_overlay_progress();
        self.page = Page::Chat;

        // The pre-session pages are done until the next logout.
        self.pages.login.reset();
        self.pages.register.reset();

        self.pages
            .chat
            .set_show_timestamps(self.settings.flag(KEY_SHOW_TIMESTAMPS, true));
        self.pages.chat.bootstrap(session);

        // Local bootstrap finishes synchronously; schedule the smoothing
        // hide right away.
        self.remove_overlay_progress(now);
    }

    fn show_welcome_page(&mut self) {
        self.page = Page::Welcome;
    }

    fn show_settings_page(&mut self) {
        self.pages.settings.load(
            self.settings.flag(KEY_SHOW_TIMESTAMPS, true),
            self.settings.flag(KEY_TYPING_NOTIFICATIONS, true),
        );
        self.page = Page::Settings;
    }

    fn apply_pref(&mut self, toggle: PrefToggle, value: bool) {
        let key = match toggle {
            PrefToggle::ShowTimestamps => {
                self.pages.chat.set_show_timestamps(value);
                KEY_SHOW_TIMESTAMPS
            }
            PrefToggle::TypingNotifications => KEY_TYPING_NOTIFICATIONS,
        };
        self.settings.set_flag(key, value);
        if let Err(err) = self.settings.save() {
            tracing::warn!(%err, "failed to persist preference");
        }
    }

    // -------------------------------------------------------------------------
    // Progress overlay
    // -------------------------------------------------------------------------

    /// Shows the busy overlay. A second call while it is already up is a
    /// no-op apart from invalidating a pending delayed hide.
    pub fn show_overlay_progress(&mut self) {
        if let Some(id) = self.pending_progress_hide.take() {
            self.scheduler.cancel(id);
        }
        if self.dialogs.progress.is_none() {
            self.dialogs.progress = Some(ProgressOverlay::new(&self.theme));
        }
    }

    /// Schedules the overlay to disappear after the smoothing delay.
    pub fn remove_overlay_progress(&mut self, now: Instant) {
        if self.dialogs.progress.is_none() {
            return;
        }
        if let Some(id) = self.pending_progress_hide.take() {
            self.scheduler.cancel(id);
        }
        self.pending_progress_hide =
            Some(self.scheduler.schedule(TaskKind::HideProgress, PROGRESS_HIDE_DELAY, now));
    }

    // -------------------------------------------------------------------------
    // Dialog openers
    // -------------------------------------------------------------------------

    /// Opens the join-room dialog; the accepted room id is joined on the
    /// chat page.
    pub fn open_join_room_dialog(&mut self) {
        let theme = self.theme.modal_backdrop;
        let slot = self
            .dialogs
            .join_room
            .get_or_insert_with(|| ModalSlot::new(JoinRoomDialog::new()));
        slot.modal.set_backdrop(theme);
        slot.open(|room, ctx| ctx.chat.join_room(room));
        self.note_opened(DialogKind::JoinRoom);
    }

    /// Opens the create-room dialog.
    pub fn open_create_room_dialog(&mut self) {
        let theme = self.theme.modal_backdrop;
        let slot = self
            .dialogs
            .create_room
            .get_or_insert_with(|| ModalSlot::new(CreateRoomDialog::new()));
        slot.modal.set_backdrop(theme);
        slot.open(|request, ctx| ctx.chat.create_room(request));
        self.note_opened(DialogKind::CreateRoom);
    }

    /// Opens the invite-users dialog targeting the current room.
    pub fn open_invite_users_dialog(&mut self) {
        let theme = self.theme.modal_backdrop;
        let slot = self
            .dialogs
            .invite_users
            .get_or_insert_with(|| ModalSlot::new(InviteUsersDialog::new()));
        slot.modal.set_backdrop(theme);
        slot.open(|invitees, ctx| ctx.chat.invite_users(invitees));
        self.note_opened(DialogKind::InviteUsers);
    }

    /// Opens the logout confirmation. Acceptance tears the session down and
    /// returns to the welcome page.
    pub fn open_logout_dialog(&mut self) {
        let theme = self.theme.modal_backdrop;
        let slot = self
            .dialogs
            .logout
            .get_or_insert_with(|| ModalSlot::new(LogoutDialog::new()));
        slot.modal.set_backdrop(theme);
        slot.open(|(), ctx| {
            ctx.settings.clear_session();
            if let Err(err) = ctx.settings.save() {
                tracing::warn!(%err, "failed to persist cleared session");
            }
            ctx.client.clear();
            ctx.chat.reset();
            ctx.actions.push(AppAction::ShowWelcomePage);
        });
        self.note_opened(DialogKind::Logout);
    }

    /// Opens the captcha verification dialog for a registration attempt.
    fn open_recaptcha_dialog(&mut self, homeserver: &str) {
        let theme = self.theme.modal_backdrop;
        let session_tag = format!("reg{:08x}", (homeserver.len() as u32).wrapping_mul(2_654_435_761));
        let mut slot = ModalSlot::new(RecaptchaDialog::new(homeserver, &session_tag));
        slot.modal.set_backdrop(theme);
        slot.open(|(), ctx| ctx.actions.push(AppAction::CompleteRegistration));
        self.dialogs.recaptcha = Some(slot);
        self.note_opened(DialogKind::Recaptcha);
    }

    /// Opens the leave-room confirmation, rebuilt per open for its target.
    ///
    /// With no explicit room the currently selected one is used, matching
    /// the chat page's accelerator.
    pub fn open_leave_room_dialog(&mut self, room_id: Option<String>) {
        let Some(room_id) = room_id.or_else(|| self.pages.chat.current_room_id()) else {
            return;
        };
        let display_name = self
            .pages
            .chat
            .rooms()
            .iter()
            .find(|room| room.id == room_id)
            .map_or_else(|| room_id.clone(), |room| room.name.clone());

        let mut slot = ModalSlot::new(LeaveRoomDialog::new(display_name));
        slot.modal.set_backdrop(self.theme.modal_backdrop);
        let target = room_id;
        slot.open(move |(), ctx| ctx.chat.leave_room(&target));
        self.dialogs.leave_room = Some(slot);
        self.note_opened(DialogKind::LeaveRoom);
    }

    /// Opens the member list, rebuilt per open for its target room.
    pub fn open_member_list_dialog(&mut self, room_id: Option<String>) {
        let Some(room_id) = room_id.or_else(|| self.pages.chat.current_room_id()) else {
            return;
        };
        let Some(room) = self.pages.chat.rooms().iter().find(|room| room.id == room_id) else {
            return;
        };

        let mut slot = ModalSlot::new(MemberListDialog::new(room.name.clone(), room.members.clone()));
        slot.modal.set_backdrop(self.theme.modal_backdrop);
        slot.open_without_callback();
        self.dialogs.member_list = Some(slot);
        self.note_opened(DialogKind::MemberList);
    }

    /// Opens room settings, rebuilt per open with the room's current
    /// values; accepted edits are applied to the chat page.
    pub fn open_room_settings_dialog(&mut self, room_id: Option<String>) {
        let Some(room_id) = room_id.or_else(|| self.pages.chat.current_room_id()) else {
            return;
        };
        let Some(room) = self.pages.chat.rooms().iter().find(|room| room.id == room_id) else {
            return;
        };

        let mut slot = ModalSlot::new(RoomSettingsDialog::new(
            room.id.clone(),
            room.name.clone(),
            room.topic.clone(),
        ));
        slot.modal.set_backdrop(self.theme.modal_backdrop);
        let target = room_id;
        slot.open(move |update, ctx| ctx.chat.apply_room_settings(&target, update));
        self.dialogs.room_settings = Some(slot);
        self.note_opened(DialogKind::RoomSettings);
    }

    /// Opens the profile card, reusing the retained dialog re-targeted at
    /// `user_id`.
    pub fn open_user_profile(&mut self, user_id: &str, room_id: &str) {
        let theme = self.theme.modal_backdrop;
        let slot = self
            .dialogs
            .user_profile
            .get_or_insert_with(|| ModalSlot::new(UserProfileDialog::new()));
        slot.dialog.init(user_id, room_id);
        slot.modal.set_backdrop(theme);
        slot.modal.set_alignment(ContentAlignment::TopCenter);
        slot.open_without_callback();
        self.note_opened(DialogKind::UserProfile);
    }
}

fn click_slot<D: Dialog>(slot: &mut Option<ModalSlot<D>>, mouse: &MouseEvent, area: Rect) {
    if let Some(slot) = slot.as_mut() {
        let _ = slot.modal.handle_click(mouse.column, mouse.row, area);
    }
}
