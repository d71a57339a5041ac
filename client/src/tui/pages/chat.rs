//! Chat page: room list, timeline, message input, and the accelerators
//! that open the window's dialogs.
//!
//! The page owns only presentation state. Room membership changes arrive
//! through the window's dialog callbacks (`join_room`, `leave_room`, ...);
//! the page itself emits [`ChatEvent`]s asking the window to open dialogs
//! or switch pages.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::client::Session;
use crate::tui::dialogs::{CreateRoomRequest, RoomSettingsUpdate};
use crate::tui::emoji::{EmojiEvent, EmojiPicker, PANEL_HEIGHT, PANEL_WIDTH};
use crate::tui::input::TextInput;
use crate::tui::theme::Theme;

const SIDEBAR_WIDTH: u16 = 26;
const QUICK_SWITCH_WIDTH: u16 = 40;
const QUICK_SWITCH_HEIGHT: u16 = 8;

/// Requests the chat page hands to the main window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Open the join-room dialog.
    OpenJoinRoom,
    /// Open the create-room dialog.
    OpenCreateRoom,
    /// Open the invite-users dialog for the current room.
    OpenInviteUsers,
    /// Open the logout confirmation.
    OpenLogout,
    /// Open the leave-room confirmation for the given room.
    OpenLeaveRoom(String),
    /// Open the member list for the given room.
    OpenMemberList(String),
    /// Open room settings for the given room.
    OpenRoomSettings(String),
    /// Open the profile card of a user seen in a room.
    OpenUserProfile {
        /// User to show.
        user_id: String,
        /// Room the user was seen in.
        room_id: String,
    },
    /// Switch to the settings page.
    ShowSettings,
}

/// One joined room as the sidebar shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Room id or alias.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Topic line.
    pub topic: String,
    /// Known members.
    pub members: Vec<String>,
    /// Unread message counter.
    pub unread: u64,
}

/// One timeline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sender user id.
    pub sender: String,
    /// Message body.
    pub body: String,
    /// Local arrival time.
    pub at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ChatFocus {
    #[default]
    Rooms,
    Input,
}

#[derive(Debug, Default)]
struct QuickSwitcher {
    filter: TextInput,
}

/// The chat page.
#[derive(Debug, Default)]
pub struct ChatPage {
    session: Option<Session>,
    rooms: Vec<Room>,
    selected_room: usize,
    messages: HashMap<String, Vec<Message>>,
    input: TextInput,
    focus: ChatFocus,
    status: Option<String>,
    status_generation: u64,
    quick_switcher: Option<QuickSwitcher>,
    emoji_picker: Option<EmojiPicker>,
    show_timestamps: bool,
}

impl ChatPage {
    /// Creates an empty, un-bootstrapped page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_timestamps: true,
            ..Self::default()
        }
    }

    /// Brings the page up for an established session.
    ///
    /// Called by the window right after the session credentials have been
    /// persisted; until then the page renders nothing meaningful.
    pub fn bootstrap(&mut self, session: Session) {
        self.set_status(format!("signed in as {}", session.user_id));
        self.session = Some(session);
    }

    /// Drops all per-session state, ready for the next login.
    pub fn reset(&mut self) {
        let show_timestamps = self.show_timestamps;
        *self = Self::new();
        self.show_timestamps = show_timestamps;
    }

    /// Whether [`ChatPage::bootstrap`] has run since the last reset.
    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        self.session.is_some()
    }

    /// Applies the timestamp preference from the settings page.
    pub fn set_show_timestamps(&mut self, show: bool) {
        self.show_timestamps = show;
    }

    /// Rooms in sidebar order (test hook).
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The currently selected room.
    #[must_use]
    pub fn current_room(&self) -> Option<&Room> {
        self.rooms.get(self.selected_room)
    }

    /// Id of the currently selected room.
    #[must_use]
    pub fn current_room_id(&self) -> Option<String> {
        self.current_room().map(|room| room.id.clone())
    }

    // -------------------------------------------------------------------------
    // Mutations driven by dialog callbacks
    // -------------------------------------------------------------------------

    /// Joins `room_id`, selecting it; a re-join only selects.
    pub fn join_room(&mut self, room_id: String) {
        if let Some(index) = self.rooms.iter().position(|room| room.id == room_id) {
            self.selected_room = index;
        } else {
            let own = self.own_user_id();
            self.rooms.push(Room {
                name: room_id.clone(),
                topic: String::new(),
                members: vec![own],
                unread: 0,
                id: room_id.clone(),
            });
            self.selected_room = self.rooms.len() - 1;
        }
        self.set_status(format!("joined {room_id}"));
    }

    /// Creates a room from the dialog request and selects it.
    pub fn create_room(&mut self, request: CreateRoomRequest) {
        let server = self
            .session
            .as_ref()
            .map_or_else(|| "localhost".to_string(), |s| s.user_id.server_name().to_string());
        let slug: String = request
            .name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase();
        let id = format!("!{slug}:{server}");
        self.rooms.push(Room {
            id: id.clone(),
            name: request.name,
            topic: request.topic,
            members: vec![self.own_user_id()],
            unread: 0,
        });
        self.selected_room = self.rooms.len() - 1;
        self.set_status(format!("created {id}"));
    }

    /// Leaves `room_id`, dropping its timeline.
    pub fn leave_room(&mut self, room_id: &str) {
        if let Some(index) = self.rooms.iter().position(|room| room.id == room_id) {
            self.rooms.remove(index);
            self.messages.remove(room_id);
            if self.selected_room >= self.rooms.len() {
                self.selected_room = self.rooms.len().saturating_sub(1);
            }
            self.set_status(format!("left {room_id}"));
        }
    }

    /// Adds invitees to the current room's member list.
    pub fn invite_users(&mut self, invitees: Vec<String>) {
        let count = invitees.len();
        if let Some(room) = self.rooms.get_mut(self.selected_room) {
            for invitee in invitees {
                if !room.members.contains(&invitee) {
                    room.members.push(invitee);
                }
            }
        }
        self.set_status(format!("invited {count} user(s)"));
    }

    /// Applies edits from the room-settings dialog.
    pub fn apply_room_settings(&mut self, room_id: &str, update: RoomSettingsUpdate) {
        if let Some(room) = self.rooms.iter_mut().find(|room| room.id == room_id) {
            room.name = update.name;
            room.topic = update.topic;
        }
    }

    // -------------------------------------------------------------------------
    // Transient status line (snack bar)
    // -------------------------------------------------------------------------

    /// Shows a transient status message.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(text.into());
        self.status_generation += 1;
    }

    /// Clears the transient status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Current status message (test hook).
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Monotonic counter bumped by every [`ChatPage::set_status`], letting
    /// the window refresh its expiry timer only on change.
    #[must_use]
    pub fn status_generation(&self) -> u64 {
        self.status_generation
    }

    // -------------------------------------------------------------------------
    // Quick switcher
    // -------------------------------------------------------------------------

    /// Opens the quick switcher. The window gates this on no dialog being
    /// active.
    pub fn open_quick_switcher(&mut self) {
        self.quick_switcher = Some(QuickSwitcher::default());
    }

    /// Whether the quick switcher popup is open.
    #[must_use]
    pub fn quick_switcher_open(&self) -> bool {
        self.quick_switcher.is_some()
    }

    fn quick_switch_matches(&self, filter: &str) -> Vec<usize> {
        let needle = filter.to_lowercase();
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| {
                room.name.to_lowercase().contains(&needle)
                    || room.id.to_lowercase().contains(&needle)
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn own_user_id(&self) -> String {
        self.session
            .as_ref()
            .map_or_else(|| "@me:localhost".to_string(), |s| s.user_id.to_string())
    }

    fn send_message(&mut self) {
        let body = self.input.value().trim().to_string();
        if body.is_empty() {
            return;
        }
        let sender = self.own_user_id();
        if let Some(room) = self.rooms.get(self.selected_room) {
            self.messages.entry(room.id.clone()).or_default().push(Message {
                sender,
                body,
                at: Local::now(),
            });
            self.input.clear();
        } else {
            self.set_status("join a room first".to_string());
        }
    }

    // -------------------------------------------------------------------------
    // Input handling
    // -------------------------------------------------------------------------

    /// Handles a key press, yielding a request for the window when one is
    /// made.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<ChatEvent> {
        // Popups first: they capture all input while open.
        if let Some(ref mut picker) = self.emoji_picker {
            match picker.handle_key(key) {
                Some(EmojiEvent::Selected(emoji)) => {
                    let mut value = self.input.value().to_string();
                    value.push_str(emoji);
                    self.input.set_value(value);
                    self.emoji_picker = None;
                    self.focus = ChatFocus::Input;
                }
                Some(EmojiEvent::Closed) => self.emoji_picker = None,
                None => {}
            }
            return None;
        }
        if self.quick_switcher.is_some() {
            return self.handle_quick_switcher_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('j') => return Some(ChatEvent::OpenJoinRoom),
                KeyCode::Char('n') => return Some(ChatEvent::OpenCreateRoom),
                KeyCode::Char('i') => return Some(ChatEvent::OpenInviteUsers),
                KeyCode::Char('x') => return Some(ChatEvent::OpenLogout),
                KeyCode::Char('d') => {
                    return self.current_room_id().map(ChatEvent::OpenLeaveRoom);
                }
                KeyCode::Char('s') => return Some(ChatEvent::ShowSettings),
                KeyCode::Char('e') => {
                    self.emoji_picker = Some(EmojiPicker::new());
                    return None;
                }
                _ => return None,
            }
        }

        match key.code {
            KeyCode::F(2) => return self.current_room_id().map(ChatEvent::OpenMemberList),
            KeyCode::F(3) => return self.current_room_id().map(ChatEvent::OpenRoomSettings),
            KeyCode::F(4) => {
                let room_id = self.current_room_id()?;
                let user_id = self
                    .messages
                    .get(&room_id)
                    .and_then(|timeline| timeline.last())
                    .map_or_else(|| self.own_user_id(), |message| message.sender.clone());
                return Some(ChatEvent::OpenUserProfile { user_id, room_id });
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    ChatFocus::Rooms => ChatFocus::Input,
                    ChatFocus::Input => ChatFocus::Rooms,
                };
            }
            KeyCode::Up if self.focus == ChatFocus::Rooms => {
                self.selected_room = self.selected_room.saturating_sub(1);
            }
            KeyCode::Down if self.focus == ChatFocus::Rooms => {
                if !self.rooms.is_empty() {
                    self.selected_room = (self.selected_room + 1).min(self.rooms.len() - 1);
                }
            }
            KeyCode::Enter if self.focus == ChatFocus::Input => self.send_message(),
            _ if self.focus == ChatFocus::Input => {
                self.input.handle_key(key);
            }
            _ => {}
        }
        None
    }

    fn handle_quick_switcher_key(&mut self, key: &KeyEvent) -> Option<ChatEvent> {
        let switcher = self.quick_switcher.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.quick_switcher = None;
            }
            KeyCode::Enter => {
                let filter = switcher.filter.value().to_string();
                if let Some(&index) = self.quick_switch_matches(&filter).first() {
                    self.selected_room = index;
                }
                self.quick_switcher = None;
            }
            _ => {
                switcher.filter.handle_key(key);
            }
        }
        None
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Renders the page into the full frame area.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_header(rows[0], buf, theme);

        let columns = Layout::horizontal([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Min(10),
        ])
        .split(rows[1]);
        self.render_sidebar(columns[0], buf, theme);
        self.render_timeline(columns[1], buf, theme);

        self.render_input(rows[2], buf, theme);
        self.render_footer(rows[3], buf, theme);

        if let Some(ref picker) = self.emoji_picker {
            let panel = emoji_panel_rect(rows[2], area);
            Clear.render(panel, buf);
            picker.render(panel, buf, theme);
        }
        if self.quick_switcher.is_some() {
            self.render_quick_switcher(area, buf, theme);
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let mut spans = vec![Span::styled(
            self.current_room()
                .map_or_else(|| "no room".to_string(), |room| room.name.clone()),
            theme.title,
        )];
        if let Some(room) = self.current_room() {
            if !room.topic.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(room.topic.clone(), theme.text_muted));
            }
        }
        Paragraph::new(Line::from(spans)).render(area, buf);

        if let Some(ref status) = self.status {
            Paragraph::new(Line::styled(status.clone(), theme.status))
                .alignment(Alignment::Right)
                .render(area, buf);
        }
    }

    fn render_sidebar(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let border = if self.focus == ChatFocus::Rooms {
            theme.border_focused
        } else {
            theme.border
        };
        let block = Block::default()
            .title(" Rooms ")
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .rooms
            .iter()
            .enumerate()
            .map(|(index, room)| {
                let style = if index == self.selected_room {
                    theme.room_selected
                } else if room.unread > 0 {
                    theme.room_unread
                } else {
                    theme.text_primary
                };
                let marker = if index == self.selected_room { "> " } else { "  " };
                Line::styled(format!("{marker}{}", room.name), style)
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }

    fn render_timeline(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(room) = self.current_room() else {
            Paragraph::new("Join a room to start talking (Ctrl+J)")
                .style(theme.text_muted)
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        };

        let timeline = self.messages.get(&room.id).map_or(&[][..], Vec::as_slice);
        let visible = timeline
            .iter()
            .rev()
            .take(inner.height as usize)
            .rev();
        let lines: Vec<Line> = visible
            .map(|message| {
                let mut spans = Vec::new();
                if self.show_timestamps {
                    spans.push(Span::styled(
                        message.at.format("%H:%M ").to_string(),
                        theme.timestamp,
                    ));
                }
                spans.push(Span::styled(format!("{}: ", message.sender), theme.sender));
                spans.push(Span::styled(message.body.clone(), theme.text_primary));
                Line::from(spans)
            })
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let border = if self.focus == ChatFocus::Input {
            theme.border_focused
        } else {
            theme.border
        };
        let block = Block::default().borders(Borders::ALL).border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(self.input.display(self.focus == ChatFocus::Input))
            .style(theme.text_primary)
            .render(inner, buf);
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        Paragraph::new(Line::styled(
            "^K switch  ^J join  ^N new  ^I invite  ^D leave  ^E emoji  ^S settings  ^X logout  F2 members  F3 room  F4 profile",
            theme.text_muted,
        ))
        .render(area, buf);
    }

    fn render_quick_switcher(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let Some(ref switcher) = self.quick_switcher else {
            return;
        };
        let width = QUICK_SWITCH_WIDTH.min(area.width);
        let height = QUICK_SWITCH_HEIGHT.min(area.height);
        let popup = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + area.height / 4,
            width,
            height,
        );
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Switch Room ")
            .borders(Borders::ALL)
            .border_style(theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::styled(
            switcher.filter.display(true),
            theme.input_focused,
        )];
        for index in self
            .quick_switch_matches(switcher.filter.value())
            .into_iter()
            .take(inner.height.saturating_sub(1) as usize)
        {
            lines.push(Line::styled(
                self.rooms[index].name.clone(),
                theme.text_secondary,
            ));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Anchors the emoji panel just above the input, right-aligned.
fn emoji_panel_rect(input_area: Rect, frame: Rect) -> Rect {
    let width = PANEL_WIDTH.min(frame.width);
    let height = PANEL_HEIGHT.min(frame.height);
    let x = (input_area.x + input_area.width).saturating_sub(width).max(frame.x);
    let y = input_area.y.saturating_sub(height).max(frame.y);
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::UserId;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn bootstrapped() -> ChatPage {
        let mut page = ChatPage::new();
        page.bootstrap(Session {
            user_id: "@alice:example.org".parse::<UserId>().unwrap(),
            device_id: "DEV".into(),
            home_server: "example.org:443".into(),
            access_token: "t".into(),
        });
        page
    }

    #[test]
    fn bootstrap_sets_session_and_status() {
        let page = bootstrapped();
        assert!(page.is_bootstrapped());
        assert_eq!(page.status(), Some("signed in as @alice:example.org"));
    }

    #[test]
    fn join_room_adds_and_selects() {
        let mut page = bootstrapped();
        page.join_room("#rust:example.org".to_string());
        page.join_room("#go:example.org".to_string());
        assert_eq!(page.rooms().len(), 2);
        assert_eq!(page.current_room_id().unwrap(), "#go:example.org");

        // Re-joining only reselects.
        page.join_room("#rust:example.org".to_string());
        assert_eq!(page.rooms().len(), 2);
        assert_eq!(page.current_room_id().unwrap(), "#rust:example.org");
    }

    #[test]
    fn create_room_derives_id_from_name_and_server() {
        let mut page = bootstrapped();
        page.create_room(CreateRoomRequest {
            name: "Rust Fans".into(),
            topic: "all things rust".into(),
            public: true,
        });
        assert_eq!(page.current_room_id().unwrap(), "!rustfans:example.org");
        assert_eq!(page.current_room().unwrap().topic, "all things rust");
    }

    #[test]
    fn leave_room_drops_room_and_timeline() {
        let mut page = bootstrapped();
        page.join_room("#a:x".to_string());
        page.join_room("#b:x".to_string());
        page.leave_room("#b:x");
        assert_eq!(page.rooms().len(), 1);
        assert_eq!(page.current_room_id().unwrap(), "#a:x");
    }

    #[test]
    fn invite_users_extends_member_list_without_duplicates() {
        let mut page = bootstrapped();
        page.join_room("#a:x".to_string());
        page.invite_users(vec!["@bob:x".into(), "@bob:x".into(), "@carol:x".into()]);
        let members = &page.current_room().unwrap().members;
        assert!(members.contains(&"@bob:x".to_string()));
        assert!(members.contains(&"@carol:x".to_string()));
        assert_eq!(members.iter().filter(|m| m.as_str() == "@bob:x").count(), 1);
    }

    #[test]
    fn sending_a_message_appends_to_the_timeline() {
        let mut page = bootstrapped();
        page.join_room("#a:x".to_string());
        page.handle_key(&key(KeyCode::Tab));
        for c in "hello".chars() {
            page.handle_key(&key(KeyCode::Char(c)));
        }
        page.handle_key(&key(KeyCode::Enter));

        let timeline = page.messages.get("#a:x").unwrap();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].body, "hello");
        assert_eq!(timeline[0].sender, "@alice:example.org");
    }

    #[test]
    fn accelerators_request_dialogs() {
        let mut page = bootstrapped();
        page.join_room("#a:x".to_string());

        assert_eq!(page.handle_key(&ctrl('j')), Some(ChatEvent::OpenJoinRoom));
        assert_eq!(page.handle_key(&ctrl('n')), Some(ChatEvent::OpenCreateRoom));
        assert_eq!(page.handle_key(&ctrl('i')), Some(ChatEvent::OpenInviteUsers));
        assert_eq!(page.handle_key(&ctrl('x')), Some(ChatEvent::OpenLogout));
        assert_eq!(
            page.handle_key(&ctrl('d')),
            Some(ChatEvent::OpenLeaveRoom("#a:x".to_string()))
        );
        assert_eq!(page.handle_key(&ctrl('s')), Some(ChatEvent::ShowSettings));
        assert_eq!(
            page.handle_key(&key(KeyCode::F(2))),
            Some(ChatEvent::OpenMemberList("#a:x".to_string()))
        );
    }

    #[test]
    fn leave_accelerator_needs_a_room() {
        let mut page = bootstrapped();
        assert_eq!(page.handle_key(&ctrl('d')), None);
    }

    #[test]
    fn profile_accelerator_targets_last_sender() {
        let mut page = bootstrapped();
        page.join_room("#a:x".to_string());
        // No messages yet, so the profile falls back to the own user.
        assert_eq!(
            page.handle_key(&key(KeyCode::F(4))),
            Some(ChatEvent::OpenUserProfile {
                user_id: "@alice:example.org".to_string(),
                room_id: "#a:x".to_string(),
            })
        );
    }

    #[test]
    fn quick_switcher_filters_and_selects() {
        let mut page = bootstrapped();
        page.join_room("#rust:example.org".to_string());
        page.join_room("#golang:example.org".to_string());

        page.open_quick_switcher();
        assert!(page.quick_switcher_open());
        for c in "rust".chars() {
            page.handle_key(&key(KeyCode::Char(c)));
        }
        page.handle_key(&key(KeyCode::Enter));
        assert!(!page.quick_switcher_open());
        assert_eq!(page.current_room_id().unwrap(), "#rust:example.org");
    }

    #[test]
    fn emoji_selection_lands_in_the_input() {
        let mut page = bootstrapped();
        page.join_room("#a:x".to_string());
        page.handle_key(&ctrl('e'));
        page.handle_key(&key(KeyCode::Enter));
        assert_eq!(page.input.value(), "😀");
    }

    #[test]
    fn reset_keeps_preferences_but_drops_session() {
        let mut page = bootstrapped();
        page.set_show_timestamps(false);
        page.join_room("#a:x".to_string());

        page.reset();
        assert!(!page.is_bootstrapped());
        assert!(page.rooms().is_empty());
        assert!(!page.show_timestamps);
    }

    #[test]
    fn status_generation_tracks_updates() {
        let mut page = ChatPage::new();
        let before = page.status_generation();
        page.set_status("one");
        assert!(page.status_generation() > before);
    }
}
