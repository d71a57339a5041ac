//! Frame composition: active page, then open modals, then the progress
//! overlay.
//!
//! Rendering is a pure function of the window state. Dialogs are drawn in
//! opening order so the most recently opened sits on top, and the progress
//! overlay always paints last because nothing may obscure it.

use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::app::{DialogKind, MainWindow, Page};
use crate::tui::dialogs::{Dialog, ModalSlot};
use crate::tui::theme::Theme;

/// Smallest terminal the layout is designed for.
const MIN_WIDTH: u16 = 80;
/// Smallest terminal the layout is designed for.
const MIN_HEIGHT: u16 = 24;

/// Renders one frame of the whole window.
pub fn render(frame: &mut Frame, window: &MainWindow) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    let theme = &window.theme;

    match window.page() {
        Page::Welcome => window.pages.welcome.render(area, buf, theme),
        Page::Login => window.pages.login.render(area, buf, theme),
        Page::Register => window.pages.register.render(area, buf, theme),
        Page::Chat => window.pages.chat.render(area, buf, theme),
        Page::Settings => window.pages.settings.render(area, buf, theme),
    }

    for kind in window.open_dialogs() {
        match kind {
            DialogKind::JoinRoom => render_dialog(&window.dialogs.join_room, area, buf, theme),
            DialogKind::CreateRoom => render_dialog(&window.dialogs.create_room, area, buf, theme),
            DialogKind::InviteUsers => {
                render_dialog(&window.dialogs.invite_users, area, buf, theme);
            }
            DialogKind::Logout => render_dialog(&window.dialogs.logout, area, buf, theme),
            DialogKind::Recaptcha => render_dialog(&window.dialogs.recaptcha, area, buf, theme),
            DialogKind::LeaveRoom => render_dialog(&window.dialogs.leave_room, area, buf, theme),
            DialogKind::MemberList => render_dialog(&window.dialogs.member_list, area, buf, theme),
            DialogKind::RoomSettings => {
                render_dialog(&window.dialogs.room_settings, area, buf, theme);
            }
            DialogKind::UserProfile => {
                render_dialog(&window.dialogs.user_profile, area, buf, theme);
            }
        }
    }

    if let Some(ref progress) = window.dialogs.progress {
        if progress.modal.is_visible() {
            progress.render(area, buf, theme);
        }
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_size_warning(area, frame, window);
    }
}

fn render_dialog<D: Dialog>(
    slot: &Option<ModalSlot<D>>,
    area: Rect,
    buf: &mut ratatui::buffer::Buffer,
    theme: &Theme,
) {
    let Some(slot) = slot else {
        return;
    };
    if !slot.modal.is_visible() {
        return;
    }
    slot.modal.render_backdrop(area, buf);
    slot.dialog.render(slot.modal.content_rect(area), buf, theme);
}

fn render_size_warning(area: Rect, frame: &mut Frame, window: &MainWindow) {
    let banner = Rect::new(area.x, area.y, area.width, 1.min(area.height));
    let text = format!(
        "terminal {}x{} is below the designed minimum {}x{}",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    frame.render_widget(
        Paragraph::new(text)
            .style(window.theme.error)
            .alignment(Alignment::Left),
        banner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::OfflineAuthenticator;
    use crate::config::Config;
    use crate::settings::{SettingsStore, KEY_ACCESS_TOKEN, KEY_HOME_SERVER, KEY_USER_ID};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::TempDir;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    fn test_window(dir: &TempDir, with_session: bool) -> MainWindow {
        let path = dir.path().to_string_lossy().to_string();
        let config =
            Config::from_lookup(|key| (key == "PALAVER_CONFIG_DIR").then(|| path.clone())).unwrap();
        let mut settings = SettingsStore::empty(dir.path().join("settings.json"));
        if with_session {
            settings.set(KEY_ACCESS_TOKEN, "t");
            settings.set(KEY_HOME_SERVER, "example.org:443");
            settings.set(KEY_USER_ID, "@alice:example.org");
        }
        MainWindow::new(&config, settings, Box::new(OfflineAuthenticator::new()))
    }

    fn draw(window: &MainWindow) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, window)).unwrap();
        terminal
    }

    #[test]
    fn welcome_page_renders_buttons() {
        let dir = TempDir::new().unwrap();
        let window = test_window(&dir, false);
        let text = buffer_text(&draw(&window));
        assert!(text.contains("[ Login ]"));
        assert!(text.contains("[ Register ]"));
    }

    #[test]
    fn chat_page_renders_after_restore() {
        let dir = TempDir::new().unwrap();
        let window = test_window(&dir, true);
        let text = buffer_text(&draw(&window));
        assert!(text.contains("Rooms"));
        // The bootstrap progress overlay is still up and paints on top.
        assert!(text.contains("loading"));
    }

    #[test]
    fn open_dialog_renders_on_top_of_the_page() {
        let dir = TempDir::new().unwrap();
        let mut window = test_window(&dir, true);
        window.dialogs.progress = None;
        window.open_join_room_dialog();

        let text = buffer_text(&draw(&window));
        assert!(text.contains("Join Room"));
        assert!(text.contains("Room ID or alias"));
    }

    #[test]
    fn pre_session_pages_render_without_panic() {
        use crate::tui::event::TuiEvent;
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        use std::time::Instant;

        let dir = TempDir::new().unwrap();
        let mut window = test_window(&dir, false);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let now = Instant::now();

        terminal.draw(|frame| render(frame, &window)).unwrap();

        window.handle_event(
            TuiEvent::Key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE)),
            now,
        );
        assert_eq!(window.page(), Page::Login);
        terminal.draw(|frame| render(frame, &window)).unwrap();

        window.handle_event(
            TuiEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            now,
        );
        window.handle_event(
            TuiEvent::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)),
            now,
        );
        assert_eq!(window.page(), Page::Register);
        terminal.draw(|frame| render(frame, &window)).unwrap();
    }

    #[test]
    fn settings_page_renders_without_panic() {
        use crate::tui::event::TuiEvent;
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        use std::time::{Duration, Instant};

        let dir = TempDir::new().unwrap();
        let mut window = test_window(&dir, true);
        let now = Instant::now();
        window.handle_event(TuiEvent::Tick, now + Duration::from_millis(600));
        window.handle_event(
            TuiEvent::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            now,
        );
        assert_eq!(window.page(), Page::Settings);

        let text = buffer_text(&draw(&window));
        assert!(text.contains("Show timestamps"));
    }

    #[test]
    fn small_terminal_shows_size_warning() {
        let dir = TempDir::new().unwrap();
        let window = test_window(&dir, false);
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| render(frame, &window)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("below the designed minimum"));
    }

    #[test]
    fn multiple_dialogs_render_in_order() {
        let dir = TempDir::new().unwrap();
        let mut window = test_window(&dir, true);
        window.dialogs.progress = None;
        window.pages.chat.join_room("#a:x".to_string());
        window.open_join_room_dialog();
        window.open_member_list_dialog(Some("#a:x".to_string()));

        let text = buffer_text(&draw(&window));
        // The member list opened last, so its title must be visible.
        assert!(text.contains("Members"));
    }
}
