//! Dialog lifecycle contracts exercised through the public window surface:
//! single-instance reuse, per-open reconstruction, callback gating, and
//! dialog tracking.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use palaver::client::OfflineAuthenticator;
use palaver::config::Config;
use palaver::settings::{SettingsStore, KEY_ACCESS_TOKEN, KEY_HOME_SERVER, KEY_USER_ID};
use palaver::tui::{DialogKind, MainWindow, TuiEvent};
use tempfile::TempDir;

fn chat_window(dir: &TempDir) -> MainWindow {
    let path = dir.path().to_string_lossy().to_string();
    let config =
        Config::from_lookup(|key| (key == "PALAVER_CONFIG_DIR").then(|| path.clone())).unwrap();
    let mut settings = SettingsStore::empty(dir.path().join("settings.json"));
    settings.set(KEY_ACCESS_TOKEN, "t");
    settings.set(KEY_HOME_SERVER, "example.org:443");
    settings.set(KEY_USER_ID, "@alice:example.org");

    let mut window = MainWindow::new(&config, settings, Box::new(OfflineAuthenticator::new()));
    // Let the bootstrap progress overlay finish its delayed hide.
    window.handle_event(
        TuiEvent::Tick,
        Instant::now() + Duration::from_millis(600),
    );
    assert!(!window.has_active_dialogs());
    window
}

fn press(window: &mut MainWindow, code: KeyCode) {
    window.handle_event(
        TuiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)),
        Instant::now(),
    );
}

fn type_str(window: &mut MainWindow, s: &str) {
    for c in s.chars() {
        press(window, KeyCode::Char(c));
    }
}

#[test]
fn reusable_dialog_keeps_one_live_instance_across_opens() {
    let dir = TempDir::new().unwrap();
    let mut window = chat_window(&dir);

    window.open_join_room_dialog();
    type_str(&mut window, "#ru");

    // Open again without closing: same instance, state intact.
    window.open_join_room_dialog();
    assert_eq!(
        window.dialogs.join_room.as_ref().unwrap().dialog.room_input(),
        "#ru"
    );
    assert_eq!(window.open_dialogs(), vec![DialogKind::JoinRoom]);

    // And it still completes normally.
    type_str(&mut window, "st:example.org");
    press(&mut window, KeyCode::Enter);
    assert_eq!(
        window.pages.chat.current_room_id().unwrap(),
        "#rust:example.org"
    );
}

#[test]
fn parameterized_dialog_is_fresh_per_open() {
    let dir = TempDir::new().unwrap();
    let mut window = chat_window(&dir);
    window.pages.chat.join_room("#one:x".to_string());
    window.pages.chat.join_room("#two:x".to_string());

    window.open_leave_room_dialog(Some("#one:x".to_string()));
    assert_eq!(
        window.dialogs.leave_room.as_ref().unwrap().dialog.room_name(),
        "#one:x"
    );
    window.open_leave_room_dialog(Some("#two:x".to_string()));
    assert_eq!(
        window.dialogs.leave_room.as_ref().unwrap().dialog.room_name(),
        "#two:x"
    );

    // Confirming leaves the latest target only.
    press(&mut window, KeyCode::Char('y'));
    let ids: Vec<_> = window
        .pages
        .chat
        .rooms()
        .iter()
        .map(|room| room.id.clone())
        .collect();
    assert_eq!(ids, vec!["#one:x".to_string()]);
}

#[test]
fn accepted_false_never_invokes_the_callback() {
    let dir = TempDir::new().unwrap();
    let mut window = chat_window(&dir);

    window.open_join_room_dialog();
    type_str(&mut window, "#rust:example.org");
    press(&mut window, KeyCode::Esc);

    assert!(window.pages.chat.rooms().is_empty());
    assert!(!window.has_active_dialogs());
}

#[test]
fn accepted_true_with_empty_payload_never_invokes_the_callback() {
    let dir = TempDir::new().unwrap();
    let mut window = chat_window(&dir);

    // Join with an empty room id.
    window.open_join_room_dialog();
    press(&mut window, KeyCode::Enter);
    assert!(window.pages.chat.rooms().is_empty());

    // Invite with an empty invitee list.
    window.pages.chat.join_room("#a:x".to_string());
    let before = window.pages.chat.current_room().unwrap().members.clone();
    window.open_invite_users_dialog();
    press(&mut window, KeyCode::Enter);
    assert_eq!(
        window.pages.chat.current_room().unwrap().members,
        before
    );
}

#[test]
fn accepted_true_with_payload_invokes_exactly_once() {
    let dir = TempDir::new().unwrap();
    let mut window = chat_window(&dir);
    window.pages.chat.join_room("#a:x".to_string());

    window.open_invite_users_dialog();
    type_str(&mut window, "@bob:x");
    press(&mut window, KeyCode::Enter); // add entry
    press(&mut window, KeyCode::Enter); // send

    let members = &window.pages.chat.current_room().unwrap().members;
    assert_eq!(
        members.iter().filter(|m| m.as_str() == "@bob:x").count(),
        1
    );
    assert!(!window.has_active_dialogs());
}

#[test]
fn has_active_dialogs_reflects_any_visible_modal() {
    let dir = TempDir::new().unwrap();
    let mut window = chat_window(&dir);
    window.pages.chat.join_room("#a:x".to_string());

    assert!(!window.has_active_dialogs());
    window.open_join_room_dialog();
    window.open_member_list_dialog(Some("#a:x".to_string()));
    assert!(window.has_active_dialogs());
    assert_eq!(
        window.open_dialogs(),
        vec![DialogKind::JoinRoom, DialogKind::MemberList]
    );

    // Dismiss both, newest first.
    press(&mut window, KeyCode::Esc);
    assert!(window.has_active_dialogs());
    press(&mut window, KeyCode::Esc);
    assert!(!window.has_active_dialogs());
}

#[test]
fn progress_overlay_gates_quick_switch() {
    let dir = TempDir::new().unwrap();
    let mut window = chat_window(&dir);
    window.show_overlay_progress();
    assert!(window.has_active_dialogs());

    window.handle_event(
        TuiEvent::Key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL)),
        Instant::now(),
    );
    assert!(!window.pages.chat.quick_switcher_open());
}
