//! Top-level pages composing the main navigation state machine.
//!
//! Each page owns its local state and hands typed events back to the main
//! window from its key handler; the window performs the page switches and
//! side effects. Exactly one page is visible at a time.

pub mod chat;
pub mod login;
pub mod register;
pub mod settings;
pub mod welcome;

pub use chat::{ChatEvent, ChatPage};
pub use login::{LoginEvent, LoginPage, LoginRequest};
pub use register::{RegisterEvent, RegisterPage, RegisterRequest};
pub use settings::{PrefToggle, SettingsEvent, SettingsPage};
pub use welcome::{WelcomeEvent, WelcomePage};
