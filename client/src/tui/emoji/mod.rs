//! Emoji picker panel and its static emoji data.

pub mod picker;
pub mod provider;

pub use picker::{EmojiEvent, EmojiPicker, PANEL_HEIGHT, PANEL_WIDTH};
pub use provider::{EmojiCategory, CATEGORIES};
