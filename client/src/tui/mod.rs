//! Terminal user interface for the Palaver client.
//!
//! The TUI follows the MVC split common to ratatui apps:
//!
//! - **App** ([`app`]): the main window controller: page state machine,
//!   dialog lifecycle, progress overlay
//! - **UI** ([`ui`]): frame composition from window state
//! - **Event** ([`event`]): async pump for ticks and terminal input
//! - **Terminal** ([`terminal`]): raw-mode setup with RAII restoration
//! - **Pages** ([`pages`]), **Dialogs** ([`dialogs`]), **Overlay**
//!   ([`overlay`]), **Emoji** ([`emoji`]): the widget layer
//! - **Scheduler** ([`scheduler`]): deferred single-threaded UI actions

pub mod app;
pub mod dialogs;
pub mod emoji;
pub mod event;
pub mod input;
pub mod overlay;
pub mod pages;
pub mod scheduler;
pub mod terminal;
pub mod theme;
pub mod ui;

pub use app::{DialogKind, MainWindow, Page};
pub use event::{EventHandler, TuiEvent};
pub use overlay::{ContentAlignment, ModalResponse, OverlayModal};
pub use terminal::{install_panic_hook, Tui};
pub use theme::Theme;
