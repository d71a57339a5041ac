//! Palaver - terminal Matrix chat client.
//!
//! This crate is the presentation layer of the client: a main window with
//! page navigation (welcome, login, register, chat, settings), a modal
//! overlay hosting short-lived decision dialogs, an emoji picker panel, and
//! window-state persistence. The protocol/network layer is an external
//! collaborator reached through the session handle; an offline stand-in is
//! wired in so the binary runs on its own.
//!
//! # Modules
//!
//! - [`client`]: session handle, user id parsing, authentication contract
//! - [`config`]: configuration from environment variables
//! - [`settings`]: persisted key/value settings store
//! - [`error`]: error types
//! - [`logging`]: tracing bootstrap
//! - [`tui`]: the terminal user interface

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod settings;
pub mod tui;

pub use client::{Authenticator, ClientHandle, OfflineAuthenticator, Session, UserId};
pub use config::Config;
pub use error::{AppError, Result};
pub use settings::SettingsStore;
pub use tui::{EventHandler, MainWindow, Page, Tui, TuiEvent};
