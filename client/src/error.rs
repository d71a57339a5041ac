//! Error types for the Palaver client.
//!
//! This module defines the error types used throughout the client crate,
//! providing structured error handling with clear, human-readable messages.

use thiserror::Error;

use crate::config::ConfigError;
use crate::settings::SettingsError;

/// Errors that can occur during client operations.
///
/// This is the primary error type for the crate, encompassing all possible
/// failure modes of the UI layer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Settings persistence error.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TUI-related error.
    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Errors that can occur during TUI operation.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal initialization failed.
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] std::io::Error),

    /// Terminal rendering failed.
    #[error("render error: {0}")]
    Render(#[source] std::io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(String),
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "PALAVER_TICK_RATE_MS".to_string(),
            message: "expected positive integer".to_string(),
        };
        let err = AppError::Config(err);
        assert_eq!(
            err.to_string(),
            "configuration error: invalid value for PALAVER_TICK_RATE_MS: expected positive integer"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn tui_error_terminal_init_display() {
        let io_err = std::io::Error::other("raw mode failed");
        let err = TuiError::TerminalInit(io_err);
        assert_eq!(
            err.to_string(),
            "failed to initialize terminal: raw mode failed"
        );
    }

    #[test]
    fn tui_error_to_app_error_conversion() {
        let tui_err = TuiError::Event("poll timeout".to_string());
        let err: AppError = tui_err.into();
        assert!(matches!(err, AppError::Tui(_)));
        assert_eq!(err.to_string(), "TUI error: event error: poll timeout");
    }

    #[test]
    fn error_source_chain() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = TuiError::Render(io_err);
        assert!(err.source().is_some());
    }
}
