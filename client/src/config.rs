//! Configuration module for the Palaver client.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `PALAVER_CONFIG_DIR` | No | platform config dir | Directory holding `settings.json` |
//! | `PALAVER_WINDOW_WIDTH` | No | 120 | Default window width (columns) |
//! | `PALAVER_WINDOW_HEIGHT` | No | 40 | Default window height (rows) |
//! | `PALAVER_TICK_RATE_MS` | No | 60 | TUI tick interval in milliseconds |
//!
//! The default window size is used whenever no valid size has been persisted
//! from a previous run.
//!
//! # Example
//!
//! ```no_run
//! use palaver::config::Config;
//!
//! let config = Config::from_env().expect("failed to load configuration");
//! println!("settings file: {}", config.settings_path.display());
//! ```

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;

/// Default window width in terminal columns.
pub const DEFAULT_WINDOW_WIDTH: u16 = 120;

/// Default window height in terminal rows.
pub const DEFAULT_WINDOW_HEIGHT: u16 = 40;

/// Default tick rate for the event loop (60ms = ~16 FPS).
pub const DEFAULT_TICK_RATE_MS: u64 = 60;

/// File name of the persisted settings store inside the config directory.
const SETTINGS_FILENAME: &str = "settings.json";

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine the platform config directory.
    #[error("failed to determine config directory")]
    NoConfigDirectory,
}

/// Configuration for the Palaver client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the persisted settings file.
    pub settings_path: PathBuf,

    /// Window width used when no persisted size is available.
    pub default_width: u16,

    /// Window height used when no persisted size is available.
    pub default_height: u16,

    /// Tick interval for the TUI event loop, in milliseconds.
    pub tick_rate_ms: u64,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a size or tick-rate variable is set but
    /// cannot be parsed as a positive integer, or if no config directory can
    /// be determined and `PALAVER_CONFIG_DIR` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// Injection point used by tests to avoid mutating process environment.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let config_dir = match lookup("PALAVER_CONFIG_DIR") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => ProjectDirs::from("im", "Palaver", "palaver")
                .ok_or(ConfigError::NoConfigDirectory)?
                .config_dir()
                .to_path_buf(),
        };

        let default_width =
            parse_dimension("PALAVER_WINDOW_WIDTH", DEFAULT_WINDOW_WIDTH, &mut lookup)?;
        let default_height =
            parse_dimension("PALAVER_WINDOW_HEIGHT", DEFAULT_WINDOW_HEIGHT, &mut lookup)?;

        let tick_rate_ms = match lookup("PALAVER_TICK_RATE_MS") {
            Some(val) => {
                let ms = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "PALAVER_TICK_RATE_MS".to_string(),
                    message: format!("expected positive integer, got '{val}'"),
                })?;
                if ms == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "PALAVER_TICK_RATE_MS".to_string(),
                        message: "tick rate must be greater than 0".to_string(),
                    });
                }
                ms
            }
            None => DEFAULT_TICK_RATE_MS,
        };

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILENAME),
            default_width,
            default_height,
            tick_rate_ms,
        })
    }

    /// Default window size as a `(width, height)` pair.
    #[must_use]
    pub fn default_window_size(&self) -> (u16, u16) {
        (self.default_width, self.default_height)
    }
}

fn parse_dimension<F>(key: &str, default: u16, lookup: &mut F) -> Result<u16, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => {
            let size = val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected positive integer, got '{val}'"),
            })?;
            if size == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "window dimension must be greater than 0".to_string(),
                });
            }
            Ok(size)
        }
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl FnMut(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let vars = HashMap::from([("PALAVER_CONFIG_DIR", "/tmp/palaver-test")]);
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(config.default_width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(config.default_height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(config.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert_eq!(
            config.settings_path,
            PathBuf::from("/tmp/palaver-test").join("settings.json")
        );
    }

    #[test]
    fn explicit_values_override_defaults() {
        let vars = HashMap::from([
            ("PALAVER_CONFIG_DIR", "/tmp/palaver-test"),
            ("PALAVER_WINDOW_WIDTH", "80"),
            ("PALAVER_WINDOW_HEIGHT", "24"),
            ("PALAVER_TICK_RATE_MS", "33"),
        ]);
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(config.default_window_size(), (80, 24));
        assert_eq!(config.tick_rate_ms, 33);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let vars = HashMap::from([
            ("PALAVER_CONFIG_DIR", "/tmp/palaver-test"),
            ("PALAVER_WINDOW_WIDTH", "0"),
        ]);
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn unparseable_tick_rate_is_rejected() {
        let vars = HashMap::from([
            ("PALAVER_CONFIG_DIR", "/tmp/palaver-test"),
            ("PALAVER_TICK_RATE_MS", "soon"),
        ]);
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("PALAVER_TICK_RATE_MS"));
    }

    #[test]
    fn blank_config_dir_falls_back_to_platform_dir() {
        let vars = HashMap::from([("PALAVER_CONFIG_DIR", "  ")]);
        // Platform dir may be unavailable in minimal environments, in which
        // case the fallback itself errors; both outcomes are acceptable here.
        if let Ok(config) = Config::from_lookup(lookup_from(&vars)) {
            assert!(config.settings_path.ends_with("settings.json"));
        }
    }
}
