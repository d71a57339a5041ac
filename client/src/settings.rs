//! Persisted key/value settings store.
//!
//! The store holds string-typed values keyed by slash-separated names and is
//! persisted as a JSON object in the user config directory. It carries the
//! window geometry, the session credentials restored at startup, and the
//! user-preference flags consumed by the settings page.
//!
//! Writes go through a temp file followed by a rename so a crash mid-write
//! never truncates the previous settings.
//!
//! # Keys
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `window/width`, `window/height` | Last window size, saved on shutdown |
//! | `auth/access_token` | Session access token |
//! | `auth/home_server` | Homeserver as `host:port` |
//! | `auth/user_id` | Fully qualified user id |
//! | `auth/device_id` | Device identifier |
//! | `ui/show_timestamps` | Timeline timestamp toggle |
//! | `ui/typing_notifications` | Typing notification toggle |
//!
//! A session counts as active when all of `auth/access_token`,
//! `auth/home_server`, and `auth/user_id` are present.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::client::{Session, StoredSession};

/// Window width key.
pub const KEY_WINDOW_WIDTH: &str = "window/width";
/// Window height key.
pub const KEY_WINDOW_HEIGHT: &str = "window/height";
/// Access token key.
pub const KEY_ACCESS_TOKEN: &str = "auth/access_token";
/// Homeserver key.
pub const KEY_HOME_SERVER: &str = "auth/home_server";
/// User id key.
pub const KEY_USER_ID: &str = "auth/user_id";
/// Device id key.
pub const KEY_DEVICE_ID: &str = "auth/device_id";
/// Timeline timestamp toggle key.
pub const KEY_SHOW_TIMESTAMPS: &str = "ui/show_timestamps";
/// Typing notification toggle key.
pub const KEY_TYPING_NOTIFICATIONS: &str = "ui/typing_notifications";

/// Errors that can occur while loading or saving settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not a valid JSON string map.
    #[error("malformed settings file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// String-typed key/value store persisted as JSON.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl SettingsStore {
    /// Opens the store at `path`, loading existing values when present.
    ///
    /// A missing file yields an empty store; it is created on the first
    /// [`SettingsStore::save`].
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, values })
    }

    /// Creates an empty in-memory store bound to `path` without touching disk.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: BTreeMap::new(),
        }
    }

    /// Path the store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists the current values, creating parent directories when needed.
    ///
    /// The write is atomic: values are serialized into a temp file in the
    /// same directory which then replaces the previous file via rename.
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let encoded = serde_json::to_vec_pretty(&self.values)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, encoded)?;

        if let Err(rename_err) = fs::rename(&temp_path, &self.path) {
            // Windows does not allow replacing existing files via rename.
            match fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => {
                    let _ = fs::remove_file(&temp_path);
                    tracing::error!(%rename_err, "failed replacing settings file");
                    return Err(err.into());
                }
            }
            if let Err(err) = fs::rename(&temp_path, &self.path) {
                let _ = fs::remove_file(&temp_path);
                return Err(err.into());
            }
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = self
            .path
            .file_name()
            .and_then(|value| value.to_str())
            .unwrap_or("settings.json");
        parent.join(format!(".{file_name}.tmp"))
    }

    /// Returns the stored value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Stores `value` under `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Removes `key` from the store.
    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// Whether `key` has a stored value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    // -------------------------------------------------------------------------
    // Session credentials
    // -------------------------------------------------------------------------

    /// Whether a restorable session is stored.
    ///
    /// True iff the access token, homeserver, and user id are all present.
    /// The device id is not required; early sessions were stored without one.
    #[must_use]
    pub fn has_active_session(&self) -> bool {
        self.contains(KEY_ACCESS_TOKEN)
            && self.contains(KEY_HOME_SERVER)
            && self.contains(KEY_USER_ID)
    }

    /// Raw stored session fields, if a session is active.
    #[must_use]
    pub fn stored_session(&self) -> Option<StoredSession> {
        if !self.has_active_session() {
            return None;
        }
        Some(StoredSession {
            access_token: self.get(KEY_ACCESS_TOKEN)?.to_string(),
            home_server: self.get(KEY_HOME_SERVER)?.to_string(),
            user_id: self.get(KEY_USER_ID)?.to_string(),
            device_id: self.get(KEY_DEVICE_ID).unwrap_or_default().to_string(),
        })
    }

    /// Stores the credentials of an established session.
    pub fn set_session(&mut self, session: &Session) {
        self.set(KEY_ACCESS_TOKEN, session.access_token.clone());
        self.set(KEY_HOME_SERVER, session.home_server.clone());
        self.set(KEY_USER_ID, session.user_id.as_str());
        self.set(KEY_DEVICE_ID, session.device_id.clone());
    }

    /// Removes all stored session credentials.
    pub fn clear_session(&mut self) {
        self.remove(KEY_ACCESS_TOKEN);
        self.remove(KEY_HOME_SERVER);
        self.remove(KEY_USER_ID);
        self.remove(KEY_DEVICE_ID);
    }

    // -------------------------------------------------------------------------
    // Window geometry
    // -------------------------------------------------------------------------

    /// Returns the persisted window size.
    ///
    /// Yields `None` when either dimension is missing, unparseable, or zero;
    /// callers fall back to the configured default size in that case so a
    /// zero-sized window can never be restored.
    #[must_use]
    pub fn window_size(&self) -> Option<(u16, u16)> {
        let width = self.get(KEY_WINDOW_WIDTH)?.parse::<u16>().ok()?;
        let height = self.get(KEY_WINDOW_HEIGHT)?.parse::<u16>().ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        Some((width, height))
    }

    /// Stores the window size for the next startup.
    pub fn set_window_size(&mut self, width: u16, height: u16) {
        self.set(KEY_WINDOW_WIDTH, width.to_string());
        self.set(KEY_WINDOW_HEIGHT, height.to_string());
    }

    // -------------------------------------------------------------------------
    // User-preference flags
    // -------------------------------------------------------------------------

    /// Returns a boolean preference, or `default` when unset or malformed.
    #[must_use]
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some("true") => true,
            Some("false") => false,
            _ => default,
        }
    }

    /// Stores a boolean preference.
    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }
}
