//! Session state handle and the authentication collaborator interface.
//!
//! The [`ClientHandle`] is the window's view of the session/network layer:
//! user id, device id, server host and port, and access token, each with a
//! getter and setter. The window reads the handle to populate the settings
//! store when a session is established and writes restored credentials back
//! into it at startup. The protocol client behind the handle lives outside
//! this crate.
//!
//! [`Authenticator`] is the contract of the network-bound login/registration
//! collaborator. [`OfflineAuthenticator`] is the in-process stand-in used by
//! the binary: it validates input shape and fabricates a session without any
//! network traffic.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default port assumed when a homeserver string carries no explicit port.
const DEFAULT_SERVER_PORT: u16 = 443;

/// Error produced when parsing a user identifier fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed user id '{input}': expected @localpart:domain")]
pub struct UserIdError {
    /// The rejected input.
    pub input: String,
}

/// A parse-validated Matrix user identifier of the form `@localpart:domain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// The full identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part between `@` and `:`.
    #[must_use]
    pub fn localpart(&self) -> &str {
        let rest = &self.0[1..];
        &rest[..rest.find(':').unwrap_or(rest.len())]
    }

    /// The domain after the first `:`.
    #[must_use]
    pub fn server_name(&self) -> &str {
        let rest = &self.0[1..];
        &rest[rest.find(':').map_or(rest.len(), |i| i + 1)..]
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || UserIdError {
            input: s.to_string(),
        };

        let rest = s.strip_prefix('@').ok_or_else(err)?;
        let (localpart, domain) = rest.split_once(':').ok_or_else(err)?;
        if localpart.is_empty() || domain.is_empty() {
            return Err(err());
        }
        if !localpart
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '=' | '-' | '/'))
        {
            return Err(err());
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credentials of an established session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Authenticated user.
    pub user_id: UserId,
    /// Device identifier assigned at login.
    pub device_id: String,
    /// Homeserver as `host:port`.
    pub home_server: String,
    /// Opaque access token.
    pub access_token: String,
}

/// Raw session fields as read back from the settings store.
///
/// Unlike [`Session`], the user id here is an unvalidated string; startup
/// restore parses it and reacts to malformed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    /// Opaque access token.
    pub access_token: String,
    /// Homeserver as `host:port`.
    pub home_server: String,
    /// Unvalidated user id string.
    pub user_id: String,
    /// Device identifier, possibly empty.
    pub device_id: String,
}

/// Process-local handle onto the session state shared with the network layer.
#[derive(Debug, Clone, Default)]
pub struct ClientHandle {
    user_id: Option<UserId>,
    device_id: String,
    server_host: String,
    server_port: u16,
    access_token: String,
}

impl ClientHandle {
    /// Creates an empty handle with no session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            ..Self::default()
        }
    }

    /// Authenticated user, if a session is present.
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn set_user_id(&mut self, user_id: UserId) {
        self.user_id = Some(user_id);
    }

    /// Device identifier of the current session.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn set_device_id(&mut self, device_id: impl Into<String>) {
        self.device_id = device_id.into();
    }

    /// Homeserver host without port.
    #[must_use]
    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    /// Homeserver port.
    #[must_use]
    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    /// Sets host and port from a `host[:port]` string.
    ///
    /// A missing or unparseable port falls back to the default HTTPS port.
    pub fn set_server(&mut self, server: &str) {
        match server.rsplit_once(':') {
            Some((host, port)) => {
                self.server_host = host.to_string();
                self.server_port = port.parse().unwrap_or(DEFAULT_SERVER_PORT);
            }
            None => {
                self.server_host = server.to_string();
                self.server_port = DEFAULT_SERVER_PORT;
            }
        }
    }

    /// Homeserver as the canonical `host:port` string.
    #[must_use]
    pub fn homeserver(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Access token of the current session, empty when logged out.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
    }

    /// Copies an established session into the handle.
    pub fn adopt(&mut self, session: &Session) {
        self.user_id = Some(session.user_id.clone());
        self.device_id = session.device_id.clone();
        self.access_token = session.access_token.clone();
        self.set_server(&session.home_server);
    }

    /// Restores a stored session, validating the user id.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the stored user id is malformed; the
    /// handle is left untouched in that case.
    pub fn restore(&mut self, stored: &StoredSession) -> Result<(), UserIdError> {
        let user_id = stored.user_id.parse::<UserId>()?;
        self.user_id = Some(user_id);
        self.device_id = stored.device_id.clone();
        self.access_token = stored.access_token.clone();
        self.set_server(&stored.home_server);
        Ok(())
    }

    /// The current session, when one is fully established.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        let user_id = self.user_id.clone()?;
        if self.access_token.is_empty() {
            return None;
        }
        Some(Session {
            user_id,
            device_id: self.device_id.clone(),
            home_server: self.homeserver(),
            access_token: self.access_token.clone(),
        })
    }

    /// Drops all session state from the handle.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Error surfaced by the authentication collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Supplied credentials were rejected.
    #[error("{0}")]
    InvalidCredentials(String),
}

/// Contract of the login/registration collaborator.
///
/// The window only consumes the success/error surface of these calls; how
/// they are satisfied (network, cache, stub) is the implementor's business.
pub trait Authenticator {
    /// Authenticates against `homeserver` and yields a session.
    fn login(
        &mut self,
        homeserver: &str,
        user_id: &UserId,
        password: &str,
    ) -> Result<Session, AuthError>;

    /// Registers `username` on `homeserver` and yields a session.
    fn register(
        &mut self,
        homeserver: &str,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError>;
}

/// In-process authenticator used when no protocol layer is wired in.
///
/// Accepts any well-formed credentials and fabricates deterministic session
/// material. Each issued session gets a distinct device id.
#[derive(Debug, Default)]
pub struct OfflineAuthenticator {
    issued: u32,
}

impl OfflineAuthenticator {
    /// Creates a fresh offline authenticator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self, homeserver: &str, user_id: UserId) -> Session {
        self.issued += 1;
        Session {
            access_token: format!("pal_{}_{:04}", user_id.localpart(), self.issued),
            device_id: format!("PALAVER{:04}", self.issued),
            home_server: normalize_homeserver(homeserver),
            user_id,
        }
    }
}

impl Authenticator for OfflineAuthenticator {
    fn login(
        &mut self,
        homeserver: &str,
        user_id: &UserId,
        password: &str,
    ) -> Result<Session, AuthError> {
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "password must not be empty".to_string(),
            ));
        }
        Ok(self.issue(homeserver, user_id.clone()))
    }

    fn register(
        &mut self,
        homeserver: &str,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if password.len() < 8 {
            return Err(AuthError::InvalidCredentials(
                "password must be at least 8 characters".to_string(),
            ));
        }
        let host = normalize_homeserver(homeserver);
        let domain = host.rsplit_once(':').map_or(host.as_str(), |(h, _)| h);
        let user_id = format!("@{username}:{domain}")
            .parse::<UserId>()
            .map_err(|err| AuthError::InvalidCredentials(err.to_string()))?;
        Ok(self.issue(homeserver, user_id))
    }
}

fn normalize_homeserver(homeserver: &str) -> String {
    if homeserver.contains(':') {
        homeserver.to_string()
    } else {
        format!("{homeserver}:{DEFAULT_SERVER_PORT}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_parses_well_formed_input() {
        let id: UserId = "@alice:example.org".parse().unwrap();
        assert_eq!(id.localpart(), "alice");
        assert_eq!(id.server_name(), "example.org");
        assert_eq!(id.to_string(), "@alice:example.org");
    }

    #[test]
    fn user_id_rejects_malformed_input() {
        for bad in ["alice", "@alice", "@:example.org", "@alice:", "", "@al ice:x"] {
            assert!(bad.parse::<UserId>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn set_server_splits_host_and_port() {
        let mut handle = ClientHandle::new();
        handle.set_server("matrix.example.org:8448");
        assert_eq!(handle.server_host(), "matrix.example.org");
        assert_eq!(handle.server_port(), 8448);
        assert_eq!(handle.homeserver(), "matrix.example.org:8448");
    }

    #[test]
    fn set_server_defaults_missing_port() {
        let mut handle = ClientHandle::new();
        handle.set_server("matrix.example.org");
        assert_eq!(handle.server_port(), 443);
    }

    #[test]
    fn restore_rejects_malformed_user_id() {
        let mut handle = ClientHandle::new();
        let stored = StoredSession {
            access_token: "t".into(),
            home_server: "example.org:443".into(),
            user_id: "not-a-user-id".into(),
            device_id: "D".into(),
        };
        assert!(handle.restore(&stored).is_err());
        assert!(handle.session().is_none());
    }

    #[test]
    fn restore_then_session_round_trips() {
        let mut handle = ClientHandle::new();
        let stored = StoredSession {
            access_token: "t".into(),
            home_server: "example.org:8448".into(),
            user_id: "@bob:example.org".into(),
            device_id: "DEV".into(),
        };
        handle.restore(&stored).unwrap();

        let session = handle.session().unwrap();
        assert_eq!(session.user_id.as_str(), "@bob:example.org");
        assert_eq!(session.home_server, "example.org:8448");
        assert_eq!(session.device_id, "DEV");
    }

    #[test]
    fn clear_drops_the_session() {
        let mut handle = ClientHandle::new();
        handle.set_user_id("@a:b.c".parse().unwrap());
        handle.set_access_token("t");
        assert!(handle.session().is_some());

        handle.clear();
        assert!(handle.session().is_none());
        assert_eq!(handle.access_token(), "");
    }

    #[test]
    fn offline_login_issues_distinct_devices() {
        let mut auth = OfflineAuthenticator::new();
        let user: UserId = "@alice:example.org".parse().unwrap();

        let first = auth.login("example.org", &user, "hunter22").unwrap();
        let second = auth.login("example.org", &user, "hunter22").unwrap();
        assert_ne!(first.device_id, second.device_id);
        assert_eq!(first.home_server, "example.org:443");
    }

    #[test]
    fn offline_login_rejects_empty_password() {
        let mut auth = OfflineAuthenticator::new();
        let user: UserId = "@alice:example.org".parse().unwrap();
        assert!(auth.login("example.org", &user, "").is_err());
    }

    #[test]
    fn offline_register_builds_user_id_from_host() {
        let mut auth = OfflineAuthenticator::new();
        let session = auth
            .register("matrix.example.org:8448", "carol", "longenough")
            .unwrap();
        assert_eq!(session.user_id.as_str(), "@carol:matrix.example.org");
    }

    #[test]
    fn offline_register_rejects_short_password() {
        let mut auth = OfflineAuthenticator::new();
        assert!(auth.register("example.org", "carol", "short").is_err());
    }
}
