//! Scorer panel sign-in.
//!
//! A single shared password unlocks the panel. A successful login yields a
//! token: base64 of a small JSON document carrying an expiry, in milliseconds
//! since the Unix epoch:
//!
//! ```json
//! { "authenticated": true, "timestamp": 1718000000000, "expires": 1718086400000 }
//! ```
//!
//! The token is not signed. It keeps honest browsers out of the panel after the
//! session lapses; it is not a defence against a forged cookie.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;

/// Something that decides whether the caller may change match state.
pub trait SessionGate {
    fn can_mutate(&self) -> bool;
}

/// Gate for trusted callers such as back-office imports and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl SessionGate for AllowAll {
    fn can_mutate(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    MissingPassword,
    InvalidPassword,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::MissingPassword => write!(f, "password is required"),
            SessionError::InvalidPassword => write!(f, "invalid password"),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub authenticated: bool,
    pub timestamp: u64,
    pub expires: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn encode(claims: &SessionClaims) -> Self {
        // Serializing three scalar fields cannot fail.
        let json = serde_json::to_vec(claims).unwrap_or_default();
        SessionToken(base64::engine::general_purpose::STANDARD.encode(json))
    }

    /// `None` for anything that is not base64 JSON claims.
    pub fn claims(&self) -> Option<SessionClaims> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(self.0.as_bytes())
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        SessionToken(value)
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        SessionToken(value.to_string())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A token that verified at the time it was opened. It stops granting
/// changes once its expiry passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    claims: SessionClaims,
}

impl Session {
    pub fn claims(&self) -> SessionClaims {
        self.claims
    }

    pub fn expires_at(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.claims.expires)
    }

    /// Authenticated and not expired at `now`. Expiry is inclusive.
    pub fn is_valid_at(&self, now: SystemTime) -> bool {
        self.claims.is_valid_at(now)
    }
}

impl SessionClaims {
    fn is_valid_at(&self, now: SystemTime) -> bool {
        self.authenticated && self.expires >= epoch_millis(now)
    }
}

impl SessionGate for Session {
    fn can_mutate(&self) -> bool {
        self.is_valid_at(SystemTime::now())
    }
}

pub struct PanelGate {
    password: String,
    ttl: Duration,
}

impl PanelGate {
    pub fn new(password: impl Into<String>, ttl: Duration) -> Self {
        PanelGate {
            password: password.into(),
            ttl,
        }
    }

    pub fn from_config(password: impl Into<String>, config: &ScoringConfig) -> Self {
        PanelGate::new(password, config.session_ttl())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn login(&self, password: &str, now: SystemTime) -> Result<SessionToken, SessionError> {
        if password.is_empty() {
            return Err(SessionError::MissingPassword);
        }
        if password != self.password {
            tracing::warn!("panel login rejected");
            return Err(SessionError::InvalidPassword);
        }

        let issued = epoch_millis(now);
        let claims = SessionClaims {
            authenticated: true,
            timestamp: issued,
            expires: issued.saturating_add(duration_millis(self.ttl)),
        };
        tracing::info!(expires = claims.expires, "panel session issued");
        Ok(SessionToken::encode(&claims))
    }

    /// Decode `token` and check it is authenticated and not yet expired at `now`.
    pub fn open(&self, token: &SessionToken, now: SystemTime) -> Option<Session> {
        let claims = token.claims()?;
        claims.is_valid_at(now).then_some(Session { claims })
    }

    pub fn verify(&self, token: &SessionToken, now: SystemTime) -> bool {
        self.open(token, now).is_some()
    }
}

fn epoch_millis(at: SystemTime) -> u64 {
    duration_millis(at.duration_since(UNIX_EPOCH).unwrap_or_default())
}

fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
