//! Session and dispatch identifiers handed out by an [`AuthClient`](super::AuthClient).

use crate::auth::error::AuthError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// Reference to a dispatched one-time password.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchId(String);

impl DispatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DispatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bearer token for an authenticated session. Never printed in full.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl Debug for SessionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "SessionToken({}…)", prefix)
    }
}

/// An authenticated session. Lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: SessionToken,
    /// Who issued the session.
    pub authority: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Fails when `issued_at + ttl` leaves the representable range.
    pub fn new(
        token: SessionToken,
        authority: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, AuthError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            AuthError::InvalidResponse(format!(
                "session lifetime of {}s overflows",
                ttl.num_seconds()
            ))
        })?;
        Ok(Self {
            token,
            authority: authority.into(),
            issued_at,
            expires_at,
        })
    }

    /// Builds a session from a lifetime in seconds as reported by a server.
    pub fn from_ttl_secs(
        token: SessionToken,
        authority: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl_secs: i64,
    ) -> Result<Self, AuthError> {
        if ttl_secs < 0 {
            return Err(AuthError::InvalidResponse(format!(
                "negative session lifetime {}s",
                ttl_secs
            )));
        }
        let ttl = Duration::try_seconds(ttl_secs).ok_or_else(|| {
            AuthError::InvalidResponse(format!("session lifetime {}s out of range", ttl_secs))
        })?;
        Self::new(token, authority, issued_at, ttl)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, floored at zero.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}
