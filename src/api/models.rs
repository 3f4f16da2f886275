use super::constants::MAX_TOKEN_LIFETIME_SECS;
use std::fmt;
use std::time::{Duration, SystemTime};

/// Bearer token issued by the identity provider
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub expires_at: SystemTime,
}

impl Token {
    /// `expires_in` is capped at `MAX_TOKEN_LIFETIME_SECS`
    pub fn new(access_token: impl Into<String>, expires_in: Duration) -> Self {
        let now = SystemTime::now();
        let lifetime = expires_in.min(Duration::from_secs(MAX_TOKEN_LIFETIME_SECS));
        Self {
            access_token: access_token.into(),
            expires_at: now.checked_add(lifetime).unwrap_or(now),
        }
    }

    /// True when the token is expired or will be within `margin`
    pub fn expires_within(&self, margin: Duration) -> bool {
        match self.expires_at.duration_since(SystemTime::now()) {
            Ok(remaining) => remaining <= margin,
            Err(_) => true,
        }
    }

    pub fn bearer(&self) -> &str {
        &self.access_token
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
