use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{Role, Session};

/// JWT payload of a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Principal (user) id
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(principal_id: String, role: Role, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: principal_id,
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Convert verified claims into a session. Returns `None` when either
    /// timestamp is out of chrono's range.
    pub(super) fn into_session(self) -> Option<Session> {
        let issued_at = Utc.timestamp_opt(self.iat, 0).single()?;
        let expires_at = Utc.timestamp_opt(self.exp, 0).single()?;

        Some(Session {
            principal_id: self.sub,
            role: self.role,
            issued_at,
            expires_at,
        })
    }
}
