//! Signed, time-limited session tokens.
//!
//! A session is held entirely by the client as an HS256 JWT inside the
//! `session` cookie. The server keeps only the signing secret, so logging out
//! deletes the cookie but cannot revoke a token that was copied elsewhere: it
//! stays valid until its `exp`.

mod claims;
mod codec;
pub mod cookie;

pub use claims::SessionClaims;
pub use codec::{IssuedSession, SessionCodec, SessionError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse authorization level carried in every session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Client,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Admin => "ADMIN",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity and role carried by a session token.
///
/// Request handlers only see values that [`SessionCodec::verify`] accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub principal_id: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
