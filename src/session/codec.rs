use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use super::{Role, Session, SessionClaims};
use crate::config::SessionConfig;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("principal id must not be empty")]
    EmptyPrincipal,
    #[error("session expiry is out of range")]
    ExpiryOutOfRange,
    #[error("failed to sign session token: {0}")]
    Signing(String),
}

/// A freshly signed token together with the session it encodes.
#[derive(Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: Session,
}

impl fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedSession")
            .field("token", &"[REDACTED]")
            .field("session", &self.session)
            .finish()
    }
}

/// Issues and verifies HS256 session tokens.
///
/// The keys and TTL are fixed at construction; the codec is shared read-only
/// across request handlers.
#[derive(Clone)]
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionCodec {
    pub fn new(config: &SessionConfig) -> Self {
        Self::from_secret(config.secret.expose_secret().as_bytes(), config.ttl())
    }

    pub fn from_secret(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, principal_id: impl Into<String>, role: Role) -> Result<IssuedSession, SessionError> {
        self.issue_at(principal_id, role, Utc::now())
    }

    /// Issue a session as if the current time were `now`.
    ///
    /// Timestamps are truncated to whole seconds so the token's `exp` and the
    /// cookie's `Expires` describe the same instant.
    pub fn issue_at(
        &self,
        principal_id: impl Into<String>,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, SessionError> {
        let principal_id = principal_id.into();
        if principal_id.is_empty() {
            return Err(SessionError::EmptyPrincipal);
        }

        let issued_at = now.trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(SessionError::ExpiryOutOfRange)?;
        let claims = SessionClaims::new(principal_id.clone(), role, issued_at, expires_at);

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Signing(e.to_string()))?;

        Ok(IssuedSession {
            token,
            session: Session {
                principal_id,
                role,
                issued_at,
                expires_at,
            },
        })
    }

    /// Verify a token and return the session it carries.
    ///
    /// Malformed tokens, bad signatures and expired tokens all yield `None`.
    pub fn verify(&self, token: &str) -> Option<Session> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<Session> {
        let claims = match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(reason = rejection_reason(e.kind()), "session token rejected");
                return None;
            }
        };

        if claims.exp <= now.timestamp() {
            tracing::debug!(reason = "expired", "session token rejected");
            return None;
        }
        if claims.sub.is_empty() {
            tracing::debug!(reason = "malformed", "session token rejected");
            return None;
        }

        claims.into_session()
    }
}

// Coarse category only; never the token or decoder output.
fn rejection_reason(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::ExpiredSignature => "expired",
        ErrorKind::InvalidSignature => "signature",
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => "algorithm",
        ErrorKind::MissingRequiredClaim(_) => "missing_claim",
        _ => "malformed",
    }
}
