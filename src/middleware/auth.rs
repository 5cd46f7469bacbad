use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use super::gate::CurrentSession;
use crate::error::ApiError;
use crate::session::Session;

/// Handler-level access to the session resolved by the access gate.
///
/// These extractors are the second enforcement point: handlers that read or
/// mutate role-gated data take one of them even when the route class already
/// restricts access. Without the gate installed they always reject.
#[derive(Clone, Debug)]
pub struct Principal(pub Session);

/// A principal with the ADMIN role.
#[derive(Clone, Debug)]
pub struct AdminPrincipal(pub Session);

/// The current session when there is one; never rejects.
#[derive(Clone, Debug)]
pub struct MaybePrincipal(pub Option<Session>);

fn current_session(parts: &Parts) -> Option<Session> {
    parts
        .extensions
        .get::<CurrentSession>()
        .and_then(|current| current.0.clone())
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_session(parts)
            .map(Principal)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = current_session(parts).ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        if !session.is_admin() {
            tracing::warn!(user_id = %session.principal_id, "Admin access denied");
            return Err(ApiError::forbidden("Administrator access required"));
        }

        Ok(AdminPrincipal(session))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybePrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybePrincipal(current_session(parts)))
    }
}

impl Principal {
    /// Allow access to records owned by `owner_id`: the owner themselves or any admin.
    pub fn require_self_or_admin(&self, owner_id: &str) -> Result<(), ApiError> {
        if self.0.is_admin() || self.0.principal_id == owner_id {
            Ok(())
        } else {
            tracing::warn!(user_id = %self.0.principal_id, owner_id, "Cross-account access denied");
            Err(ApiError::forbidden("You do not have access to this record"))
        }
    }
}
