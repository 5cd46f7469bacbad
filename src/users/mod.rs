//! User accounts: the credential lookup the session layer depends on.

mod memory;
pub mod password;

pub use memory::MemoryUserStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SecretString;
use crate::session::Role;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email address is already registered")]
    EmailTaken,
    #[error("user not found: {0}")]
    NotFound(String),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub password_hash: String,
    pub profile: Option<CustomerProfile>,
    pub created_at: DateTime<Utc>,
}

/// Contact details captured when a client registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Fields needed to create an account. The password is hashed by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub password: SecretString,
    pub profile: Option<CustomerProfile>,
}

/// Public projection of a [`User`], without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<CustomerProfile>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            profile: user.profile.clone(),
            created_at: user.created_at,
        }
    }
}

impl User {
    pub fn verify_password(&self, candidate: &str) -> bool {
        password::verify_password(&self.password_hash, candidate)
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Option<User>;

    async fn find_by_id(&self, id: &str) -> Option<User>;

    async fn list(&self) -> Vec<User>;

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn delete(&self, id: &str) -> Result<User, StoreError>;
}

/// Canonical form used for email lookups and uniqueness.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
