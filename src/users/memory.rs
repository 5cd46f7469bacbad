use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{normalize_email, password, NewUser, StoreError, User, UserStore};

/// Process-local user store keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        let users = self.users.read().await;
        users.values().find(|u| u.email == email).cloned()
    }

    async fn find_by_id(&self, id: &str) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    async fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.email.cmp(&b.email)));
        users
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let email = normalize_email(&new_user.email);
        // Hash before taking the write lock.
        let password_hash = password::hash_password(new_user.password.expose_secret())?;

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            name: new_user.name,
            role: new_user.role,
            password_hash,
            profile: new_user.profile,
            created_at: Utc::now(),
        };
        users.insert(user.id.clone(), user.clone());

        tracing::debug!(user_id = %user.id, role = %user.role, "user created");
        Ok(user)
    }

    async fn delete(&self, id: &str) -> Result<User, StoreError> {
        self.users
            .write()
            .await
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
