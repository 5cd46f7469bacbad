use std::sync::Arc;

use crate::config::AppConfig;
use crate::gate::RoutePolicy;
use crate::session::{Role, SessionCodec};
use crate::users::{NewUser, StoreError, UserStore};

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub codec: Arc<SessionCodec>,
    pub policy: Arc<RoutePolicy>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(config: AppConfig, users: Arc<dyn UserStore>) -> Self {
        let codec = SessionCodec::new(&config.session);

        Self {
            config: Arc::new(config),
            codec: Arc::new(codec),
            policy: Arc::new(RoutePolicy::standard()),
            users,
        }
    }

    pub fn with_policy(mut self, policy: RoutePolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }

    /// Create the configured administrator account if it does not exist yet.
    pub async fn bootstrap_admin(&self) -> Result<(), StoreError> {
        let Some(admin) = &self.config.bootstrap else {
            return Ok(());
        };

        if self.users.find_by_email(&admin.email).await.is_some() {
            tracing::debug!("Bootstrap admin already present");
            return Ok(());
        }

        let user = self
            .users
            .create(NewUser {
                email: admin.email.clone(),
                name: admin.name.clone(),
                role: Role::Admin,
                password: admin.password.clone(),
                profile: None,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Bootstrap admin created");
        Ok(())
    }
}
