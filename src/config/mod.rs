mod secret;

pub use secret::SecretString;

use chrono::Duration;
use serde::Serialize;
use std::env;

/// Minimum accepted length of the session signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Canonical session lifetime when `SESSION_TTL_HOURS` is not set: 7 days.
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 24 * 7;

/// Longest accepted session lifetime: one year.
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 365;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SESSION_SECRET is not set")]
    MissingSecret,
    #[error("SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes")]
    SecretTooShort,
    #[error("SESSION_TTL_HOURS must be between 1 and {MAX_SESSION_TTL_HOURS} hours")]
    InvalidTtl,
    #[error("ADMIN_EMAIL and ADMIN_PASSWORD must be set together")]
    IncompleteBootstrap,
}

/// Immutable application configuration, built once at startup and shared
/// read-only with every request handler.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub security: SecurityConfig,
    pub bootstrap: Option<BootstrapAdmin>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionConfig {
    #[serde(skip)]
    pub secret: SecretString,
    pub ttl_hours: u64,
    pub cookie_name: String,
}

impl SessionConfig {
    /// Session lifetime, capped at [`MAX_SESSION_TTL_HOURS`].
    pub fn ttl(&self) -> Duration {
        Duration::hours(self.ttl_hours.min(MAX_SESSION_TTL_HOURS) as i64)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    pub enable_audit_logging: bool,
}

/// Administrator account created at startup when the store has no user with
/// this email yet.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapAdmin {
    pub email: String,
    pub name: String,
    #[serde(skip)]
    pub password: SecretString,
}

impl AppConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let secret = lookup("SESSION_SECRET")
            .filter(|s| !s.is_empty())
            .map(SecretString::new)
            .ok_or(ConfigError::MissingSecret)?;

        let mut config = Self::preset(environment, secret);
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("TOURDESK_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("TOURDESK_PORT").or_else(|| lookup("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Session overrides
        if let Some(v) = lookup("SESSION_TTL_HOURS") {
            self.session.ttl_hours = match v.parse::<u64>() {
                Ok(hours) if (1..=MAX_SESSION_TTL_HOURS).contains(&hours) => hours,
                _ => return Err(ConfigError::InvalidTtl),
            };
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = lookup("SECURITY_ENABLE_AUDIT_LOGGING") {
            self.security.enable_audit_logging =
                v.parse().unwrap_or(self.security.enable_audit_logging);
        }

        // Bootstrap admin
        match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => {
                self.bootstrap = Some(BootstrapAdmin {
                    email,
                    name: lookup("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
                    password: SecretString::new(password),
                });
            }
            (None, None) => {}
            _ => return Err(ConfigError::IncompleteBootstrap),
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort);
        }
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.session.ttl_hours) {
            return Err(ConfigError::InvalidTtl);
        }
        Ok(())
    }

    fn preset(environment: Environment, secret: SecretString) -> Self {
        match environment {
            Environment::Production => Self::production(secret),
            Environment::Staging => Self::staging(secret),
            Environment::Development => Self::development(secret),
        }
    }

    fn development(secret: SecretString) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            session: SessionConfig {
                secret,
                ttl_hours: DEFAULT_SESSION_TTL_HOURS,
                cookie_name: "session".to_string(),
            },
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                enable_audit_logging: false,
            },
            bootstrap: None,
        }
    }

    fn staging(secret: SecretString) -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            session: SessionConfig {
                secret,
                ttl_hours: DEFAULT_SESSION_TTL_HOURS,
                cookie_name: "session".to_string(),
            },
            security: SecurityConfig {
                cors_origins: vec!["https://staging.example.com".to_string()],
                enable_audit_logging: true,
            },
            bootstrap: None,
        }
    }

    fn production(secret: SecretString) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            session: SessionConfig {
                secret,
                ttl_hours: DEFAULT_SESSION_TTL_HOURS,
                cookie_name: "session".to_string(),
            },
            security: SecurityConfig {
                cors_origins: vec!["https://app.example.com".to_string()],
                enable_audit_logging: true,
            },
            bootstrap: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let result = AppConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingSecret)));

        let result = AppConfig::from_lookup(lookup_from(&[("SESSION_SECRET", "")]));
        assert!(matches!(result, Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[("SESSION_SECRET", "short")]));
        assert!(matches!(result, Err(ConfigError::SecretTooShort)));
    }

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::from_lookup(lookup_from(&[("SESSION_SECRET", SECRET)])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.session.ttl_hours, DEFAULT_SESSION_TTL_HOURS);
        assert_eq!(config.session.cookie_name, "session");
        assert_eq!(config.server.port, 3000);
        assert!(config.bootstrap.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SESSION_SECRET", SECRET),
            ("APP_ENV", "production"),
            ("PORT", "9090"),
            ("SESSION_TTL_HOURS", "12"),
            ("SECURITY_CORS_ORIGINS", "https://a.example, https://b.example"),
        ]))
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.session.ttl(), Duration::hours(12));
        assert_eq!(config.security.cors_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_invalid_ttl_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("SESSION_SECRET", SECRET),
            ("SESSION_TTL_HOURS", "0"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidTtl)));
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        for hours in ["8761", "10000000000", "18446744073709551615"] {
            let result = AppConfig::from_lookup(lookup_from(&[
                ("SESSION_SECRET", SECRET),
                ("SESSION_TTL_HOURS", hours),
            ]));
            assert!(matches!(result, Err(ConfigError::InvalidTtl)), "{}", hours);
        }

        let config = AppConfig::from_lookup(lookup_from(&[
            ("SESSION_SECRET", SECRET),
            ("SESSION_TTL_HOURS", "8760"),
        ]))
        .unwrap();
        assert_eq!(config.session.ttl(), Duration::hours(8760));
    }

    #[test]
    fn test_bootstrap_admin_requires_both_fields() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("SESSION_SECRET", SECRET),
            ("ADMIN_EMAIL", "admin@example.com"),
        ]));
        assert!(matches!(result, Err(ConfigError::IncompleteBootstrap)));

        let config = AppConfig::from_lookup(lookup_from(&[
            ("SESSION_SECRET", SECRET),
            ("ADMIN_EMAIL", "admin@example.com"),
            ("ADMIN_PASSWORD", "correct horse"),
        ]))
        .unwrap();
        let admin = config.bootstrap.unwrap();
        assert_eq!(admin.email, "admin@example.com");
        assert_eq!(admin.name, "Administrator");
    }

    #[test]
    fn test_secret_not_serialized() {
        let config = AppConfig::from_lookup(lookup_from(&[("SESSION_SECRET", SECRET)])).unwrap();
        let rendered = serde_json::to_string(&config).unwrap();
        assert!(!rendered.contains(SECRET));
        assert!(!format!("{:?}", config).contains(SECRET));
    }
}
