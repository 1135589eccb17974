//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Shortest session secret the server accepts.
pub const MIN_SECRET_LEN: usize = 16;

/// Longest session lifetime accepted, one year.
pub const MAX_LIFETIME_MINUTES: i64 = 525_600;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration for the HTTP listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// SQLite storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Location of the database file, created on first use
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./staffdesk.db")
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Session signing and lifetime
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign session and flash cookies
    #[serde(default)]
    pub secret: String,

    /// Idle lifetime of a session
    #[serde(default = "default_lifetime_minutes")]
    pub lifetime_minutes: i64,

    /// Mark cookies `Secure` (enable behind HTTPS)
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_lifetime_minutes() -> i64 {
    30
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            lifetime_minutes: default_lifetime_minutes(),
            secure_cookie: false,
        }
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("lifetime_minutes", &self.lifetime_minutes)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

/// Password hashing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// bcrypt work factor for stored password hashes
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,
}

fn default_password_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_cost: default_password_cost(),
        }
    }
}

impl Config {
    /// Check settings the server cannot run without
    pub fn validate(&self) -> Result<()> {
        if self.session.secret.trim().is_empty() {
            return Err(Error::Config(
                "session.secret is not set (hint: export STAFFDESK_SECRET)".to_string(),
            ));
        }
        if self.session.secret.len() < MIN_SECRET_LEN {
            return Err(Error::Config(format!(
                "session.secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }
        if self.session.lifetime_minutes <= 0 {
            return Err(Error::Config(
                "session.lifetime_minutes must be positive".to_string(),
            ));
        }
        if self.session.lifetime_minutes > MAX_LIFETIME_MINUTES {
            return Err(Error::Config(format!(
                "session.lifetime_minutes must be at most {}",
                MAX_LIFETIME_MINUTES
            )));
        }
        if !(4..=31).contains(&self.auth.password_cost) {
            return Err(Error::Config(
                "auth.password_cost must be between 4 and 31".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(Error::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
