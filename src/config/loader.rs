//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::Config;

pub const CONFIG_FILENAME: &str = "staffdesk.toml";

/// `${NAME}` or `${NAME:-fallback}`
static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}").expect("env reference pattern")
});

/// Load `staffdesk.toml` from the working directory or the nearest parent
pub fn load_config() -> Result<Config> {
    let cwd = env::current_dir()?;
    let path = find_config_file(&cwd).ok_or(Error::ConfigNotFound)?;
    load_config_from_path(&path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(Error::ConfigNotFound),
        Err(e) => return Err(e.into()),
    };
    tracing::debug!("Loading config from {}", path.display());
    Ok(toml::from_str(&interpolate_env_vars(&raw))?)
}

fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}

/// Substitute environment references; unset variables without a fallback
/// become empty strings.
fn interpolate_env_vars(content: &str) -> String {
    ENV_REF
        .replace_all(content, |caps: &Captures| {
            let fallback = caps.get(2).map_or("", |m| m.as_str());
            env::var(&caps[1]).unwrap_or_else(|_| fallback.to_string())
        })
        .into_owned()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Staffdesk Configuration

[server]
host = "127.0.0.1"
port = 5000

[database]
path = "${STAFFDESK_DB:-./staffdesk.db}"
max_connections = 5

[session]
# Signs session and flash cookies. Use a long random value and keep it out of
# version control.
secret = "${STAFFDESK_SECRET}"
lifetime_minutes = 30
# Set to true when served over HTTPS
secure_cookie = false

[auth]
# bcrypt work factor for stored password hashes
password_cost = 12
"#
}
