//! CLI command implementations

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{info, print_employee_table, success, warn, OutputFormat};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::db::{self, EmployeeStore, DEFAULT_ADMIN_USERNAME};

/// Initialize a new staffdesk.toml configuration file
pub async fn init(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    if config_path.exists() {
        warn(&format!("{} already exists", config_path.display()));
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    success(&format!("Created {}", config_path.display()));
    info("Export STAFFDESK_SECRET and run 'staffdesk serve' to start the web UI");

    Ok(())
}

/// Create the schema and default account
pub async fn migrate(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    let pool = db::open(&config.database, &config.auth).await?;
    pool.close().await;

    success(&format!(
        "Database ready at {}",
        config.database.path.display()
    ));
    info(&format!("Default login: '{}'", DEFAULT_ADMIN_USERNAME));
    Ok(())
}

/// Start the HTTP server
pub async fn serve(path: Option<&Path>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = load_config(path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    info(&format!(
        "Starting server at http://{}:{}",
        config.server.host, config.server.port
    ));

    crate::web::run_server(config).await?;
    Ok(())
}

/// Print all employees
pub async fn list(path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = load_config(path)?;
    let pool = db::open(&config.database, &config.auth).await?;
    let employees = EmployeeStore::new(pool.clone()).list_all().await?;
    pool.close().await;

    match format {
        OutputFormat::Table => {
            print_employee_table(&employees);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&employees)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&employees)?;
            println!("{}", yaml);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };
    config.map_err(|e| anyhow::anyhow!("{}", e))
}
