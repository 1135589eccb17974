//! CLI interface for Staffdesk

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "staffdesk")]
#[command(version)]
#[command(about = "Manage employee records from a small internal web app", long_about = None)]
pub struct Cli {
    /// Path to staffdesk.toml (searched upward from the current directory by default)
    #[arg(short, long, global = true, env = "STAFFDESK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new staffdesk.toml configuration file
    Init,

    /// Create the database schema and default account if missing
    Migrate,

    /// Start the web UI
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List all employees
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
