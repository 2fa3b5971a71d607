//! CLI interface and argument parsing
//!
//! Operational entry points only; the records API itself is consumed as a
//! library by the transport layer.

use clap::{Parser, Subcommand};

/// Medrec - hospital records service core
#[derive(Parser, Debug)]
#[command(name = "medrec")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "medrec.toml", env = "MEDREC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MEDREC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test the database connection
    Check,

    /// Apply the database schema (idempotent)
    Migrate,
}
