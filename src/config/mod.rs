//! Configuration management
//!
//! TOML-based configuration with `${VAR}` substitution and `MEDREC_*`
//! environment overrides.

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{ApplicationConfig, DatabaseConfig, LoggingConfig, MedrecConfig};
