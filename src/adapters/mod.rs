//! External integrations
//!
//! This module contains the adapters for storage backends:
//! - `database` - storage abstraction traits
//! - `postgresql` - PostgreSQL implementation

pub mod database;
pub mod postgresql;
