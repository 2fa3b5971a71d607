//! PostgreSQL adapter
//!
//! Implements the storage traits against PostgreSQL via `tokio-postgres`
//! with `deadpool-postgres` pooling.

pub mod address;
pub mod client;
pub mod doctor;
pub mod person;

pub use address::PgAddressRepository;
pub use client::{PgTx, PostgresClient};
pub use doctor::PgDoctorRepository;
pub use person::PgPersonRepository;

use crate::adapters::database::traits::TxScope;
use crate::domain::{MedrecError, Result};

/// Downcast a caller-supplied scope to the PostgreSQL transaction type.
///
/// The service layer passes scopes as trait objects; repositories recover
/// the concrete type to reach the connection.
pub(crate) fn pg_tx<'a>(tx: &'a mut dyn TxScope) -> Result<&'a mut PgTx> {
    tx.as_any_mut().downcast_mut::<PgTx>().ok_or_else(|| {
        MedrecError::Database("transaction scope is not a PostgreSQL scope".to_string())
    })
}
