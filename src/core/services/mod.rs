//! Entity services
//!
//! Services own validation, cross-entity composition, and transaction
//! boundaries. Every public operation acquires exactly one transaction
//! scope for its own duration; nested calls issued as part of a composite
//! operation receive the caller's scope and never commit independently.

pub mod address;
pub mod doctor;
pub mod person;

pub use address::AddressService;
pub use doctor::DoctorService;
pub use person::PersonService;

use crate::adapters::database::traits::TxScope;
use crate::domain::{MedrecError, Result};

/// Resolves a transaction scope against an operation outcome: commit on
/// `Ok`, rollback on `Err` (and on a failed commit). The scope is consumed,
/// so dropping it here releases the connection on every path.
pub(crate) async fn resolve_scope<T>(mut scope: Box<dyn TxScope>, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => match scope.commit().await {
            Ok(()) => Ok(value),
            Err(err) => {
                scope.rollback().await;
                Err(err)
            }
        },
        Err(err) => {
            scope.rollback().await;
            Err(err)
        }
    }
}

/// Extracts a required field or fails with a validation error naming it.
pub(crate) fn require<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| MedrecError::validation(format!("Invalid {field}! Please provide a {field}")))
}
