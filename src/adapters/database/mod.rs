//! Storage abstraction layer
//!
//! Defines the traits the service layer consumes; the PostgreSQL adapter
//! implements them, and the integration tests provide in-memory fakes.

pub mod traits;

pub use traits::{
    AddressRepository, DoctorRepository, PersonRepository, TransactionProvider, TxScope,
};
