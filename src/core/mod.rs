//! Business logic
//!
//! The service layer lives here: validation, cross-entity composition, and
//! transaction boundaries.

pub mod services;

pub use services::{AddressService, DoctorService, PersonService};
