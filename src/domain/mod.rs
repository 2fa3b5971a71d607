//! Domain models and types for Medrec.
//!
//! The domain layer provides:
//! - **Models** ([`AddressModel`], [`PersonModel`], [`DoctorModel`], [`Specialty`])
//! - **Wire records** ([`AddressDto`], [`PersonDto`], [`DoctorDto`]) and their mappers
//! - **Normalization helpers** ([`normalize::normalize_text`], [`normalize::normalize_digits`])
//! - **Error types** ([`MedrecError`]) and the [`Result`] alias

pub mod dto;
pub mod errors;
pub mod model;
pub mod normalize;
pub mod result;

// Re-export commonly used types for convenience
pub use dto::{AddressDto, DoctorDto, PersonDto};
pub use errors::MedrecError;
pub use model::{AddressModel, DoctorModel, PersonModel, Specialty};
pub use result::Result;
