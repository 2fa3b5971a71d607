// Medrec - Transactional hospital-records service core
// Copyright (c) 2026 Medrec Contributors
// Licensed under the MIT License

//! # Medrec - hospital records service core
//!
//! Medrec is the transactional core of a hospital-records backend. It
//! exposes insert/get/update/deactivate operations over three related
//! entities - Person, Doctor, and Address - and guarantees that every
//! multi-table write either fully commits or fully rolls back.
//!
//! ## Architecture
//!
//! Medrec follows a layered architecture:
//!
//! - [`cli`] - Command-line interface (operational commands only)
//! - [`core`] - Business logic: services, validation, transaction boundaries
//! - [`adapters`] - Storage abstraction traits and the PostgreSQL adapter
//! - [`domain`] - Models, wire records (DTOs), mappers, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use medrec::adapters::postgresql::{
//!     PgAddressRepository, PgDoctorRepository, PgPersonRepository, PostgresClient,
//! };
//! use medrec::config::load_config;
//! use medrec::core::{AddressService, DoctorService, PersonService};
//! use medrec::domain::DoctorDto;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("medrec.toml")?;
//!     let client = Arc::new(PostgresClient::new(config.database).await?);
//!
//!     let addresses = AddressService::new(client.clone(), Arc::new(PgAddressRepository));
//!     let persons =
//!         PersonService::new(client.clone(), Arc::new(PgPersonRepository), addresses.clone());
//!     let doctors = DoctorService::new(
//!         client,
//!         Arc::new(PgDoctorRepository),
//!         persons,
//!         addresses,
//!     );
//!
//!     let created = doctors.insert_doctor(DoctorDto::default()).await?;
//!     println!("created doctor {:?}", created.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Transaction semantics
//!
//! Each public service operation owns exactly one transaction scope for its
//! duration. Composite operations (a doctor with its person and address)
//! thread one shared scope through every nested call: a failure anywhere in
//! the chain rolls back all sub-writes, and the pooled connection is
//! released on every exit path when the scope drops.
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with
//! [`domain::MedrecError`]: validation errors are raised before any write
//! is committed, and database errors carry the driver message and are
//! always accompanied by a rollback attempt.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
