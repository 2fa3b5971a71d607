//! Storage abstraction traits
//!
//! This module defines the transaction boundary and the per-entity
//! repository capabilities the service layer is written against. Every
//! repository call runs under a caller-supplied [`TxScope`]; no repository
//! opens or resolves a transaction of its own.

use crate::domain::model::{AddressModel, DoctorModel, PersonModel};
use crate::domain::Result;
use async_trait::async_trait;
use std::any::Any;

/// Acquires connections and opens manual-commit transaction scopes.
///
/// Each call to [`begin`](TransactionProvider::begin) hands out an
/// independent scope, so concurrent callers never share per-call state.
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    /// Acquire a connection and begin a transaction on it.
    ///
    /// # Errors
    ///
    /// Returns a database error if acquisition or `BEGIN` fails.
    async fn begin(&self) -> Result<Box<dyn TxScope>>;
}

/// One open transaction on one connection.
///
/// A scope must be resolved exactly once, by [`commit`](TxScope::commit) or
/// [`rollback`](TxScope::rollback), before it is dropped. Dropping the scope
/// releases the underlying connection on every exit path.
#[async_trait]
pub trait TxScope: Send {
    /// Downcast to Any for adapter-specific operations
    ///
    /// Repositories downcast the scope to their concrete transaction type
    /// to reach the underlying connection.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Commit the transaction.
    ///
    /// # Errors
    ///
    /// Returns a database error carrying the driver message if the commit
    /// fails; the caller is expected to attempt a rollback.
    async fn commit(&mut self) -> Result<()>;

    /// Roll the transaction back. Best-effort: never fails, a rollback
    /// error is logged and swallowed.
    async fn rollback(&mut self);
}

/// Storage operations for addresses.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Insert an address and return it with its storage-assigned id.
    async fn insert(&self, tx: &mut dyn TxScope, model: &AddressModel) -> Result<AddressModel>;

    /// Fetch an address by id. Missing row is a validation error.
    async fn get_by_id(&self, tx: &mut dyn TxScope, id: i32) -> Result<AddressModel>;

    /// Fetch every address.
    async fn get_all(&self, tx: &mut dyn TxScope) -> Result<Vec<AddressModel>>;

    /// Update an existing address. Missing row is a validation error.
    async fn update(&self, tx: &mut dyn TxScope, model: &AddressModel) -> Result<AddressModel>;

    /// Delete an address, returning the number of rows affected.
    async fn delete(&self, tx: &mut dyn TxScope, id: i32) -> Result<u64>;
}

/// Storage operations for persons.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert a person row and return the model with its assigned id.
    async fn insert(&self, tx: &mut dyn TxScope, model: &PersonModel) -> Result<PersonModel>;

    /// Fetch a person joined with its owned address.
    async fn get_by_id(&self, tx: &mut dyn TxScope, id: i32) -> Result<PersonModel>;

    /// Update the mutable person columns. Missing row is a validation error.
    async fn update(&self, tx: &mut dyn TxScope, model: &PersonModel) -> Result<PersonModel>;

    /// Soft-delete: set `active = false` on an active person.
    /// Returns the number of rows affected (0 means not found or already
    /// inactive).
    async fn deactivate(&self, tx: &mut dyn TxScope, id: i32) -> Result<u64>;
}

/// Storage operations for doctors.
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Insert the doctor row linking license and specialty to the person id.
    async fn insert(&self, tx: &mut dyn TxScope, model: &DoctorModel) -> Result<DoctorModel>;

    /// Fetch a doctor joined with its person and address rows.
    async fn get_by_id(&self, tx: &mut dyn TxScope, id: i32) -> Result<DoctorModel>;

    /// Fetch every doctor row. Person sub-records carry only the shared id;
    /// the service layer enriches them.
    async fn get_all(&self, tx: &mut dyn TxScope) -> Result<Vec<DoctorModel>>;

    /// Soft-delete a doctor by its shared person id.
    /// Returns the number of rows affected.
    async fn deactivate(&self, tx: &mut dyn TxScope, id: i32) -> Result<u64>;
}
