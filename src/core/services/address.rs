//! Address service
//!
//! Normalization and required-field validation for addresses, plus the
//! transaction boundary for the standalone address operations. Composite
//! callers (person, doctor) use the `_in_tx` variants so the whole
//! composite write shares one scope.

use crate::adapters::database::traits::{AddressRepository, TransactionProvider, TxScope};
use crate::core::services::{require, resolve_scope};
use crate::domain::dto::AddressDto;
use crate::domain::model::AddressModel;
use crate::domain::normalize::{normalize_digits, normalize_text};
use crate::domain::{MedrecError, Result};
use std::sync::Arc;

/// Service for address operations.
#[derive(Clone)]
pub struct AddressService {
    provider: Arc<dyn TransactionProvider>,
    repository: Arc<dyn AddressRepository>,
}

impl AddressService {
    pub fn new(
        provider: Arc<dyn TransactionProvider>,
        repository: Arc<dyn AddressRepository>,
    ) -> Self {
        Self {
            provider,
            repository,
        }
    }

    /// Cleans raw wire input ahead of validation.
    pub(crate) fn normalize(dto: AddressDto) -> AddressModel {
        AddressModel {
            id: dto.id,
            street: normalize_text(dto.street.as_deref()),
            number: normalize_digits(dto.number.as_deref()),
            complement: normalize_text(dto.complement.as_deref()),
            neighborhood: normalize_text(dto.neighborhood.as_deref()),
            city: normalize_text(dto.city.as_deref()),
            state: normalize_text(dto.state.as_deref()),
            postal_code: normalize_digits(dto.postal_code.as_deref()),
        }
    }

    /// Required fields must be non-empty after normalization.
    pub(crate) fn validate(model: &AddressModel) -> Result<()> {
        require(&model.street, "street")?;
        require(&model.number, "number")?;
        require(&model.neighborhood, "neighborhood")?;
        require(&model.city, "city")?;
        require(&model.state, "state")?;
        require(&model.postal_code, "postal code")?;
        Ok(())
    }

    /// Inserts an address in its own transaction.
    pub async fn insert_address(&self, dto: AddressDto) -> Result<AddressDto> {
        let model = Self::normalize(dto);
        Self::validate(&model)?;

        let mut scope = self.provider.begin().await?;
        let result = self.repository.insert(scope.as_mut(), &model).await;
        let inserted = resolve_scope(scope, result).await?;

        tracing::info!(address_id = ?inserted.id, "Address created");
        Ok(inserted.into())
    }

    /// Insert under a caller-owned scope; never commits.
    pub(crate) async fn insert_in_tx(
        &self,
        tx: &mut dyn TxScope,
        model: &AddressModel,
    ) -> Result<AddressModel> {
        Self::validate(model)?;
        self.repository.insert(tx, model).await
    }

    pub async fn get_address_by_id(&self, id: i32) -> Result<AddressDto> {
        let mut scope = self.provider.begin().await?;
        let result = self.repository.get_by_id(scope.as_mut(), id).await;
        let model = resolve_scope(scope, result).await?;
        Ok(model.into())
    }

    pub async fn get_all_addresses(&self) -> Result<Vec<AddressDto>> {
        let mut scope = self.provider.begin().await?;
        let result = self.repository.get_all(scope.as_mut()).await;
        let models = resolve_scope(scope, result).await?;
        Ok(models.into_iter().map(AddressDto::from).collect())
    }

    /// Updates an address in its own transaction.
    pub async fn update_address(&self, dto: AddressDto) -> Result<AddressDto> {
        let model = Self::normalize(dto);
        Self::validate(&model)?;
        if model.id.is_none() {
            return Err(MedrecError::validation(
                "Invalid id! Please provide the id of the address to update",
            ));
        }

        let mut scope = self.provider.begin().await?;
        let result = self.repository.update(scope.as_mut(), &model).await;
        let updated = resolve_scope(scope, result).await?;

        tracing::info!(address_id = ?updated.id, "Address updated");
        Ok(updated.into())
    }

    /// Update under a caller-owned scope; never commits.
    pub(crate) async fn update_in_tx(
        &self,
        tx: &mut dyn TxScope,
        model: &AddressModel,
    ) -> Result<AddressModel> {
        Self::validate(model)?;
        if model.id.is_none() {
            return Err(MedrecError::validation(
                "Invalid id! Please provide the id of the address to update",
            ));
        }
        self.repository.update(tx, model).await
    }

    /// Deletes an address by id. Deleting an unknown id is a validation
    /// error, not a no-op.
    pub async fn delete_address(&self, id: i32) -> Result<AddressDto> {
        let mut scope = self.provider.begin().await?;
        let result = {
            let tx = scope.as_mut();
            match self.repository.delete(tx, id).await {
                Ok(0) => Err(MedrecError::validation(format!(
                    "Could not delete: address {} not found",
                    id
                ))),
                Ok(_) => Ok(()),
                Err(err) => Err(err),
            }
        };
        resolve_scope(scope, result).await?;

        tracing::info!(address_id = id, "Address deleted");
        Ok(AddressDto {
            id: Some(id),
            ..AddressDto::default()
        })
    }
}
