//! Person service
//!
//! Persons are the base record doctors extend. `insert_person` takes an
//! `is_subtype` flag: a specialized caller (the doctor service) manages the
//! owned address itself and attaches it before the person write, so the
//! person step only writes the person row and hands back the assigned id.

use crate::adapters::database::traits::{PersonRepository, TransactionProvider, TxScope};
use crate::core::services::{require, resolve_scope, AddressService};
use crate::domain::dto::{AddressDto, PersonDto};
use crate::domain::model::PersonModel;
use crate::domain::normalize::{normalize_digits, normalize_text};
use crate::domain::{MedrecError, Result};
use std::sync::Arc;

/// Service for person operations.
#[derive(Clone)]
pub struct PersonService {
    provider: Arc<dyn TransactionProvider>,
    repository: Arc<dyn PersonRepository>,
    addresses: AddressService,
}

/// Person-level field validation: name present, tax id exactly 11 digits,
/// phone at least 9 digits. Shared with the doctor service, which runs the
/// same checks before opening its transaction.
pub(crate) fn validate_person(model: &PersonModel) -> Result<()> {
    require(&model.name, "name")?;

    let tax_id = require(&model.tax_id, "tax id")?;
    if tax_id.chars().count() != 11 {
        return Err(MedrecError::validation(format!(
            "Invalid tax id! Please provide an 11 digit tax id ({})",
            tax_id.chars().count()
        )));
    }

    let phone = require(&model.phone, "phone")?;
    if phone.chars().count() < 9 {
        return Err(MedrecError::validation(format!(
            "Invalid phone! Please provide a phone with at least 9 digits ({})",
            phone.chars().count()
        )));
    }

    Ok(())
}

impl PersonService {
    pub fn new(
        provider: Arc<dyn TransactionProvider>,
        repository: Arc<dyn PersonRepository>,
        addresses: AddressService,
    ) -> Self {
        Self {
            provider,
            repository,
            addresses,
        }
    }

    /// Cleans raw wire input ahead of validation.
    pub(crate) fn normalize(dto: PersonDto) -> PersonModel {
        PersonModel {
            id: dto.id,
            name: normalize_text(dto.name.as_deref()),
            tax_id: normalize_digits(dto.tax_id.as_deref()),
            phone: normalize_digits(dto.phone.as_deref()),
            email: normalize_text(dto.email.as_deref()),
            active: dto.active.unwrap_or(true),
            address: AddressService::normalize(AddressDto {
                id: dto.address_id,
                street: dto.street,
                number: dto.number,
                complement: dto.complement,
                neighborhood: dto.neighborhood,
                city: dto.city,
                state: dto.state,
                postal_code: dto.postal_code,
            }),
        }
    }

    /// Inserts a person in its own transaction. With `is_subtype = false`
    /// the owned address is created in the same scope.
    pub async fn insert_person(&self, dto: PersonDto, is_subtype: bool) -> Result<PersonDto> {
        let model = Self::normalize(dto);
        validate_person(&model)?;
        if !is_subtype {
            AddressService::validate(&model.address)?;
        }

        let mut scope = self.provider.begin().await?;
        let result = self.insert_in_tx(scope.as_mut(), &model, is_subtype).await;
        let inserted = resolve_scope(scope, result).await?;

        tracing::info!(person_id = ?inserted.id, "Person created");
        Ok(inserted.into())
    }

    /// Insert under a caller-owned scope; never commits. Returns the model
    /// with the storage-assigned id for the caller to adopt.
    pub(crate) async fn insert_in_tx(
        &self,
        tx: &mut dyn TxScope,
        model: &PersonModel,
        is_subtype: bool,
    ) -> Result<PersonModel> {
        validate_person(model)?;

        let mut model = model.clone();
        if !is_subtype {
            model.address = self.addresses.insert_in_tx(tx, &model.address).await?;
        }

        self.repository.insert(tx, &model).await
    }

    pub async fn get_person_by_id(&self, id: i32) -> Result<PersonDto> {
        let mut scope = self.provider.begin().await?;
        let result = self.repository.get_by_id(scope.as_mut(), id).await;
        let model = resolve_scope(scope, result).await?;
        Ok(model.into())
    }

    /// Joined person fetch under a caller-owned scope.
    pub(crate) async fn fetch_in_tx(&self, tx: &mut dyn TxScope, id: i32) -> Result<PersonModel> {
        self.repository.get_by_id(tx, id).await
    }

    /// Updates a person (and its owned address) in its own transaction.
    pub async fn update_person(&self, dto: PersonDto) -> Result<PersonDto> {
        let model = Self::normalize(dto);
        validate_person(&model)?;
        AddressService::validate(&model.address)?;
        if model.id.is_none() {
            return Err(MedrecError::validation(
                "Invalid id! Please provide the id of the person to update",
            ));
        }

        let mut scope = self.provider.begin().await?;
        let result = self.update_in_tx(scope.as_mut(), &model, false).await;
        let updated = resolve_scope(scope, result).await?;

        tracing::info!(person_id = ?updated.id, "Person updated");
        Ok(updated.into())
    }

    /// Update under a caller-owned scope; never commits. With
    /// `is_subtype = true` the caller has already updated the owned address.
    pub(crate) async fn update_in_tx(
        &self,
        tx: &mut dyn TxScope,
        model: &PersonModel,
        is_subtype: bool,
    ) -> Result<PersonModel> {
        validate_person(model)?;
        if model.id.is_none() {
            return Err(MedrecError::validation(
                "Invalid id! Please provide the id of the person to update",
            ));
        }

        let mut model = model.clone();
        if !is_subtype {
            model.address = self.addresses.update_in_tx(tx, &model.address).await?;
        }

        self.repository.update(tx, &model).await
    }

    /// Soft-deletes a person. Deactivating an unknown or already-inactive
    /// id is a validation error, not a no-op.
    pub async fn deactivate_person(&self, id: i32) -> Result<PersonDto> {
        let mut scope = self.provider.begin().await?;
        let result = match self.repository.deactivate(scope.as_mut(), id).await {
            Ok(0) => Err(MedrecError::validation(format!(
                "Could not deactivate: person {} not found",
                id
            ))),
            Ok(rows) => Ok(rows),
            Err(err) => Err(err),
        };
        resolve_scope(scope, result).await?;

        tracing::info!(person_id = id, "Person deactivated");
        Ok(PersonDto {
            id: Some(id),
            active: Some(false),
            ..PersonDto::default()
        })
    }
}
