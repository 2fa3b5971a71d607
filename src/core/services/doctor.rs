//! Doctor service - the central orchestration
//!
//! A doctor is a composite entity: its owned address, base person, and the
//! doctor row itself are written under one shared transaction scope, so a
//! failure anywhere in the chain rolls the whole composition back and no
//! orphan sub-record survives. Validation runs before the scope opens;
//! database failures after it opens always trigger a rollback.

use crate::adapters::database::traits::{DoctorRepository, TransactionProvider, TxScope};
use crate::core::services::person::validate_person;
use crate::core::services::{resolve_scope, AddressService, PersonService};
use crate::domain::dto::DoctorDto;
use crate::domain::model::{DoctorModel, Specialty};
use crate::domain::normalize::{normalize_digits, normalize_text};
use crate::domain::{MedrecError, Result};
use std::sync::Arc;

/// Service for doctor operations.
#[derive(Clone)]
pub struct DoctorService {
    provider: Arc<dyn TransactionProvider>,
    repository: Arc<dyn DoctorRepository>,
    persons: PersonService,
    addresses: AddressService,
}

impl DoctorService {
    pub fn new(
        provider: Arc<dyn TransactionProvider>,
        repository: Arc<dyn DoctorRepository>,
        persons: PersonService,
        addresses: AddressService,
    ) -> Self {
        Self {
            provider,
            repository,
            persons,
            addresses,
        }
    }

    /// Cleans every wire field, then maps into the model. An unrecognized
    /// specialty spelling fails here, before anything else runs.
    fn normalize(dto: DoctorDto) -> Result<DoctorModel> {
        let dto = DoctorDto {
            name: normalize_text(dto.name.as_deref()),
            tax_id: normalize_digits(dto.tax_id.as_deref()),
            phone: normalize_digits(dto.phone.as_deref()),
            email: normalize_text(dto.email.as_deref()),
            license_code: normalize_text(dto.license_code.as_deref()),
            specialty: normalize_text(dto.specialty.as_deref()),
            street: normalize_text(dto.street.as_deref()),
            number: normalize_digits(dto.number.as_deref()),
            complement: normalize_text(dto.complement.as_deref()),
            neighborhood: normalize_text(dto.neighborhood.as_deref()),
            city: normalize_text(dto.city.as_deref()),
            state: normalize_text(dto.state.as_deref()),
            postal_code: normalize_digits(dto.postal_code.as_deref()),
            ..dto
        };
        DoctorModel::try_from(dto)
    }

    /// Doctor-specific creation constraints: license code present and
    /// exactly 12 characters, specialty present.
    fn validate_doctor_fields(model: &DoctorModel) -> Result<()> {
        let license = model.license_code.as_deref().ok_or_else(|| {
            MedrecError::validation("Invalid license code! Please provide a license code")
        })?;
        if license.chars().count() != 12 {
            return Err(MedrecError::validation(format!(
                "Invalid license code! Please provide a 12 character license code ({})",
                license.chars().count()
            )));
        }
        if model.specialty.is_none() {
            return Err(MedrecError::validation(format!(
                "Invalid specialty! Please provide one of: {}",
                Specialty::ACCEPTED.join(", ")
            )));
        }
        Ok(())
    }

    /// Creates a doctor with its owned address and base person.
    ///
    /// All validation runs before the transaction opens; the three inserts
    /// then share one scope and commit together or not at all.
    pub async fn insert_doctor(&self, dto: DoctorDto) -> Result<DoctorDto> {
        let model = Self::normalize(dto)?;
        Self::validate_doctor_fields(&model)?;
        validate_person(&model.person)?;
        AddressService::validate(&model.person.address)?;

        let mut scope = self.provider.begin().await?;
        let result = self.insert_in_tx(scope.as_mut(), model).await;
        let inserted = resolve_scope(scope, result).await?;

        tracing::info!(
            doctor_id = ?inserted.person.id,
            address_id = ?inserted.person.address.id,
            "Doctor created"
        );
        Ok(inserted.into())
    }

    /// Address → person → doctor, all under the caller's scope. The person
    /// insert runs with `is_subtype = true` since the address is already
    /// attached; its assigned id becomes the doctor id.
    async fn insert_in_tx(
        &self,
        tx: &mut dyn TxScope,
        mut model: DoctorModel,
    ) -> Result<DoctorModel> {
        model.person.address = self
            .addresses
            .insert_in_tx(tx, &model.person.address)
            .await?;
        model.person = self.persons.insert_in_tx(tx, &model.person, true).await?;
        self.repository.insert(tx, &model).await
    }

    /// Reads one doctor (joined with its person and address rows).
    pub async fn get_doctor_by_id(&self, id: i32) -> Result<DoctorDto> {
        let mut scope = self.provider.begin().await?;
        let result = self.repository.get_by_id(scope.as_mut(), id).await;
        let model = resolve_scope(scope, result).await?;
        Ok(model.into())
    }

    /// Reads every doctor, enriching each row with its person data inside
    /// one shared scope. A single mid-batch failure rolls back the whole
    /// batch; no partial list is returned.
    pub async fn get_all_doctors(&self) -> Result<Vec<DoctorDto>> {
        let mut scope = self.provider.begin().await?;
        let result = self.get_all_in_tx(scope.as_mut()).await;
        let models = resolve_scope(scope, result).await?;
        Ok(models.into_iter().map(DoctorDto::from).collect())
    }

    async fn get_all_in_tx(&self, tx: &mut dyn TxScope) -> Result<Vec<DoctorModel>> {
        let rows = self.repository.get_all(tx).await?;
        let mut doctors = Vec::with_capacity(rows.len());
        for mut doctor in rows {
            let id = doctor.person.id.ok_or_else(|| {
                MedrecError::Database("Doctor row missing its person id".to_string())
            })?;
            doctor.person = self.persons.fetch_in_tx(tx, id).await?;
            doctors.push(doctor);
        }
        Ok(doctors)
    }

    /// Updates the mutable fields of a doctor.
    ///
    /// Email, specialty, and license code are immutable after creation: a
    /// payload that sets any of them is rejected outright. The owned
    /// address is updated first, then the person row, in one transaction.
    pub async fn update_doctor(&self, dto: DoctorDto) -> Result<DoctorDto> {
        let model = Self::normalize(dto)?;

        if model.person.email.is_some() {
            return Err(MedrecError::validation(
                "The email of a doctor cannot be updated!",
            ));
        }
        if model.specialty.is_some() {
            return Err(MedrecError::validation(
                "The specialty of a doctor cannot be updated!",
            ));
        }
        if model.license_code.is_some() {
            return Err(MedrecError::validation(
                "The license code of a doctor cannot be updated!",
            ));
        }

        validate_person(&model.person)?;
        AddressService::validate(&model.person.address)?;
        if model.person.id.is_none() {
            return Err(MedrecError::validation(
                "Invalid id! Please provide the id of the doctor to update",
            ));
        }

        let mut scope = self.provider.begin().await?;
        let result = self.update_in_tx(scope.as_mut(), &model).await;
        let updated = resolve_scope(scope, result).await?;

        tracing::info!(doctor_id = ?updated.person.id, "Doctor updated");
        // The update never reads or writes the active flag, so the response
        // leaves it absent rather than echoing a default.
        let mut dto = DoctorDto::from(updated);
        dto.active = None;
        Ok(dto)
    }

    async fn update_in_tx(&self, tx: &mut dyn TxScope, model: &DoctorModel) -> Result<DoctorModel> {
        let mut model = model.clone();
        model.person.address = self
            .addresses
            .update_in_tx(tx, &model.person.address)
            .await?;
        model.person = self.persons.update_in_tx(tx, &model.person, true).await?;
        Ok(model)
    }

    /// Soft-deletes a doctor by its shared person id. Zero rows affected
    /// (unknown id or already inactive) is a validation error and the
    /// transaction is rolled back.
    pub async fn deactivate_doctor(&self, id: i32) -> Result<DoctorDto> {
        let mut scope = self.provider.begin().await?;
        let result = match self.repository.deactivate(scope.as_mut(), id).await {
            Ok(0) => Err(MedrecError::validation(format!(
                "Could not deactivate: doctor {} not found",
                id
            ))),
            Ok(rows) => Ok(rows),
            Err(err) => Err(err),
        };
        resolve_scope(scope, result).await?;

        tracing::info!(doctor_id = id, "Doctor deactivated");
        Ok(DoctorDto {
            id: Some(id),
            active: Some(false),
            ..DoctorDto::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PersonModel;
    use test_case::test_case;

    fn doctor_with_license(license: Option<&str>) -> DoctorModel {
        DoctorModel {
            person: PersonModel::default(),
            license_code: license.map(String::from),
            specialty: Some(Specialty::Cardiology),
        }
    }

    #[test]
    fn test_validate_accepts_12_character_license() {
        let model = doctor_with_license(Some("CRM-PR-00123"));
        assert!(DoctorService::validate_doctor_fields(&model).is_ok());
    }

    #[test]
    fn test_validate_requires_license() {
        let model = doctor_with_license(None);
        let err = DoctorService::validate_doctor_fields(&model).unwrap_err();
        assert!(err.to_string().contains("license code"));
    }

    #[test_case("SHORT", "(5)"; "short license reports length 5")]
    #[test_case("CRM-PR-001234", "(13)"; "long license reports length 13")]
    fn test_validate_rejects_license_length(license: &str, expected: &str) {
        let model = doctor_with_license(Some(license));
        let err = DoctorService::validate_doctor_fields(&model).unwrap_err();
        assert!(err.to_string().contains(expected), "got: {err}");
    }

    #[test]
    fn test_validate_requires_specialty_and_lists_accepted_values() {
        let mut model = doctor_with_license(Some("CRM-PR-00123"));
        model.specialty = None;
        let err = DoctorService::validate_doctor_fields(&model).unwrap_err();
        for accepted in Specialty::ACCEPTED {
            assert!(err.to_string().contains(accepted));
        }
    }

    #[test]
    fn test_normalize_cleans_fields_and_parses_specialty() {
        let dto = DoctorDto {
            name: Some(" Ana  Souza ".to_string()),
            tax_id: Some("123.456.789-00".to_string()),
            specialty: Some(" cardiology ".to_string()),
            license_code: Some(" CRM-PR-00123 ".to_string()),
            ..DoctorDto::default()
        };
        let model = DoctorService::normalize(dto).unwrap();
        assert_eq!(model.person.name.as_deref(), Some("Ana Souza"));
        assert_eq!(model.person.tax_id.as_deref(), Some("12345678900"));
        assert_eq!(model.specialty, Some(Specialty::Cardiology));
        assert_eq!(model.license_code.as_deref(), Some("CRM-PR-00123"));
    }

    #[test]
    fn test_normalize_rejects_unknown_specialty() {
        let dto = DoctorDto {
            specialty: Some("ALCHEMY".to_string()),
            ..DoctorDto::default()
        };
        assert!(DoctorService::normalize(dto).is_err());
    }
}
