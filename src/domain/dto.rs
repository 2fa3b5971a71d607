//! Wire-facing data-transfer records and entity mappers
//!
//! DTOs are flat records with only primitive/string fields; the transport
//! layer owns their serialization format. Mapping is bidirectional and
//! lossless: model → DTO is infallible, DTO → model is fallible only where
//! the wire can carry an unrecognized specialty spelling.

use crate::domain::errors::MedrecError;
use crate::domain::model::{AddressModel, DoctorModel, PersonModel, Specialty};
use serde::{Deserialize, Serialize};

/// Wire record for an address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressDto {
    pub id: Option<i32>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// Wire record for a person, with its owned address inlined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonDto {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
    pub address_id: Option<i32>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// Wire record for a doctor, with person and address fields inlined.
///
/// `id` is the shared person id; `specialty` carries the wire spelling of
/// [`Specialty`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorDto {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub license_code: Option<String>,
    pub specialty: Option<String>,
    pub active: Option<bool>,
    pub address_id: Option<i32>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

impl From<AddressModel> for AddressDto {
    fn from(model: AddressModel) -> Self {
        AddressDto {
            id: model.id,
            street: model.street,
            number: model.number,
            complement: model.complement,
            neighborhood: model.neighborhood,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
        }
    }
}

impl From<AddressDto> for AddressModel {
    fn from(dto: AddressDto) -> Self {
        AddressModel {
            id: dto.id,
            street: dto.street,
            number: dto.number,
            complement: dto.complement,
            neighborhood: dto.neighborhood,
            city: dto.city,
            state: dto.state,
            postal_code: dto.postal_code,
        }
    }
}

impl From<PersonModel> for PersonDto {
    fn from(model: PersonModel) -> Self {
        PersonDto {
            id: model.id,
            name: model.name,
            tax_id: model.tax_id,
            phone: model.phone,
            email: model.email,
            active: Some(model.active),
            address_id: model.address.id,
            street: model.address.street,
            number: model.address.number,
            complement: model.address.complement,
            neighborhood: model.address.neighborhood,
            city: model.address.city,
            state: model.address.state,
            postal_code: model.address.postal_code,
        }
    }
}

impl From<PersonDto> for PersonModel {
    fn from(dto: PersonDto) -> Self {
        PersonModel {
            id: dto.id,
            name: dto.name,
            tax_id: dto.tax_id,
            phone: dto.phone,
            email: dto.email,
            active: dto.active.unwrap_or(true),
            address: AddressModel {
                id: dto.address_id,
                street: dto.street,
                number: dto.number,
                complement: dto.complement,
                neighborhood: dto.neighborhood,
                city: dto.city,
                state: dto.state,
                postal_code: dto.postal_code,
            },
        }
    }
}

impl From<DoctorModel> for DoctorDto {
    fn from(model: DoctorModel) -> Self {
        let person = model.person;
        DoctorDto {
            id: person.id,
            name: person.name,
            tax_id: person.tax_id,
            phone: person.phone,
            email: person.email,
            license_code: model.license_code,
            specialty: model.specialty.map(|s| s.as_str().to_string()),
            active: Some(person.active),
            address_id: person.address.id,
            street: person.address.street,
            number: person.address.number,
            complement: person.address.complement,
            neighborhood: person.address.neighborhood,
            city: person.address.city,
            state: person.address.state,
            postal_code: person.address.postal_code,
        }
    }
}

impl TryFrom<DoctorDto> for DoctorModel {
    type Error = MedrecError;

    fn try_from(dto: DoctorDto) -> Result<Self, Self::Error> {
        let specialty = dto
            .specialty
            .as_deref()
            .map(str::parse::<Specialty>)
            .transpose()?;

        Ok(DoctorModel {
            person: PersonModel {
                id: dto.id,
                name: dto.name,
                tax_id: dto.tax_id,
                phone: dto.phone,
                email: dto.email,
                active: dto.active.unwrap_or(true),
                address: AddressModel {
                    id: dto.address_id,
                    street: dto.street,
                    number: dto.number,
                    complement: dto.complement,
                    neighborhood: dto.neighborhood,
                    city: dto.city,
                    state: dto.state,
                    postal_code: dto.postal_code,
                },
            },
            license_code: dto.license_code,
            specialty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doctor_dto() -> DoctorDto {
        DoctorDto {
            id: Some(7),
            name: Some("Ana Souza".to_string()),
            tax_id: Some("12345678900".to_string()),
            phone: Some("44998765432".to_string()),
            email: Some("ana@example.com".to_string()),
            license_code: Some("CRM-PR-00123".to_string()),
            specialty: Some("CARDIOLOGY".to_string()),
            active: Some(true),
            address_id: Some(3),
            street: Some("Rua das Flores".to_string()),
            number: Some("100".to_string()),
            complement: None,
            neighborhood: Some("Centro".to_string()),
            city: Some("Umuarama".to_string()),
            state: Some("PR".to_string()),
            postal_code: Some("87501000".to_string()),
        }
    }

    #[test]
    fn test_doctor_round_trip_is_lossless() {
        let dto = sample_doctor_dto();
        let model = DoctorModel::try_from(dto.clone()).unwrap();
        let back: DoctorDto = model.into();
        assert_eq!(back, dto);
    }

    #[test]
    fn test_doctor_mapping_rejects_unknown_specialty() {
        let mut dto = sample_doctor_dto();
        dto.specialty = Some("ALCHEMY".to_string());
        let err = DoctorModel::try_from(dto).unwrap_err();
        assert!(matches!(err, MedrecError::Validation(_)));
        assert!(err.to_string().contains("ALCHEMY"));
    }

    #[test]
    fn test_doctor_mapping_keeps_absent_fields_absent() {
        let dto = DoctorDto {
            id: Some(1),
            ..DoctorDto::default()
        };
        let model = DoctorModel::try_from(dto).unwrap();
        assert!(model.license_code.is_none());
        assert!(model.specialty.is_none());
        assert!(model.person.email.is_none());
        // Absent active flag defaults true on the model side.
        assert!(model.person.active);
    }

    #[test]
    fn test_person_round_trip_is_lossless() {
        let dto = PersonDto {
            id: Some(2),
            name: Some("Bruno Lima".to_string()),
            tax_id: Some("98765432100".to_string()),
            phone: Some("449911122233".to_string()),
            email: None,
            active: Some(false),
            address_id: Some(9),
            street: Some("Av. Brasil".to_string()),
            number: Some("2000".to_string()),
            complement: Some("Bloco B".to_string()),
            neighborhood: Some("Zona 1".to_string()),
            city: Some("Maringá".to_string()),
            state: Some("PR".to_string()),
            postal_code: Some("87013000".to_string()),
        };
        let model = PersonModel::from(dto.clone());
        let back: PersonDto = model.into();
        assert_eq!(back, dto);
    }

    #[test]
    fn test_address_round_trip_is_lossless() {
        let dto = AddressDto {
            id: Some(5),
            street: Some("Rua A".to_string()),
            number: Some("12".to_string()),
            complement: None,
            neighborhood: Some("Centro".to_string()),
            city: Some("Umuarama".to_string()),
            state: Some("PR".to_string()),
            postal_code: Some("87501000".to_string()),
        };
        let model = AddressModel::from(dto.clone());
        let back: AddressDto = model.into();
        assert_eq!(back, dto);
    }
}
