//! Doctor repository for PostgreSQL
//!
//! The doctor table is a 1:1 extension of `persons` keyed by the shared
//! person id; it holds only the immutable doctor columns.

use crate::adapters::database::traits::{DoctorRepository, TxScope};
use crate::adapters::postgresql::person::person_from_row;
use crate::adapters::postgresql::pg_tx;
use crate::domain::model::{DoctorModel, PersonModel, Specialty};
use crate::domain::{MedrecError, Result};
use async_trait::async_trait;
use tokio_postgres::Row;

/// PostgreSQL implementation of [`DoctorRepository`].
pub struct PgDoctorRepository;

fn specialty_from_row(row: &Row) -> Result<Option<Specialty>> {
    match row.try_get::<_, Option<String>>("specialty")? {
        Some(raw) => {
            let specialty = raw.parse::<Specialty>().map_err(|e| {
                MedrecError::Database(format!("Stored specialty rejected: {}", e))
            })?;
            Ok(Some(specialty))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl DoctorRepository for PgDoctorRepository {
    async fn insert(&self, tx: &mut dyn TxScope, model: &DoctorModel) -> Result<DoctorModel> {
        let tx = pg_tx(tx)?;

        let specialty = model.specialty.map(|s| s.as_str().to_string());
        tx.client()
            .execute(
                r#"
                INSERT INTO doctors (person_id, license_code, specialty)
                VALUES ($1, $2, $3)
                "#,
                &[&model.person.id, &model.license_code, &specialty],
            )
            .await?;

        Ok(model.clone())
    }

    async fn get_by_id(&self, tx: &mut dyn TxScope, id: i32) -> Result<DoctorModel> {
        let tx = pg_tx(tx)?;

        let row = tx
            .client()
            .query_opt(
                r#"
                SELECT p.id AS person_id, p.name, p.tax_id, p.phone, p.email, p.active,
                       a.id AS address_id, a.street, a.number, a.complement,
                       a.neighborhood, a.city, a.state, a.postal_code,
                       d.license_code, d.specialty
                FROM doctors d
                JOIN persons p ON p.id = d.person_id
                JOIN addresses a ON a.id = p.address_id
                WHERE d.person_id = $1
                "#,
                &[&id],
            )
            .await?
            .ok_or_else(|| MedrecError::validation(format!("Doctor {} not found", id)))?;

        Ok(DoctorModel {
            person: person_from_row(&row)?,
            license_code: row.try_get("license_code")?,
            specialty: specialty_from_row(&row)?,
        })
    }

    async fn get_all(&self, tx: &mut dyn TxScope) -> Result<Vec<DoctorModel>> {
        let tx = pg_tx(tx)?;

        let rows = tx
            .client()
            .query(
                r#"
                SELECT person_id, license_code, specialty
                FROM doctors
                ORDER BY person_id
                "#,
                &[],
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(DoctorModel {
                    person: PersonModel {
                        id: Some(row.try_get("person_id")?),
                        ..PersonModel::default()
                    },
                    license_code: row.try_get("license_code")?,
                    specialty: specialty_from_row(row)?,
                })
            })
            .collect()
    }

    async fn deactivate(&self, tx: &mut dyn TxScope, id: i32) -> Result<u64> {
        let tx = pg_tx(tx)?;

        // Soft-delete through the person row, but only for ids that are
        // actually doctors; predicated on active = TRUE so a repeat call
        // affects zero rows.
        let rows = tx
            .client()
            .execute(
                r#"
                UPDATE persons
                SET active = FALSE
                WHERE id = $1
                  AND active = TRUE
                  AND EXISTS (SELECT 1 FROM doctors d WHERE d.person_id = persons.id)
                "#,
                &[&id],
            )
            .await?;

        Ok(rows)
    }
}
