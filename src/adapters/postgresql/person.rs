//! Person repository for PostgreSQL

use crate::adapters::database::traits::{PersonRepository, TxScope};
use crate::adapters::postgresql::pg_tx;
use crate::domain::model::{AddressModel, PersonModel};
use crate::domain::{MedrecError, Result};
use async_trait::async_trait;
use tokio_postgres::Row;

/// PostgreSQL implementation of [`PersonRepository`].
pub struct PgPersonRepository;

/// Maps a joined person + address row. Shared with the doctor repository,
/// whose reads use the same column aliases.
pub(crate) fn person_from_row(row: &Row) -> Result<PersonModel> {
    Ok(PersonModel {
        id: Some(row.try_get("person_id")?),
        name: row.try_get("name")?,
        tax_id: row.try_get("tax_id")?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        active: row.try_get("active")?,
        address: AddressModel {
            id: Some(row.try_get("address_id")?),
            street: row.try_get("street")?,
            number: row.try_get("number")?,
            complement: row.try_get("complement")?,
            neighborhood: row.try_get("neighborhood")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            postal_code: row.try_get("postal_code")?,
        },
    })
}

#[async_trait]
impl PersonRepository for PgPersonRepository {
    async fn insert(&self, tx: &mut dyn TxScope, model: &PersonModel) -> Result<PersonModel> {
        let tx = pg_tx(tx)?;

        let row = tx
            .client()
            .query_one(
                r#"
                INSERT INTO persons (name, tax_id, phone, email, active, address_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
                "#,
                &[
                    &model.name,
                    &model.tax_id,
                    &model.phone,
                    &model.email,
                    &model.active,
                    &model.address.id,
                ],
            )
            .await?;

        let mut inserted = model.clone();
        inserted.id = Some(row.try_get("id")?);
        Ok(inserted)
    }

    async fn get_by_id(&self, tx: &mut dyn TxScope, id: i32) -> Result<PersonModel> {
        let tx = pg_tx(tx)?;

        let row = tx
            .client()
            .query_opt(
                r#"
                SELECT p.id AS person_id, p.name, p.tax_id, p.phone, p.email, p.active,
                       a.id AS address_id, a.street, a.number, a.complement,
                       a.neighborhood, a.city, a.state, a.postal_code
                FROM persons p
                JOIN addresses a ON a.id = p.address_id
                WHERE p.id = $1
                "#,
                &[&id],
            )
            .await?
            .ok_or_else(|| MedrecError::validation(format!("Person {} not found", id)))?;

        person_from_row(&row)
    }

    async fn update(&self, tx: &mut dyn TxScope, model: &PersonModel) -> Result<PersonModel> {
        let tx = pg_tx(tx)?;

        let rows = tx
            .client()
            .execute(
                r#"
                UPDATE persons
                SET name = $1, tax_id = $2, phone = $3
                WHERE id = $4
                "#,
                &[&model.name, &model.tax_id, &model.phone, &model.id],
            )
            .await?;

        if rows == 0 {
            return Err(MedrecError::validation(format!(
                "Person {} not found",
                model.id.unwrap_or_default()
            )));
        }

        Ok(model.clone())
    }

    async fn deactivate(&self, tx: &mut dyn TxScope, id: i32) -> Result<u64> {
        let tx = pg_tx(tx)?;

        // Predicated on active = TRUE so a repeat call affects zero rows.
        let rows = tx
            .client()
            .execute(
                "UPDATE persons SET active = FALSE WHERE id = $1 AND active = TRUE",
                &[&id],
            )
            .await?;

        Ok(rows)
    }
}
