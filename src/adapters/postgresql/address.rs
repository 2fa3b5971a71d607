//! Address repository for PostgreSQL

use crate::adapters::database::traits::{AddressRepository, TxScope};
use crate::adapters::postgresql::pg_tx;
use crate::domain::model::AddressModel;
use crate::domain::{MedrecError, Result};
use async_trait::async_trait;
use tokio_postgres::Row;

/// PostgreSQL implementation of [`AddressRepository`].
///
/// Every method executes under the caller-supplied transaction scope.
pub struct PgAddressRepository;

fn address_from_row(row: &Row) -> Result<AddressModel> {
    Ok(AddressModel {
        id: Some(row.try_get("id")?),
        street: row.try_get("street")?,
        number: row.try_get("number")?,
        complement: row.try_get("complement")?,
        neighborhood: row.try_get("neighborhood")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        postal_code: row.try_get("postal_code")?,
    })
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    async fn insert(&self, tx: &mut dyn TxScope, model: &AddressModel) -> Result<AddressModel> {
        let tx = pg_tx(tx)?;

        let row = tx
            .client()
            .query_one(
                r#"
                INSERT INTO addresses (
                    street, number, complement, neighborhood, city, state, postal_code
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id
                "#,
                &[
                    &model.street,
                    &model.number,
                    &model.complement,
                    &model.neighborhood,
                    &model.city,
                    &model.state,
                    &model.postal_code,
                ],
            )
            .await?;

        let mut inserted = model.clone();
        inserted.id = Some(row.try_get("id")?);
        Ok(inserted)
    }

    async fn get_by_id(&self, tx: &mut dyn TxScope, id: i32) -> Result<AddressModel> {
        let tx = pg_tx(tx)?;

        let row = tx
            .client()
            .query_opt(
                r#"
                SELECT id, street, number, complement, neighborhood, city, state, postal_code
                FROM addresses
                WHERE id = $1
                "#,
                &[&id],
            )
            .await?
            .ok_or_else(|| MedrecError::validation(format!("Address {} not found", id)))?;

        address_from_row(&row)
    }

    async fn get_all(&self, tx: &mut dyn TxScope) -> Result<Vec<AddressModel>> {
        let tx = pg_tx(tx)?;

        let rows = tx
            .client()
            .query(
                r#"
                SELECT id, street, number, complement, neighborhood, city, state, postal_code
                FROM addresses
                ORDER BY id
                "#,
                &[],
            )
            .await?;

        rows.iter().map(address_from_row).collect()
    }

    async fn update(&self, tx: &mut dyn TxScope, model: &AddressModel) -> Result<AddressModel> {
        let tx = pg_tx(tx)?;

        let rows = tx
            .client()
            .execute(
                r#"
                UPDATE addresses
                SET street = $1, number = $2, complement = $3, neighborhood = $4,
                    city = $5, state = $6, postal_code = $7
                WHERE id = $8
                "#,
                &[
                    &model.street,
                    &model.number,
                    &model.complement,
                    &model.neighborhood,
                    &model.city,
                    &model.state,
                    &model.postal_code,
                    &model.id,
                ],
            )
            .await?;

        if rows == 0 {
            return Err(MedrecError::validation(format!(
                "Address {} not found",
                model.id.unwrap_or_default()
            )));
        }

        Ok(model.clone())
    }

    async fn delete(&self, tx: &mut dyn TxScope, id: i32) -> Result<u64> {
        let tx = pg_tx(tx)?;

        let rows = tx
            .client()
            .execute("DELETE FROM addresses WHERE id = $1", &[&id])
            .await?;

        Ok(rows)
    }
}
