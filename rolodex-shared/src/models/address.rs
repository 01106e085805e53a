/// Address model and contact-scoped database operations
///
/// An address belongs to exactly one contact. Callers must verify that the
/// contact belongs to the requesting user (via `Contact::exists`) before
/// touching addresses; every statement here is then scoped by `contact_id`,
/// so an address under someone else's contact behaves like a missing row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE addresses (
///     id BIGSERIAL PRIMARY KEY,
///     contact_id BIGINT NOT NULL REFERENCES contacts (id) ON DELETE CASCADE,
///     street VARCHAR(255),
///     city VARCHAR(100),
///     province VARCHAR(100),
///     country VARCHAR(100) NOT NULL,
///     postal_code VARCHAR(10) NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Address model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    /// Unique address ID
    pub id: i64,

    /// Owning contact (foreign key to contacts)
    pub contact_id: i64,

    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,

    /// Country (required)
    pub country: String,

    /// Postal code (required)
    pub postal_code: String,
}

/// Input for creating an address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

/// Input for updating an address
///
/// Updates overwrite all five fields; an omitted optional field clears the
/// stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl Address {
    /// Creates a new address under the given contact
    pub async fn create(
        pool: &PgPool,
        contact_id: i64,
        data: CreateAddress,
    ) -> Result<Self, sqlx::Error> {
        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses (contact_id, street, city, province, country, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, contact_id, street, city, province, country, postal_code
            "#,
        )
        .bind(contact_id)
        .bind(data.street)
        .bind(data.city)
        .bind(data.province)
        .bind(data.country)
        .bind(data.postal_code)
        .fetch_one(pool)
        .await?;

        Ok(address)
    }

    /// Fetches an address by ID, scoped to its contact
    pub async fn find_by_id(
        pool: &PgPool,
        contact_id: i64,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let address = sqlx::query_as::<_, Address>(
            r#"
            SELECT id, contact_id, street, city, province, country, postal_code
            FROM addresses
            WHERE id = $1 AND contact_id = $2
            "#,
        )
        .bind(id)
        .bind(contact_id)
        .fetch_optional(pool)
        .await?;

        Ok(address)
    }

    /// Overwrites the fields of an address, scoped to its contact
    ///
    /// # Returns
    ///
    /// The updated address, or None when the ID does not exist under
    /// `contact_id`.
    pub async fn update(
        pool: &PgPool,
        contact_id: i64,
        id: i64,
        data: UpdateAddress,
    ) -> Result<Option<Self>, sqlx::Error> {
        let address = sqlx::query_as::<_, Address>(
            r#"
            UPDATE addresses
            SET street = $3, city = $4, province = $5, country = $6, postal_code = $7
            WHERE id = $1 AND contact_id = $2
            RETURNING id, contact_id, street, city, province, country, postal_code
            "#,
        )
        .bind(id)
        .bind(contact_id)
        .bind(data.street)
        .bind(data.city)
        .bind(data.province)
        .bind(data.country)
        .bind(data.postal_code)
        .fetch_optional(pool)
        .await?;

        Ok(address)
    }

    /// Deletes an address, scoped to its contact
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false when the ID does not exist under
    /// `contact_id`.
    pub async fn delete(pool: &PgPool, contact_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1 AND contact_id = $2")
            .bind(id)
            .bind(contact_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all addresses under a contact, ordered by ID
    pub async fn list_by_contact(pool: &PgPool, contact_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let addresses = sqlx::query_as::<_, Address>(
            r#"
            SELECT id, contact_id, street, city, province, country, postal_code
            FROM addresses
            WHERE contact_id = $1
            ORDER BY id
            "#,
        )
        .bind(contact_id)
        .fetch_all(pool)
        .await?;

        Ok(addresses)
    }
}
