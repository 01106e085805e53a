/// Contact model and ownership-scoped database operations
///
/// Every statement in this module carries the owning username in its WHERE
/// clause. A contact that exists under a different owner therefore behaves
/// exactly like a contact that does not exist, which keeps other users'
/// rows unenumerable.
///
/// Mutations are single conditional statements (`UPDATE ... WHERE id AND
/// username`, `DELETE ... WHERE id AND username`) rather than a separate
/// ownership check followed by the write, so there is no window between
/// check and act.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE contacts (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(100) NOT NULL REFERENCES users (username) ON DELETE CASCADE,
///     first_name VARCHAR(100) NOT NULL,
///     last_name VARCHAR(100),
///     email VARCHAR(200),
///     phone VARCHAR(20)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Contact model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    /// Unique contact ID
    pub id: i64,

    /// Owning username (foreign key to users)
    pub username: String,

    /// First name (required)
    pub first_name: String,

    /// Last name
    pub last_name: Option<String>,

    /// Email address
    pub email: Option<String>,

    /// Phone number
    pub phone: Option<String>,
}

/// Input for creating a contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContact {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Input for updating a contact
///
/// Updates overwrite all four mutable fields; an omitted optional field
/// clears the stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContact {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Optional substring filters for contact search
///
/// `name` matches against either first or last name. All matches are
/// case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Contact {
    /// Creates a new contact owned by `owner`
    pub async fn create(
        pool: &PgPool,
        owner: &str,
        data: CreateContact,
    ) -> Result<Self, sqlx::Error> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (username, first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, first_name, last_name, email, phone
            "#,
        )
        .bind(owner)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .bind(data.phone)
        .fetch_one(pool)
        .await?;

        Ok(contact)
    }

    /// Fetches a contact by ID, scoped to its owner
    ///
    /// Returns None both when the ID does not exist and when it belongs to
    /// a different owner.
    pub async fn find_by_id(
        pool: &PgPool,
        owner: &str,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, username, first_name, last_name, email, phone
            FROM contacts
            WHERE id = $1 AND username = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await?;

        Ok(contact)
    }

    /// Checks that a contact exists under the given owner
    ///
    /// This is the parent-ownership probe used before any address
    /// operation: the count is 1 exactly when the contact both exists and
    /// belongs to `owner`.
    pub async fn exists(pool: &PgPool, owner: &str, id: i64) -> Result<bool, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM contacts WHERE id = $1 AND username = $2")
                .bind(id)
                .bind(owner)
                .fetch_one(pool)
                .await?;

        Ok(count == 1)
    }

    /// Overwrites the mutable fields of a contact, scoped to its owner
    ///
    /// # Returns
    ///
    /// The updated contact, or None when the ID does not exist under
    /// `owner`.
    pub async fn update(
        pool: &PgPool,
        owner: &str,
        id: i64,
        data: UpdateContact,
    ) -> Result<Option<Self>, sqlx::Error> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET first_name = $3, last_name = $4, email = $5, phone = $6
            WHERE id = $1 AND username = $2
            RETURNING id, username, first_name, last_name, email, phone
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .bind(data.phone)
        .fetch_optional(pool)
        .await?;

        Ok(contact)
    }

    /// Deletes a contact, scoped to its owner
    ///
    /// Addresses under the contact are removed by ON DELETE CASCADE.
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false when the ID does not exist under
    /// `owner`.
    pub async fn delete(pool: &PgPool, owner: &str, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND username = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Searches the owner's contacts with optional substring filters
    ///
    /// # Arguments
    ///
    /// * `filter` - Optional substring filters (name, email, phone)
    /// * `page` - 1-based page number
    /// * `size` - Page size
    ///
    /// # Returns
    ///
    /// The requested page of contacts (ordered by ID) and the total number
    /// of matching rows.
    pub async fn search(
        pool: &PgPool,
        owner: &str,
        filter: &ContactFilter,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Self>, i64), sqlx::Error> {
        // Build the WHERE clause from whichever filters are present
        let mut where_clause = String::from("WHERE username = $1");
        let mut bind_count = 1;

        if filter.name.is_some() {
            bind_count += 1;
            where_clause.push_str(&format!(
                " AND (first_name ILIKE ${n} OR last_name ILIKE ${n})",
                n = bind_count
            ));
        }
        if filter.email.is_some() {
            bind_count += 1;
            where_clause.push_str(&format!(" AND email ILIKE ${}", bind_count));
        }
        if filter.phone.is_some() {
            bind_count += 1;
            where_clause.push_str(&format!(" AND phone ILIKE ${}", bind_count));
        }

        let count_query = format!("SELECT COUNT(*) FROM contacts {}", where_clause);
        let page_query = format!(
            "SELECT id, username, first_name, last_name, email, phone \
             FROM contacts {} ORDER BY id LIMIT ${} OFFSET ${}",
            where_clause,
            bind_count + 1,
            bind_count + 2
        );

        let name_pattern = filter.name.as_ref().map(|v| format!("%{}%", v));
        let email_pattern = filter.email.as_ref().map(|v| format!("%{}%", v));
        let phone_pattern = filter.phone.as_ref().map(|v| format!("%{}%", v));

        let mut count_q = sqlx::query_as::<_, (i64,)>(&count_query).bind(owner);
        if let Some(ref pattern) = name_pattern {
            count_q = count_q.bind(pattern.clone());
        }
        if let Some(ref pattern) = email_pattern {
            count_q = count_q.bind(pattern.clone());
        }
        if let Some(ref pattern) = phone_pattern {
            count_q = count_q.bind(pattern.clone());
        }
        let (total,): (i64,) = count_q.fetch_one(pool).await?;

        let mut page_q = sqlx::query_as::<_, Contact>(&page_query).bind(owner);
        if let Some(pattern) = name_pattern {
            page_q = page_q.bind(pattern);
        }
        if let Some(pattern) = email_pattern {
            page_q = page_q.bind(pattern);
        }
        if let Some(pattern) = phone_pattern {
            page_q = page_q.bind(pattern);
        }
        let contacts = page_q
            .bind(size)
            .bind((page - 1) * size)
            .fetch_all(pool)
            .await?;

        Ok((contacts, total))
    }
}
