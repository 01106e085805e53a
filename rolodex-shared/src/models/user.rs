/// User model and database operations
///
/// Users are keyed by username. The password column holds an Argon2id PHC
/// string, never plaintext. The token column holds the opaque session token
/// while the user is logged in and is NULL otherwise.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     username VARCHAR(100) PRIMARY KEY,
///     password VARCHAR(255) NOT NULL,
///     name VARCHAR(100) NOT NULL,
///     token VARCHAR(100)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User model representing an account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique username (primary key)
    pub username: String,

    /// Argon2id password hash (PHC string)
    pub password: String,

    /// Display name
    pub name: String,

    /// Opaque session token, present only while logged in
    pub token: Option<String>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Unique username
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password: String,

    /// Display name
    pub name: String,
}

/// Input for updating an existing user
///
/// All fields are optional; only non-None fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name
    pub name: Option<String>,

    /// New Argon2id password hash
    pub password: Option<String>,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if the username already exists (unique constraint
    /// violation) or the database is unreachable. Callers that want a clean
    /// duplicate-username error should check [`User::count_by_username`]
    /// first.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, name)
            VALUES ($1, $2, $3)
            RETURNING username, password, name, token
            "#,
        )
        .bind(data.username)
        .bind(data.password)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    ///
    /// Returns the user if found, None otherwise.
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password, name, token
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by session token
    ///
    /// This is the authentication lookup: an equality match of the opaque
    /// token presented in the Authorization header. Zero matches means the
    /// request is unauthenticated.
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password, name, token
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Counts users with the given username
    ///
    /// Used by registration to reject a taken username before inserting.
    pub async fn count_by_username(pool: &PgPool, username: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Updates an existing user
    ///
    /// Only non-None fields in `data` are written.
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the username doesn't exist
    pub async fn update(
        pool: &PgPool,
        username: &str,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the update statement from whichever fields are present
        let mut query = String::from("UPDATE users SET username = username");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.password.is_some() {
            bind_count += 1;
            query.push_str(&format!(", password = ${}", bind_count));
        }

        query.push_str(" WHERE username = $1 RETURNING username, password, name, token");

        let mut q = sqlx::query_as::<_, User>(&query).bind(username);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(password) = data.password {
            q = q.bind(password);
        }

        let user = q.fetch_optional(pool).await?;

        Ok(user)
    }

    /// Stores or clears the session token for a user
    ///
    /// Login stores a freshly generated token; logout clears it by passing
    /// None.
    ///
    /// # Returns
    ///
    /// True if the user was found and updated, false otherwise
    pub async fn set_token(
        pool: &PgPool,
        username: &str,
        token: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET token = $2 WHERE username = $1")
            .bind(username)
            .bind(token)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user by username
    ///
    /// Contacts and addresses owned by the user are removed by the schema's
    /// ON DELETE CASCADE chain.
    ///
    /// # Returns
    ///
    /// True if the user was deleted, false if the username didn't exist
    pub async fn delete(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
