/// Database models for Rolodex
///
/// This module contains all database models and their CRUD operations.
/// Contact and address operations are ownership-scoped: every statement
/// carries the owner (or the owning contact) in its WHERE clause, so a row
/// belonging to another user is indistinguishable from a missing row.
///
/// # Models
///
/// - `user`: User accounts, credentials, and the session token
/// - `contact`: Contacts owned by a user
/// - `address`: Addresses owned by a contact
///
/// # Example
///
/// ```no_run
/// use rolodex_shared::db::pool::{create_pool, DatabaseConfig};
/// use rolodex_shared::models::user::{CreateUser, User};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     password: "$argon2id$...".to_string(),
///     name: "Alice".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod address;
pub mod contact;
pub mod user;
