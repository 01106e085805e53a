//! # Rolodex Shared Library
//!
//! This crate contains the data layer and authentication primitives shared
//! by the Rolodex API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, contacts, addresses) and their
//!   ownership-scoped CRUD operations
//! - `auth`: Password hashing and session-token utilities
//! - `db`: Connection pool management and the migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Rolodex shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
