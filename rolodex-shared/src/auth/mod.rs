/// Authentication primitives for Rolodex
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: Opaque session-token generation
///
/// Session handling is deliberately simple: logging in stores a freshly
/// generated opaque token on the user row, and authentication is an
/// equality lookup of that token. There is no expiry and no rotation.
///
/// # Example
///
/// ```
/// use rolodex_shared::auth::password::{hash_password, verify_password};
/// use rolodex_shared::auth::token::generate_token;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let token = generate_token();
/// assert!(!token.is_empty());
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod token;
