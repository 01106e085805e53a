/// Session token generation
///
/// A session token is an opaque random string stored verbatim on the user
/// row at login and cleared at logout. Requests are authenticated by an
/// equality lookup of the token, so the token itself carries no structure
/// and no claims.
///
/// # Example
///
/// ```
/// use rolodex_shared::auth::token::{generate_token, TOKEN_LENGTH};
///
/// let token = generate_token();
/// assert_eq!(token.len(), TOKEN_LENGTH);
/// assert!(token.chars().all(|c| c.is_alphanumeric()));
/// ```

use rand::Rng;

/// Length of a session token (characters)
///
/// Base62 at this length gives a key space of 62^32, far beyond guessing
/// range for an equality-checked credential.
pub const TOKEN_LENGTH: usize = 32;

/// Generates a new opaque session token
///
/// Uses base62 characters (A-Z, a-z, 0-9) so the token is safe to carry in
/// an HTTP header without encoding.
pub fn generate_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
