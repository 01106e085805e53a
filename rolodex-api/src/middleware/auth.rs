/// Token authentication middleware
///
/// Authenticates a request by resolving the opaque token in the
/// `Authorization` header to exactly one user row. This is a pure equality
/// lookup: tokens carry no claims, no expiry, and no signature. A `Bearer `
/// prefix is tolerated but not required.
///
/// On success the middleware injects [`CurrentUser`] into the request
/// extensions; handlers extract it with Axum's `Extension` extractor.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use rolodex_api::middleware::auth::CurrentUser;
///
/// async fn handler(Extension(user): Extension<CurrentUser>) -> String {
///     format!("Hello, {}!", user.username)
/// }
/// ```

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use rolodex_shared::models::user::User;

/// Authenticated user added to request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Username of the authenticated user
    pub username: String,

    /// Display name
    pub name: String,
}

/// Token authentication middleware layer
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - The Authorization header is missing or not valid UTF-8
/// - No user row carries the presented token
pub async fn token_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(unauthorized)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .trim();

    if token.is_empty() {
        return Err(unauthorized());
    }

    let user = User::find_by_token(&state.db, token)
        .await?
        .ok_or_else(unauthorized)?;

    req.extensions_mut().insert(CurrentUser {
        username: user.username,
        name: user.name,
    });

    Ok(next.run(req).await)
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Unauthorized".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_clone() {
        let user = CurrentUser {
            username: "test".to_string(),
            name: "Test User".to_string(),
        };

        let cloned = user.clone();
        assert_eq!(user.username, cloned.username);
        assert_eq!(user.name, cloned.name);
    }
}
