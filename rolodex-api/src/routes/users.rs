/// User account endpoints
///
/// Registration and login are public; the profile and logout endpoints
/// require a session token.
///
/// # Endpoints
///
/// - `POST   /api/users` - Register a new user
/// - `POST   /api/users/login` - Login, receive a session token
/// - `GET    /api/users/current` - Current user's profile
/// - `PATCH  /api/users/current` - Update name and/or password
/// - `DELETE /api/users/logout` - Clear the session token

use crate::{
    app::AppState,
    error::{validate_request, ApiError, ApiResult},
    middleware::auth::CurrentUser,
    response::Data,
};
use axum::{extract::State, Extension, Json};
use rolodex_shared::auth::{
    password::{hash_password, verify_password},
    token::generate_token,
};
use rolodex_shared::models::user::{CreateUser, UpdateUser, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username
    #[validate(length(min = 1, max = 100, message = "username must be 1-100 characters"))]
    pub username: String,

    /// Password (stored as an Argon2id hash)
    #[validate(length(min = 1, max = 100, message = "password must be 1-100 characters"))]
    pub password: String,

    /// Display name
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100, message = "username must be 1-100 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 100, message = "password must be 1-100 characters"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque session token for the Authorization header
    pub token: String,
}

/// Profile update request
///
/// Both fields are optional; only the supplied ones are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "password must be 1-100 characters"))]
    pub password: Option<String>,
}

/// Public projection of a user
///
/// The password hash and the session token are never returned.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
        }
    }
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/users
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "rahasia",
///   "name": "Alice"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or the username is taken
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<Data<UserResponse>>> {
    validate_request(&req)?;

    if User::count_by_username(&state.db, &req.username).await? != 0 {
        return Err(ApiError::BadRequest("Username already exists".to_string()));
    }

    let password = hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            password,
            name: req.name,
        },
    )
    .await?;

    Ok(Data::new(UserResponse::from(user)))
}

/// Login and receive a session token
///
/// Verifies the password against the stored Argon2id hash, generates a
/// fresh opaque token, and stores it on the user row. A later login
/// replaces any earlier token.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Unknown username or wrong password (same message
///   for both)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Data<LoginResponse>>> {
    validate_request(&req)?;

    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(wrong_credentials)?;

    let valid = verify_password(&req.password, &user.password)?;
    if !valid {
        return Err(wrong_credentials());
    }

    let token = generate_token();
    User::set_token(&state.db, &user.username, Some(token.as_str())).await?;

    Ok(Data::new(LoginResponse { token }))
}

/// Current user's profile
pub async fn current(
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Data<UserResponse>>> {
    Ok(Data::new(UserResponse {
        username: user.username,
        name: user.name,
    }))
}

/// Update the current user's name and/or password
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
pub async fn update_current(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<Data<UserResponse>>> {
    validate_request(&req)?;

    let password = match req.password {
        Some(plaintext) => Some(hash_password(&plaintext)?),
        None => None,
    };

    let updated = User::update(
        &state.db,
        &user.username,
        UpdateUser {
            name: req.name,
            password,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Data::new(UserResponse::from(updated)))
}

/// Logout: clear the stored session token
///
/// The token presented on this request stops working immediately.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Data<&'static str>>> {
    User::set_token(&state.db, &user.username, None).await?;

    Ok(Data::new("OK"))
}

fn wrong_credentials() -> ApiError {
    ApiError::Unauthorized("Username or password wrong".to_string())
}
