/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use rolodex_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = rolodex_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::auth::token_auth_layer, middleware::security::SecurityHeadersLayer};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                  # Health check (public)
/// └── /api/
///     ├── /users/                              # Accounts
///     │   ├── POST   /                         # Register (public)
///     │   ├── POST   /login                    # Login (public)
///     │   ├── GET    /current                  # Profile (authenticated)
///     │   ├── PATCH  /current                  # Update profile
///     │   └── DELETE /logout                   # Clear session token
///     └── /contacts/                           # Contacts (authenticated)
///         ├── POST   /                         # Create contact
///         ├── GET    /                         # Search with paging
///         ├── GET    /:contact_id
///         ├── PUT    /:contact_id
///         ├── DELETE /:contact_id
///         ├── POST   /:contact_id/addresses
///         ├── GET    /:contact_id/addresses
///         ├── GET    /:contact_id/addresses/:address_id
///         ├── PUT    /:contact_id/addresses/:address_id
///         └── DELETE /:contact_id/addresses/:address_id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Token authentication (per-route-group basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Account routes that require a session token
    let account_routes = Router::new()
        .route(
            "/current",
            get(routes::users::current).patch(routes::users::update_current),
        )
        .route("/logout", delete(routes::users::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            token_auth_layer,
        ));

    // User routes: registration and login are public
    let user_routes = Router::new()
        .route("/", post(routes::users::register))
        .route("/login", post(routes::users::login))
        .merge(account_routes);

    // Contact and address routes (all require a session token)
    let contact_routes = Router::new()
        .route(
            "/",
            post(routes::contacts::create).get(routes::contacts::search),
        )
        .route(
            "/:contact_id",
            get(routes::contacts::get)
                .put(routes::contacts::update)
                .delete(routes::contacts::remove),
        )
        .route(
            "/:contact_id/addresses",
            post(routes::addresses::create).get(routes::addresses::list),
        )
        .route(
            "/:contact_id/addresses/:address_id",
            get(routes::addresses::get)
                .put(routes::addresses::update)
                .delete(routes::addresses::remove),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            token_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/contacts", contact_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
