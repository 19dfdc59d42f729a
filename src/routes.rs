//! Top-level router configuration combining API and page routes.
//!
//! # Route Structure
//!
//! - `GET  /`               - Liveness (public)
//! - `GET  /health`         - Readiness: database check (public)
//! - `GET  /login`          - Login page (public)
//! - `POST /api/auth/login` - Login forwarding (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the login route
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let auth_router = api::routes::auth_routes().layer(rate_limit::login_layer());

    let router = Router::new()
        .merge(api::routes::public_routes())
        .merge(web::routes::public_routes())
        .nest("/api/auth", auth_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
