//! API route configuration.

use crate::api::handlers::{health_handler, liveness_handler, login_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Probe routes, no authentication and no rate limit.
///
/// # Endpoints
///
/// - `GET /`       - Liveness (`Backend is running`)
/// - `GET /health` - Readiness (database check)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness_handler))
        .route("/health", get(health_handler))
}

/// Authentication routes, nested under `/api/auth`.
///
/// # Endpoints
///
/// - `POST /login` - Forward credentials to the authentication service
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login_handler))
}
