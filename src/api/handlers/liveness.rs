//! Handler for the liveness route.

/// Body returned by the liveness route.
pub const LIVENESS_MESSAGE: &str = "Backend is running";

/// Reports that the process is up.
///
/// # Endpoint
///
/// `GET /`
///
/// Never touches the database; use `GET /health` for readiness.
pub async fn liveness_handler() -> &'static str {
    LIVENESS_MESSAGE
}
