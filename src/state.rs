//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::LoginService;
use crate::domain::repositories::DatabaseProbe;

#[derive(Clone)]
pub struct AppState {
    pub database: Arc<dyn DatabaseProbe>,
    /// Forwarding to the authentication service; `None` when not configured.
    pub login_service: Option<Arc<LoginService>>,
    /// Endpoint the rendered login page submits to.
    pub login_endpoint: String,
}

impl AppState {
    pub fn new(
        database: Arc<dyn DatabaseProbe>,
        login_service: Option<Arc<LoginService>>,
        login_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            database,
            login_service,
            login_endpoint: login_endpoint.into(),
        }
    }
}
