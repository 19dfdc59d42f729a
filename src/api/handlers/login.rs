//! Handler for the login forwarding endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::dto::login::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Forwards a login attempt to the authentication service.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Request Body
///
/// ```json
/// { "email": "a@b.com", "password": "secret", "role": "employee" }
/// ```
///
/// # Response
///
/// - **200 OK**: `{"token": "..."}`
/// - **400 Bad Request**: malformed body, unknown role, invalid email, empty password
/// - **4xx/5xx from upstream**: `{"message": "..."}` with the upstream status
/// - **502 Bad Gateway**: upstream unreachable or invalid
/// - **503 Service Unavailable**: no authentication service configured
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(credentials) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;

    let service = state
        .login_service
        .as_ref()
        .ok_or_else(|| AppError::unavailable("Authentication service is not configured"))?;

    let response = service.login(credentials).await?;

    Ok(Json(response))
}
