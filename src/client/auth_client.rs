//! Client side of the authentication service contract.
//!
//! ```text
//! POST <endpoint>
//! Content-Type: application/json
//!
//! {"email": "...", "password": "...", "role": "admin" | "employee"}
//! ```
//!
//! A 2xx answer carries `{"token": "..."}`, anything else `{"message": "..."}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::domain::entities::Credentials;

/// Login route of the authentication service, relative to its base URL.
const LOGIN_PATH: &str = "api/auth/login";

/// Message shown when the server rejects a login without saying why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Login failed";

/// Message shown for every failure that is not a server rejection.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred.";

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// The service answered with a non-2xx status.
    #[error("login rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// A 2xx response that does not follow the contract.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    /// Text shown in the form's inline error region.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Rejected { message, .. } => message.clone(),
            AuthError::Transport(_) | AuthError::InvalidResponse(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Issues login requests against the authentication service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Sends exactly one login request.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError>;
}

/// [`AuthClient`] speaking JSON over HTTP.
///
/// No timeout or retry is configured: a call runs until the network stack
/// resolves it.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    client: Client,
    endpoint: Url,
}

impl HttpAuthClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    /// Builds a client for `{base}/api/auth/login`.
    ///
    /// A path prefix on `base` is kept whether or not it ends with `/`.
    pub fn for_service(base: &Url) -> Result<Self, url::ParseError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self::new(base.join(LOGIN_PATH)?))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        tracing::debug!(endpoint = %self.endpoint, role = %credentials.role, "Sending login request");

        let res = self
            .client
            .post(self.endpoint.clone())
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if status.is_success() {
            let body: Value = serde_json::from_slice(&bytes)
                .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

            return match body.get("token").and_then(Value::as_str) {
                Some(token) => Ok(LoginResponse {
                    token: token.to_string(),
                }),
                None => Err(AuthError::InvalidResponse(
                    "response has no token".to_string(),
                )),
            };
        }

        Err(AuthError::Rejected {
            status: status.as_u16(),
            message: rejection_message(&bytes),
        })
    }
}

/// Extracts `message` from a failure body, defaulting when absent.
fn rejection_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_REJECTION_MESSAGE)
        .to_string()
}
