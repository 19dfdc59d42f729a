//! Login forwarding service.

use std::sync::Arc;
use validator::Validate;

use crate::client::{AuthClient, AuthError, LoginResponse};
use crate::domain::entities::Credentials;
use crate::error::AppError;

/// Forwards validated login requests to the authentication service.
///
/// The gateway holds no credentials of its own: it checks the payload shape,
/// relays the call and translates the outcome back into the
/// `{token}` / `{message}` contract.
pub struct LoginService {
    client: Arc<dyn AuthClient>,
}

impl LoginService {
    pub fn new(client: Arc<dyn AuthClient>) -> Self {
        Self { client }
    }

    /// Validates and forwards one login attempt.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the email or password is malformed
    /// - [`AppError::Rejected`] carrying the upstream status and message
    /// - [`AppError::BadGateway`] if the upstream is unreachable or breaks the contract
    pub async fn login(&self, credentials: Credentials) -> Result<LoginResponse, AppError> {
        if let Err(e) = credentials.validate() {
            record_outcome("invalid");
            return Err(e.into());
        }

        match self.client.login(&credentials).await {
            Ok(response) => {
                record_outcome("success");
                tracing::info!(role = %credentials.role, "Login forwarded successfully");
                Ok(response)
            }
            Err(AuthError::Rejected { status, message }) => {
                record_outcome("rejected");
                tracing::info!(role = %credentials.role, status, "Login rejected upstream");
                Err(AppError::rejected(status, message))
            }
            Err(e @ AuthError::Transport(_)) => {
                record_outcome("upstream_error");
                tracing::warn!(error = %e, "Authentication service unreachable");
                Err(AppError::bad_gateway("Authentication service unavailable"))
            }
            Err(e @ AuthError::InvalidResponse(_)) => {
                record_outcome("upstream_error");
                tracing::warn!(error = %e, "Authentication service broke the response contract");
                Err(AppError::bad_gateway(
                    "Authentication service returned an invalid response",
                ))
            }
        }
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("login_requests_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockAuthClient;
    use crate::domain::entities::Role;
    use axum::http::StatusCode;

    fn creds() -> Credentials {
        Credentials::new("a@b.com", "secret", Role::Employee)
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut client = MockAuthClient::new();
        client
            .expect_login()
            .withf(|c| c.email == "a@b.com" && c.role == Role::Employee)
            .times(1)
            .returning(|_| {
                Ok(LoginResponse {
                    token: "T".to_string(),
                })
            });

        let service = LoginService::new(Arc::new(client));
        let response = service.login(creds()).await.unwrap();

        assert_eq!(response.token, "T");
    }

    #[tokio::test]
    async fn test_invalid_email_is_not_forwarded() {
        let mut client = MockAuthClient::new();
        client.expect_login().times(0);

        let service = LoginService::new(Arc::new(client));
        let result = service
            .login(Credentials::new("nope", "secret", Role::Admin))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_rejection_keeps_status_and_message() {
        let mut client = MockAuthClient::new();
        client.expect_login().times(1).returning(|_| {
            Err(AuthError::Rejected {
                status: 401,
                message: "Invalid credentials".to_string(),
            })
        });

        let service = LoginService::new(Arc::new(client));
        let err = service.login(creds()).await.unwrap_err();

        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_upstream_server_error_keeps_status() {
        let mut client = MockAuthClient::new();
        client.expect_login().times(1).returning(|_| {
            Err(AuthError::Rejected {
                status: 503,
                message: "Maintenance".to_string(),
            })
        });

        let service = LoginService::new(Arc::new(client));
        let err = service.login(creds()).await.unwrap_err();

        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "Maintenance");
        assert!(matches!(err, AppError::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_transport_error_is_bad_gateway() {
        let mut client = MockAuthClient::new();
        client
            .expect_login()
            .times(1)
            .returning(|_| Err(AuthError::Transport("refused".to_string())));

        let service = LoginService::new(Arc::new(client));
        let err = service.login(creds()).await.unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
