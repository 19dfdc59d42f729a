#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};
use staff_portal::application::services::LoginService;
use staff_portal::client::{AuthClient, AuthError, LoginResponse};
use staff_portal::domain::entities::Credentials;
use staff_portal::domain::repositories::DatabaseProbe;
use staff_portal::error::AppError;
use staff_portal::state::AppState;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use url::Url;

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

/// Probe with a fixed answer.
pub struct StaticProbe {
    pub healthy: bool,
}

#[async_trait]
impl DatabaseProbe for StaticProbe {
    async fn ping(&self) -> Result<(), AppError> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::unavailable("connection refused"))
        }
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Auth client answering from a closure and recording every call.
pub struct StubAuthClient {
    pub calls: Mutex<Vec<Credentials>>,
    respond: Box<dyn Fn(&Credentials) -> Result<LoginResponse, AuthError> + Send + Sync>,
}

impl StubAuthClient {
    pub fn new(
        respond: impl Fn(&Credentials) -> Result<LoginResponse, AuthError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// Accepts `secret` as the only valid password.
    pub fn password_checker() -> Self {
        Self::new(|creds| {
            if creds.password == "secret" {
                Ok(LoginResponse {
                    token: format!("token-for-{}", creds.role),
                })
            } else {
                Err(AuthError::Rejected {
                    status: 401,
                    message: "Invalid credentials".to_string(),
                })
            }
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AuthClient for StubAuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        self.calls.lock().unwrap().push(credentials.clone());
        (self.respond)(credentials)
    }
}

pub fn create_test_state(db_healthy: bool, auth: Option<Arc<StubAuthClient>>) -> AppState {
    let login_service = auth.map(|client| {
        let client: Arc<dyn AuthClient> = client;
        Arc::new(LoginService::new(client))
    });

    AppState::new(
        Arc::new(StaticProbe {
            healthy: db_healthy,
        }),
        login_service,
        LOGIN_ENDPOINT,
    )
}

/// Requests received by a stub authentication service.
pub type Received = Arc<Mutex<Vec<Value>>>;

async fn stub_login(State(received): State<Received>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    received.lock().unwrap().push(body.clone());

    match body["password"].as_str() {
        Some("secret") => (StatusCode::OK, Json(json!({ "token": "T" }))),
        Some("no-token") => (StatusCode::OK, Json(json!({}))),
        Some("locked") => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "message": "Too many attempts" })),
        ),
        Some("silent") => (StatusCode::UNAUTHORIZED, Json(json!({}))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        ),
    }
}

/// Starts a stub authentication service on an ephemeral port.
///
/// Returns its base URL and the list of JSON bodies it received.
pub async fn spawn_auth_service() -> (Url, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/api/auth/login", post(stub_login))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url(addr), received)
}

pub fn base_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{}/", addr)).unwrap()
}

/// An address nothing listens on.
pub async fn closed_port_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    base_url(addr)
}
