mod common;

use axum::ServiceExt;
use axum::extract::Request;
use common::StubAuthClient;
use serde_json::{Value, json};
use staff_portal::routes::app_router;
use std::net::SocketAddr;
use std::sync::Arc;
use url::Url;

/// Serves the full router the way the binary does.
async fn spawn_gateway() -> Url {
    let state = common::create_test_state(true, Some(Arc::new(StubAuthClient::password_checker())));
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
        )
        .await
        .unwrap();
    });

    common::base_url(addr)
}

#[tokio::test]
async fn test_full_router_routes() {
    let base = spawn_gateway().await;
    let client = reqwest::Client::new();

    let live = client.get(base.join("/").unwrap()).send().await.unwrap();
    assert_eq!(live.status(), 200);
    assert_eq!(live.text().await.unwrap(), "Backend is running");

    let ready = client.get(base.join("/health").unwrap()).send().await.unwrap();
    assert_eq!(ready.status(), 200);

    let page = client.get(base.join("/login/").unwrap()).send().await.unwrap();
    assert_eq!(page.status(), 200);
    assert!(page.text().await.unwrap().contains("login-form"));
}

#[tokio::test]
async fn test_full_router_login() {
    let base = spawn_gateway().await;
    let client = reqwest::Client::new();

    let response = client
        .post(base.join("/api/auth/login").unwrap())
        .json(&json!({"email": "a@b.com", "password": "secret", "role": "employee"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["token"], "token-for-employee");
}

#[tokio::test]
async fn test_login_route_is_rate_limited() {
    let base = spawn_gateway().await;
    let client = reqwest::Client::new();
    let url = base.join("/api/auth/login").unwrap();

    let mut statuses = Vec::new();
    let mut throttled = None;
    for _ in 0..15 {
        let response = client
            .post(url.clone())
            .json(&json!({"email": "a@b.com", "password": "wrong", "role": "admin"}))
            .send()
            .await
            .unwrap();
        statuses.push(response.status().as_u16());

        if response.status() == 429 && throttled.is_none() {
            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body: Value = response.json().await.unwrap();
            throttled = Some((content_type, body));
        }
    }

    assert!(statuses.contains(&401));

    let (content_type, body) = throttled.expect("expected a 429 within 15 attempts");
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body["code"], "rate_limited");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Too many login attempts")
    );
}
