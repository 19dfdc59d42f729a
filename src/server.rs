//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, upstream client setup, and the Axum
//! server lifecycle.

use crate::application::services::LoginService;
use crate::client::HttpAuthClient;
use crate::config::Config;
use crate::domain::repositories::DatabaseProbe;
use crate::infrastructure::persistence::PgDatabaseProbe;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
}

/// Opens the PostgreSQL pool.
///
/// With `require_database` the connection must succeed before anything else
/// starts. Otherwise a failure is logged, a lazy pool is returned, and the
/// readiness route reports `503` until the database answers.
///
/// # Errors
///
/// Returns an error if the connection fails and the database is required, or
/// if the URL cannot be parsed.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    match pool_options(config).connect(&config.database_url).await {
        Ok(pool) => {
            tracing::info!("Connected to database");
            Ok(pool)
        }
        Err(e) if config.require_database => {
            tracing::error!(error = %e, "Database connection failed");
            Err(e).context("Failed to connect to database")
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Database connection failed, starting without it; readiness will report unavailable"
            );
            pool_options(config)
                .connect_lazy(&config.database_url)
                .context("Invalid DATABASE_URL")
        }
    }
}

/// Builds the shared state from configuration and an open pool.
///
/// # Errors
///
/// Returns an error if `AUTH_SERVICE_URL` cannot be turned into a login endpoint.
pub fn build_state(config: &Config, pool: PgPool) -> Result<AppState> {
    let database: Arc<dyn DatabaseProbe> = Arc::new(PgDatabaseProbe::new(Arc::new(pool)));

    let login_service = match config.auth_service_base() {
        Some(base) => {
            let client = HttpAuthClient::for_service(&base)
                .context("Failed to build authentication endpoint")?;
            tracing::info!("Login forwarding enabled: {}", client.endpoint());
            Some(Arc::new(LoginService::new(Arc::new(client))))
        }
        None => {
            tracing::info!("Login forwarding disabled (AUTH_SERVICE_URL not set)");
            None
        }
    };

    Ok(AppState::new(
        database,
        login_service,
        config.login_endpoint.clone(),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (gated on `require_database`)
/// - Login forwarding client
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails while required
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    let state = build_state(&config, pool)?;

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    let addr = listener.local_addr()?;
    tracing::info!("Server is running on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
