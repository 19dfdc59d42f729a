//! Per-IP rate limiting for credential endpoints.

use axum::response::{IntoResponse, Response};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder,
    key_extractor::PeerIpKeyExtractor,
};

use crate::error::AppError;

/// Login attempts replenished per second, per client IP.
const LOGIN_PER_SECOND: u64 = 1;
/// Login attempts a client may burst before being throttled.
const LOGIN_BURST: u32 = 10;

/// Creates the limiter applied to `POST /api/auth/login`.
///
/// Requests over the limit receive `429 Too Many Requests` with the usual
/// `{code, message}` error body. The key is the socket peer address, so the
/// router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn login_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(LOGIN_PER_SECOND)
            .burst_size(LOGIN_BURST)
            .finish()
            .expect("rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf).error_handler(rejection_response)
}

/// Renders limiter failures as [`AppError`] bodies, keeping the
/// `retry-after` / `x-ratelimit-*` headers the limiter attaches.
fn rejection_response(error: GovernorError) -> Response {
    match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::warn!(wait_time, "Login rate limit exceeded");

            let mut response = AppError::too_many_requests(format!(
                "Too many login attempts. Try again in {}s",
                wait_time.max(1)
            ))
            .into_response();

            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            tracing::error!("Rate limiter could not determine the client address");
            AppError::internal("Unable to identify client").into_response()
        }
        GovernorError::Other { msg, .. } => {
            AppError::internal(msg.unwrap_or_else(|| "Rate limiter error".to_string()))
                .into_response()
        }
    }
}
