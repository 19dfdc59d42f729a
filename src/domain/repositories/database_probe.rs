//! Trait describing the gateway's database dependency.

use crate::error::AppError;
use async_trait::async_trait;

/// Reports whether the database the gateway depends on is reachable.
///
/// The gateway is only considered ready while this probe succeeds.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDatabaseProbe`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Round-trips a trivial query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the database cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;

    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;
}
