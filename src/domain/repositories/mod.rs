//! Trait definitions for the gateway's external dependencies.
//!
//! Implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for unit tests.

pub mod database_probe;

pub use database_probe::DatabaseProbe;

#[cfg(test)]
pub use database_probe::MockDatabaseProbe;
