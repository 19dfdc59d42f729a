//! PostgreSQL-backed implementations of domain traits.
//!
//! - [`PgDatabaseProbe`] - Readiness probe over a `PgPool`

pub mod pg_database_probe;

pub use pg_database_probe::PgDatabaseProbe;
