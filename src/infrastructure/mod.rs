//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - PostgreSQL implementations

pub mod persistence;
