//! Domain layer containing the login data model.
//!
//! The domain layer has no dependencies on infrastructure, client or
//! presentation layers.
//!
//! - [`entities`] - Role and credentials
//! - [`repositories`] - Dependency traits implemented by the infrastructure layer

pub mod entities;
pub mod repositories;
