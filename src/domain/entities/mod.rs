//! Core domain entities shared by the login view and the gateway.
//!
//! # Entity Types
//!
//! - [`Role`] - The two account classes a user can sign in as
//! - [`Credentials`] - The login payload `{email, password, role}`

pub mod credentials;
pub mod role;

pub use credentials::Credentials;
pub use role::Role;
