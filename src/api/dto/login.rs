//! DTOs for the login forwarding endpoint.
//!
//! The request body is [`crate::domain::entities::Credentials`]; unknown
//! roles fail deserialization. The success body is
//! [`crate::client::LoginResponse`]. Failures use
//! [`crate::error::ErrorBody`].

pub use crate::client::LoginResponse;
pub use crate::domain::entities::Credentials as LoginRequest;
