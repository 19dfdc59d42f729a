//! Application layer services.
//!
//! Services sit between HTTP handlers and the traits they depend on.
//!
//! - [`services::login_service::LoginService`] - Validates and forwards login attempts

pub mod services;
