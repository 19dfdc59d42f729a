//! Server-rendered pages.
//!
//! Uses Askama templates from `templates/`.
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
