//! HTML template rendering handlers.

pub mod login;

pub use login::login_page_handler;
