//! Login view model.
//!
//! Everything the login page does, minus the pixels: form state, the
//! submission state machine, the authentication call, session persistence,
//! and the resulting navigation.
//!
//! # Modules
//!
//! - [`login_form`] - Form state and submission state machine
//! - [`auth_client`] - Authentication service contract and HTTP client
//! - [`storage`] - Pluggable client-side storage
//! - [`session`] - The persisted session record
//! - [`redirect`] - Navigation side effects
//!
//! # Example
//!
//! ```rust,ignore
//! use staff_portal::client::{FileStorage, HttpAuthClient, LoginForm, SubmitOutcome};
//!
//! let mut storage = FileStorage::open("session.json")?;
//! let client = HttpAuthClient::new("http://localhost:5000/api/auth/login".parse()?);
//!
//! let mut form = LoginForm::restore(&storage);
//! form.select_role("admin");
//! form.set_password("secret");
//!
//! if let SubmitOutcome::Redirect(to) = form.submit(&client, &mut storage).await {
//!     println!("navigate to {to}");
//! }
//! ```

pub mod auth_client;
pub mod login_form;
pub mod redirect;
pub mod session;
pub mod storage;

pub use auth_client::{AuthClient, AuthError, HttpAuthClient, LoginResponse};
pub use login_form::{FormError, LoginForm, Phase, SubmitOutcome};
pub use redirect::Redirect;
pub use session::SessionRecord;
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

#[cfg(test)]
pub use auth_client::MockAuthClient;
