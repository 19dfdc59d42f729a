//! Login form state and the per-submission state machine.
//!
//! ```text
//! Idle ──begin_submit──▶ Submitting ──complete_submit(Ok)──▶ Navigating
//!   ▲                         │
//!   └──complete_submit(Err)───┘   (error message set)
//! ```
//!
//! There is no automatic retry; the user resubmits from `Idle`.

use thiserror::Error;

use crate::client::auth_client::{AuthClient, AuthError, GENERIC_ERROR_MESSAGE, LoginResponse};
use crate::client::redirect::Redirect;
use crate::client::session::{REMEMBERED_EMAIL_KEY, SessionRecord};
use crate::client::storage::SessionStorage;
use crate::domain::entities::{Credentials, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Navigating(Redirect),
}

/// Reasons a submission is refused before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("a submission is already in progress")]
    InFlight,
}

/// Result of a settled submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Redirect(Redirect),
    Failed(String),
    Blocked(FormError),
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    role: Role,
    email: String,
    password: String,
    remember_me: bool,
    loading: bool,
    error: Option<String>,
    phase: Phase,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            role: Role::Employee,
            email: String::new(),
            password: String::new(),
            remember_me: false,
            loading: false,
            error: None,
            phase: Phase::Idle,
        }
    }

    /// Creates a form pre-filled from a remembered email, if any.
    pub fn restore(storage: &dyn SessionStorage) -> Self {
        let mut form = Self::new();
        if let Some(email) = storage.get(REMEMBERED_EMAIL_KEY) {
            form.email = email;
            form.remember_me = true;
        }
        form
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && !matches!(self.phase, Phase::Navigating(_))
    }

    /// Handles the role toggle.
    ///
    /// Returns `false` and keeps the current role for anything other than
    /// `"admin"` or `"employee"`.
    pub fn select_role(&mut self, value: &str) -> bool {
        match Role::parse(value) {
            Some(role) => {
                self.role = role;
                true
            }
            None => {
                tracing::debug!(value, "Ignoring unknown role");
                false
            }
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn set_remember_me(&mut self, remember_me: bool) {
        self.remember_me = remember_me;
    }

    /// Starts a submission.
    ///
    /// Enforces required-field semantics, then clears any previous error,
    /// raises the loading flag and returns the credentials to send.
    pub fn begin_submit(&mut self) -> Result<Credentials, FormError> {
        if !self.can_submit() {
            return Err(FormError::InFlight);
        }
        if self.email.trim().is_empty() {
            return Err(FormError::MissingField("email"));
        }
        if self.password.is_empty() {
            return Err(FormError::MissingField("password"));
        }

        self.error = None;
        self.loading = true;
        self.phase = Phase::Submitting;

        Ok(Credentials::new(
            self.email.clone(),
            self.password.clone(),
            self.role,
        ))
    }

    /// Settles the in-flight submission.
    ///
    /// The loading flag is cleared whatever the result. Storage is written
    /// only on success.
    pub fn complete_submit(
        &mut self,
        result: Result<LoginResponse, AuthError>,
        storage: &mut dyn SessionStorage,
    ) -> SubmitOutcome {
        self.loading = false;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                return self.fail(e.user_message());
            }
        };

        let record = SessionRecord {
            token: response.token,
            user_role: self.role,
            remembered_email: self.remember_me.then(|| self.email.clone()),
        };

        if let Err(e) = record.persist(storage) {
            tracing::error!(error = %e, "Failed to persist session");
            return self.fail(GENERIC_ERROR_MESSAGE.to_string());
        }

        let redirect = Redirect::for_role(self.role);
        self.phase = Phase::Navigating(redirect);
        tracing::info!(role = %self.role, target = %redirect, "Login succeeded");

        SubmitOutcome::Redirect(redirect)
    }

    /// Runs one full submission against `client`.
    pub async fn submit(
        &mut self,
        client: &dyn AuthClient,
        storage: &mut dyn SessionStorage,
    ) -> SubmitOutcome {
        let credentials = match self.begin_submit() {
            Ok(credentials) => credentials,
            Err(e) => return SubmitOutcome::Blocked(e),
        };

        let result = client.login(&credentials).await;
        self.complete_submit(result, storage)
    }

    fn fail(&mut self, message: String) -> SubmitOutcome {
        self.error = Some(message.clone());
        self.phase = Phase::Idle;
        SubmitOutcome::Failed(message)
    }
}
