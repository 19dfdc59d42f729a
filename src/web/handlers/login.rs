//! Login page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::client::LoginForm;
use crate::client::redirect::REGISTER_PATH;
use crate::domain::entities::Role;
use crate::state::AppState;

/// Template for the login page.
///
/// Renders `templates/login.html` from a [`LoginForm`] snapshot:
/// - Role toggle (employee / admin)
/// - Email and password inputs, both `required`
/// - Remember-me checkbox
/// - Submit button, disabled with a loading indicator while submitting
/// - Inline error region
///
/// The page script performs the submission in the browser and persists the
/// session in `localStorage`, mirroring [`LoginForm::submit`].
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub endpoint: String,
    pub admin_selected: bool,
    pub employee_selected: bool,
    pub email: String,
    pub remember_me: bool,
    pub loading: bool,
    pub submit_disabled: bool,
    pub error: String,
    pub register_path: &'static str,
    pub admin_landing: &'static str,
    pub employee_landing: &'static str,
}

impl LoginPage {
    pub fn from_form(form: &LoginForm, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            admin_selected: form.role() == Role::Admin,
            employee_selected: form.role() == Role::Employee,
            email: form.email().to_string(),
            remember_me: form.remember_me(),
            loading: form.is_loading(),
            submit_disabled: !form.can_submit(),
            error: form.error().unwrap_or_default().to_string(),
            register_path: REGISTER_PATH,
            admin_landing: Role::Admin.landing_path(),
            employee_landing: Role::Employee.landing_path(),
        }
    }
}

/// Optional pre-selection through the query string.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
    pub role: Option<String>,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login[?role=admin|employee]`
///
/// Unknown `role` values are ignored and the page falls back to `employee`.
pub async fn login_page_handler(
    State(state): State<AppState>,
    Query(query): Query<LoginPageQuery>,
) -> impl IntoResponse {
    let mut form = LoginForm::new();
    if let Some(role) = query.role.as_deref() {
        form.select_role(role);
    }

    LoginPage::from_form(&form, state.login_endpoint.clone())
}
