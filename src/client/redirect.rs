//! Navigation side effects produced by the login view.

use std::fmt;

use crate::domain::entities::Role;

pub const REGISTER_PATH: &str = "/register";

/// A full-page navigation the caller should perform.
///
/// The login view never navigates on its own; it hands this value back so
/// the host (browser script, terminal client, test) decides what to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    target: &'static str,
}

impl Redirect {
    pub fn for_role(role: Role) -> Self {
        Self {
            target: role.landing_path(),
        }
    }

    pub fn register() -> Self {
        Self {
            target: REGISTER_PATH,
        }
    }

    pub fn target(&self) -> &'static str {
        self.target
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target)
    }
}
