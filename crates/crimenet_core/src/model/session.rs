//! Signed-in user record persisted under `cn_user`.

use serde::{Deserialize, Serialize};

/// The user behind an authenticated session.
///
/// Not linked to any staff profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
}

impl SessionUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
