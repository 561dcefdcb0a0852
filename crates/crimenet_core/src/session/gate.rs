//! Two-state session gate.

use crate::model::session::SessionUser;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "password";
pub const DEFAULT_ADMIN_DISPLAY_NAME: &str = "Admin";

/// The single accepted credential pair and the user it signs in as.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub display_name: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            display_name: DEFAULT_ADMIN_DISPLAY_NAME.to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Mutations guarded by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedAction {
    CreateArticle,
    EditArticle,
    DeleteArticle,
    CreateStaff,
    EditStaff,
    RemoveStaff,
}

impl GatedAction {
    /// User-facing phrase, e.g. "create article".
    pub fn describe(self) -> &'static str {
        match self {
            Self::CreateArticle => "create article",
            Self::EditArticle => "edit article",
            Self::DeleteArticle => "delete article",
            Self::CreateStaff => "add staff",
            Self::EditStaff => "edit staff",
            Self::RemoveStaff => "remove staff",
        }
    }
}

/// A mutation was attempted without a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationError {
    pub action: GatedAction,
}

impl Display for AuthorizationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Login required to {}.", self.action.describe())
    }
}

impl Error for AuthorizationError {}

/// Login rejected: username or password did not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCredentialsError;

impl Display for InvalidCredentialsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Invalid credentials")
    }
}

impl Error for InvalidCredentialsError {}

/// Observable gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'a> {
    Anonymous,
    Authenticated(&'a SessionUser),
}

/// Anonymous/Authenticated state machine.
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    credentials: Credentials,
    user: Option<SessionUser>,
}

impl SessionGate {
    /// Gate resuming a previously persisted session, if any.
    pub fn restore(credentials: Credentials, user: Option<SessionUser>) -> Self {
        Self { credentials, user }
    }

    pub fn state(&self) -> SessionState<'_> {
        match &self.user {
            Some(user) => SessionState::Authenticated(user),
            None => SessionState::Anonymous,
        }
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Checks that `action` may run in the current state.
    pub fn authorize(&self, action: GatedAction) -> Result<&SessionUser, AuthorizationError> {
        self.user.as_ref().ok_or(AuthorizationError { action })
    }

    /// Signs in when both values match the configured pair exactly.
    ///
    /// A failed attempt leaves the current state untouched.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<&SessionUser, InvalidCredentialsError> {
        if username != self.credentials.username || password != self.credentials.password {
            return Err(InvalidCredentialsError);
        }
        let user = SessionUser::new(self.credentials.display_name.clone());
        Ok(&*self.user.insert(user))
    }

    /// Signs out unconditionally, returning the previous user.
    pub fn logout(&mut self) -> Option<SessionUser> {
        self.user.take()
    }
}

#[cfg(test)]
mod tests {
    use super::{Credentials, GatedAction, SessionGate, SessionState};

    #[test]
    fn anonymous_gate_rejects_with_action_message() {
        let gate = SessionGate::default();
        let err = gate
            .authorize(GatedAction::CreateArticle)
            .expect_err("anonymous gate must reject");
        assert_eq!(err.to_string(), "Login required to create article.");
        assert_eq!(gate.state(), SessionState::Anonymous);
    }

    #[test]
    fn login_with_default_pair_authenticates_as_admin() {
        let mut gate = SessionGate::default();
        let user = gate.login("admin", "password").expect("default pair accepted");
        assert_eq!(user.name, "Admin");
        assert!(gate.authorize(GatedAction::RemoveStaff).is_ok());
    }

    #[test]
    fn failed_login_keeps_previous_state() {
        let mut gate = SessionGate::default();
        assert!(gate.login("admin", "Password").is_err());
        assert!(!gate.is_authenticated());

        gate.login("admin", "password").unwrap();
        assert!(gate.login("root", "password").is_err());
        assert!(gate.is_authenticated());
    }

    #[test]
    fn logout_is_unconditional() {
        let mut gate = SessionGate::default();
        assert!(gate.logout().is_none());
        gate.login("admin", "password").unwrap();
        assert_eq!(gate.logout().map(|user| user.name), Some("Admin".to_string()));
        assert!(gate.current_user().is_none());
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::default());
        assert!(!rendered.contains("\"password\""));
        assert!(rendered.contains("<redacted>"));
    }
}
