//! Explicit per-login session context.

use uuid::Uuid;

use crate::auth::role::{Page, Role};

/// Identity returned by a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

/// Session state passed to every screen.
///
/// Created at login and cleared at logout; an anonymous session can view
/// nothing but the login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<AuthenticatedUser>,
}

impl Session {
    /// An unauthenticated session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Start a session for an authenticated user.
    pub fn login(user: AuthenticatedUser) -> Self {
        tracing::info!("User '{}' logged in as {}", user.username, user.role);
        Self { user: Some(user) }
    }

    /// End the session, dropping the identity.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("User '{}' logged out", user.username);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.user_id)
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    /// Pages available in this session (none when anonymous).
    pub fn pages(&self) -> &'static [Page] {
        self.role().map_or(&[], |r| r.pages())
    }

    pub fn can_view(&self, page: Page) -> bool {
        self.role().is_some_and(|r| r.can_view(page))
    }
}
