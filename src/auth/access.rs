//! Credential checks, registration, and role-scoped views of the store.

use thiserror::Error;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::role::{Page, Role};
use crate::auth::session::{AuthenticatedUser, Session};
use crate::storage::database::DatabaseError;
use crate::storage::models::{CoachRunnerStats, RecordListing, Runner, RunnerListing, User};
use crate::storage::repository::RecordStore;

/// Errors from registering a user.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error(transparent)]
    Store(DatabaseError),
}

/// Errors from role-gated operations.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Not permitted to access {}", .0.label())]
    Forbidden(Page),

    #[error("Runner name must not be empty")]
    EmptyRunnerName,

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Authenticates users and scopes store reads by role.
pub struct AccessController<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> AccessController<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Check credentials.
    ///
    /// Unknown usernames, wrong passwords, and store failures all yield
    /// `None` so callers cannot tell them apart.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<AuthenticatedUser> {
        let user = match self.store.find_user_by_username(username) {
            Ok(Some(user)) => user,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Authentication lookup failed: {}", e);
                return None;
            }
        };

        if !verify_password(password, &user.password_hash) {
            return None;
        }

        Some(AuthenticatedUser {
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }

    /// Create an account with a hashed password.
    pub fn register(&self, username: &str, password: &str, role: Role) -> Result<User, RegisterError> {
        let user = User::new(username, hash_password(password), role);

        match self.store.insert_user(&user) {
            Ok(()) => {
                tracing::info!("Registered user '{}' ({})", username, role);
                Ok(user)
            }
            Err(DatabaseError::DuplicateKey(_)) => {
                Err(RegisterError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(RegisterError::Store(e)),
        }
    }

    /// Seed the administrator account if it does not exist yet.
    ///
    /// Returns `true` when the account was created.
    pub fn bootstrap_admin(&self, username: &str, password: &str) -> Result<bool, DatabaseError> {
        if self.store.find_user_by_username(username)?.is_some() {
            return Ok(false);
        }

        match self.register(username, password, Role::Admin) {
            Ok(_) => Ok(true),
            Err(RegisterError::DuplicateUsername(_)) => Ok(false),
            Err(RegisterError::Store(e)) => Err(e),
        }
    }

    /// All users. Admin only.
    pub fn list_users(&self, session: &Session) -> Result<Vec<User>, AccessError> {
        require_page(session, Page::ManageUsers)?;
        Ok(self.store.list_users()?)
    }

    /// Users that can be assigned as coaches. Admin only.
    pub fn assignable_coaches(&self, session: &Session) -> Result<Vec<User>, AccessError> {
        require_page(session, Page::ManageRunners)?;
        Ok(self.store.list_users_by_role(Role::Coach)?)
    }

    /// Add a runner, optionally assigned to a coach. Admin only.
    pub fn create_runner(
        &self,
        session: &Session,
        name: &str,
        coach_id: Option<Uuid>,
    ) -> Result<Runner, AccessError> {
        require_page(session, Page::ManageRunners)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AccessError::EmptyRunnerName);
        }

        let runner = Runner::new(name, coach_id);
        self.store.insert_runner(&runner)?;
        tracing::info!("Added runner '{}'", runner.name);
        Ok(runner)
    }

    /// Runners visible in this session.
    ///
    /// Coaches see only their own runners; admins and runners see all.
    pub fn visible_runners(&self, session: &Session) -> Result<Vec<RunnerListing>, AccessError> {
        let user = session.user().ok_or(AccessError::NotAuthenticated)?;
        let runners = match user.role {
            Role::Coach => self.store.list_runners_for_coach(&user.user_id)?,
            Role::Admin | Role::Runner => self.store.list_runners()?,
        };
        Ok(runners)
    }

    /// Performance records visible in this session, newest first.
    pub fn visible_records(&self, session: &Session) -> Result<Vec<RecordListing>, AccessError> {
        let user = session.user().ok_or(AccessError::NotAuthenticated)?;
        let records = match user.role {
            Role::Coach => self.store.list_records_for_coach(&user.user_id)?,
            Role::Admin | Role::Runner => self.store.list_records()?,
        };
        Ok(records)
    }

    /// Totals for the logged-in coach's runners.
    pub fn my_runner_stats(&self, session: &Session) -> Result<Vec<CoachRunnerStats>, AccessError> {
        require_page(session, Page::MyRunners)?;
        let coach_id = session.user_id().ok_or(AccessError::NotAuthenticated)?;
        Ok(self.store.coach_runner_stats(&coach_id)?)
    }

    /// Whether the session may analyze and store results for this runner.
    pub fn can_record_for(&self, session: &Session, runner_id: &Uuid) -> Result<bool, AccessError> {
        Ok(self
            .visible_runners(session)?
            .iter()
            .any(|l| &l.runner.id == runner_id))
    }
}

fn require_page(session: &Session, page: Page) -> Result<(), AccessError> {
    if !session.is_authenticated() {
        return Err(AccessError::NotAuthenticated);
    }
    if !session.can_view(page) {
        return Err(AccessError::Forbidden(page));
    }
    Ok(())
}
