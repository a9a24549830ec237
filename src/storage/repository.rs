//! Typed repository interface over the record store.

use uuid::Uuid;

use crate::auth::Role;
use crate::storage::database::DatabaseError;
use crate::storage::models::{
    CoachRunnerStats, PerformanceRecord, RecordListing, Runner, RunnerListing, User,
};

/// Typed CRUD operations for users, runners, and performance records.
///
/// Records and users are append-only: there are no update or delete paths.
pub trait RecordStore {
    /// Insert a user. Fails with [`DatabaseError::DuplicateKey`] when the
    /// username is taken.
    fn insert_user(&self, user: &User) -> Result<(), DatabaseError>;

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    /// All users, oldest first.
    fn list_users(&self) -> Result<Vec<User>, DatabaseError>;

    fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, DatabaseError>;

    fn insert_runner(&self, runner: &Runner) -> Result<(), DatabaseError>;

    fn get_runner(&self, id: &Uuid) -> Result<Option<Runner>, DatabaseError>;

    /// All runners with their coach's username, ordered by name.
    fn list_runners(&self) -> Result<Vec<RunnerListing>, DatabaseError>;

    /// Runners assigned to a coach, ordered by name.
    fn list_runners_for_coach(&self, coach_id: &Uuid) -> Result<Vec<RunnerListing>, DatabaseError>;

    fn insert_performance_record(&self, record: &PerformanceRecord) -> Result<(), DatabaseError>;

    /// All records with runner names, newest test first.
    fn list_records(&self) -> Result<Vec<RecordListing>, DatabaseError>;

    /// Records of a coach's runners, newest test first.
    fn list_records_for_coach(&self, coach_id: &Uuid) -> Result<Vec<RecordListing>, DatabaseError>;

    /// Per-runner totals for a coach's runners.
    fn coach_runner_stats(&self, coach_id: &Uuid) -> Result<Vec<CoachRunnerStats>, DatabaseError>;
}
