//! Persisted entities and the joined read models served by the store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Role;
use crate::performance::types::RangeLabel;

/// A dashboard account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Hex-encoded SHA-256 digest of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new account with an already hashed password.
    pub fn new(username: impl Into<String>, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}

/// An athlete, optionally assigned to a coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runner {
    pub id: Uuid,
    pub name: String,
    pub coach_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Runner {
    pub fn new(name: impl Into<String>, coach_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coach_id,
            created_at: Utc::now(),
        }
    }
}

/// Summary of one completed analysis run. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub id: Uuid,
    pub runner_id: Uuid,
    pub test_date: DateTime<Utc>,
    /// Raw uploaded text per range, in canonical range order (None when synthetic)
    pub range_payloads: [Option<String>; 4],
    pub max_speed: f64,
    pub avg_speed: f64,
    pub total_time: f64,
    pub created_at: DateTime<Utc>,
}

impl PerformanceRecord {
    /// Create a record for a run tested now.
    pub fn new(runner_id: Uuid, max_speed: f64, avg_speed: f64, total_time: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            runner_id,
            test_date: now,
            range_payloads: Default::default(),
            max_speed,
            avg_speed,
            total_time,
            created_at: now,
        }
    }

    /// Raw payload uploaded for a range.
    pub fn payload(&self, range: RangeLabel) -> Option<&str> {
        self.range_payloads[range.index()].as_deref()
    }
}

/// Runner joined with the username of its coach.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerListing {
    pub runner: Runner,
    pub coach_username: Option<String>,
}

/// Record joined with its runner's name.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordListing {
    pub record: PerformanceRecord,
    pub runner_name: String,
}

/// Per-runner totals shown to a coach.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachRunnerStats {
    pub runner_id: Uuid,
    pub name: String,
    pub total_tests: usize,
    /// Best max speed, 0 with no tests
    pub best_speed: f64,
    /// Mean of average speeds, 0 with no tests
    pub avg_speed: f64,
}

/// In-memory filter for the reports view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub runner_name: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RecordFilter {
    /// Whether a listing passes this filter. Date bounds are inclusive.
    pub fn matches(&self, listing: &RecordListing) -> bool {
        if let Some(name) = &self.runner_name {
            if &listing.runner_name != name {
                return false;
            }
        }
        let day = listing.record.test_date.date_naive();
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        true
    }
}
