//! Database operations using rusqlite.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Role;
use crate::storage::models::{
    CoachRunnerStats, PerformanceRecord, RecordListing, Runner, RunnerListing, User,
};
use crate::storage::repository::RecordStore;
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};

const USER_COLUMNS: &str = "id, username, password, user_type, created_at";

const RUNNER_LISTING_SELECT: &str = "SELECT r.id, r.name, r.coach_id, r.created_at, u.username
     FROM runners r
     LEFT JOIN users u ON r.coach_id = u.id";

const RECORD_LISTING_SELECT: &str = "SELECT p.id, p.runner_id, p.test_date,
            p.range_0_25, p.range_25_50, p.range_50_75, p.range_75_100,
            p.max_speed, p.avg_speed, p.total_time, p.created_at, r.name
     FROM performance_data p
     JOIN runners r ON p.runner_id = r.id";

/// Database wrapper for SQLite operations.
///
/// Owns a single long-lived connection; it is closed when the wrapper drops.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        // Create schema version table
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        // Check current version
        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Create the tables on a fresh database.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database initialized at schema version {}", CURRENT_VERSION);
        }

        Ok(())
    }

    /// Count stored users.
    pub fn count_users(&self) -> Result<usize, DatabaseError> {
        self.count("SELECT COUNT(*) FROM users")
    }

    /// Count stored performance records.
    pub fn count_records(&self) -> Result<usize, DatabaseError> {
        self.count("SELECT COUNT(*) FROM performance_data")
    }

    fn count(&self, sql: &str) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row(sql, [], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(count as usize)
    }

    fn query_users(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<User>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params, UserRow::from_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut users = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            users.push(row.into_user()?);
        }

        Ok(users)
    }

    fn query_runner_listings(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<RunnerListing>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params, |row| {
                Ok((RunnerRow::from_row(row)?, row.get::<_, Option<String>>(4)?))
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut listings = Vec::new();
        for row in rows {
            let (runner, coach_username) =
                row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            listings.push(RunnerListing {
                runner: runner.into_runner()?,
                coach_username,
            });
        }

        Ok(listings)
    }

    fn query_record_listings(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<RecordListing>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params, |row| {
                Ok((RecordRow::from_row(row)?, row.get::<_, String>(11)?))
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut listings = Vec::new();
        for row in rows {
            let (record, runner_name) =
                row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            listings.push(RecordListing {
                record: record.into_record()?,
                runner_name,
            });
        }

        Ok(listings)
    }
}

impl RecordStore for Database {
    fn insert_user(&self, user: &User) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO users (id, username, password, user_type, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.id.to_string(),
                    user.username,
                    user.password_hash,
                    user.role.as_str(),
                    user.created_at.to_rfc3339(),
                ],
            )
            .map_err(map_write_error)?;

        Ok(())
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS);
        let result = self.conn.query_row(&sql, params![username], UserRow::from_row);

        match result {
            Ok(row) => Ok(Some(row.into_user()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at, username", USER_COLUMNS);
        self.query_users(&sql, &[])
    }

    fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM users WHERE user_type = ?1 ORDER BY username",
            USER_COLUMNS
        );
        self.query_users(&sql, &[&role.as_str()])
    }

    fn insert_runner(&self, runner: &Runner) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO runners (id, name, coach_id, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    runner.id.to_string(),
                    runner.name,
                    runner.coach_id.map(|id| id.to_string()),
                    runner.created_at.to_rfc3339(),
                ],
            )
            .map_err(map_write_error)?;

        Ok(())
    }

    fn get_runner(&self, id: &Uuid) -> Result<Option<Runner>, DatabaseError> {
        let result = self.conn.query_row(
            "SELECT id, name, coach_id, created_at FROM runners WHERE id = ?1",
            params![id.to_string()],
            RunnerRow::from_row,
        );

        match result {
            Ok(row) => Ok(Some(row.into_runner()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    fn list_runners(&self) -> Result<Vec<RunnerListing>, DatabaseError> {
        let sql = format!("{} ORDER BY r.name", RUNNER_LISTING_SELECT);
        self.query_runner_listings(&sql, &[])
    }

    fn list_runners_for_coach(&self, coach_id: &Uuid) -> Result<Vec<RunnerListing>, DatabaseError> {
        let sql = format!("{} WHERE r.coach_id = ?1 ORDER BY r.name", RUNNER_LISTING_SELECT);
        self.query_runner_listings(&sql, &[&coach_id.to_string()])
    }

    fn insert_performance_record(&self, record: &PerformanceRecord) -> Result<(), DatabaseError> {
        let [r0, r1, r2, r3] = &record.range_payloads;

        self.conn
            .execute(
                "INSERT INTO performance_data (id, runner_id, test_date,
                 range_0_25, range_25_50, range_50_75, range_75_100,
                 max_speed, avg_speed, total_time, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    record.id.to_string(),
                    record.runner_id.to_string(),
                    record.test_date.to_rfc3339(),
                    r0,
                    r1,
                    r2,
                    r3,
                    record.max_speed,
                    record.avg_speed,
                    record.total_time,
                    record.created_at.to_rfc3339(),
                ],
            )
            .map_err(map_write_error)?;

        Ok(())
    }

    fn list_records(&self) -> Result<Vec<RecordListing>, DatabaseError> {
        let sql = format!("{} ORDER BY p.test_date DESC", RECORD_LISTING_SELECT);
        self.query_record_listings(&sql, &[])
    }

    fn list_records_for_coach(&self, coach_id: &Uuid) -> Result<Vec<RecordListing>, DatabaseError> {
        let sql = format!(
            "{} WHERE r.coach_id = ?1 ORDER BY p.test_date DESC",
            RECORD_LISTING_SELECT
        );
        self.query_record_listings(&sql, &[&coach_id.to_string()])
    }

    fn coach_runner_stats(&self, coach_id: &Uuid) -> Result<Vec<CoachRunnerStats>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT r.id, r.name, COUNT(p.id),
                        COALESCE(MAX(p.max_speed), 0.0), COALESCE(AVG(p.avg_speed), 0.0)
                 FROM runners r
                 LEFT JOIN performance_data p ON r.id = p.runner_id
                 WHERE r.coach_id = ?1
                 GROUP BY r.id, r.name
                 ORDER BY r.name",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![coach_id.to_string()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                ))
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut stats = Vec::new();
        for row in rows {
            let (id, name, total_tests, best_speed, avg_speed) =
                row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            stats.push(CoachRunnerStats {
                runner_id: parse_uuid(&id, "runner")?,
                name,
                total_tests: total_tests as usize,
                best_speed,
                avg_speed,
            });
        }

        Ok(stats)
    }
}

/// Classify a failed write, separating duplicate keys from other constraints.
fn map_write_error(e: rusqlite::Error) -> DatabaseError {
    match &e {
        rusqlite::Error::SqliteFailure(err, msg)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            let detail = msg.clone().unwrap_or_else(|| e.to_string());
            match err.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    DatabaseError::DuplicateKey(detail)
                }
                _ => DatabaseError::ConstraintViolation(detail),
            }
        }
        _ => DatabaseError::QueryFailed(e.to_string()),
    }
}

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value)
        .map_err(|e| DatabaseError::DeserializationError(format!("Invalid {} UUID: {}", what, e)))
}

fn parse_timestamp(value: &str, what: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::DeserializationError(format!("Invalid {}: {}", what, e)))
}

/// Intermediate struct for reading user rows from database.
struct UserRow {
    id: String,
    username: String,
    password: String,
    user_type: String,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            password: row.get(2)?,
            user_type: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn into_user(self) -> Result<User, DatabaseError> {
        let role = Role::parse(&self.user_type).ok_or_else(|| {
            DatabaseError::DeserializationError(format!("Unknown role: {}", self.user_type))
        })?;

        Ok(User {
            id: parse_uuid(&self.id, "user")?,
            username: self.username,
            password_hash: self.password,
            role,
            created_at: parse_timestamp(&self.created_at, "created date")?,
        })
    }
}

/// Intermediate struct for reading runner rows from database.
struct RunnerRow {
    id: String,
    name: String,
    coach_id: Option<String>,
    created_at: String,
}

impl RunnerRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            coach_id: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn into_runner(self) -> Result<Runner, DatabaseError> {
        let coach_id = self
            .coach_id
            .map(|s| parse_uuid(&s, "coach"))
            .transpose()?;

        Ok(Runner {
            id: parse_uuid(&self.id, "runner")?,
            name: self.name,
            coach_id,
            created_at: parse_timestamp(&self.created_at, "created date")?,
        })
    }
}

/// Intermediate struct for reading performance rows from database.
struct RecordRow {
    id: String,
    runner_id: String,
    test_date: String,
    range_payloads: [Option<String>; 4],
    max_speed: f64,
    avg_speed: f64,
    total_time: f64,
    created_at: String,
}

impl RecordRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            runner_id: row.get(1)?,
            test_date: row.get(2)?,
            range_payloads: [row.get(3)?, row.get(4)?, row.get(5)?, row.get(6)?],
            max_speed: row.get(7)?,
            avg_speed: row.get(8)?,
            total_time: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    fn into_record(self) -> Result<PerformanceRecord, DatabaseError> {
        Ok(PerformanceRecord {
            id: parse_uuid(&self.id, "record")?,
            runner_id: parse_uuid(&self.runner_id, "runner")?,
            test_date: parse_timestamp(&self.test_date, "test date")?,
            range_payloads: self.range_payloads,
            max_speed: self.max_speed,
            avg_speed: self.avg_speed,
            total_time: self.total_time,
            created_at: parse_timestamp(&self.created_at, "created date")?,
        })
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}
