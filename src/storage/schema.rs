//! Database schema definitions.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    user_type TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Runners table
CREATE TABLE IF NOT EXISTS runners (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    coach_id TEXT REFERENCES users(id),
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_runners_coach_id ON runners(coach_id);

-- Performance data table (one row per analysis run)
CREATE TABLE IF NOT EXISTS performance_data (
    id TEXT PRIMARY KEY,
    runner_id TEXT NOT NULL REFERENCES runners(id),
    test_date TEXT NOT NULL,
    range_0_25 TEXT,
    range_25_50 TEXT,
    range_50_75 TEXT,
    range_75_100 TEXT,
    max_speed REAL NOT NULL,
    avg_speed REAL NOT NULL,
    total_time REAL NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_performance_runner_id ON performance_data(runner_id);
CREATE INDEX IF NOT EXISTS idx_performance_test_date ON performance_data(test_date);
"#;

/// Schema version table for migrations.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;
