//! SQL schema for the studylog SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for future migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS subjects (
    subject_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL CHECK (length(trim(name)) > 0),
    weekly_goal REAL NOT NULL CHECK (weekly_goal > 0),  -- hours per week
    created_at  TEXT NOT NULL                           -- RFC 3339 UTC
);

-- No REFERENCES on subject_id: deleting a subject
-- leaves its sessions behind.
CREATE TABLE IF NOT EXISTS sessions (
    session_id  TEXT PRIMARY KEY,
    subject_id  TEXT NOT NULL,
    duration    INTEGER NOT NULL CHECK (duration > 0),  -- minutes
    date        TEXT NOT NULL,                          -- when studied
    note        TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS sessions_subject_idx ON sessions(subject_id);
CREATE INDEX IF NOT EXISTS sessions_date_idx    ON sessions(date);

PRAGMA user_version = 1;
";
