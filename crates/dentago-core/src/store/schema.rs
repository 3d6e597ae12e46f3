//! SQLite schema for the on-device key/value store.

/// Complete schema for the local store.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Local key/value storage
-- ============================================================================

CREATE TABLE IF NOT EXISTS local_storage (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                          -- raw string or JSON document
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
