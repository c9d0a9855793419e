//! SQL DDL for the command history table.

/// SQLite schema with:
/// - `history_id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `timestamp` stored as RFC3339 text so ordering is lexical
/// - `execution_status` restricted to the three lifecycle states
/// - `context` free-form JSON, serialized as text
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS command_history (
    history_id INTEGER PRIMARY KEY AUTOINCREMENT,
    command TEXT NOT NULL,
    response TEXT NULL,
    timestamp TEXT NOT NULL,
    execution_status TEXT NOT NULL DEFAULT 'initiated'
        CHECK (execution_status IN ('initiated', 'completed', 'failed')),
    context TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_command_history_timestamp ON command_history(timestamp);
"#;
