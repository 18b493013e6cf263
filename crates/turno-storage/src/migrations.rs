//! Database schema migrations.
//!
//! Applies the initial schema including the chat_sessions, chat_messages,
//! business_facts, and schema_migrations tables.

use rusqlite::Connection;
use tracing::info;

use turno_core::error::TurnoError;

/// Run all pending database migrations.
///
/// Currently implements the initial schema (version 1). Future migrations
/// can be added by checking the current version and applying incremental changes.
pub fn run_migrations(conn: &Connection) -> Result<(), TurnoError> {
    // Create the migrations tracking table first.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| TurnoError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| TurnoError::Storage(format!("Failed to query migration version: {}", e)))?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<(), TurnoError> {
    conn.execute_batch(
        "
        -- Conversation sessions, one live session per admin per local day.
        CREATE TABLE IF NOT EXISTS chat_sessions (
            id              TEXT PRIMARY KEY NOT NULL,
            admin_id        TEXT NOT NULL,
            summary         TEXT NOT NULL DEFAULT '',
            last_activity   INTEGER NOT NULL,
            created_at      INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_admin
            ON chat_sessions (admin_id, last_activity DESC);

        -- Persisted history. Tool results live only in the in-turn
        -- transcript, so the role vocabulary is closed here.
        CREATE TABLE IF NOT EXISTS chat_messages (
            id              TEXT PRIMARY KEY NOT NULL,
            session_id      TEXT NOT NULL,
            role            TEXT NOT NULL
                            CHECK (role IN ('user', 'assistant')),
            content         TEXT NOT NULL DEFAULT '',
            tool_name       TEXT,
            tool_payload    TEXT,
            created_at      INTEGER NOT NULL,
            FOREIGN KEY (session_id) REFERENCES chat_sessions(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_messages_session
            ON chat_messages (session_id, created_at ASC);

        -- Free-text operational notes injected into every system prompt.
        CREATE TABLE IF NOT EXISTS business_facts (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            fact            TEXT NOT NULL,
            created_at      INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        -- Record migration.
        INSERT OR IGNORE INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| TurnoError::Storage(format!("Failed to apply migration v1: {}", e)))?;

    Ok(())
}
