//! Repository implementations for SQLite-backed persistence.
//!
//! Provides SessionRepository, MessageRepository, and FactRepository
//! that operate on the Database struct using raw SQL.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use turno_core::error::TurnoError;
use turno_core::types::{BusinessFact, ChatSession, MessageRole, StoredMessage};

use crate::db::Database;

/// Repository for conversation sessions.
pub struct SessionRepository {
    db: Arc<Database>,
}

impl SessionRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store a new session.
    pub fn create(&self, session: &ChatSession) -> Result<(), TurnoError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chat_sessions (id, admin_id, summary, last_activity, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    session.id.to_string(),
                    session.admin_id.to_string(),
                    session.summary,
                    session.last_activity.timestamp(),
                    session.created_at.timestamp(),
                ],
            )
            .map_err(|e| TurnoError::Storage(format!("Failed to create session: {}", e)))?;
            Ok(())
        })
    }

    /// Find a session by ID.
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<ChatSession>, TurnoError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, admin_id, summary, last_activity, created_at
                     FROM chat_sessions WHERE id = ?1",
                )
                .map_err(|e| TurnoError::Storage(e.to_string()))?;

            let result = stmt
                .query_row(rusqlite::params![id.to_string()], |row| {
                    Ok(row_to_chat_session(row))
                })
                .optional()
                .map_err(|e| TurnoError::Storage(e.to_string()))?;

            match result {
                Some(session) => Ok(Some(session?)),
                None => Ok(None),
            }
        })
    }

    /// The most recently active session for an admin, if any.
    pub fn latest_for_admin(&self, admin_id: Uuid) -> Result<Option<ChatSession>, TurnoError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, admin_id, summary, last_activity, created_at
                     FROM chat_sessions
                     WHERE admin_id = ?1
                     ORDER BY last_activity DESC
                     LIMIT 1",
                )
                .map_err(|e| TurnoError::Storage(e.to_string()))?;

            let result = stmt
                .query_row(rusqlite::params![admin_id.to_string()], |row| {
                    Ok(row_to_chat_session(row))
                })
                .optional()
                .map_err(|e| TurnoError::Storage(e.to_string()))?;

            match result {
                Some(session) => Ok(Some(session?)),
                None => Ok(None),
            }
        })
    }

    /// Bump a session's last-activity timestamp.
    pub fn touch(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), TurnoError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE chat_sessions SET last_activity = ?2 WHERE id = ?1",
                rusqlite::params![id.to_string(), at.timestamp()],
            )
            .map_err(|e| TurnoError::Storage(format!("Failed to touch session: {}", e)))?;
            Ok(())
        })
    }

    /// Replace the rolling summary.
    pub fn update_summary(&self, id: Uuid, summary: &str) -> Result<(), TurnoError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE chat_sessions SET summary = ?2 WHERE id = ?1",
                rusqlite::params![id.to_string(), summary],
            )
            .map_err(|e| TurnoError::Storage(format!("Failed to update summary: {}", e)))?;
            Ok(())
        })
    }

    /// Delete sessions idle since before the cutoff. Messages cascade.
    ///
    /// Returns the number of sessions removed.
    pub fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, TurnoError> {
        self.db.with_conn(|conn| {
            let removed = conn
                .execute(
                    "DELETE FROM chat_sessions WHERE last_activity < ?1",
                    rusqlite::params![cutoff.timestamp()],
                )
                .map_err(|e| TurnoError::Storage(format!("Failed to purge sessions: {}", e)))?;
            Ok(removed as u64)
        })
    }

    /// Count total sessions.
    pub fn count(&self) -> Result<u64, TurnoError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM chat_sessions", [], |row| row.get(0))
                .map_err(|e| TurnoError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}

/// Repository for persisted chat messages.
pub struct MessageRepository {
    db: Arc<Database>,
}

impl MessageRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Append a message, then evict the oldest rows beyond the cap.
    ///
    /// The per-session history behaves as a ring buffer: after every insert,
    /// only the newest `cap` rows (by created_at, then rowid) survive.
    pub fn append(&self, message: &StoredMessage, cap: u32) -> Result<(), TurnoError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chat_messages (id, session_id, role, content, tool_name, tool_payload, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    message.id.to_string(),
                    message.session_id.to_string(),
                    message.role.as_str(),
                    message.content,
                    message.tool_name,
                    message.tool_payload,
                    message.created_at.timestamp(),
                ],
            )
            .map_err(|e| TurnoError::Storage(format!("Failed to append message: {}", e)))?;

            conn.execute(
                "DELETE FROM chat_messages
                 WHERE session_id = ?1
                   AND id NOT IN (
                       SELECT id FROM chat_messages
                       WHERE session_id = ?1
                       ORDER BY created_at DESC, rowid DESC
                       LIMIT ?2
                   )",
                rusqlite::params![message.session_id.to_string(), cap],
            )
            .map_err(|e| TurnoError::Storage(format!("Failed to evict messages: {}", e)))?;
            Ok(())
        })
    }

    /// The newest `n` messages of a session, oldest first.
    pub fn recent(&self, session_id: Uuid, n: u32) -> Result<Vec<StoredMessage>, TurnoError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, session_id, role, content, tool_name, tool_payload, created_at
                     FROM chat_messages
                     WHERE session_id = ?1
                     ORDER BY created_at DESC, rowid DESC
                     LIMIT ?2",
                )
                .map_err(|e| TurnoError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map(rusqlite::params![session_id.to_string(), n], |row| {
                    Ok(row_to_stored_message(row))
                })
                .map_err(|e| TurnoError::Storage(e.to_string()))?;

            let mut messages = Vec::new();
            for row in rows {
                let message = row.map_err(|e| TurnoError::Storage(e.to_string()))??;
                messages.push(message);
            }
            // Fetched newest-first; callers want chronological order.
            messages.reverse();
            Ok(messages)
        })
    }

    /// Every stored message of a session, oldest first.
    pub fn all_for_session(&self, session_id: Uuid) -> Result<Vec<StoredMessage>, TurnoError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, session_id, role, content, tool_name, tool_payload, created_at
                     FROM chat_messages
                     WHERE session_id = ?1
                     ORDER BY created_at ASC, rowid ASC",
                )
                .map_err(|e| TurnoError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map(rusqlite::params![session_id.to_string()], |row| {
                    Ok(row_to_stored_message(row))
                })
                .map_err(|e| TurnoError::Storage(e.to_string()))?;

            let mut messages = Vec::new();
            for row in rows {
                let message = row.map_err(|e| TurnoError::Storage(e.to_string()))??;
                messages.push(message);
            }
            Ok(messages)
        })
    }

    /// Count stored messages for one session.
    pub fn count(&self, session_id: Uuid) -> Result<u64, TurnoError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM chat_messages WHERE session_id = ?1",
                    rusqlite::params![session_id.to_string()],
                    |row| row.get(0),
                )
                .map_err(|e| TurnoError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }

    /// Count stored messages across all sessions.
    pub fn count_all(&self) -> Result<u64, TurnoError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM chat_messages", [], |row| row.get(0))
                .map_err(|e| TurnoError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}

/// Repository for business facts.
pub struct FactRepository {
    db: Arc<Database>,
}

impl FactRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store a new fact and return it with its assigned ID.
    pub fn add(&self, fact: &str) -> Result<BusinessFact, TurnoError> {
        let created_at = Utc::now().timestamp();
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO business_facts (fact, created_at) VALUES (?1, ?2)",
                rusqlite::params![fact, created_at],
            )
            .map_err(|e| TurnoError::Storage(format!("Failed to add fact: {}", e)))?;

            Ok(BusinessFact {
                id: conn.last_insert_rowid(),
                fact: fact.to_string(),
                created_at: Utc
                    .timestamp_opt(created_at, 0)
                    .single()
                    .unwrap_or_default(),
            })
        })
    }

    /// All facts, oldest first.
    pub fn list(&self) -> Result<Vec<BusinessFact>, TurnoError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, fact, created_at FROM business_facts
                     ORDER BY created_at ASC, id ASC",
                )
                .map_err(|e| TurnoError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map([], |row| Ok(row_to_business_fact(row)))
                .map_err(|e| TurnoError::Storage(e.to_string()))?;

            let mut facts = Vec::new();
            for row in rows {
                let fact = row.map_err(|e| TurnoError::Storage(e.to_string()))??;
                facts.push(fact);
            }
            Ok(facts)
        })
    }

    /// Count stored facts.
    pub fn count(&self) -> Result<u64, TurnoError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM business_facts", [], |row| row.get(0))
                .map_err(|e| TurnoError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}

// ============================================================================
// Helper functions for row-to-entity conversion.
// ============================================================================

fn row_to_chat_session(row: &rusqlite::Row<'_>) -> Result<ChatSession, TurnoError> {
    let id_str: String = row.get(0).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let admin_str: String = row.get(1).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let summary: String = row.get(2).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let last_activity_i64: i64 = row.get(3).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let created_at_i64: i64 = row.get(4).map_err(|e| TurnoError::Storage(e.to_string()))?;

    Ok(ChatSession {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| TurnoError::Storage(format!("Invalid UUID: {}", e)))?,
        admin_id: Uuid::parse_str(&admin_str)
            .map_err(|e| TurnoError::Storage(format!("Invalid UUID: {}", e)))?,
        summary,
        last_activity: Utc
            .timestamp_opt(last_activity_i64, 0)
            .single()
            .unwrap_or_default(),
        created_at: Utc
            .timestamp_opt(created_at_i64, 0)
            .single()
            .unwrap_or_default(),
    })
}

fn row_to_stored_message(row: &rusqlite::Row<'_>) -> Result<StoredMessage, TurnoError> {
    let id_str: String = row.get(0).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let session_str: String = row.get(1).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let role_str: String = row.get(2).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let content: String = row.get(3).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let tool_name: Option<String> = row.get(4).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let tool_payload: Option<String> =
        row.get(5).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let created_at_i64: i64 = row.get(6).map_err(|e| TurnoError::Storage(e.to_string()))?;

    // The schema CHECK constrains roles to exactly these two values.
    let role = match role_str.as_str() {
        "assistant" => MessageRole::Assistant,
        _ => MessageRole::User,
    };

    Ok(StoredMessage {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| TurnoError::Storage(format!("Invalid UUID: {}", e)))?,
        session_id: Uuid::parse_str(&session_str)
            .map_err(|e| TurnoError::Storage(format!("Invalid UUID: {}", e)))?,
        role,
        content,
        tool_name,
        tool_payload,
        created_at: Utc
            .timestamp_opt(created_at_i64, 0)
            .single()
            .unwrap_or_default(),
    })
}

fn row_to_business_fact(row: &rusqlite::Row<'_>) -> Result<BusinessFact, TurnoError> {
    let id: i64 = row.get(0).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let fact: String = row.get(1).map_err(|e| TurnoError::Storage(e.to_string()))?;
    let created_at_i64: i64 = row.get(2).map_err(|e| TurnoError::Storage(e.to_string()))?;

    Ok(BusinessFact {
        id,
        fact,
        created_at: Utc
            .timestamp_opt(created_at_i64, 0)
            .single()
            .unwrap_or_default(),
    })
}

/// Extension trait for rusqlite to support optional query results.
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn make_db() -> Arc<Database> {
        Arc::new(Database::in_memory().unwrap())
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    fn make_session(admin_id: Uuid, secs: i64) -> ChatSession {
        ChatSession {
            id: Uuid::new_v4(),
            admin_id,
            summary: String::new(),
            last_activity: at(secs),
            created_at: at(secs),
        }
    }

    fn make_message(session_id: Uuid, role: MessageRole, content: &str, secs: i64) -> StoredMessage {
        StoredMessage {
            id: Uuid::new_v4(),
            session_id,
            role,
            content: content.to_string(),
            tool_name: None,
            tool_payload: None,
            created_at: at(secs),
        }
    }

    // ========================================================================
    // SessionRepository tests
    // ========================================================================

    #[test]
    fn test_session_create_and_find() {
        let db = make_db();
        let repo = SessionRepository::new(db);

        let session = make_session(Uuid::new_v4(), 1_700_000_000);
        repo.create(&session).unwrap();

        let found = repo.find_by_id(session.id).unwrap().unwrap();
        assert_eq!(found, session);
    }

    #[test]
    fn test_session_find_nonexistent() {
        let db = make_db();
        let repo = SessionRepository::new(db);
        let result = repo.find_by_id(Uuid::new_v4()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_latest_for_admin_picks_most_recent() {
        let db = make_db();
        let repo = SessionRepository::new(db);

        let admin = Uuid::new_v4();
        let older = make_session(admin, 1_700_000_000);
        let newer = make_session(admin, 1_700_100_000);
        repo.create(&older).unwrap();
        repo.create(&newer).unwrap();

        let latest = repo.latest_for_admin(admin).unwrap().unwrap();
        assert_eq!(latest.id, newer.id);
    }

    #[test]
    fn test_latest_for_admin_ignores_other_admins() {
        let db = make_db();
        let repo = SessionRepository::new(db);

        let admin = Uuid::new_v4();
        repo.create(&make_session(Uuid::new_v4(), 1_700_200_000))
            .unwrap();

        assert!(repo.latest_for_admin(admin).unwrap().is_none());
    }

    #[test]
    fn test_session_touch() {
        let db = make_db();
        let repo = SessionRepository::new(db);

        let session = make_session(Uuid::new_v4(), 1_700_000_000);
        repo.create(&session).unwrap();

        repo.touch(session.id, at(1_700_050_000)).unwrap();

        let found = repo.find_by_id(session.id).unwrap().unwrap();
        assert_eq!(found.last_activity, at(1_700_050_000));
        assert_eq!(found.created_at, at(1_700_000_000));
    }

    #[test]
    fn test_session_update_summary() {
        let db = make_db();
        let repo = SessionRepository::new(db);

        let session = make_session(Uuid::new_v4(), 1_700_000_000);
        repo.create(&session).unwrap();

        repo.update_summary(session.id, "Reservó cita para el viernes")
            .unwrap();

        let found = repo.find_by_id(session.id).unwrap().unwrap();
        assert_eq!(found.summary, "Reservó cita para el viernes");
    }

    #[test]
    fn test_purge_older_than() {
        let db = make_db();
        let sessions = SessionRepository::new(db.clone());
        let messages = MessageRepository::new(db);

        let old = make_session(Uuid::new_v4(), 1_600_000_000);
        let fresh = make_session(Uuid::new_v4(), 1_700_000_000);
        sessions.create(&old).unwrap();
        sessions.create(&fresh).unwrap();
        messages
            .append(&make_message(old.id, MessageRole::User, "hola", 1_600_000_001), 80)
            .unwrap();

        let removed = sessions.purge_older_than(at(1_650_000_000)).unwrap();
        assert_eq!(removed, 1);
        assert!(sessions.find_by_id(old.id).unwrap().is_none());
        assert!(sessions.find_by_id(fresh.id).unwrap().is_some());
        // Messages of the purged session cascade away.
        assert_eq!(messages.count(old.id).unwrap(), 0);
    }

    #[test]
    fn test_session_count() {
        let db = make_db();
        let repo = SessionRepository::new(db);

        assert_eq!(repo.count().unwrap(), 0);
        repo.create(&make_session(Uuid::new_v4(), 1_700_000_000))
            .unwrap();
        repo.create(&make_session(Uuid::new_v4(), 1_700_000_001))
            .unwrap();
        assert_eq!(repo.count().unwrap(), 2);
    }

    // ========================================================================
    // MessageRepository tests
    // ========================================================================

    #[test]
    fn test_message_append_and_recent_order() {
        let db = make_db();
        let sessions = SessionRepository::new(db.clone());
        let messages = MessageRepository::new(db);

        let session = make_session(Uuid::new_v4(), 1_700_000_000);
        sessions.create(&session).unwrap();

        for (i, text) in ["hola", "buenas", "quiero una cita"].iter().enumerate() {
            let role = if i % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            messages
                .append(
                    &make_message(session.id, role, text, 1_700_000_000 + i as i64),
                    80,
                )
                .unwrap();
        }

        let recent = messages.recent(session.id, 10).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].content, "hola");
        assert_eq!(recent[2].content, "quiero una cita");
    }

    #[test]
    fn test_message_recent_limit_returns_newest() {
        let db = make_db();
        let sessions = SessionRepository::new(db.clone());
        let messages = MessageRepository::new(db);

        let session = make_session(Uuid::new_v4(), 1_700_000_000);
        sessions.create(&session).unwrap();

        for i in 0..5 {
            messages
                .append(
                    &make_message(
                        session.id,
                        MessageRole::User,
                        &format!("msg-{}", i),
                        1_700_000_000 + i,
                    ),
                    80,
                )
                .unwrap();
        }

        let recent = messages.recent(session.id, 2).unwrap();
        assert_eq!(recent.len(), 2);
        // Chronological order among the newest two.
        assert_eq!(recent[0].content, "msg-3");
        assert_eq!(recent[1].content, "msg-4");
    }

    #[test]
    fn test_message_eviction_beyond_cap() {
        let db = make_db();
        let sessions = SessionRepository::new(db.clone());
        let messages = MessageRepository::new(db);

        let session = make_session(Uuid::new_v4(), 1_700_000_000);
        sessions.create(&session).unwrap();

        for i in 0..5 {
            messages
                .append(
                    &make_message(
                        session.id,
                        MessageRole::User,
                        &format!("msg-{}", i),
                        1_700_000_000 + i,
                    ),
                    3,
                )
                .unwrap();
        }

        assert_eq!(messages.count(session.id).unwrap(), 3);
        let remaining = messages.all_for_session(session.id).unwrap();
        assert_eq!(remaining[0].content, "msg-2");
        assert_eq!(remaining[2].content, "msg-4");
    }

    #[test]
    fn test_message_eviction_scoped_to_session() {
        let db = make_db();
        let sessions = SessionRepository::new(db.clone());
        let messages = MessageRepository::new(db);

        let a = make_session(Uuid::new_v4(), 1_700_000_000);
        let b = make_session(Uuid::new_v4(), 1_700_000_000);
        sessions.create(&a).unwrap();
        sessions.create(&b).unwrap();

        messages
            .append(&make_message(a.id, MessageRole::User, "a-0", 1_700_000_000), 2)
            .unwrap();
        for i in 0..3 {
            messages
                .append(
                    &make_message(b.id, MessageRole::User, &format!("b-{}", i), 1_700_000_001 + i),
                    2,
                )
                .unwrap();
        }

        // Session b got trimmed to its cap; session a was untouched.
        assert_eq!(messages.count(a.id).unwrap(), 1);
        assert_eq!(messages.count(b.id).unwrap(), 2);
    }

    #[test]
    fn test_message_tool_metadata_round_trip() {
        let db = make_db();
        let sessions = SessionRepository::new(db.clone());
        let messages = MessageRepository::new(db);

        let session = make_session(Uuid::new_v4(), 1_700_000_000);
        sessions.create(&session).unwrap();

        let mut message = make_message(
            session.id,
            MessageRole::Assistant,
            "Cita creada",
            1_700_000_001,
        );
        message.tool_name = Some("create_appointment".to_string());
        message.tool_payload = Some(r#"[{"status":"created"}]"#.to_string());
        messages.append(&message, 80).unwrap();

        let stored = messages.all_for_session(session.id).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].tool_name.as_deref(), Some("create_appointment"));
        assert_eq!(
            stored[0].tool_payload.as_deref(),
            Some(r#"[{"status":"created"}]"#)
        );
    }

    #[test]
    fn test_message_count_all() {
        let db = make_db();
        let sessions = SessionRepository::new(db.clone());
        let messages = MessageRepository::new(db);

        let a = make_session(Uuid::new_v4(), 1_700_000_000);
        let b = make_session(Uuid::new_v4(), 1_700_000_000);
        sessions.create(&a).unwrap();
        sessions.create(&b).unwrap();

        messages
            .append(&make_message(a.id, MessageRole::User, "x", 1_700_000_001), 80)
            .unwrap();
        messages
            .append(&make_message(b.id, MessageRole::User, "y", 1_700_000_002), 80)
            .unwrap();

        assert_eq!(messages.count_all().unwrap(), 2);
    }

    // ========================================================================
    // FactRepository tests
    // ========================================================================

    #[test]
    fn test_fact_add_and_list() {
        let db = make_db();
        let repo = FactRepository::new(db);

        let first = repo.add("Cerramos los domingos").unwrap();
        let second = repo.add("Aparcamiento gratuito detrás del local").unwrap();
        assert!(second.id > first.id);

        let facts = repo.list().unwrap();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].fact, "Cerramos los domingos");
        assert_eq!(facts[1].fact, "Aparcamiento gratuito detrás del local");
    }

    #[test]
    fn test_fact_count() {
        let db = make_db();
        let repo = FactRepository::new(db);

        assert_eq!(repo.count().unwrap(), 0);
        repo.add("Solo efectivo los lunes").unwrap();
        assert_eq!(repo.count().unwrap(), 1);
    }
}
