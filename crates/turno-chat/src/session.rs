//! Storage-backed session lifecycle.
//!
//! At most one live session per admin per local calendar day: a session
//! whose last activity falls before today's local midnight is expired
//! and never reused, a new one is created in its place. Expiry is
//! computed in the configured business zone, so a conversation crossing
//! local midnight always rolls to a fresh session.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use tracing::info;
use turno_core::{ChatSession, MessageRole, StoredMessage};
use turno_storage::{Database, MessageRepository, SessionRepository};
use uuid::Uuid;

use crate::error::ChatError;
use crate::types::SessionView;

pub struct SessionManager {
    sessions: SessionRepository,
    messages: MessageRepository,
    message_cap: u32,
    tz: FixedOffset,
}

impl SessionManager {
    pub fn new(db: Arc<Database>, message_cap: u32, tz: FixedOffset) -> Self {
        Self {
            sessions: SessionRepository::new(db.clone()),
            messages: MessageRepository::new(db),
            message_cap,
            tz,
        }
    }

    fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Whether a session's last activity precedes the current local day.
    pub fn is_expired(&self, session: &ChatSession, now: DateTime<Utc>) -> bool {
        self.local_day(session.last_activity) < self.local_day(now)
    }

    /// The session this turn runs in: the requested one if it is the
    /// admin's and still live today, else today's existing session, else
    /// a fresh one. A requested id that is missing, foreign or expired
    /// silently rolls forward; it never resurrects old state.
    pub fn resolve(
        &self,
        admin_id: Uuid,
        requested: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<ChatSession, ChatError> {
        if let Some(sid) = requested {
            if let Some(session) = self.sessions.find_by_id(sid)? {
                if session.admin_id == admin_id && !self.is_expired(&session, now) {
                    return Ok(session);
                }
            }
        }

        if let Some(latest) = self.sessions.latest_for_admin(admin_id)? {
            if !self.is_expired(&latest, now) {
                return Ok(latest);
            }
        }

        let session = ChatSession {
            id: Uuid::new_v4(),
            admin_id,
            summary: String::new(),
            last_activity: now,
            created_at: now,
        };
        self.sessions.create(&session)?;
        info!(session = %session.id, admin = %admin_id, "New chat session");
        Ok(session)
    }

    pub fn append_user(
        &self,
        session_id: Uuid,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ChatError> {
        self.append(session_id, MessageRole::User, content, None, None, now)
    }

    pub fn append_assistant(
        &self,
        session_id: Uuid,
        content: &str,
        tool_name: Option<String>,
        tool_payload: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), ChatError> {
        self.append(
            session_id,
            MessageRole::Assistant,
            content,
            tool_name,
            tool_payload,
            now,
        )
    }

    fn append(
        &self,
        session_id: Uuid,
        role: MessageRole,
        content: &str,
        tool_name: Option<String>,
        tool_payload: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), ChatError> {
        let message = StoredMessage {
            id: Uuid::new_v4(),
            session_id,
            role,
            content: content.to_string(),
            tool_name,
            tool_payload,
            created_at: now,
        };
        self.messages.append(&message, self.message_cap)?;
        Ok(())
    }

    /// The newest `n` stored messages, oldest first.
    pub fn recent(&self, session_id: Uuid, n: u32) -> Result<Vec<StoredMessage>, ChatError> {
        Ok(self.messages.recent(session_id, n)?)
    }

    pub fn count(&self, session_id: Uuid) -> Result<u64, ChatError> {
        Ok(self.messages.count(session_id)?)
    }

    pub fn touch(&self, session_id: Uuid, now: DateTime<Utc>) -> Result<(), ChatError> {
        Ok(self.sessions.touch(session_id, now)?)
    }

    pub fn update_summary(&self, session_id: Uuid, summary: &str) -> Result<(), ChatError> {
        Ok(self.sessions.update_summary(session_id, summary)?)
    }

    /// A session as exposed to its owning admin. A foreign or unknown id
    /// reports the same not-found error, so session ids leak nothing
    /// across admins.
    pub fn view(&self, admin_id: Uuid, session_id: Uuid) -> Result<SessionView, ChatError> {
        let session = self
            .sessions
            .find_by_id(session_id)?
            .filter(|s| s.admin_id == admin_id)
            .ok_or(ChatError::SessionNotFound(session_id))?;
        let messages = self.messages.all_for_session(session_id)?;
        Ok(SessionView {
            session_id,
            summary: session.summary,
            messages,
        })
    }
}
