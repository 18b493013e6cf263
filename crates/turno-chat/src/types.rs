//! Results returned to the chat caller.

use serde::{Deserialize, Serialize};
use turno_core::{ActionFlags, StoredMessage};
use uuid::Uuid;

/// The outcome of one chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub session_id: Uuid,
    /// Final reply text: free of markdown emphasis, dates as
    /// `YYYY-MM-DD`, times as `HH:MM`.
    pub text: String,
    /// Which kinds of mutation the turn performed.
    pub actions: ActionFlags,
}

/// A session as exposed to the caller: rolling summary plus the stored
/// history in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub summary: String,
    pub messages: Vec<StoredMessage>,
}
