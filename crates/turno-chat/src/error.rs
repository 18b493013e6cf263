//! Errors crossing the orchestration boundary.
//!
//! Only preconditions and model contract violations surface as errors;
//! everything else inside a turn degrades to a reply sentence or a tool
//! outcome, logged but never thrown.

use thiserror::Error;
use turno_core::TurnoError;
use turno_tools::ToolError;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,

    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),

    #[error("not an admin user: {0}")]
    NotAdmin(Uuid),

    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("malformed tool call: {0}")]
    MalformedToolCall(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<TurnoError> for ChatError {
    fn from(err: TurnoError) -> Self {
        ChatError::Storage(err.to_string())
    }
}

impl From<ToolError> for ChatError {
    fn from(err: ToolError) -> Self {
        ChatError::MalformedToolCall(err.to_string())
    }
}
