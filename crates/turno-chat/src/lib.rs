//! Turno Chat crate - conversation sessions and the tool-calling loop.
//!
//! Owns the per-admin session lifecycle (one live session per local
//! calendar day), the completion-client seam to the language model, and
//! the bounded orchestration loop that turns a free-form Spanish message
//! into executed tools and a deterministic reply.

pub mod compose;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod session;
pub mod types;

pub use error::ChatError;
pub use llm::{
    CompletionClient, CompletionRequest, CompletionResponse, ToolCall, ToolChoice,
    TranscriptEntry, TranscriptRole,
};
pub use orchestrator::{ChatOrchestrator, MAX_TOOL_ROUNDS};
pub use session::SessionManager;
pub use types::{ChatReply, SessionView};
