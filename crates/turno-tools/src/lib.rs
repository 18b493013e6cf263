//! Turno Tools crate - structured actions behind the tool-calling loop.
//!
//! One handler per supported tool, an execution registry, and the intent
//! engine that narrows or forces the tool set offered to the model. Every
//! handler is a small state machine ending in a typed [`ToolOutcome`];
//! nothing inside a handler escalates to an error across the registry
//! boundary except the model's own contract violations.

pub mod backend;
pub mod context;
pub mod error;
pub mod handler;
pub mod intent;
pub mod types;

pub use backend::{AnnouncementRequest, AppointmentRequest, SchedulingBackend};
pub use context::TurnContext;
pub use error::ToolError;
pub use handler::{ToolHandler, ToolRegistry};
pub use intent::{detect, forced_tool, offered_tools, IntentSignals};
pub use types::{OutcomeStatus, ToolName, ToolOutcome};
