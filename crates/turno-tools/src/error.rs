//! Tool execution errors.
//!
//! Handlers themselves never fail: anything going wrong inside a handler
//! becomes an `error` outcome. The only errors that cross the execution
//! boundary are contract violations by the model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// The model sent arguments that are not valid JSON.
    #[error("Malformed arguments for tool '{tool}': {detail}")]
    MalformedArguments { tool: String, detail: String },

    /// The model requested a tool that does not exist.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}
