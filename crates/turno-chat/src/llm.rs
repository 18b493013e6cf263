//! The completion-client seam to the language-model service.
//!
//! The orchestrator talks to the model exclusively through these types:
//! a system-primed transcript, the schemas of the tools on offer, and a
//! tool-choice directive. The response is either free text or one or
//! more structured tool calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use turno_core::Result;
use turno_tools::ToolName;

/// Who authored a transcript entry sent to the model.
///
/// `ToolResult` entries exist only inside one orchestration turn; they
/// are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptRole {
    User,
    Assistant,
    ToolResult,
}

impl TranscriptRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptRole::User => "user",
            TranscriptRole::Assistant => "assistant",
            TranscriptRole::ToolResult => "tool_result",
        }
    }
}

impl fmt::Display for TranscriptRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TranscriptRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "user" => Ok(TranscriptRole::User),
            "assistant" => Ok(TranscriptRole::Assistant),
            "tool_result" => Ok(TranscriptRole::ToolResult),
            other => Err(format!("Unknown transcript role: {}", other)),
        }
    }
}

/// One entry of the transcript sent to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: TranscriptRole,
    pub content: String,
    /// Set on tool-result entries: the tool that produced the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl TranscriptEntry {
    pub fn user(content: impl Into<String>) -> Self {
        TranscriptEntry {
            role: TranscriptRole::User,
            content: content.into(),
            tool_name: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        TranscriptEntry {
            role: TranscriptRole::Assistant,
            content: content.into(),
            tool_name: None,
        }
    }

    pub fn tool_result(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        TranscriptEntry {
            role: TranscriptRole::ToolResult,
            content: content.into(),
            tool_name: Some(tool_name.into()),
        }
    }
}

/// Whether the model picks a tool itself or is compelled to call one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolChoice {
    Auto,
    Forced(ToolName),
}

/// One request to the completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub messages: Vec<TranscriptEntry>,
    /// JSON schemas of the tools offered this round.
    pub tools: Vec<Value>,
    pub tool_choice: ToolChoice,
}

/// A structured tool call requested by the model.
///
/// `arguments` is the raw JSON string as the model produced it; parsing
/// and validation happen in the tool registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// What the model answered: free text, tool calls, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionResponse {
    pub text: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

/// Access to the external language-model completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;
}
