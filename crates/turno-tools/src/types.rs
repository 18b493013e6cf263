//! Tool names and outcome records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of actions the assistant can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    CreateAppointment,
    AddShopHoliday,
    AddStaffHoliday,
    CreateAnnouncement,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::CreateAppointment,
        ToolName::AddShopHoliday,
        ToolName::AddStaffHoliday,
        ToolName::CreateAnnouncement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::CreateAppointment => "create_appointment",
            ToolName::AddShopHoliday => "add_shop_holiday",
            ToolName::AddStaffHoliday => "add_staff_holiday",
            ToolName::CreateAnnouncement => "create_announcement",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_appointment" => Ok(ToolName::CreateAppointment),
            "add_shop_holiday" => Ok(ToolName::AddShopHoliday),
            "add_staff_holiday" => Ok(ToolName::AddStaffHoliday),
            "create_announcement" => Ok(ToolName::CreateAnnouncement),
            other => Err(format!("Unknown tool name: {}", other)),
        }
    }
}

/// Terminal status of one executed tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Created,
    Added,
    NeedsInfo,
    Unavailable,
    Error,
}

/// The typed result of one tool execution.
///
/// This is the only artifact that crosses into persisted history and into
/// the final reply: `message` is a deterministic Spanish sentence, never
/// model-phrased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    /// Field names the user still has to provide.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
    /// Disambiguation candidates, when several records matched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Machine-readable reason code for `unavailable` outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ToolOutcome {
    pub fn created(message: impl Into<String>) -> Self {
        ToolOutcome {
            status: OutcomeStatus::Created,
            message: message.into(),
            missing_fields: Vec::new(),
            options: Vec::new(),
            reason: None,
        }
    }

    pub fn added(message: impl Into<String>) -> Self {
        ToolOutcome {
            status: OutcomeStatus::Added,
            message: message.into(),
            missing_fields: Vec::new(),
            options: Vec::new(),
            reason: None,
        }
    }

    pub fn needs_info(message: impl Into<String>, missing_fields: Vec<String>) -> Self {
        ToolOutcome {
            status: OutcomeStatus::NeedsInfo,
            message: message.into(),
            missing_fields,
            options: Vec::new(),
            reason: None,
        }
    }

    pub fn unavailable(message: impl Into<String>, reason: &str) -> Self {
        ToolOutcome {
            status: OutcomeStatus::Unavailable,
            message: message.into(),
            missing_fields: Vec::new(),
            options: Vec::new(),
            reason: Some(reason.to_string()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolOutcome {
            status: OutcomeStatus::Error,
            message: message.into(),
            missing_fields: Vec::new(),
            options: Vec::new(),
            reason: None,
        }
    }

    /// Attach disambiguation candidates to a `needs_info` outcome.
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }
}
