//! Core domain types shared across the turno workspace.
//!
//! Directory records (staff, services, customers), the tenancy scope passed
//! explicitly through every external call, calendar value objects, and the
//! action flags reported back to the chat caller.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// Tenancy
// =============================================================================

/// Tenant/location pair identifying the business a request operates on.
///
/// Every external-interface call takes a `Scope` argument; nothing in this
/// workspace reads tenancy from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub tenant_id: Uuid,
    pub location_id: Uuid,
}

impl Scope {
    pub fn new(tenant_id: Uuid, location_id: Uuid) -> Self {
        Self {
            tenant_id,
            location_id,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tenant_id, self.location_id)
    }
}

// =============================================================================
// Directory records
// =============================================================================

/// A staff member able to take appointments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
}

/// A bookable service offered by the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    /// Nominal duration in minutes, used by the scheduling backend.
    pub duration_min: u32,
    pub active: bool,
}

/// A registered customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
}

/// An administrator allowed to drive the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub name: String,
}

/// The customer an appointment is booked for: either a registered record
/// or a transient guest carrying only name and contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CustomerRef {
    Registered { id: Uuid, name: String },
    Guest {
        name: String,
        email: Option<String>,
        phone: Option<String>,
    },
}

impl CustomerRef {
    pub fn display_name(&self) -> &str {
        match self {
            CustomerRef::Registered { name, .. } => name,
            CustomerRef::Guest { name, .. } => name,
        }
    }
}

/// The kind of directory entity a fuzzy reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Staff,
    Service,
    Customer,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Staff => write!(f, "staff"),
            EntityKind::Service => write!(f, "service"),
            EntityKind::Customer => write!(f, "customer"),
        }
    }
}

// =============================================================================
// Calendar value objects
// =============================================================================

/// Coarse part of the day used to filter candidate appointment times.
///
/// Boundaries: morning 06:00-14:00, afternoon 14:00-21:00, night 21:00-24:00.
/// Each bucket includes its lower bound and excludes its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Night,
}

impl DayPeriod {
    /// Whether a time of day falls inside this period.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let hour = chrono::Timelike::hour(&time);
        match self {
            DayPeriod::Morning => (6..14).contains(&hour),
            DayPeriod::Afternoon => (14..21).contains(&hour),
            DayPeriod::Night => hour >= 21,
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPeriod::Morning => write!(f, "morning"),
            DayPeriod::Afternoon => write!(f, "afternoon"),
            DayPeriod::Night => write!(f, "night"),
        }
    }
}

impl FromStr for DayPeriod {
    type Err = String;

    /// Accepts both the wire names and the Spanish vocabulary the model
    /// tends to echo back in tool arguments.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "manana" | "mañana" => Ok(DayPeriod::Morning),
            "afternoon" | "tarde" => Ok(DayPeriod::Afternoon),
            "night" | "noche" => Ok(DayPeriod::Night),
            other => Err(format!("Unknown day period: {}", other)),
        }
    }
}

/// An inclusive calendar-date range with `start <= end` guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range from two dates in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A range covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Number of calendar days covered, inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", format_date(self.start))
        } else {
            write!(f, "{}..{}", format_date(self.start), format_date(self.end))
        }
    }
}

/// Render a date in the canonical `YYYY-MM-DD` form used at every boundary.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Render a time in the canonical 24-hour `HH:MM` form.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

// =============================================================================
// Conversation records
// =============================================================================

/// Who authored a stored chat message.
///
/// Tool results are transcript-only and never persisted, so the stored
/// vocabulary is exactly these two roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A conversation session owned by one admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub admin_id: Uuid,
    /// Rolling summary of evicted/older history, refreshed periodically.
    pub summary: String,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A persisted chat message.
///
/// Assistant rows produced by a tool round carry the tool name and the
/// serialized outcome list alongside the reply text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub tool_name: Option<String>,
    pub tool_payload: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A free-text operational note about the business, injected into every
/// system prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessFact {
    pub id: i64,
    pub fact: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Action flags
// =============================================================================

/// Which kinds of mutation a chat turn performed, reported to the caller
/// alongside the reply text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionFlags {
    pub appointment_created: bool,
    pub holiday_added: bool,
    pub announcement_created: bool,
}

impl ActionFlags {
    pub fn any(&self) -> bool {
        self.appointment_created || self.holiday_added || self.announcement_created
    }
}
