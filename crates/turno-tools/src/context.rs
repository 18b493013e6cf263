//! Per-turn execution context.

use chrono::{DateTime, FixedOffset, Utc};
use turno_core::Scope;
use turno_directory::Directory;
use turno_slots::Availability;

use crate::backend::SchedulingBackend;

/// Everything a tool handler may touch during one chat turn.
///
/// The raw user message is carried because handlers fall back to it for
/// dates, times and names the model did not extract into arguments.
pub struct TurnContext<'a> {
    pub scope: Scope,
    pub message: &'a str,
    pub now: DateTime<Utc>,
    pub tz: FixedOffset,
    pub directory: &'a dyn Directory,
    pub availability: &'a dyn Availability,
    pub backend: &'a dyn SchedulingBackend,
}
