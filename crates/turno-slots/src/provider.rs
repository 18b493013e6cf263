//! Availability access.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use turno_core::{Result, Scope};
use uuid::Uuid;

/// Read-only view of the booking calendar.
///
/// Implementations answer from the external scheduling system; the search
/// engine never mutates anything through this trait.
#[async_trait]
pub trait Availability: Send + Sync {
    /// Open appointment start times for one staff member performing one
    /// service on one calendar day, in no guaranteed order.
    async fn open_slots(
        &self,
        scope: Scope,
        date: NaiveDate,
        staff_id: Uuid,
        service_id: Uuid,
    ) -> Result<Vec<NaiveTime>>;

    /// Scheduled-plus-completed appointment counts per staff member over
    /// an inclusive date range. Staff missing from the map count as zero.
    async fn weekly_load(
        &self,
        scope: Scope,
        staff_ids: &[Uuid],
        week_start: NaiveDate,
        week_end: NaiveDate,
    ) -> Result<HashMap<Uuid, u32>>;
}
