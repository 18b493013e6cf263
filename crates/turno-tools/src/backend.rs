//! Scheduling mutations.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use turno_core::{CustomerRef, DateRange, Result, Scope};
use uuid::Uuid;

/// A fully resolved appointment, ready for the scheduling system.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRequest {
    pub staff_id: Uuid,
    pub service_id: Uuid,
    pub customer: CustomerRef,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// An announcement to publish to the business's customers.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementRequest {
    pub title: Option<String>,
    pub body: String,
}

/// Write access to the external scheduling system.
///
/// Handlers call these only after validation and entity resolution have
/// fully succeeded. A mutation failure is terminal for the tool call; it
/// is never retried within the turn.
#[async_trait]
pub trait SchedulingBackend: Send + Sync {
    async fn create_appointment(&self, scope: Scope, request: &AppointmentRequest) -> Result<()>;

    async fn add_shop_holiday(&self, scope: Scope, range: DateRange) -> Result<()>;

    async fn add_staff_holiday(&self, scope: Scope, staff_id: Uuid, range: DateRange)
        -> Result<()>;

    async fn create_announcement(&self, scope: Scope, request: &AnnouncementRequest)
        -> Result<()>;
}
