//! Slot search over the booking calendar.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use turno_core::{normalize, DayPeriod, Scope, Service, Staff};
use uuid::Uuid;

use crate::provider::Availability;

/// Days scanned ahead of today when no date preference was given.
pub const SEARCH_WINDOW_DAYS: i64 = 14;

/// What the caller knows about the wanted slot. Empty fields widen the
/// search; `soonest` forces search mode even when a date is present and
/// overrides any stated time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotQuery {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub period: Option<DayPeriod>,
    pub soonest: bool,
}

/// A concrete bookable slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotPick {
    pub staff_id: Uuid,
    pub staff_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Machine-readable reason for an unsuccessful search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The requested exact time is not open anywhere.
    SlotUnavailable,
    /// The whole search window came up empty.
    SlotWindowUnavailable,
}

impl UnavailableReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnavailableReason::SlotUnavailable => "slot_unavailable",
            UnavailableReason::SlotWindowUnavailable => "slot_window_unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotOutcome {
    Found(SlotPick),
    Unavailable(UnavailableReason),
}

/// Find the best open slot for a service among candidate staff.
///
/// Exact mode (date and time given, no soonest request) checks that one
/// time on that one day. Search mode scans the given day, or today
/// through today+14, taking the first day with any candidate and the
/// earliest time within it. A stated time narrows each day to that time,
/// unless the query asks for the soonest slot, which overrides the stated
/// time. Ties between staff go to the lower weekly load, then case-folded
/// name order. The weekly load is queried once per call; a failed load
/// query degrades to all-zero loads rather than aborting the search.
pub async fn find_slot(
    availability: &dyn Availability,
    scope: Scope,
    staff: &[Staff],
    service: &Service,
    query: &SlotQuery,
    now: DateTime<Utc>,
    tz: FixedOffset,
) -> SlotOutcome {
    if staff.is_empty() {
        return SlotOutcome::Unavailable(UnavailableReason::SlotWindowUnavailable);
    }

    let local = now.with_timezone(&tz);
    let today = local.date_naive();
    let now_time = local.time();

    let loads = fetch_loads(availability, scope, staff, today).await;

    if let (Some(date), Some(time)) = (query.date, query.time) {
        if !query.soonest {
            return exact_search(availability, scope, staff, service, date, time, &loads).await;
        }
    }

    let window: Vec<NaiveDate> = match query.date {
        Some(date) => vec![date],
        None => (0..=SEARCH_WINDOW_DAYS)
            .map(|offset| today + Duration::days(offset))
            .collect(),
    };

    for day in window {
        let mut candidates: Vec<(NaiveTime, &Staff)> = Vec::new();
        for member in staff {
            let times = staff_slots(availability, scope, day, member, service).await;
            for time in times {
                if day == today && time <= now_time {
                    continue;
                }
                if !query.soonest {
                    if let Some(wanted) = query.time {
                        if time != wanted {
                            continue;
                        }
                    }
                }
                if let Some(period) = query.period {
                    if !period.contains(time) {
                        continue;
                    }
                }
                candidates.push((time, member));
            }
        }

        if let Some(earliest) = candidates.iter().map(|(t, _)| *t).min() {
            let tied: Vec<&Staff> = candidates
                .iter()
                .filter(|(t, _)| *t == earliest)
                .map(|(_, s)| *s)
                .collect();
            if let Some(chosen) = pick_staff(&tied, &loads) {
                return SlotOutcome::Found(SlotPick {
                    staff_id: chosen.id,
                    staff_name: chosen.name.clone(),
                    date: day,
                    time: earliest,
                });
            }
        }
    }

    if query.time.is_some() && !query.soonest {
        SlotOutcome::Unavailable(UnavailableReason::SlotUnavailable)
    } else {
        SlotOutcome::Unavailable(UnavailableReason::SlotWindowUnavailable)
    }
}

async fn exact_search(
    availability: &dyn Availability,
    scope: Scope,
    staff: &[Staff],
    service: &Service,
    date: NaiveDate,
    time: NaiveTime,
    loads: &HashMap<Uuid, u32>,
) -> SlotOutcome {
    let mut with_slot: Vec<&Staff> = Vec::new();
    for member in staff {
        let times = staff_slots(availability, scope, date, member, service).await;
        if times.contains(&time) {
            with_slot.push(member);
        }
    }
    match pick_staff(&with_slot, loads) {
        Some(chosen) => SlotOutcome::Found(SlotPick {
            staff_id: chosen.id,
            staff_name: chosen.name.clone(),
            date,
            time,
        }),
        None => SlotOutcome::Unavailable(UnavailableReason::SlotUnavailable),
    }
}

/// One staff member's open times for a day; a backend failure logs and
/// reads as no availability rather than aborting the whole search.
async fn staff_slots(
    availability: &dyn Availability,
    scope: Scope,
    date: NaiveDate,
    member: &Staff,
    service: &Service,
) -> Vec<NaiveTime> {
    match availability.open_slots(scope, date, member.id, service.id).await {
        Ok(times) => times,
        Err(err) => {
            warn!(
                "Availability query failed for {} on {}: {}",
                member.name, date, err
            );
            Vec::new()
        }
    }
}

/// Current Monday-Sunday appointment counts, queried once per search.
async fn fetch_loads(
    availability: &dyn Availability,
    scope: Scope,
    staff: &[Staff],
    today: NaiveDate,
) -> HashMap<Uuid, u32> {
    let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let week_end = week_start + Duration::days(6);
    let ids: Vec<Uuid> = staff.iter().map(|s| s.id).collect();
    match availability.weekly_load(scope, &ids, week_start, week_end).await {
        Ok(loads) => loads,
        Err(err) => {
            warn!("Weekly load query failed, treating all loads as zero: {}", err);
            HashMap::new()
        }
    }
}

/// Lowest weekly load wins; remaining ties go to case-folded name order.
fn pick_staff<'a>(tied: &[&'a Staff], loads: &HashMap<Uuid, u32>) -> Option<&'a Staff> {
    tied.iter()
        .copied()
        .min_by_key(|s| (loads.get(&s.id).copied().unwrap_or(0), normalize(&s.name)))
}
