//! Date-range expression parsing.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::date::{self, parse_date};
use turno_core::{normalize, DateRange};

struct RangePatterns {
    next_week: Regex,
    del_al: Regex,
    pair_of_days: Regex,
}

static RANGE_PATTERNS: LazyLock<RangePatterns> = LazyLock::new(|| RangePatterns {
    next_week: Regex::new(r"\bsemana que viene\b|\bproxima semana\b|\bsemana proxima\b").unwrap(),
    del_al: Regex::new(&format!(
        r"\bdel? (\d{{1,2}}) al (\d{{1,2}}) de ({})\b",
        date::MONTHS
    ))
    .unwrap(),
    pair_of_days: Regex::new(&format!(
        r"\b(?:el )?(\d{{1,2}}) y (?:el )?(\d{{1,2}}) de ({})\b",
        date::MONTHS
    ))
    .unwrap(),
});

/// Resolve a Spanish date-range expression to an inclusive range.
///
/// Recognized forms, first hit wins: next-week phrases (Monday through
/// Sunday of the following week), two ISO dates, two `DD/MM` dates,
/// `del D al D de <mes>`, `el D y el D de <mes>`. A text with a single
/// recognizable date becomes a one-day range. Endpoints are normalized
/// to ascending order.
pub fn parse_range(text: &str, reference: DateTime<Utc>, tz: FixedOffset) -> Option<DateRange> {
    let norm = normalize(text);
    let today = date::local_today(reference, tz);
    let pats = &*RANGE_PATTERNS;

    if pats.next_week.is_match(&norm) {
        let to_monday = (7 - today.weekday().num_days_from_monday()) as i64;
        let start = today + Duration::days(to_monday);
        return Some(DateRange::new(start, start + Duration::days(6)));
    }

    let isos = date::find_iso_dates(&norm);
    if isos.len() >= 2 {
        return Some(DateRange::new(isos[0], isos[1]));
    }

    let slashes = date::find_slash_dates(&norm, today);
    if slashes.len() >= 2 {
        return Some(DateRange::new(slashes[0], slashes[1]));
    }

    if let Some(caps) = pats.del_al.captures(&norm) {
        let start_day: u32 = caps[1].parse().ok()?;
        let end_day: u32 = caps[2].parse().ok()?;
        let month = date::month_number(&caps[3])?;
        return month_range(start_day, end_day, month, today);
    }

    if let Some(caps) = pats.pair_of_days.captures(&norm) {
        let a: u32 = caps[1].parse().ok()?;
        let b: u32 = caps[2].parse().ok()?;
        let month = date::month_number(&caps[3])?;
        return month_range(a.min(b), a.max(b), month, today);
    }

    parse_date(text, reference, tz).map(DateRange::single)
}

/// Both endpoints inside one named month. The year rolls forward only
/// when the whole range has already passed, keyed on the end date.
fn month_range(
    start_day: u32,
    end_day: u32,
    month: u32,
    today: NaiveDate,
) -> Option<DateRange> {
    let end_this_year = NaiveDate::from_ymd_opt(today.year(), month, end_day)?;
    let year = if end_this_year < today {
        today.year() + 1
    } else {
        today.year()
    };
    let start = NaiveDate::from_ymd_opt(year, month, start_day)?;
    let end = NaiveDate::from_ymd_opt(year, month, end_day)?;
    Some(DateRange::new(start, end))
}
