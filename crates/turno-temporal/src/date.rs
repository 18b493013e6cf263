//! Date expression parsing.
//!
//! Resolves Spanish relative and explicit date expressions against a
//! reference instant projected into the business timezone.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;

use turno_core::normalize;

// =============================================================================
// Compiled regex sets (compiled once, reused across calls)
// =============================================================================

pub(crate) const MONTHS: &str = "enero|febrero|marzo|abril|mayo|junio|julio|agosto|septiembre|setiembre|octubre|noviembre|diciembre";

const WEEKDAYS: &str = "lunes|martes|miercoles|jueves|viernes|sabado|domingo";

const NUMBER_WORDS: &str =
    "un|uno|una|dos|tres|cuatro|cinco|seis|siete|ocho|nueve|diez|quince|veinte|treinta";

struct DatePatterns {
    day_after_tomorrow: Regex,
    tomorrow: Regex,
    morning_idiom: Regex,
    today: Regex,
    iso: Regex,
    slash: Regex,
    day_of_month_name: Regex,
    weekday: Regex,
    next_week_marker: Regex,
    duration: Regex,
    bare_day: Regex,
}

static DATE_PATTERNS: LazyLock<DatePatterns> = LazyLock::new(|| DatePatterns {
    day_after_tomorrow: Regex::new(r"\bpasado manana\b").unwrap(),
    tomorrow: Regex::new(r"\bmanana\b").unwrap(),
    morning_idiom: Regex::new(r"\b(?:de|por) la manana\b").unwrap(),
    today: Regex::new(r"\bhoy\b").unwrap(),
    iso: Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap(),
    slash: Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").unwrap(),
    day_of_month_name: Regex::new(&format!(
        r"\b(\d{{1,2}}) de ({MONTHS})(?: de (\d{{4}}))?\b"
    ))
    .unwrap(),
    weekday: Regex::new(&format!(r"\b({WEEKDAYS})\b")).unwrap(),
    next_week_marker: Regex::new(r"\bque viene\b|\bproxim[oa]\b|\bsiguiente\b").unwrap(),
    duration: Regex::new(&format!(
        r"\b(?:en |dentro de )?(\d+|{NUMBER_WORDS}) (dias?|semanas?|mes(?:es)?)\b"
    ))
    .unwrap(),
    bare_day: Regex::new(r"\b(?:el|dia) (\d{1,2})").unwrap(),
});

// =============================================================================
// Public API
// =============================================================================

/// Resolve a Spanish date expression to a calendar date.
///
/// "Today" is the reference instant projected into `tz`, never the UTC
/// date. Recognition order: relative words, ISO, `DD/MM[/YYYY]`,
/// `DD de <mes> [de YYYY]`, named weekdays, duration phrases, bare
/// day-of-month. Unrecognized or invalid input is `None`.
pub fn parse_date(text: &str, reference: DateTime<Utc>, tz: FixedOffset) -> Option<NaiveDate> {
    let norm = normalize(text);
    let today = local_today(reference, tz);
    let pats = &*DATE_PATTERNS;

    // Relative words. Morning idioms are removed before the bare "manana"
    // check so a time-of-day qualifier alone never reads as tomorrow.
    if pats.day_after_tomorrow.is_match(&norm) {
        return Some(today + Duration::days(2));
    }
    let without_idioms = pats.morning_idiom.replace_all(&norm, " ");
    if pats.tomorrow.is_match(&without_idioms) {
        return Some(today + Duration::days(1));
    }
    if pats.today.is_match(&norm) {
        return Some(today);
    }

    if let Some(caps) = pats.iso.captures(&norm) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = pats.slash.captures(&norm) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = match caps.get(3) {
            Some(m) => {
                let y: i32 = m.as_str().parse().ok()?;
                // Two-digit years are 2000-based.
                Some(if m.as_str().len() == 2 { 2000 + y } else { y })
            }
            None => None,
        };
        return resolve_year(day, month, year, today);
    }

    if let Some(caps) = pats.day_of_month_name.captures(&norm) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year = match caps.get(3) {
            Some(m) => Some(m.as_str().parse::<i32>().ok()?),
            None => None,
        };
        return resolve_year(day, month, year, today);
    }

    if let Some(caps) = pats.weekday.captures(&norm) {
        let target = weekday_index(&caps[1])?;
        let today_idx = today.weekday().num_days_from_monday();
        let offset = if pats.next_week_marker.is_match(&norm) {
            // That weekday inside next week: next Monday plus the index.
            // For a zero base offset this is exactly the 7-day skip.
            (7 - today_idx) as i64 + target as i64
        } else {
            // 0 means today.
            (target as i64 - today_idx as i64).rem_euclid(7)
        };
        return Some(today + Duration::days(offset));
    }

    if let Some(caps) = pats.duration.captures(&norm) {
        let count = number_value(&caps[1])?;
        let unit = &caps[2];
        let unit_days = if unit.starts_with("dia") {
            1
        } else if unit.starts_with("semana") {
            7
        } else {
            30
        };
        return Some(today + Duration::days(count * unit_days));
    }

    if let Some(caps) = pats.bare_day.captures(&norm) {
        let digits = caps.get(1)?;
        // A trailing time or date separator means these digits are not a
        // day of the month ("el 3:30", "el 15h", "el 12/06").
        let next = norm[digits.end()..].chars().next();
        let rejected = match next {
            Some(':') | Some('.') | Some('/') | Some('h') => true,
            Some(c) if c.is_ascii_digit() => true,
            _ => false,
        };
        if !rejected {
            let day: u32 = digits.as_str().parse().ok()?;
            if day >= today.day() {
                return NaiveDate::from_ymd_opt(today.year(), today.month(), day);
            }
            // Already passed this month: next month, rolling into January.
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            return NaiveDate::from_ymd_opt(year, month, day);
        }
    }

    None
}

// =============================================================================
// Crate-internal helpers (shared with range parsing)
// =============================================================================

/// The calendar date of the reference instant in the business timezone.
pub(crate) fn local_today(reference: DateTime<Utc>, tz: FixedOffset) -> NaiveDate {
    reference.with_timezone(&tz).date_naive()
}

/// Build a date from day/month with optional explicit year. A missing year
/// is the current local year, rolled to the next one if the date has
/// already passed.
pub(crate) fn resolve_year(
    day: u32,
    month: u32,
    year: Option<i32>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    match year {
        Some(y) => NaiveDate::from_ymd_opt(y, month, day),
        None => {
            let candidate = NaiveDate::from_ymd_opt(today.year(), month, day)?;
            if candidate < today {
                NaiveDate::from_ymd_opt(today.year() + 1, month, day)
            } else {
                Some(candidate)
            }
        }
    }
}

pub(crate) fn month_number(name: &str) -> Option<u32> {
    match name {
        "enero" => Some(1),
        "febrero" => Some(2),
        "marzo" => Some(3),
        "abril" => Some(4),
        "mayo" => Some(5),
        "junio" => Some(6),
        "julio" => Some(7),
        "agosto" => Some(8),
        "septiembre" | "setiembre" => Some(9),
        "octubre" => Some(10),
        "noviembre" => Some(11),
        "diciembre" => Some(12),
        _ => None,
    }
}

/// Every valid ISO date found in already-normalized text, in order.
pub(crate) fn find_iso_dates(norm: &str) -> Vec<NaiveDate> {
    let pats = &*DATE_PATTERNS;
    pats.iso
        .captures_iter(norm)
        .filter_map(|caps| {
            let year: i32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let day: u32 = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .collect()
}

/// Every valid `DD/MM[/YYYY]` date found in already-normalized text,
/// year-inferred independently per token.
pub(crate) fn find_slash_dates(norm: &str, today: NaiveDate) -> Vec<NaiveDate> {
    let pats = &*DATE_PATTERNS;
    pats.slash
        .captures_iter(norm)
        .filter_map(|caps| {
            let day: u32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let year = match caps.get(3) {
                Some(m) => {
                    let y: i32 = m.as_str().parse().ok()?;
                    Some(if m.as_str().len() == 2 { 2000 + y } else { y })
                }
                None => None,
            };
            resolve_year(day, month, year, today)
        })
        .collect()
}

fn weekday_index(name: &str) -> Option<u32> {
    match name {
        "lunes" => Some(0),
        "martes" => Some(1),
        "miercoles" => Some(2),
        "jueves" => Some(3),
        "viernes" => Some(4),
        "sabado" => Some(5),
        "domingo" => Some(6),
        _ => None,
    }
}

fn number_value(token: &str) -> Option<i64> {
    if let Ok(n) = token.parse::<i64>() {
        return Some(n);
    }
    match token {
        "un" | "uno" | "una" => Some(1),
        "dos" => Some(2),
        "tres" => Some(3),
        "cuatro" => Some(4),
        "cinco" => Some(5),
        "seis" => Some(6),
        "siete" => Some(7),
        "ocho" => Some(8),
        "nueve" => Some(9),
        "diez" => Some(10),
        "quince" => Some(15),
        "veinte" => Some(20),
        "treinta" => Some(30),
        _ => None,
    }
}
