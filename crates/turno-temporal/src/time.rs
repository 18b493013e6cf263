//! Time expression parsing.

use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

use turno_core::{normalize, DayPeriod};

struct TimePatterns {
    period: Regex,
    a_las: Regex,
    colon: Regex,
    dot: Regex,
    h_suffix: Regex,
}

static TIME_PATTERNS: LazyLock<TimePatterns> = LazyLock::new(|| TimePatterns {
    period: Regex::new(r"\b(?:de|por) la (manana|tarde|noche)\b").unwrap(),
    a_las: Regex::new(r"\ba las? (\d{1,2})(?::(\d{2}))?\b").unwrap(),
    colon: Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap(),
    dot: Regex::new(r"\b(\d{1,2})\.(\d{2})\b").unwrap(),
    h_suffix: Regex::new(r"\b(\d{1,2})h(\d{2})?\b").unwrap(),
});

/// Resolve a Spanish time expression to a wall-clock time.
///
/// Accepted forms, first hit wins: `a la(s) H[:MM]`, `H:MM`, `H.MM`,
/// `HhMM`, `Hh`. A day-period qualifier anywhere in the text ("de la
/// tarde", "por la noche") lifts small hours to the 24-hour clock;
/// "12 de la manana" is midnight. Unrecognized input is `None`.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let norm = normalize(text);
    let pats = &*TIME_PATTERNS;

    let period = pats.period.captures(&norm).map(|caps| match &caps[1] {
        "manana" => DayPeriod::Morning,
        "tarde" => DayPeriod::Afternoon,
        _ => DayPeriod::Night,
    });

    let (hour, minute) = if let Some(caps) = pats.a_las.captures(&norm) {
        (capture_u32(&caps, 1)?, capture_u32(&caps, 2).unwrap_or(0))
    } else if let Some(caps) = pats.colon.captures(&norm) {
        (capture_u32(&caps, 1)?, capture_u32(&caps, 2)?)
    } else if let Some(caps) = pats.dot.captures(&norm) {
        (capture_u32(&caps, 1)?, capture_u32(&caps, 2)?)
    } else if let Some(caps) = pats.h_suffix.captures(&norm) {
        (capture_u32(&caps, 1)?, capture_u32(&caps, 2).unwrap_or(0))
    } else {
        return None;
    };

    let hour = match period {
        Some(DayPeriod::Afternoon) | Some(DayPeriod::Night) if hour < 12 => hour + 12,
        Some(DayPeriod::Morning) if hour == 12 => 0,
        _ => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn capture_u32(caps: &regex::Captures<'_>, idx: usize) -> Option<u32> {
    caps.get(idx).and_then(|m| m.as_str().parse().ok())
}
