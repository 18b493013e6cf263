//! Regex-based intent signal matching.
//!
//! Fixed keyword sets over normalized text. The sets are deliberately
//! small and approximate; anything they miss falls back to the model's
//! own tool choice.

use regex::Regex;
use std::sync::LazyLock;

use turno_core::DayPeriod;

/// Collection of all signal patterns, compiled once and reused.
pub(crate) struct SignalPatterns {
    pub holiday: Vec<Regex>,
    pub appointment: Vec<Regex>,
    pub shop_scope: Vec<Regex>,
    pub staff_scope: Vec<Regex>,
    pub multi_holiday: Vec<Regex>,
    pub all_staff: Vec<Regex>,
    pub soonest: Vec<Regex>,
    pub period: Regex,
}

pub(crate) static PATTERNS: LazyLock<SignalPatterns> = LazyLock::new(|| {
    let compile = |sources: &[&str]| -> Vec<Regex> {
        sources
            .iter()
            .map(|p| Regex::new(p).expect("Invalid intent regex"))
            .collect()
    };

    // =====================================================================
    // Holiday vocabulary
    // =====================================================================
    let holiday = compile(&[
        r"\bvacaciones\b",
        r"\bfestivos?\b",
        r"\bcerramos\b",
        r"\bcerrar\b",
        r"\bcierra\b",
        r"\bcierre\b",
        r"\bdias? libres?\b",
        r"\bdescansos?\b",
        r"\bausencias?\b",
        r"\bno trabajar?a?\b",
    ]);

    // =====================================================================
    // Appointment vocabulary
    // =====================================================================
    let appointment = compile(&[
        r"\bcitas?\b",
        r"\breservar?\b",
        r"\bpedir hora\b",
        r"\bhuecos?\b",
        r"\bapuntar?\b",
    ]);

    // =====================================================================
    // Scope markers
    // =====================================================================
    let shop_scope = compile(&[
        r"\bcerramos\b",
        r"\bcierre\b",
        r"\bel negocio\b",
        r"\bla tienda\b",
        r"\bel local\b",
        r"\bla peluqueria\b",
        r"\bel salon\b",
    ]);

    let staff_scope = compile(&[
        r"\bequipo\b",
        r"\bplantilla\b",
        r"\bempleados?\b",
        r"\bempleadas?\b",
        r"\bcompaneros?\b",
        r"\bcompaneras?\b",
        r"\bvacaciones (?:de|para) \w+",
        r"\bse va de vacaciones\b",
        r"\blibra\b",
    ]);

    // =====================================================================
    // Modifier markers
    // =====================================================================
    let multi_holiday = compile(&[
        r"\by otr[oa]s?\b",
        r"\botro periodo\b",
        r"\botras fechas\b",
        r"\bademas de\b",
    ]);

    let all_staff = compile(&[
        r"\btodo el equipo\b",
        r"\btoda la plantilla\b",
        r"\btodos\b",
        r"\btodas\b",
    ]);

    let soonest = compile(&[r"\bcuanto antes\b", r"\blo antes posible\b"]);

    let period = Regex::new(r"\b(?:de|por) la (manana|tarde|noche)\b")
        .expect("Invalid period regex");

    SignalPatterns {
        holiday,
        appointment,
        shop_scope,
        staff_scope,
        multi_holiday,
        all_staff,
        soonest,
        period,
    }
});

pub(crate) fn any_match(patterns: &[Regex], norm: &str) -> bool {
    patterns.iter().any(|p| p.is_match(norm))
}

/// Whether already-normalized text asks for "as soon as possible".
pub(crate) fn wants_soonest(norm: &str) -> bool {
    any_match(&PATTERNS.soonest, norm)
}

/// Whether already-normalized text addresses the whole staff.
pub(crate) fn mentions_all_staff(norm: &str) -> bool {
    any_match(&PATTERNS.all_staff, norm)
}

/// Day-period qualifier in already-normalized text, if any.
pub(crate) fn day_period_marker(norm: &str) -> Option<DayPeriod> {
    PATTERNS.period.captures(norm).map(|caps| match &caps[1] {
        "manana" => DayPeriod::Morning,
        "tarde" => DayPeriod::Afternoon,
        _ => DayPeriod::Night,
    })
}
