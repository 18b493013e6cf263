//! Benchmark tests for Spanish date/time parsing throughput.
//!
//! Every inbound chat message is run through the temporal parsers at
//! least once, so per-call cost directly bounds message handling. The
//! phrase sets mix the cheap early-exit forms (relative words) with the
//! forms that fall through the whole pattern chain.

use std::time::Duration;

use chrono::{FixedOffset, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use turno_temporal::{parse_date, parse_range, parse_time};

const DATE_PHRASES: &[&str] = &[
    "quiero una cita mañana",
    "pasado mañana si puede ser",
    "el viernes que viene",
    "el 12 de junio",
    "el 09/06/2025",
    "2025-06-20 por la tarde",
    "dentro de dos semanas",
    "el 20",
    "no tengo preferencia de fecha",
];

const TIME_PHRASES: &[&str] = &[
    "a las 10",
    "a las 5 de la tarde",
    "sobre las 14:30",
    "15h30",
    "a las 12 de la mañana",
    "cuando os venga bien",
];

const RANGE_PHRASES: &[&str] = &[
    "cierro la semana que viene",
    "del 10 al 12 de agosto",
    "el 24 y el 31 de diciembre",
    "del 28/12 al 02/01",
    "vacaciones del 2025-07-01 al 2025-07-15",
    "mañana",
];

fn bench_parsers(c: &mut Criterion) {
    let tz = FixedOffset::east_opt(2 * 3600).expect("valid offset");
    let reference = Utc
        .with_ymd_and_hms(2025, 6, 10, 12, 0, 0)
        .single()
        .expect("valid reference instant");

    let mut group = c.benchmark_group("temporal_parsing");
    group.sample_size(200);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("parse_date_single", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let phrase = DATE_PHRASES[idx % DATE_PHRASES.len()];
            idx += 1;
            parse_date(phrase, reference, tz)
        });
    });

    group.bench_function("parse_time_single", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let phrase = TIME_PHRASES[idx % TIME_PHRASES.len()];
            idx += 1;
            parse_time(phrase)
        });
    });

    group.bench_function("parse_range_single", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let phrase = RANGE_PHRASES[idx % RANGE_PHRASES.len()];
            idx += 1;
            parse_range(phrase, reference, tz)
        });
    });

    // Full message sweep: every parser over every phrase, the worst case
    // for a single inbound message.
    group.bench_function("full_message_sweep", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for phrase in DATE_PHRASES {
                if parse_date(phrase, reference, tz).is_some() {
                    hits += 1;
                }
                if parse_time(phrase).is_some() {
                    hits += 1;
                }
                if parse_range(phrase, reference, tz).is_some() {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
