//! Property tests for formatting, enumeration and date math.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use proptest::prelude::*;

use date_math::{apply_math, compile_pattern, DateFormat};

// 1970-01-01 .. 2100-01-01
const MAX_SECONDS: i64 = 4_102_444_800;

const ROUND_TRIP_PATTERNS: &[&str] = &[
    "yyyy.MM.dd",
    "YYYY.MM.dd",
    "yyyy-MM-dd'T'HH:mm:ss",
    "yyyyMMddHHmmss",
    "yyyy.MM.dd HH:mm:ss.SSS",
    "YYYY-'W'ww-e",
    "yyyy-DDD HH:mm",
    "dd MMM yyyy hh:mm a",
    "EEE, d MMMM yyyy k:mm",
    "yyyy-QQQ",
];

fn instant() -> impl Strategy<Value = DateTime<Tz>> {
    (0..MAX_SECONDS, 0..1000u32).prop_map(|(secs, millis)| {
        Tz::UTC
            .timestamp_opt(secs, millis * 1_000_000)
            .single()
            .unwrap()
    })
}

fn zone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(Tz::UTC),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::Europe::Berlin),
        Just(chrono_tz::Australia::Lord_Howe),
        Just(chrono_tz::Asia::Kolkata),
    ]
}

proptest! {
    #[test]
    fn formatted_text_parses_back_to_the_same_fields(
        t in instant(),
        pattern in proptest::sample::select(ROUND_TRIP_PATTERNS),
    ) {
        let format = DateFormat::compile(pattern).unwrap();
        let text = format.format(&t);
        let resolved = format.parse(&text).unwrap().resolve(&Tz::UTC).unwrap();
        prop_assert_eq!(format.format(&resolved), text);
    }

    #[test]
    fn daily_values_are_ordered_unique_and_bounded(
        t in instant(),
        span_hours in 0i64..24 * 400,
    ) {
        let end = t + chrono::TimeDelta::hours(span_hours);
        let pattern = compile_pattern("yyyy.MM.dd").unwrap();
        let values: Vec<String> = pattern.intervals(&t, &end).collect();
        prop_assert!(!values.is_empty());
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(values.first().unwrap(), &pattern.format(&t));
        prop_assert_eq!(values.last().unwrap(), &pattern.format(&end));
    }

    #[test]
    fn monthly_values_touch_every_month(
        t in instant(),
        span_days in 0i64..1000,
    ) {
        let end = t + chrono::TimeDelta::days(span_days);
        let pattern = compile_pattern("yyyy.MM").unwrap();
        let values: Vec<String> = pattern.intervals(&t, &end).collect();
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(values.first().unwrap(), &pattern.format(&t));
        prop_assert_eq!(values.last().unwrap(), &pattern.format(&end));
    }

    #[test]
    fn size_hint_bounds_the_sequence(
        t in instant(),
        span_hours in -48i64..24 * 90,
    ) {
        let end = t + chrono::TimeDelta::hours(span_hours);
        let pattern = compile_pattern("yyyy.MM.dd.HH").unwrap();
        let iter = pattern.intervals(&t, &end);
        let (_, upper) = iter.size_hint();
        prop_assert_eq!(upper, Some(iter.count()));
    }

    #[test]
    fn adding_then_subtracting_days_returns_the_anchor(
        t in instant(),
        days in 0u32..5000,
    ) {
        let back = apply_math(&format!("+{days}d-{days}d"), t).unwrap();
        prop_assert_eq!(back, t);
    }

    #[test]
    fn adding_then_subtracting_hours_is_zone_independent(
        t in instant(),
        tz in zone(),
        hours in 0u32..100_000,
    ) {
        let local = t.with_timezone(&tz);
        let back = apply_math(&format!("+{hours}h-{hours}h"), local).unwrap();
        prop_assert_eq!(back, local);
    }

    #[test]
    fn rounding_floors_and_is_idempotent(
        t in instant(),
        tz in zone(),
        unit in proptest::sample::select(&['y', 'M', 'w', 'd', 'h', 'm', 's'][..]),
    ) {
        let local = t.with_timezone(&tz);
        let once = apply_math(&format!("/{unit}"), local).unwrap();
        let twice = apply_math(&format!("/{unit}/{unit}"), local).unwrap();
        prop_assert!(once <= local);
        prop_assert_eq!(once, twice);
    }
}
