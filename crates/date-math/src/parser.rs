//! Date-math resolution: `now-1d/d`, `2024.01.01||+1M/M`.
//!
//! An expression is an anchor followed by an optional math suffix. The
//! anchor is either the configured now token, immediately followed by the
//! suffix, or a literal date in the configured pattern, separated from the
//! suffix by `||`.

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::debug;

use crate::config::DateMathConfig;
use crate::error::{DateMathParseError, MalformedPatternError, Result};
use crate::format::DateFormat;
use crate::math::apply_math;

/// Separates a literal anchor from its math suffix.
pub const MATH_SEPARATOR: &str = "||";

/// A configuration with its anchor pattern compiled, ready to resolve
/// any number of expressions.
#[derive(Debug, Clone)]
pub struct DateMathParser {
    config: DateMathConfig,
    format: DateFormat,
}

impl DateMathParser {
    /// Compile `config.pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPatternError`] when the pattern uses an
    /// unsupported letter or a reserved character.
    pub fn new(config: DateMathConfig) -> std::result::Result<Self, MalformedPatternError> {
        let format = DateFormat::compile(&config.pattern)?;
        Ok(Self { config, format })
    }

    pub fn config(&self) -> &DateMathConfig {
        &self.config
    }

    /// Resolve `expression` to an instant in the configured zone.
    ///
    /// # Errors
    ///
    /// Returns [`DateMathParseError::InvalidDate`] when a literal anchor does
    /// not match the pattern, or any error from [`apply_math`] for the suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use date_math::{DateMathConfig, DateMathParser};
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 3, 13, 17, 42, 31).unwrap();
    /// let parser = DateMathParser::new(DateMathConfig::with_fixed_now(now)).unwrap();
    ///
    /// let start_of_tomorrow = parser.resolve("now+1d/d").unwrap();
    /// assert_eq!(start_of_tomorrow.to_rfc3339(), "2024-03-14T00:00:00+00:00");
    ///
    /// let next_month = parser.resolve("2024.01.31||+1M").unwrap();
    /// assert_eq!(next_month.to_rfc3339(), "2024-02-29T00:00:00+00:00");
    /// ```
    pub fn resolve(&self, expression: &str) -> Result<DateTime<Tz>> {
        let (anchor, suffix) = match expression.strip_prefix(self.config.now_token.as_str()) {
            Some(suffix) => (self.config.now(), suffix),
            None => {
                let (literal, suffix) = expression
                    .split_once(MATH_SEPARATOR)
                    .unwrap_or((expression, ""));
                (self.parse_anchor(literal)?, suffix)
            }
        };
        debug!(expression, %anchor, suffix, "resolved date math anchor");
        apply_math(suffix, anchor)
    }

    fn parse_anchor(&self, literal: &str) -> Result<DateTime<Tz>> {
        self.format
            .parse(literal)
            .and_then(|fields| fields.resolve(&self.config.zone))
            .map_err(|source| DateMathParseError::InvalidDate {
                input: literal.to_string(),
                pattern: self.config.pattern.clone(),
                source,
            })
    }
}

/// Compile `config` and resolve a single expression.
///
/// # Errors
///
/// Pattern failures are reported as [`DateMathParseError::Pattern`];
/// everything else as for [`DateMathParser::resolve`].
pub fn resolve_expression(expression: &str, config: &DateMathConfig) -> Result<DateTime<Tz>> {
    DateMathParser::new(config.clone())?.resolve(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixed_clock;
    use crate::error::FormatParseError;
    use chrono::{TimeZone, Timelike, Utc};
    use std::error::Error as _;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 17, 42, 31).unwrap()
    }

    fn parser() -> DateMathParser {
        DateMathParser::new(DateMathConfig::with_fixed_now(now())).unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Tz> {
        Tz::UTC.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_now_alone() {
        assert_eq!(parser().resolve("now").unwrap(), now());
    }

    #[test]
    fn test_now_plus_day_rounded() {
        assert_eq!(parser().resolve("now+1d/d").unwrap(), utc(2024, 3, 14, 0, 0, 0));
    }

    #[test]
    fn test_now_rounded_down() {
        assert_eq!(parser().resolve("now/d").unwrap(), utc(2024, 3, 13, 0, 0, 0));
        assert_eq!(parser().resolve("now-1d/d").unwrap(), utc(2024, 3, 12, 0, 0, 0));
    }

    #[test]
    fn test_literal_without_suffix() {
        assert_eq!(parser().resolve("2024.03.01").unwrap(), utc(2024, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_literal_plus_month_lands_on_first() {
        assert_eq!(parser().resolve("2024.03.01||+1M").unwrap(), utc(2024, 4, 1, 0, 0, 0));
        assert_eq!(parser().resolve("2024.01.01||+1M").unwrap(), utc(2024, 2, 1, 0, 0, 0));
        assert_eq!(parser().resolve("2024.02.01||+1M").unwrap(), utc(2024, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_end_of_january_plus_month_clamps_to_february() {
        assert_eq!(parser().resolve("2024.01.31||+1M").unwrap(), utc(2024, 2, 29, 0, 0, 0));
        assert_eq!(parser().resolve("2023.01.31||+1M").unwrap(), utc(2023, 2, 28, 0, 0, 0));
    }

    #[test]
    fn test_empty_suffix_after_separator() {
        assert_eq!(parser().resolve("2024.03.01||").unwrap(), utc(2024, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_only_first_separator_splits() {
        let err = parser().resolve("2024.03.01||+1M||+1d").unwrap_err();
        assert!(matches!(err, DateMathParseError::UnsupportedOperator { operator: '|', .. }));
    }

    #[test]
    fn test_trailing_text_is_rejected() {
        let err = parser().resolve("2024.03.01x||+1d").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("2024.03.01x"), "{message}");
        assert!(message.contains("YYYY.MM.dd"), "{message}");
        match &err {
            DateMathParseError::InvalidDate { source, .. } => {
                assert!(matches!(source, FormatParseError::TrailingText { position: 10, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.source().is_some());
    }

    #[test]
    fn test_mismatched_literal_is_rejected() {
        for literal in ["2024-03-01", "March", "", "2024.13.01", "2024.02.30", "+2024.03.01"] {
            let err = parser().resolve(literal).unwrap_err();
            assert!(
                matches!(err, DateMathParseError::InvalidDate { .. }),
                "{literal}: {err}"
            );
        }
    }

    #[test]
    fn test_math_errors_surface() {
        let p = parser();
        assert!(matches!(
            p.resolve("now+2").unwrap_err(),
            DateMathParseError::TruncatedExpression { .. }
        ));
        assert!(matches!(
            p.resolve("now*1d").unwrap_err(),
            DateMathParseError::UnsupportedOperator { .. }
        ));
        assert!(matches!(
            p.resolve("2024.03.01||/2d").unwrap_err(),
            DateMathParseError::RoundingMagnitude { .. }
        ));
        assert!(matches!(
            p.resolve("nowish").unwrap_err(),
            DateMathParseError::UnsupportedOperator { operator: 'i', .. }
        ));
    }

    #[test]
    fn test_custom_now_token_and_zone() {
        let config = DateMathConfig {
            zone: chrono_tz::Europe::Berlin,
            now: fixed_clock(Utc.with_ymd_and_hms(2024, 3, 13, 23, 30, 0).unwrap()),
            now_token: "NOW".to_string(),
            ..DateMathConfig::default()
        };
        let parser = DateMathParser::new(config).unwrap();
        let midnight = parser.resolve("NOW/d").unwrap();
        // 00:30 in Berlin on the 14th
        assert_eq!(midnight, Utc.with_ymd_and_hms(2024, 3, 13, 23, 0, 0).unwrap());
        assert_eq!(midnight.timezone(), chrono_tz::Europe::Berlin);
        assert!(parser.resolve("now").is_err());
    }

    #[test]
    fn test_literal_is_read_in_configured_zone() {
        let config = DateMathConfig {
            zone: chrono_tz::Europe::Berlin,
            ..DateMathConfig::with_fixed_now(now())
        };
        let dt = resolve_expression("2024.03.01", &config).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 2, 29, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_time_pattern_and_hour_rounding() {
        let config = DateMathConfig {
            pattern: "yyyy-MM-dd'T'HH:mm".to_string(),
            ..DateMathConfig::with_fixed_now(now())
        };
        let dt = resolve_expression("2024-03-01T10:15||/h", &config).unwrap();
        assert_eq!(dt, utc(2024, 3, 1, 10, 0, 0));
    }

    #[test]
    fn test_absent_fraction_defaults_to_zero() {
        let config = DateMathConfig {
            pattern: "yyyy.MM.dd HH:mm:ss".to_string(),
            ..DateMathConfig::with_fixed_now(now())
        };
        let dt = resolve_expression("2024.03.01 10:15:30", &config).unwrap();
        assert_eq!(dt, utc(2024, 3, 1, 10, 15, 30));
        assert_eq!(dt.nanosecond(), 0);

        let config = DateMathConfig {
            pattern: "yyyy.MM.dd HH:mm:ss.SSS".to_string(),
            ..config
        };
        let dt = resolve_expression("2024.03.01 10:15:30.250", &config).unwrap();
        assert_eq!(dt.second(), 30);
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_day_and_twenty_four_hours_differ_across_dst() {
        let config = DateMathConfig {
            zone: chrono_tz::America::New_York,
            ..DateMathConfig::with_fixed_now(now())
        };
        let day = resolve_expression("2026.03.08||+1d", &config).unwrap();
        let hours = resolve_expression("2026.03.08||+24h", &config).unwrap();
        assert_eq!(day.hour(), 0);
        assert_eq!(hours.hour(), 1);
        assert_eq!((hours - day).num_hours(), 1);
    }

    #[test]
    fn test_now_is_read_once_per_resolution() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let config = DateMathConfig {
            now: Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                now()
            }),
            ..DateMathConfig::default()
        };
        let parser = DateMathParser::new(config).unwrap();
        parser.resolve("now+1d-1h/h").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        parser.resolve("2024.03.01||+1d").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_malformed_pattern() {
        let config = DateMathConfig {
            pattern: "yyyy.MM.dd Z".to_string(),
            ..DateMathConfig::default()
        };
        assert!(DateMathParser::new(config.clone()).is_err());
        let err = resolve_expression("now", &config).unwrap_err();
        assert!(matches!(err, DateMathParseError::Pattern(_)));
    }

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DateMathParser>();
        assert_send_sync::<DateMathConfig>();
    }

    #[test]
    fn test_shared_across_threads() {
        let parser = Arc::new(parser());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let parser = Arc::clone(&parser);
                std::thread::spawn(move || parser.resolve(&format!("now+{i}d/d")).unwrap())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let expected = utc(2024, 3, 13 + i as u32, 0, 0, 0);
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
