//! Resolver configuration: default pattern, time zone and clock.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Pattern used for literal anchors when none is configured.
pub const DEFAULT_PATTERN: &str = "YYYY.MM.dd";

/// Token that anchors an expression on the current time.
pub const DEFAULT_NOW_TOKEN: &str = "now";

/// Source of the current instant. Called once per resolved expression.
pub type NowSource = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The system clock.
pub fn system_clock() -> NowSource {
    Arc::new(Utc::now)
}

/// A clock frozen at `instant`.
pub fn fixed_clock(instant: DateTime<Utc>) -> NowSource {
    Arc::new(move || instant)
}

/// Options for [`DateMathParser`](crate::DateMathParser).
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use date_math::config::{fixed_clock, DateMathConfig};
///
/// let config = DateMathConfig {
///     pattern: "yyyy-MM-dd".to_string(),
///     zone: chrono_tz::Europe::Berlin,
///     now: fixed_clock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
///     ..DateMathConfig::default()
/// };
/// assert_eq!(config.now().to_rfc3339(), "2024-06-01T14:00:00+02:00");
/// ```
#[derive(Clone)]
pub struct DateMathConfig {
    /// Pattern literal anchors are parsed with.
    pub pattern: String,
    /// Zone used for parsing, `now`, and every rounding step.
    pub zone: Tz,
    pub now: NowSource,
    pub now_token: String,
}

impl DateMathConfig {
    /// Default configuration whose clock always returns `instant`.
    pub fn with_fixed_now(instant: DateTime<Utc>) -> Self {
        Self {
            now: fixed_clock(instant),
            ..Self::default()
        }
    }

    /// The current instant in the configured zone.
    pub fn now(&self) -> DateTime<Tz> {
        (self.now)().with_timezone(&self.zone)
    }
}

impl Default for DateMathConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            zone: Tz::UTC,
            now: system_clock(),
            now_token: DEFAULT_NOW_TOKEN.to_string(),
        }
    }
}

impl fmt::Debug for DateMathConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateMathConfig")
            .field("pattern", &self.pattern)
            .field("zone", &self.zone)
            .field("now_token", &self.now_token)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let config = DateMathConfig::default();
        assert_eq!(config.pattern, "YYYY.MM.dd");
        assert_eq!(config.zone, Tz::UTC);
        assert_eq!(config.now_token, "now");
    }

    #[test]
    fn test_fixed_clock_converts_to_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 3, 0, 0).unwrap();
        let config = DateMathConfig {
            zone: chrono_tz::America::Los_Angeles,
            now: fixed_clock(instant),
            ..DateMathConfig::default()
        };
        let now = config.now();
        assert_eq!(now, instant);
        assert_eq!(now.naive_local().to_string(), "2024-01-14 19:00:00");
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = system_clock();
        let first = clock();
        assert!(clock() >= first);
    }

    #[test]
    fn test_debug_omits_clock() {
        let rendered = format!("{:?}", DateMathConfig::default());
        assert!(rendered.contains("YYYY.MM.dd"));
        assert!(!rendered.contains("now:"));
    }
}
