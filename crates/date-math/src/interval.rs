//! Enumerate every value a date pattern takes between two instants.
//!
//! Used to expand a date-patterned index name (`logs-YYYY.MM.dd`) into the
//! concrete names a time window touches.

use std::iter::FusedIterator;

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::analyzer::{compile_pattern, CompiledPattern};
use crate::calendar::{self, Unit};
use crate::error::MalformedPatternError;
use crate::symbol::FieldSymbol;

/// Lazy sequence of formatted values, one per step of the pattern's lowest
/// field. Created by [`CompiledPattern::intervals`].
#[derive(Debug, Clone)]
pub struct PatternIntervals<'a> {
    pattern: &'a CompiledPattern,
    start: DateTime<Tz>,
    unit: Unit,
    next: i64,
    last: i64,
}

impl Iterator for PatternIntervals<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next > self.last {
            return None;
        }
        let step = self.next;
        self.next += 1;
        match calendar::plus(&self.start, step, self.unit) {
            Some(dt) => Some(self.pattern.format(&dt)),
            None => {
                warn!(step, unit = ?self.unit, "pattern enumeration left the calendar range");
                self.next = self.last.saturating_add(1);
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .last
            .checked_sub(self.next)
            .and_then(|d| d.checked_add(1))
            .and_then(|d| usize::try_from(d).ok())
            .unwrap_or(0);
        (0, Some(remaining))
    }
}

impl FusedIterator for PatternIntervals<'_> {}

impl CompiledPattern {
    /// Values of this pattern from `start` to `end`, both inclusive.
    ///
    /// Both bounds are truncated to the lowest field's boundary to count the
    /// steps; values are formatted from `start` advanced by whole steps. When
    /// `start` is after `end` the sequence is empty.
    pub fn intervals(&self, start: &DateTime<Tz>, end: &DateTime<Tz>) -> PatternIntervals<'_> {
        let lowest = self.lowest_field();
        let unit = lowest.field().base_unit();
        let steps = match (truncate_to_field(start, lowest), truncate_to_field(end, lowest)) {
            (Some(from), Some(to)) => calendar::units_between(&from, &to, unit),
            _ => {
                warn!(pattern = self.pattern(), "cannot truncate enumeration bounds");
                -1
            }
        };
        debug!(pattern = self.pattern(), unit = ?unit, steps, "enumerating pattern values");
        PatternIntervals {
            pattern: self,
            start: *start,
            unit,
            next: 0,
            last: steps,
        }
    }
}

/// Every formatted value of `pattern` between `start` and `end`, in
/// chronological order.
pub fn enumerate_patterns(
    pattern: &CompiledPattern,
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
) -> Vec<String> {
    pattern.intervals(start, end).collect()
}

/// Compile `pattern` and enumerate its values between `start` and `end`.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use chrono_tz::Tz;
/// use date_math::all_patterns_between;
///
/// let start = Tz::UTC.with_ymd_and_hms(2024, 1, 30, 8, 0, 0).unwrap();
/// let end = Tz::UTC.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap();
/// let names = all_patterns_between("'logs-'yyyy.MM.dd", &start, &end).unwrap();
/// assert_eq!(
///     names,
///     ["logs-2024.01.30", "logs-2024.01.31", "logs-2024.02.01", "logs-2024.02.02"]
/// );
/// ```
pub fn all_patterns_between(
    pattern: &str,
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
) -> Result<Vec<String>, MalformedPatternError> {
    let compiled = compile_pattern(pattern)?;
    Ok(enumerate_patterns(&compiled, start, end))
}

/// Floor `dt` to the natural boundary of `field`.
///
/// Coarse fields snap to the first day of their calendar period (year,
/// quarter, month, Monday-started week); finer fields floor to their own unit.
/// An era floors to January 1 of its first year, which is year 1 for AD and
/// proleptic year 0 (1 BC) for BC. Stepping only depends on the era count.
pub fn truncate_to_field(dt: &DateTime<Tz>, field: FieldSymbol) -> Option<DateTime<Tz>> {
    use FieldSymbol::*;

    match field {
        Era => calendar::truncate(dt, Unit::Eras),
        WeekBasedYear | Year | YearOfEra => calendar::truncate(dt, Unit::Years),
        StandaloneQuarter | QuarterOfYear => calendar::truncate(dt, Unit::Quarters),
        StandaloneMonth | MonthOfYear => calendar::truncate(dt, Unit::Months),
        AlignedWeekOfMonth | WeekOfWeekBasedYear => calendar::truncate(dt, Unit::Weeks),
        _ => calendar::truncate(dt, field.field().base_unit()),
    }
}
