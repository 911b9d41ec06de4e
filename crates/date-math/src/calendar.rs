//! Zone-aware calendar arithmetic on `DateTime<Tz>`.
//!
//! Time-based units (up to half days) move the instant by a fixed duration.
//! Date-based units move the local date and keep the wall-clock time, then
//! re-attach the zone: a local time inside a DST gap is pushed forward by the
//! length of the gap, and an ambiguous local time keeps the offset it had
//! before the operation when possible, otherwise the earlier one.

use chrono::{
    DateTime, Datelike, FixedOffset, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeDelta, TimeZone, Timelike, Weekday,
};
use chrono_tz::Tz;
use serde::Serialize;

/// A calendar unit for addition, truncation and distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Unit {
    Nanos,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    Quarters,
    Years,
    WeekBasedYears,
    Eras,
}

impl Unit {
    /// Length in seconds of a time-based unit, `None` for date-based units.
    fn fixed_seconds(self) -> Option<i64> {
        match self {
            Self::Seconds => Some(1),
            Self::Minutes => Some(60),
            Self::Hours => Some(3_600),
            Self::HalfDays => Some(43_200),
            _ => None,
        }
    }

    /// Whether the unit has a fixed length independent of the calendar.
    pub fn is_time_based(self) -> bool {
        self <= Self::HalfDays
    }
}

/// Add `amount` units to `dt`. Returns `None` when the result leaves the
/// range chrono can represent.
///
/// Month-based addition clamps the day to the end of the target month, so
/// January 31 plus one month is the last day of February.
pub fn plus(dt: &DateTime<Tz>, amount: i64, unit: Unit) -> Option<DateTime<Tz>> {
    let local = dt.naive_local();
    let shifted = match unit {
        Unit::Nanos => return dt.checked_add_signed(TimeDelta::nanoseconds(amount)),
        Unit::Millis => return dt.checked_add_signed(TimeDelta::try_milliseconds(amount)?),
        Unit::Seconds | Unit::Minutes | Unit::Hours | Unit::HalfDays => {
            let seconds = amount.checked_mul(unit.fixed_seconds()?)?;
            return dt.checked_add_signed(TimeDelta::try_seconds(seconds)?);
        }
        Unit::Days => local.checked_add_signed(TimeDelta::try_days(amount)?)?,
        Unit::Weeks => local.checked_add_signed(TimeDelta::try_days(amount.checked_mul(7)?)?)?,
        Unit::Months => add_months(local.date(), amount)?.and_time(local.time()),
        Unit::Quarters => add_months(local.date(), amount.checked_mul(3)?)?.and_time(local.time()),
        Unit::Years => add_months(local.date(), amount.checked_mul(12)?)?.and_time(local.time()),
        Unit::WeekBasedYears => add_week_based_years(local.date(), amount)?.and_time(local.time()),
        Unit::Eras => add_eras(local.date(), amount)?.and_time(local.time()),
    };
    resolve_local(&dt.timezone(), shifted, Some(dt.offset().fix()))
}

/// Floor `dt` to the start of its current `unit` period in local time.
///
/// Weeks start on Monday; week-based years start on the Monday of ISO week 1.
pub fn truncate(dt: &DateTime<Tz>, unit: Unit) -> Option<DateTime<Tz>> {
    let local = dt.naive_local();
    let date = local.date();
    let time = local.time();
    let truncated = match unit {
        Unit::Nanos => return Some(*dt),
        Unit::Millis => date.and_time(time.with_nanosecond(time.nanosecond() / 1_000_000 * 1_000_000)?),
        Unit::Seconds => date.and_time(time.with_nanosecond(0)?),
        Unit::Minutes => date.and_hms_opt(time.hour(), time.minute(), 0)?,
        Unit::Hours => date.and_hms_opt(time.hour(), 0, 0)?,
        Unit::HalfDays => date.and_hms_opt(time.hour() / 12 * 12, 0, 0)?,
        Unit::Days => date.and_time(NaiveTime::MIN),
        Unit::Weeks => start_of_week(date)?.and_time(NaiveTime::MIN),
        Unit::Months => date.with_day(1)?.and_time(NaiveTime::MIN),
        Unit::Quarters => {
            let first_month = (date.month0() / 3) * 3 + 1;
            NaiveDate::from_ymd_opt(date.year(), first_month, 1)?.and_time(NaiveTime::MIN)
        }
        Unit::Years => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_time(NaiveTime::MIN),
        Unit::WeekBasedYears => {
            NaiveDate::from_isoywd_opt(date.iso_week().year(), 1, Weekday::Mon)?
                .and_time(NaiveTime::MIN)
        }
        Unit::Eras => {
            let first_year = if date.year() >= 1 { 1 } else { 0 };
            NaiveDate::from_ymd_opt(first_year, 1, 1)?.and_time(NaiveTime::MIN)
        }
    };
    resolve_local(&dt.timezone(), truncated, Some(dt.offset().fix()))
}

/// Whole `unit`s from `start` to `end`, truncated toward zero. Negative
/// when `end` is before `start`.
pub fn units_between(start: &DateTime<Tz>, end: &DateTime<Tz>, unit: Unit) -> i64 {
    if unit.is_time_based() {
        let delta = end.signed_duration_since(start);
        return match unit {
            Unit::Nanos => delta.num_nanoseconds().unwrap_or(if delta < TimeDelta::zero() {
                i64::MIN
            } else {
                i64::MAX
            }),
            Unit::Millis => delta.num_milliseconds(),
            Unit::Seconds => delta.num_seconds(),
            Unit::Minutes => delta.num_minutes(),
            Unit::Hours => delta.num_hours(),
            _ => delta.num_hours() / 12,
        };
    }

    let from = start.naive_local();
    let to = end.with_timezone(&start.timezone()).naive_local();
    match unit {
        Unit::WeekBasedYears => {
            i64::from(to.date().iso_week().year()) - i64::from(from.date().iso_week().year())
        }
        Unit::Eras => era_of(to.date()) - era_of(from.date()),
        _ => {
            let end_date = whole_day_end(&from, &to);
            match unit {
                Unit::Days => (end_date - from.date()).num_days(),
                Unit::Weeks => (end_date - from.date()).num_days() / 7,
                Unit::Months => months_until(from.date(), end_date),
                Unit::Quarters => months_until(from.date(), end_date) / 3,
                _ => months_until(from.date(), end_date) / 12,
            }
        }
    }
}

/// Attach `tz` to a local date-time. Gap times move forward by the gap
/// length; ambiguous times take the earlier offset.
pub fn localize(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    resolve_local(tz, local, None)
}

fn resolve_local(
    tz: &Tz,
    local: NaiveDateTime,
    preferred: Option<FixedOffset>,
) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, later) => {
            if preferred == Some(later.offset().fix()) {
                Some(later)
            } else {
                Some(earlier)
            }
        }
        LocalResult::None => {
            // Read the wall clock with the offset in force before the gap.
            let before = tz
                .offset_from_utc_datetime(&local.checked_sub_signed(TimeDelta::try_days(1)?)?)
                .fix();
            let utc = local.checked_sub_signed(TimeDelta::try_seconds(i64::from(
                before.local_minus_utc(),
            ))?)?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

fn start_of_week(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(TimeDelta::try_days(i64::from(
        date.weekday().num_days_from_monday(),
    ))?)
}

fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

fn add_week_based_years(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    let iso = date.iso_week();
    let target = i32::try_from(i64::from(iso.year()).checked_add(years)?).ok()?;
    let week = iso.week().min(weeks_in_week_based_year(target)?);
    NaiveDate::from_isoywd_opt(target, week, date.weekday())
}

fn weeks_in_week_based_year(year: i32) -> Option<u32> {
    // December 28th always falls in the last ISO week of its year.
    Some(NaiveDate::from_ymd_opt(year, 12, 28)?.iso_week().week())
}

fn era_of(date: NaiveDate) -> i64 {
    if date.year() >= 1 {
        1
    } else {
        0
    }
}

fn add_eras(date: NaiveDate, eras: i64) -> Option<NaiveDate> {
    let era = era_of(date).checked_add(eras)?;
    if !(0..=1).contains(&era) {
        return None;
    }
    let year_of_era = if era_of(date) == 1 {
        date.year()
    } else {
        1 - date.year()
    };
    let year = if era == 1 { year_of_era } else { 1 - year_of_era };
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), date.day() - 1))
}

/// The end date to count whole days or months against: one day is given
/// back when the end's time of day has not yet reached the start's.
fn whole_day_end(from: &NaiveDateTime, to: &NaiveDateTime) -> NaiveDate {
    let end = to.date();
    if end > from.date() && to.time() < from.time() {
        end.pred_opt().unwrap_or(end)
    } else if end < from.date() && to.time() > from.time() {
        end.succ_opt().unwrap_or(end)
    } else {
        end
    }
}

fn months_until(from: NaiveDate, to: NaiveDate) -> i64 {
    let packed = |d: NaiveDate| {
        (i64::from(d.year()) * 12 + i64::from(d.month0())) * 32 + i64::from(d.day())
    };
    (packed(to) - packed(from)) / 32
}
