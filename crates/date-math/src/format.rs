//! Letter-pattern date formats (`yyyy.MM.dd`, `YYYY-ww`, `dd MMM HH:mm`).
//!
//! A pattern is compiled once into a [`DateFormat`], which can render an
//! instant and strictly parse text back into a partial field map
//! ([`ParsedFields`]). Parsed fields are turned into an instant by
//! [`ParsedFields::resolve`], which defaults every missing field to the
//! start of the Unix epoch's calendar (1970-01-01 00:00:00.0).
//!
//! # Pattern syntax
//!
//! - A run of one ASCII letter is a field; the run length selects the width
//!   or text style (`M` → `3`, `MM` → `03`, `MMM` → `Mar`, `MMMM` → `March`,
//!   `MMMMM` → `M`).
//! - `'text'` is literal text, `''` is a single quote. An unterminated quote
//!   runs to the end of the pattern.
//! - `[ ] { } #` are reserved and rejected.
//! - Any other character is literal.
//!
//! Week fields (`Y`, `w`) use ISO weeks and numeric day-of-week fields
//! (`e`, `c`) count Monday as 1, independent of locale. Text is English.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use chrono_tz::Tz;

use crate::calendar;
use crate::error::{FormatParseError, MalformedPatternError};
use crate::symbol::{CalendarField, FieldSymbol, SymbolSet};

const MONTHS_FULL: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const MONTHS_SHORT: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_NARROW: &[&str] = &["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];
const DAYS_FULL: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
const DAYS_SHORT: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const DAYS_NARROW: &[&str] = &["M", "T", "W", "T", "F", "S", "S"];
const QUARTERS_FULL: &[&str] = &["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"];
const QUARTERS_SHORT: &[&str] = &["Q1", "Q2", "Q3", "Q4"];
const ERAS_FULL: &[&str] = &["Before Christ", "Anno Domini"];
const ERAS_SHORT: &[&str] = &["BC", "AD"];
const ERAS_NARROW: &[&str] = &["B", "A"];
const AM_PM: &[&str] = &["AM", "PM"];

/// Widest digit run accepted for an unbounded numeric field.
const MAX_DIGITS: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Number {
        symbol: FieldSymbol,
        min: usize,
        max: usize,
        /// Two-digit year, 2000-based.
        reduced: bool,
        /// Accepts a leading sign; prints `+` when wider than `min`.
        signed: bool,
    },
    Fraction {
        width: usize,
    },
    Text {
        symbol: FieldSymbol,
        names: &'static [&'static str],
        first: i64,
    },
}

/// A compiled letter pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    tokens: Vec<Token>,
}

impl DateFormat {
    /// Compile `pattern` into a reusable format.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPatternError`] for letters without a field meaning,
    /// runs longer than the field allows, or reserved characters.
    pub fn compile(pattern: &str) -> Result<Self, MalformedPatternError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                i += 1;
                if chars.get(i) == Some(&'\'') {
                    literal.push('\'');
                    i += 1;
                    continue;
                }
                while i < chars.len() {
                    if chars[i] == '\'' {
                        if chars.get(i + 1) == Some(&'\'') {
                            literal.push('\'');
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    literal.push(chars[i]);
                    i += 1;
                }
            } else if c.is_ascii_alphabetic() {
                let start = i;
                while i < chars.len() && chars[i] == c {
                    i += 1;
                }
                let symbol =
                    FieldSymbol::of(c).ok_or_else(|| MalformedPatternError::UnsupportedLetter {
                        pattern: pattern.to_string(),
                        letter: c,
                    })?;
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(field_token(pattern, symbol, i - start)?);
            } else if matches!(c, '[' | ']' | '{' | '}' | '#') {
                return Err(MalformedPatternError::ReservedCharacter {
                    pattern: pattern.to_string(),
                    character: c,
                });
            } else {
                literal.push(c);
                i += 1;
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            tokens,
        })
    }

    /// The pattern this format was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Field symbols used by the pattern.
    pub fn symbols(&self) -> SymbolSet {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Literal(_) => None,
                Token::Number { symbol, .. } | Token::Text { symbol, .. } => Some(*symbol),
                Token::Fraction { .. } => Some(FieldSymbol::FractionOfSecond),
            })
            .collect()
    }

    /// Render `dt` in its own zone.
    pub fn format(&self, dt: &DateTime<Tz>) -> String {
        let local = dt.naive_local();
        let mut out = String::with_capacity(self.pattern.len() + 8);
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Number {
                    symbol,
                    min,
                    reduced,
                    signed,
                    ..
                } => {
                    let value = field_value(&local, *symbol);
                    if *reduced {
                        out.push_str(&format!("{:02}", value.rem_euclid(100)));
                    } else {
                        let digits = format!("{:0width$}", value.unsigned_abs(), width = *min);
                        if value < 0 {
                            out.push('-');
                        } else if *signed && *min >= 4 && digits.len() > *min {
                            out.push('+');
                        }
                        out.push_str(&digits);
                    }
                }
                Token::Fraction { width } => {
                    let nanos = field_value(&local, FieldSymbol::FractionOfSecond);
                    let digits = format!("{nanos:09}");
                    out.push_str(&digits[..(*width).min(9)]);
                }
                Token::Text {
                    symbol,
                    names,
                    first,
                } => {
                    let index = field_value(&local, *symbol) - first;
                    if let Some(name) = usize::try_from(index).ok().and_then(|i| names.get(i)) {
                        out.push_str(name);
                    }
                }
            }
        }
        out
    }

    /// Strictly parse `text`: every literal must match, every field must
    /// be present, and the whole input must be consumed.
    pub fn parse(&self, text: &str) -> Result<ParsedFields, FormatParseError> {
        let mut parsed = ParsedFields::default();
        let bytes = text.as_bytes();
        let mut pos = 0;

        for (index, token) in self.tokens.iter().enumerate() {
            match token {
                Token::Literal(literal) => {
                    if !text[pos..].starts_with(literal.as_str()) {
                        return Err(FormatParseError::Mismatch {
                            position: pos,
                            expected: "literal text",
                        });
                    }
                    pos += literal.len();
                }
                Token::Number {
                    symbol,
                    min,
                    max,
                    reduced,
                    signed,
                } => {
                    let mut negative = false;
                    if *signed && !*reduced {
                        match bytes.get(pos) {
                            Some(b'-') => {
                                negative = true;
                                pos += 1;
                            }
                            Some(b'+') => {
                                // Only years wider than the pad carry a plus sign.
                                let wide = bytes[pos + 1..]
                                    .iter()
                                    .take_while(|b| b.is_ascii_digit())
                                    .count()
                                    .saturating_sub(self.reserved_after(index));
                                if *min < 4 || wide <= *min {
                                    return Err(FormatParseError::Mismatch {
                                        position: pos,
                                        expected: "digits",
                                    });
                                }
                                pos += 1;
                            }
                            _ => {}
                        }
                    }
                    let run = bytes[pos..]
                        .iter()
                        .take_while(|b| b.is_ascii_digit())
                        .count();
                    let take = run
                        .saturating_sub(self.reserved_after(index))
                        .min(*max);
                    if take < *min || take == 0 {
                        return Err(FormatParseError::Mismatch {
                            position: pos,
                            expected: "digits",
                        });
                    }
                    let digits = &text[pos..pos + take];
                    let mut value: i64 =
                        digits.parse().map_err(|_| FormatParseError::OutOfRange {
                            field: symbol.field(),
                            value: i64::MAX,
                        })?;
                    if negative {
                        value = -value;
                    }
                    if *reduced {
                        value += 2000;
                    }
                    parsed.set(symbol.field(), value)?;
                    pos += take;
                }
                Token::Fraction { width } => {
                    let run = bytes[pos..]
                        .iter()
                        .take(*width)
                        .take_while(|b| b.is_ascii_digit())
                        .count();
                    if run < *width {
                        return Err(FormatParseError::Mismatch {
                            position: pos,
                            expected: "fraction digits",
                        });
                    }
                    let digits = format!("{:0<9}", &text[pos..pos + width]);
                    let nanos: i64 = digits.parse().map_err(|_| FormatParseError::Mismatch {
                        position: pos,
                        expected: "fraction digits",
                    })?;
                    parsed.set(CalendarField::NanoOfSecond, nanos)?;
                    pos += width;
                }
                Token::Text {
                    symbol,
                    names,
                    first,
                } => {
                    let found = names
                        .iter()
                        .enumerate()
                        .find(|(_, name)| text[pos..].starts_with(**name));
                    let Some((i, name)) = found else {
                        return Err(FormatParseError::Mismatch {
                            position: pos,
                            expected: "text",
                        });
                    };
                    parsed.set(symbol.field(), first + i as i64)?;
                    pos += name.len();
                }
            }
        }

        if pos < text.len() {
            return Err(FormatParseError::TrailingText {
                position: pos,
                remainder: text[pos..].to_string(),
            });
        }
        Ok(parsed)
    }

    /// Digits owed to the numeric fields immediately following `index`.
    fn reserved_after(&self, index: usize) -> usize {
        self.tokens[index + 1..]
            .iter()
            .map_while(|token| match token {
                Token::Number { min, .. } => Some(*min),
                Token::Fraction { width } => Some(*width),
                _ => None,
            })
            .sum()
    }
}

fn field_token(
    pattern: &str,
    symbol: FieldSymbol,
    width: usize,
) -> Result<Token, MalformedPatternError> {
    use FieldSymbol::*;

    let limit = match symbol {
        Era | StandaloneQuarter | QuarterOfYear | StandaloneMonth | MonthOfYear | DayOfWeek
        | LocalizedDayOfWeek | StandaloneDayOfWeek => 5,
        WeekBasedYear | Year | YearOfEra | NanoOfDay | MilliOfDay => 19,
        FractionOfSecond | NanoOfSecond => 9,
        DayOfYear => 3,
        AlignedWeekOfMonth | AlignedDayOfWeekInMonth | AmPmOfDay => 1,
        _ => 2,
    };
    if width > limit {
        return Err(MalformedPatternError::TooManyLetters {
            pattern: pattern.to_string(),
            letter: symbol.letter(),
            count: width,
        });
    }

    let number = |min: usize, max: usize| Token::Number {
        symbol,
        min,
        max,
        reduced: false,
        signed: false,
    };
    let text = |names: &'static [&'static str], first: i64| Token::Text {
        symbol,
        names,
        first,
    };

    let token = match symbol {
        WeekBasedYear | Year | YearOfEra => Token::Number {
            symbol,
            min: width,
            max: if width == 2 { 2 } else { width.max(10) },
            reduced: width == 2,
            signed: symbol != YearOfEra,
        },
        Era => match width {
            4 => text(ERAS_FULL, 0),
            5 => text(ERAS_NARROW, 0),
            _ => text(ERAS_SHORT, 0),
        },
        StandaloneQuarter | QuarterOfYear => match width {
            1 | 5 => number(1, 1),
            2 => number(2, 2),
            3 => text(QUARTERS_SHORT, 1),
            _ => text(QUARTERS_FULL, 1),
        },
        StandaloneMonth | MonthOfYear => match width {
            1 => number(1, 2),
            2 => number(2, 2),
            3 => text(MONTHS_SHORT, 1),
            4 => text(MONTHS_FULL, 1),
            _ => text(MONTHS_NARROW, 1),
        },
        DayOfWeek | LocalizedDayOfWeek | StandaloneDayOfWeek => {
            let numeric = symbol != DayOfWeek;
            match width {
                1 if numeric => number(1, 1),
                2 if numeric => number(2, 2),
                4 => text(DAYS_FULL, 1),
                5 => text(DAYS_NARROW, 1),
                _ => text(DAYS_SHORT, 1),
            }
        }
        AmPmOfDay => text(AM_PM, 0),
        FractionOfSecond => Token::Fraction { width },
        NanoOfSecond => number(width, 9),
        NanoOfDay | MilliOfDay => number(width, width.max(MAX_DIGITS)),
        DayOfYear => number(width, 3),
        AlignedWeekOfMonth | AlignedDayOfWeekInMonth => number(1, 1),
        _ => {
            if width == 1 {
                number(1, 2)
            } else {
                number(2, 2)
            }
        }
    };
    Ok(token)
}

/// The value `symbol` takes at the local date-time `dt`.
fn field_value(dt: &NaiveDateTime, symbol: FieldSymbol) -> i64 {
    let date = dt.date();
    let hour = i64::from(dt.hour());
    let nanos = i64::from(dt.nanosecond().min(999_999_999));
    let seconds_of_day = i64::from(dt.num_seconds_from_midnight());
    match symbol.field() {
        CalendarField::NanoOfDay => seconds_of_day * 1_000_000_000 + nanos,
        CalendarField::NanoOfSecond => nanos,
        CalendarField::MilliOfDay => seconds_of_day * 1_000 + nanos / 1_000_000,
        CalendarField::SecondOfMinute => i64::from(dt.second()),
        CalendarField::MinuteOfHour => i64::from(dt.minute()),
        CalendarField::ClockHourOfAmPm => match hour % 12 {
            0 => 12,
            h => h,
        },
        CalendarField::HourOfAmPm => hour % 12,
        CalendarField::ClockHourOfDay => {
            if hour == 0 {
                24
            } else {
                hour
            }
        }
        CalendarField::HourOfDay => hour,
        CalendarField::AmPmOfDay => hour / 12,
        CalendarField::DayOfWeek => i64::from(date.weekday().number_from_monday()),
        CalendarField::AlignedDayOfWeekInMonth => i64::from((date.day() - 1) % 7 + 1),
        CalendarField::DayOfMonth => i64::from(date.day()),
        CalendarField::DayOfYear => i64::from(date.ordinal()),
        CalendarField::WeekOfWeekBasedYear => i64::from(date.iso_week().week()),
        CalendarField::AlignedWeekOfMonth => i64::from((date.day() - 1) / 7 + 1),
        CalendarField::MonthOfYear => i64::from(date.month()),
        CalendarField::QuarterOfYear => i64::from(date.month0() / 3 + 1),
        CalendarField::WeekBasedYear => i64::from(date.iso_week().year()),
        CalendarField::Year => i64::from(date.year()),
        CalendarField::YearOfEra => {
            let year = i64::from(date.year());
            if year >= 1 {
                year
            } else {
                1 - year
            }
        }
        CalendarField::Era => i64::from(date.year() >= 1),
    }
}

/// Calendar fields read from text by [`DateFormat::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    values: BTreeMap<CalendarField, i64>,
}

impl ParsedFields {
    pub fn get(&self, field: CalendarField) -> Option<i64> {
        self.values.get(&field).copied()
    }

    pub fn contains(&self, field: CalendarField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CalendarField, i64)> + '_ {
        self.values.iter().map(|(field, value)| (*field, *value))
    }

    fn set(&mut self, field: CalendarField, value: i64) -> Result<(), FormatParseError> {
        match self.values.insert(field, value) {
            Some(previous) if previous != value => Err(FormatParseError::Conflict {
                field,
                first: previous,
                second: value,
            }),
            _ => Ok(()),
        }
    }

    /// Build an instant in `tz`, defaulting absent fields: year 1970,
    /// month and day 1, every time-of-day field 0.
    ///
    /// A week-based year with a day but no week field selects the calendar
    /// year that puts the day in that week-based year; without a day it is
    /// read as the calendar year. A parsed weekday, quarter or day of year
    /// that contradicts the resolved date is a conflict.
    pub fn resolve(&self, tz: &Tz) -> Result<DateTime<Tz>, FormatParseError> {
        let date = self.resolve_date()?;
        let time = self.resolve_time()?;
        let local = date.and_time(time);
        calendar::localize(tz, local)
            .ok_or_else(|| FormatParseError::Unrepresentable(format!("{local} in {tz}")))
    }

    fn resolve_date(&self) -> Result<NaiveDate, FormatParseError> {
        use CalendarField as F;

        let year = match (self.get(F::Year), self.get(F::YearOfEra)) {
            (Some(year), _) => year,
            (None, Some(year_of_era)) => match self.get(F::Era) {
                Some(0) => 1 - year_of_era,
                _ => year_of_era,
            },
            (None, None) => self.get(F::WeekBasedYear).unwrap_or(1970),
        };
        let year = narrow::<i32>(F::Year, year)?;

        let week_date = self.contains(F::WeekOfWeekBasedYear)
            && !self.contains(F::DayOfMonth)
            && !self.contains(F::DayOfYear);

        let date = if week_date {
            let week_year = match self.get(F::WeekBasedYear) {
                Some(y) => narrow::<i32>(F::WeekBasedYear, y)?,
                None => year,
            };
            let week = self.bounded(F::WeekOfWeekBasedYear, 1, 53, 1)?;
            let weekday = weekday_from_number(self.bounded(F::DayOfWeek, 1, 7, 1)?);
            NaiveDate::from_isoywd_opt(week_year, week, weekday).ok_or_else(|| {
                FormatParseError::Unrepresentable(format!("week {week} of {week_year}"))
            })?
        } else if self.contains(F::WeekBasedYear)
            && !self.contains(F::Year)
            && !self.contains(F::YearOfEra)
            && (self.contains(F::DayOfMonth) || self.contains(F::DayOfYear))
        {
            self.week_year_calendar_date(year)?
        } else {
            self.calendar_date(year)?
        };

        self.cross_check(F::DayOfWeek, i64::from(date.weekday().number_from_monday()))?;
        self.cross_check(F::QuarterOfYear, i64::from(date.month0() / 3 + 1))?;
        self.cross_check(F::DayOfYear, i64::from(date.ordinal()))?;
        Ok(date)
    }

    /// Month and day fields (or day of year, quarter, aligned week) on `year`.
    fn calendar_date(&self, year: i32) -> Result<NaiveDate, FormatParseError> {
        use CalendarField as F;

        if let (Some(_), false, false) = (
            self.get(F::DayOfYear),
            self.contains(F::MonthOfYear),
            self.contains(F::DayOfMonth),
        ) {
            let ordinal = self.bounded(F::DayOfYear, 1, 366, 1)?;
            return NaiveDate::from_yo_opt(year, ordinal).ok_or_else(|| {
                FormatParseError::Unrepresentable(format!("day {ordinal} of {year}"))
            });
        }

        let month = match self.get(F::MonthOfYear) {
            Some(_) => self.bounded(F::MonthOfYear, 1, 12, 1)?,
            None => (self.bounded(F::QuarterOfYear, 1, 4, 1)? - 1) * 3 + 1,
        };
        let day = match (self.get(F::DayOfMonth), self.get(F::AlignedWeekOfMonth)) {
            (Some(_), _) => self.bounded(F::DayOfMonth, 1, 31, 1)?,
            (None, Some(_)) => {
                let week = self.bounded(F::AlignedWeekOfMonth, 1, 5, 1)?;
                let day_in_week = self.bounded(F::AlignedDayOfWeekInMonth, 1, 7, 1)?;
                (week - 1) * 7 + day_in_week
            }
            (None, None) => 1,
        };
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            FormatParseError::Unrepresentable(format!("{year:04}-{month:02}-{day:02}"))
        })
    }

    /// A day written with a week-based year. The calendar year
    /// is whichever neighbour of `week_year` puts the date in that week-based
    /// year, so `2025.12.30` in `YYYY.MM.dd` is December 30 2024.
    fn week_year_calendar_date(&self, week_year: i32) -> Result<NaiveDate, FormatParseError> {
        [Some(week_year), week_year.checked_sub(1), week_year.checked_add(1)]
            .into_iter()
            .flatten()
            .filter_map(|year| self.calendar_date(year).ok())
            .find(|date| date.iso_week().year() == week_year)
            .map_or_else(|| self.calendar_date(week_year), Ok)
    }

    fn resolve_time(&self) -> Result<NaiveTime, FormatParseError> {
        use CalendarField as F;

        if let Some(nanos) = self.get(F::NanoOfDay) {
            return time_of_day_nanos(F::NanoOfDay, nanos);
        }
        if let Some(millis) = self.get(F::MilliOfDay) {
            let nanos = millis
                .checked_mul(1_000_000)
                .ok_or(FormatParseError::OutOfRange {
                    field: F::MilliOfDay,
                    value: millis,
                })?;
            return time_of_day_nanos(F::MilliOfDay, nanos);
        }

        let hour = if self.contains(F::HourOfDay) {
            self.bounded(F::HourOfDay, 0, 23, 0)?
        } else if self.contains(F::ClockHourOfDay) {
            self.bounded(F::ClockHourOfDay, 1, 24, 0)? % 24
        } else if self.contains(F::HourOfAmPm) || self.contains(F::ClockHourOfAmPm) {
            let in_half = if self.contains(F::HourOfAmPm) {
                self.bounded(F::HourOfAmPm, 0, 11, 0)?
            } else {
                self.bounded(F::ClockHourOfAmPm, 1, 12, 0)? % 12
            };
            in_half + 12 * self.bounded(F::AmPmOfDay, 0, 1, 0)?
        } else {
            0
        };
        if self.contains(F::HourOfDay) || self.contains(F::ClockHourOfDay) {
            self.cross_check(F::AmPmOfDay, i64::from(hour / 12))?;
        }

        let minute = self.bounded(F::MinuteOfHour, 0, 59, 0)?;
        let second = self.bounded(F::SecondOfMinute, 0, 59, 0)?;
        let nano = self.bounded(F::NanoOfSecond, 0, 999_999_999, 0)?;
        NaiveTime::from_hms_nano_opt(hour, minute, second, nano).ok_or_else(|| {
            FormatParseError::Unrepresentable(format!("{hour:02}:{minute:02}:{second:02}"))
        })
    }

    /// The field's value checked against `min..=max`, or `default` when absent.
    fn bounded(
        &self,
        field: CalendarField,
        min: i64,
        max: i64,
        default: u32,
    ) -> Result<u32, FormatParseError> {
        match self.get(field) {
            None => Ok(default),
            Some(value) if (min..=max).contains(&value) => narrow::<u32>(field, value),
            Some(value) => Err(FormatParseError::OutOfRange { field, value }),
        }
    }

    fn cross_check(&self, field: CalendarField, actual: i64) -> Result<(), FormatParseError> {
        match self.get(field) {
            Some(parsed) if parsed != actual => Err(FormatParseError::Conflict {
                field,
                first: parsed,
                second: actual,
            }),
            _ => Ok(()),
        }
    }
}

fn narrow<T: TryFrom<i64>>(field: CalendarField, value: i64) -> Result<T, FormatParseError> {
    T::try_from(value).map_err(|_| FormatParseError::OutOfRange { field, value })
}

fn time_of_day_nanos(field: CalendarField, nanos: i64) -> Result<NaiveTime, FormatParseError> {
    const NANOS_PER_DAY: i64 = 86_400 * 1_000_000_000;
    if !(0..NANOS_PER_DAY).contains(&nanos) {
        return Err(FormatParseError::OutOfRange {
            field,
            value: nanos,
        });
    }
    let seconds = (nanos / 1_000_000_000) as u32;
    let sub = (nanos % 1_000_000_000) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, sub)
        .ok_or(FormatParseError::OutOfRange { field, value: nanos })
}

fn weekday_from_number(n: u32) -> Weekday {
    match n {
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        7 => Weekday::Sun,
        _ => Weekday::Mon,
    }
}
