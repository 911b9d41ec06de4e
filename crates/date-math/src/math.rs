//! Date math suffixes: `+1d`, `-3M/d`, `/w`.
//!
//! A suffix is a sequence of steps applied left to right. Each step is an
//! operator (`+`, `-` or `/`), an optional decimal magnitude, and a unit
//! letter:
//!
//! | Letter    | Unit    |
//! |-----------|---------|
//! | `y`       | years   |
//! | `M`       | months  |
//! | `w`       | weeks   |
//! | `d`       | days    |
//! | `H`, `h`  | hours   |
//! | `m`       | minutes |
//! | `s`       | seconds |
//!
//! `+`/`-` add calendar units (months and years respect month lengths and
//! leap years; days and weeks keep the wall-clock time; hours, minutes and
//! seconds are elapsed time). `/` floors to the start of the unit's current
//! period; weeks start on Monday.

use std::iter::{FusedIterator, Peekable};
use std::str::Chars;

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::trace;

use crate::calendar::{self, Unit};
use crate::error::{DateMathParseError, Result};

/// One parsed step of a math suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathStep {
    /// `+1` or `-1`; always `+1` when rounding.
    pub sign: i64,
    pub round: bool,
    pub magnitude: i64,
    pub unit: Unit,
}

impl MathStep {
    /// Apply this step to `dt`. `None` when the result is out of range.
    pub fn apply(&self, dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if self.round {
            calendar::truncate(dt, self.unit)
        } else {
            calendar::plus(dt, self.sign * self.magnitude, self.unit)
        }
    }
}

/// The unit a math letter stands for.
pub fn math_unit(letter: char) -> Option<Unit> {
    match letter {
        'y' => Some(Unit::Years),
        'M' => Some(Unit::Months),
        'w' => Some(Unit::Weeks),
        'd' => Some(Unit::Days),
        'H' | 'h' => Some(Unit::Hours),
        'm' => Some(Unit::Minutes),
        's' => Some(Unit::Seconds),
        _ => None,
    }
}

/// Iterator over the steps of a math suffix. Stops after the first error.
#[derive(Debug, Clone)]
pub struct MathSteps<'a> {
    expression: &'a str,
    chars: Peekable<Chars<'a>>,
    failed: bool,
}

impl<'a> MathSteps<'a> {
    pub fn new(expression: &'a str) -> Self {
        Self {
            expression,
            chars: expression.chars().peekable(),
            failed: false,
        }
    }

    fn parse_step(&mut self, operator: char) -> Result<MathStep> {
        let (sign, round) = match operator {
            '/' => (1, true),
            '+' => (1, false),
            '-' => (-1, false),
            other => {
                return Err(DateMathParseError::UnsupportedOperator {
                    operator: other,
                    expression: self.expression.to_string(),
                })
            }
        };

        let magnitude = match self.chars.peek().copied() {
            None => return Err(self.truncated()),
            Some(c) if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(c) = self.chars.next_if(|c| c.is_ascii_digit()) {
                    digits.push(c);
                }
                if self.chars.peek().is_none() {
                    return Err(self.truncated());
                }
                digits
                    .parse::<i32>()
                    .map_err(|_| DateMathParseError::InvalidMagnitude {
                        magnitude: digits.clone(),
                        expression: self.expression.to_string(),
                    })?
            }
            Some(_) => 1,
        };

        if round && magnitude != 1 {
            return Err(DateMathParseError::RoundingMagnitude {
                expression: self.expression.to_string(),
            });
        }

        let letter = self.chars.next().ok_or_else(|| self.truncated())?;
        let unit = math_unit(letter).ok_or_else(|| DateMathParseError::UnsupportedUnit {
            unit: letter,
            expression: self.expression.to_string(),
        })?;

        Ok(MathStep {
            sign,
            round,
            magnitude: i64::from(magnitude),
            unit,
        })
    }

    fn truncated(&self) -> DateMathParseError {
        DateMathParseError::TruncatedExpression {
            expression: self.expression.to_string(),
        }
    }
}

impl Iterator for MathSteps<'_> {
    type Item = Result<MathStep>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let operator = self.chars.next()?;
        let step = self.parse_step(operator);
        self.failed = step.is_err();
        Some(step)
    }
}

impl FusedIterator for MathSteps<'_> {}

/// Parse a whole suffix without applying it.
pub fn parse_math(expression: &str) -> Result<Vec<MathStep>> {
    MathSteps::new(expression).collect()
}

/// Apply the math suffix `expression` to `anchor`.
///
/// An empty suffix returns the anchor unchanged.
///
/// # Errors
///
/// Returns a [`DateMathParseError`] for an unknown operator or unit, a
/// suffix that ends before its unit, a rounding step with an explicit
/// magnitude other than one, or a result outside the supported range.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use chrono_tz::Tz;
/// use date_math::apply_math;
///
/// let anchor = Tz::UTC.with_ymd_and_hms(2024, 3, 5, 17, 42, 0).unwrap();
/// let result = apply_math("+1d/d", anchor).unwrap();
/// assert_eq!(result, Tz::UTC.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap());
/// ```
pub fn apply_math(expression: &str, anchor: DateTime<Tz>) -> Result<DateTime<Tz>> {
    let mut time = anchor;
    for step in MathSteps::new(expression) {
        let step = step?;
        time = step
            .apply(&time)
            .ok_or_else(|| DateMathParseError::OutOfRange {
                expression: expression.to_string(),
            })?;
        trace!(?step, %time, "applied date math step");
    }
    Ok(time)
}
