//! Pattern analysis: find the finest field a pattern encodes and check that
//! the pattern pins it to a single point on the calendar.

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::debug;

use crate::error::MalformedPatternError;
use crate::format::DateFormat;
use crate::symbol::{FieldSymbol, SymbolSet};

/// A validated date pattern together with its compiled format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    lowest: FieldSymbol,
    symbols: SymbolSet,
    format: DateFormat,
}

impl CompiledPattern {
    pub fn pattern(&self) -> &str {
        self.format.pattern()
    }

    /// The finest-grained field in the pattern; one enumeration step.
    pub fn lowest_field(&self) -> FieldSymbol {
        self.lowest
    }

    /// Every field symbol found outside quoted text.
    pub fn symbols(&self) -> SymbolSet {
        self.symbols
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.format
    }

    pub fn format(&self, dt: &DateTime<Tz>) -> String {
        self.format.format(dt)
    }
}

impl FromStr for CompiledPattern {
    type Err = MalformedPatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile_pattern(s)
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Analyze and compile a date pattern.
///
/// # Errors
///
/// - [`MalformedPatternError::NoFieldSymbols`] when no field letter appears
///   outside quotes.
/// - [`MalformedPatternError::UnsatisfiedDependency`] when the finest field
///   cannot be anchored by the coarser fields present (`MM.dd` has no year).
/// - Any error from [`DateFormat::compile`].
///
/// # Examples
///
/// ```
/// use date_math::{compile_pattern, FieldSymbol};
///
/// let pattern = compile_pattern("YYYY.MM.dd").unwrap();
/// assert_eq!(pattern.lowest_field(), FieldSymbol::DayOfMonth);
/// assert!(compile_pattern("MM.dd").is_err());
/// ```
pub fn compile_pattern(pattern: &str) -> Result<CompiledPattern, MalformedPatternError> {
    let symbols = scan_symbols(pattern);
    let lowest = symbols
        .lowest()
        .ok_or_else(|| MalformedPatternError::NoFieldSymbols {
            pattern: pattern.to_string(),
        })?;

    if !lowest.is_satisfied_by(symbols) {
        return Err(MalformedPatternError::UnsatisfiedDependency {
            pattern: pattern.to_string(),
            symbol: lowest.letter(),
        });
    }

    let format = DateFormat::compile(pattern)?;
    debug!(pattern, lowest = ?lowest, "compiled date pattern");

    Ok(CompiledPattern {
        lowest,
        symbols,
        format,
    })
}

/// Collect the field symbols outside single-quoted runs. Each quote toggles
/// escaping, so an unterminated quote escapes the rest of the pattern.
fn scan_symbols(pattern: &str) -> SymbolSet {
    let mut escaped = false;
    let mut symbols = SymbolSet::new();
    for c in pattern.chars() {
        if c == '\'' {
            escaped = !escaped;
        } else if !escaped {
            if let Some(symbol) = FieldSymbol::of(c) {
                symbols.insert(symbol);
            }
        }
    }
    symbols
}
