//! Error types for date-math operations.

use thiserror::Error;

use crate::symbol::CalendarField;

/// A date pattern that cannot be used for formatting or enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedPatternError {
    #[error("Pattern '{pattern}' does not contain any field symbols")]
    NoFieldSymbols { pattern: String },

    #[error("Field '{symbol}' in pattern '{pattern}' does not have all of its dependencies")]
    UnsatisfiedDependency { pattern: String, symbol: char },

    #[error("Unsupported pattern letter '{letter}' in pattern '{pattern}'")]
    UnsupportedLetter { pattern: String, letter: char },

    #[error("Too many pattern letters '{letter}' ({count}) in pattern '{pattern}'")]
    TooManyLetters {
        pattern: String,
        letter: char,
        count: usize,
    },

    #[error("Reserved character '{character}' in pattern '{pattern}'")]
    ReservedCharacter { pattern: String, character: char },
}

impl MalformedPatternError {
    /// The pattern string that failed to compile.
    pub fn pattern(&self) -> &str {
        match self {
            Self::NoFieldSymbols { pattern }
            | Self::UnsatisfiedDependency { pattern, .. }
            | Self::UnsupportedLetter { pattern, .. }
            | Self::TooManyLetters { pattern, .. }
            | Self::ReservedCharacter { pattern, .. } => pattern,
        }
    }
}

/// Text that does not match a compiled date pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatParseError {
    #[error("expected {expected} at position {position}")]
    Mismatch {
        position: usize,
        expected: &'static str,
    },

    #[error("unparsed text found at position {position}: '{remainder}'")]
    TrailingText { position: usize, remainder: String },

    #[error("conflicting values for {field:?}: {first} and {second}")]
    Conflict {
        field: CalendarField,
        first: i64,
        second: i64,
    },

    #[error("value {value} is out of range for {field:?}")]
    OutOfRange { field: CalendarField, value: i64 },

    #[error("cannot represent {0} in the calendar")]
    Unrepresentable(String),
}

/// A date-math expression that cannot be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateMathParseError {
    #[error("operator '{operator}' not supported for date math '{expression}'")]
    UnsupportedOperator { operator: char, expression: String },

    #[error("truncated date math '{expression}'")]
    TruncatedExpression { expression: String },

    #[error(
        "rounding '/' may only be used with an implicit magnitude of one in date math '{expression}'"
    )]
    RoundingMagnitude { expression: String },

    #[error("unit '{unit}' not supported for date math '{expression}'")]
    UnsupportedUnit { unit: char, expression: String },

    #[error("invalid magnitude '{magnitude}' in date math '{expression}'")]
    InvalidMagnitude {
        magnitude: String,
        expression: String,
    },

    #[error("date math '{expression}' leaves the supported calendar range")]
    OutOfRange { expression: String },

    #[error("failed to parse date field '{input}' with format '{pattern}'")]
    InvalidDate {
        input: String,
        pattern: String,
        #[source]
        source: FormatParseError,
    },

    #[error(transparent)]
    Pattern(#[from] MalformedPatternError),
}

pub type Result<T> = std::result::Result<T, DateMathParseError>;
