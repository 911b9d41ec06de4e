//! # date-math
//!
//! Date-math expressions and date-patterned names.
//!
//! Resolves expressions such as `now-1d/d` or `2024.01.01||+1M/M` against a
//! date pattern and time zone, and goes the other way for patterned names:
//! given `logs-YYYY.MM.dd`, finds the finest field the pattern encodes and
//! lists every name it produces over a time window.
//!
//! ## Modules
//!
//! - [`symbol`]: pattern letters, the calendar fields they encode, and their dependencies
//! - [`calendar`]: zone-aware add, truncate and distance by calendar unit
//! - [`format`]: compile letter patterns; format instants and strictly parse text
//! - [`analyzer`]: validate a pattern and find its lowest field
//! - [`interval`]: enumerate a pattern's values between two instants
//! - [`math`]: apply `+1d`, `-3M`, `/w` style suffixes
//! - [`config`]: pattern, zone and clock used to resolve expressions
//! - [`parser`]: resolve full date-math expressions
//! - [`error`]: Error types

pub mod analyzer;
pub mod calendar;
pub mod config;
pub mod error;
pub mod format;
pub mod interval;
pub mod math;
pub mod parser;
pub mod symbol;

pub use analyzer::{compile_pattern, CompiledPattern};
pub use calendar::Unit;
pub use config::{DateMathConfig, NowSource, DEFAULT_NOW_TOKEN, DEFAULT_PATTERN};
pub use error::{DateMathParseError, FormatParseError, MalformedPatternError};
pub use format::{DateFormat, ParsedFields};
pub use interval::{all_patterns_between, enumerate_patterns, PatternIntervals};
pub use math::{apply_math, parse_math, MathStep};
pub use parser::{resolve_expression, DateMathParser};
pub use symbol::{CalendarField, FieldSymbol, SymbolSet};
