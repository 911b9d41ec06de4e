//! Command-line interface definitions for `datemath`.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};

use date_math::config::fixed_clock;
use date_math::{DateMathConfig, DEFAULT_NOW_TOKEN, DEFAULT_PATTERN};

#[derive(Debug, Parser)]
#[command(name = "datemath")]
#[command(
    author,
    version,
    about = "Resolve date math expressions and expand date-patterned names"
)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve expressions such as `now-1d/d` or `2024.01.01||+1M/M`
    Resolve {
        #[arg(required = true)]
        expressions: Vec<String>,

        #[command(flatten)]
        resolver: ResolverArgs,
    },

    /// Show the fields a date pattern encodes
    Analyze { pattern: String },

    /// List every value of a date pattern between two instants
    Patterns {
        /// Pattern to expand, e.g. `'logs-'yyyy.MM.dd`
        pattern: String,

        /// First instant: RFC 3339 or a date math expression
        #[arg(long)]
        start: String,

        /// Last instant: RFC 3339 or a date math expression
        #[arg(long)]
        end: String,

        #[command(flatten)]
        resolver: ResolverArgs,
    },
}

/// Options shared by every command that resolves date math.
#[derive(Debug, Args)]
pub struct ResolverArgs {
    /// Pattern for literal anchors
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pub format: String,

    /// IANA time zone for parsing, rounding and output
    #[arg(short, long, default_value = "UTC", value_parser = parse_zone)]
    pub zone: Tz,

    /// Fixed "now" (RFC 3339, e.g. 2024-03-13T17:42:31Z)
    #[arg(long, value_parser = parse_time)]
    pub now: Option<DateTime<Utc>>,

    /// Token that anchors an expression on the current time
    #[arg(long, default_value = DEFAULT_NOW_TOKEN)]
    pub now_token: String,
}

impl ResolverArgs {
    pub fn config(&self) -> DateMathConfig {
        let mut config = DateMathConfig {
            pattern: self.format.clone(),
            zone: self.zone,
            now_token: self.now_token.clone(),
            ..DateMathConfig::default()
        };
        if let Some(now) = self.now {
            config.now = fixed_clock(now);
        }
        config
    }
}

fn parse_zone(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>()
        .map_err(|e| format!("unknown time zone '{s}': {e}"))
}

fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid datetime: {e}"))
}
