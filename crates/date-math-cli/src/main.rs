//! # datemath
//!
//! Command-line front end for the `date-math` crate.
//!
//! ```text
//! datemath resolve 'now-1d/d' --zone Europe/Berlin
//! datemath analyze 'YYYY.MM.dd'
//! datemath patterns "'logs-'yyyy.MM.dd" --start now-7d --end now
//! ```

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use date_math::{compile_pattern, CalendarField, DateMathParser, FieldSymbol, Unit};

mod cli;

use cli::{Cli, Command, ResolverArgs};

#[derive(Debug, Serialize)]
struct Resolved<'a> {
    expression: &'a str,
    instant: String,
    epoch_millis: i64,
    zone: String,
}

#[derive(Debug, Serialize)]
struct Analysis<'a> {
    pattern: &'a str,
    lowest: SymbolInfo,
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Serialize)]
struct SymbolInfo {
    letter: char,
    symbol: FieldSymbol,
    field: CalendarField,
    unit: Unit,
}

impl From<FieldSymbol> for SymbolInfo {
    fn from(symbol: FieldSymbol) -> Self {
        Self {
            letter: symbol.letter(),
            symbol,
            field: symbol.field(),
            unit: symbol.field().base_unit(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let mut out = io::stdout().lock();
    match &cli.command {
        Command::Resolve {
            expressions,
            resolver,
        } => resolve(&mut out, cli.json, expressions, resolver),
        Command::Analyze { pattern } => analyze(&mut out, cli.json, pattern),
        Command::Patterns {
            pattern,
            start,
            end,
            resolver,
        } => patterns(&mut out, cli.json, pattern, start, end, resolver),
    }
}

fn resolve(
    out: &mut impl Write,
    json: bool,
    expressions: &[String],
    resolver: &ResolverArgs,
) -> Result<()> {
    let parser = DateMathParser::new(resolver.config())
        .with_context(|| format!("invalid anchor pattern '{}'", resolver.format))?;

    for expression in expressions {
        let instant = parser
            .resolve(expression)
            .with_context(|| format!("failed to resolve '{expression}'"))?;
        if json {
            let resolved = Resolved {
                expression,
                instant: render(&instant),
                epoch_millis: instant.timestamp_millis(),
                zone: instant.timezone().name().to_string(),
            };
            writeln!(out, "{}", serde_json::to_string(&resolved)?)?;
        } else {
            writeln!(out, "{}", render(&instant))?;
        }
    }
    Ok(())
}

fn analyze(out: &mut impl Write, json: bool, pattern: &str) -> Result<()> {
    let compiled = compile_pattern(pattern)?;
    let lowest = compiled.lowest_field();

    if json {
        let analysis = Analysis {
            pattern,
            lowest: lowest.into(),
            symbols: compiled.symbols().iter().map(SymbolInfo::from).collect(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&analysis)?)?;
    } else {
        let letters: Vec<String> = compiled
            .symbols()
            .iter()
            .map(|s| s.letter().to_string())
            .collect();
        writeln!(out, "pattern: {pattern}")?;
        writeln!(
            out,
            "lowest:  {} ({:?}, {:?})",
            lowest.letter(),
            lowest.field(),
            lowest.field().base_unit()
        )?;
        writeln!(out, "symbols: {}", letters.join(" "))?;
    }
    Ok(())
}

fn patterns(
    out: &mut impl Write,
    json: bool,
    pattern: &str,
    start: &str,
    end: &str,
    resolver: &ResolverArgs,
) -> Result<()> {
    let compiled = compile_pattern(pattern)?;
    let parser = DateMathParser::new(resolver.config())
        .with_context(|| format!("invalid anchor pattern '{}'", resolver.format))?;
    let start = instant(&parser, start).context("invalid --start")?;
    let end = instant(&parser, end).context("invalid --end")?;
    tracing::debug!(%start, %end, "expanding pattern");

    let values = compiled.intervals(&start, &end);
    if json {
        let values: Vec<String> = values.collect();
        writeln!(out, "{}", serde_json::to_string(&values)?)?;
    } else {
        for value in values {
            writeln!(out, "{value}")?;
        }
    }
    Ok(())
}

/// RFC 3339 text first, date math otherwise.
fn instant(parser: &DateMathParser, text: &str) -> Result<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&parser.config().zone));
    }
    Ok(parser.resolve(text)?)
}

fn render(instant: &DateTime<Tz>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
