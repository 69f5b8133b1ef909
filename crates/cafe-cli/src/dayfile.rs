//! Day-file parsing.
//!
//! A day file starts with a three-line header (table count, `HH:MM HH:MM`
//! opening and closing times, hourly rate) followed by one event per line:
//! `HH:MM <kind> <args...>` with kinds 1 (arrived), 2 (sat, plus a table
//! number), 3 (waiting) and 4 (left). Tokens past a well-formed event are
//! ignored.

use cafe_core::{CafeConfig, ClientName, Direction, Event, TableId, TimePoint, ValidationError};
use thiserror::Error;

/// The first line of input the parser could not accept, verbatim.
///
/// Any malformed line is fatal for the whole run; the raw text is surfaced
/// so the operator can find it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{line}")]
pub struct MalformedLine {
    pub line: String,
}

/// A fully parsed day file.
#[derive(Debug)]
pub struct DayFile {
    pub config: CafeConfig,
    pub events: Vec<Event>,
}

fn malformed(line: &str) -> MalformedLine {
    MalformedLine {
        line: line.to_string(),
    }
}

/// Parses a whole day file, header then events.
pub fn parse(input: &str) -> Result<DayFile, MalformedLine> {
    let mut lines = input.lines();

    let tables_line = lines.next().ok_or_else(|| malformed(""))?;
    let tables: u32 = tables_line
        .trim()
        .parse()
        .map_err(|_| malformed(tables_line))?;

    let hours_line = lines.next().ok_or_else(|| malformed(""))?;
    let mut hours = hours_line.split_whitespace();
    let opening: TimePoint = parse_token(&mut hours).ok_or_else(|| malformed(hours_line))?;
    let closing: TimePoint = parse_token(&mut hours).ok_or_else(|| malformed(hours_line))?;

    let rate_line = lines.next().ok_or_else(|| malformed(""))?;
    let hourly_rate: i64 = rate_line.trim().parse().map_err(|_| malformed(rate_line))?;

    let config = CafeConfig::new(opening, closing, tables, hourly_rate).map_err(|err| {
        match err {
            ValidationError::InvalidTableCount { .. } => malformed(tables_line),
            _ => malformed(rate_line),
        }
    })?;

    let events = lines.map(parse_event).collect::<Result<_, _>>()?;

    Ok(DayFile { config, events })
}

/// Parses one event line.
pub fn parse_event(line: &str) -> Result<Event, MalformedLine> {
    let mut tokens = line.split_whitespace();

    let time: TimePoint = parse_token(&mut tokens).ok_or_else(|| malformed(line))?;
    let code: u8 = parse_token(&mut tokens).ok_or_else(|| malformed(line))?;

    let client = tokens
        .next()
        .and_then(|name| ClientName::new(name).ok())
        .ok_or_else(|| malformed(line))?;

    let event = match code {
        1 => Event::arrived(time, client),
        2 => {
            let table = tokens
                .next()
                .and_then(|raw| raw.parse::<u32>().ok())
                .and_then(|id| TableId::new(id).ok())
                .ok_or_else(|| malformed(line))?;
            Event::sat(time, client, table, Direction::Incoming)
        }
        3 => Event::waiting(time, client),
        4 => Event::left(time, client, Direction::Incoming),
        _ => return Err(malformed(line)),
    };
    Ok(event)
}

fn parse_token<T: std::str::FromStr>(tokens: &mut std::str::SplitWhitespace<'_>) -> Option<T> {
    tokens.next().and_then(|token| token.parse().ok())
}
