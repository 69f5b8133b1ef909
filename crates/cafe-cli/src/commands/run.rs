//! Run command: replay a day file and print the transcript and closing stats.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use cafe_core::{DayOutcome, format_minutes, run_day};

use crate::Config;
use crate::dayfile;

/// Replays `file` and writes either the transcript or the JSON report to
/// `writer`.
pub fn run<W: std::io::Write>(
    writer: &mut W,
    config: &Config,
    file: &Path,
    json: bool,
) -> Result<()> {
    let path = config.resolve_day_file(file);
    let input = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read day file {}", path.display()))?;

    let day = dayfile::parse(&input)?;
    tracing::debug!(events = day.events.len(), "parsed day file");

    let outcome = run_day(day.config, &day.events)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&outcome.report)?)?;
    } else {
        write!(writer, "{}", render_transcript(&outcome))?;
    }
    Ok(())
}

/// Renders the day: opening time, every event line, closing time, then one
/// `<table> <revenue> <HH:MM>` line per table.
fn render_transcript(outcome: &DayOutcome) -> String {
    let mut output = String::new();

    writeln!(output, "{}", outcome.report.opening).unwrap();
    for event in &outcome.transcript {
        writeln!(output, "{event}").unwrap();
    }
    writeln!(output, "{}", outcome.report.closing).unwrap();
    for table in &outcome.report.tables {
        writeln!(
            output,
            "{} {} {}",
            table.table,
            table.revenue,
            format_minutes(table.minutes_used)
        )
        .unwrap();
    }

    output
}

#[cfg(test)]
mod tests {
    use cafe_core::{CafeConfig, ClientName, Direction, Event, TableId, TimePoint};
    use insta::assert_snapshot;

    use super::*;

    fn name(s: &str) -> ClientName {
        ClientName::new(s).unwrap()
    }

    fn at(s: &str) -> TimePoint {
        s.parse().unwrap()
    }

    #[test]
    fn transcript_wraps_events_in_opening_and_closing_stats() {
        let config = CafeConfig::new(at("09:00"), at("19:00"), 2, 10).unwrap();
        let table = TableId::new(1).unwrap();
        let events = vec![
            Event::arrived(at("09:41"), name("client1")),
            Event::sat(at("09:54"), name("client1"), table, Direction::Incoming),
            Event::left(at("12:33"), name("client1"), Direction::Incoming),
        ];

        let outcome = run_day(config, &events).unwrap();
        assert_snapshot!(render_transcript(&outcome), @r"
        09:00
        09:41 1 client1
        09:54 2 client1 1
        12:33 4 client1
        19:00
        1 30 02:39
        2 0 00:00
        ");
    }

    #[test]
    fn run_reports_the_malformed_line() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("day.txt");
        std::fs::write(&path, "2\n09:00 19:00\n10\n99:99 1 client1\n").unwrap();

        let mut output = Vec::new();
        let err = run(&mut output, &Config::default(), &path, false).unwrap_err();
        assert_eq!(err.to_string(), "99:99 1 client1");
    }

    #[test]
    fn run_emits_json_report() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("day.txt");
        std::fs::write(
            &path,
            "2\n09:00 19:00\n10\n09:41 1 client1\n09:54 2 client1 1\n12:33 4 client1\n",
        )
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &Config::default(), &path, true).unwrap();

        let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(report["opening"], "09:00");
        assert_eq!(report["total_revenue"], 30);
        assert_eq!(report["tables"][0]["minutes_used"], 159);
    }
}
