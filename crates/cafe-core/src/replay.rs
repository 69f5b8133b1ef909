//! Deterministic replay of one day's ordered event list.
//!
//! The runner holds no business rules: it checks chronological order, opens
//! the day, feeds every event to the interpreter and closes the day.

use thiserror::Error;

use crate::event::Event;
use crate::interpret::{close_day, interpret, open_day};
use crate::report::DayReport;
use crate::state::{CafeConfig, CafeState, StateError};

/// Failures that abort a whole day's replay.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The event list was not sorted by non-decreasing time; carries the
    /// first offending event.
    #[error("event out of chronological order: {event}")]
    OutOfOrder { index: usize, event: Event },

    #[error(transparent)]
    State(#[from] StateError),
}

/// Everything one replayed day produced.
#[derive(Debug)]
pub struct DayOutcome {
    /// Handled events interleaved with their synthesized outputs, in
    /// emission order. End-of-day forced departures included.
    pub transcript: Vec<Event>,
    /// Per-table takings and the day's total.
    pub report: DayReport,
}

/// Checks that `events` are sorted by non-decreasing time, reporting the
/// first violation.
pub fn validate_order(events: &[Event]) -> Result<(), ReplayError> {
    for (index, pair) in events.windows(2).enumerate() {
        if pair[1].time() < pair[0].time() {
            return Err(ReplayError::OutOfOrder {
                index: index + 1,
                event: pair[1].clone(),
            });
        }
    }
    Ok(())
}

/// Replays one day: order validation first (nothing is applied on failure),
/// then open, interpret each event in sequence, close.
pub fn run_day(config: CafeConfig, events: &[Event]) -> Result<DayOutcome, ReplayError> {
    validate_order(events)?;

    let mut state = CafeState::new(config);
    open_day(&mut state);

    let mut transcript = Vec::with_capacity(events.len());
    for event in events {
        transcript.push(event.clone());
        transcript.extend(interpret(&mut state, event)?);
    }

    let (forced_out, report) = close_day(&mut state)?;
    transcript.extend(forced_out);

    Ok(DayOutcome { transcript, report })
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::event::Direction;
    use crate::types::{ClientName, TableId, TimePoint};

    fn name(s: &str) -> ClientName {
        ClientName::new(s).unwrap()
    }

    fn at(s: &str) -> TimePoint {
        s.parse().unwrap()
    }

    fn table(id: u32) -> TableId {
        TableId::new(id).unwrap()
    }

    fn config(opening: &str, closing: &str, tables: u32, rate: i64) -> CafeConfig {
        CafeConfig::new(at(opening), at(closing), tables, rate).unwrap()
    }

    #[test]
    fn out_of_order_events_fail_before_replay() {
        let events = vec![
            Event::arrived(at("12:00"), name("alice")),
            Event::arrived(at("11:00"), name("bob")),
        ];

        let result = run_day(config("10:00", "22:00", 2, 100), &events);
        match result {
            Err(ReplayError::OutOfOrder { index, event }) => {
                assert_eq!(index, 1);
                assert_eq!(event.to_string(), "11:00 1 bob");
            }
            other => panic!("expected OutOfOrder, got {other:?}"),
        }
    }

    #[test]
    fn equal_times_are_in_order() {
        let events = vec![
            Event::arrived(at("12:00"), name("alice")),
            Event::arrived(at("12:00"), name("bob")),
        ];
        assert!(validate_order(&events).is_ok());
    }

    #[test]
    fn empty_day_reports_zeroed_tables() {
        let outcome = run_day(config("10:00", "22:00", 2, 100), &[]).unwrap();
        assert!(outcome.transcript.is_empty());
        assert_eq!(outcome.report.total_revenue, 0);
        assert_eq!(outcome.report.tables.len(), 2);
        assert!(outcome.report.tables.iter().all(|t| t.revenue == 0));
    }

    #[test]
    fn full_day_transcript_and_takings() {
        let events = vec![
            Event::arrived(at("08:48"), name("client1")),
            Event::arrived(at("09:41"), name("client1")),
            Event::arrived(at("09:48"), name("client2")),
            Event::waiting(at("09:52"), name("client1")),
            Event::sat(at("09:54"), name("client1"), table(1), Direction::Incoming),
            Event::sat(at("10:25"), name("client2"), table(2), Direction::Incoming),
            Event::arrived(at("10:58"), name("client3")),
            Event::sat(at("10:59"), name("client3"), table(3), Direction::Incoming),
            Event::arrived(at("11:30"), name("client4")),
            Event::sat(at("11:35"), name("client4"), table(2), Direction::Incoming),
            Event::waiting(at("11:45"), name("client4")),
            Event::left(at("12:33"), name("client1"), Direction::Incoming),
            Event::left(at("12:43"), name("client2"), Direction::Incoming),
            Event::left(at("15:52"), name("client4"), Direction::Incoming),
        ];

        let outcome = run_day(config("09:00", "19:00", 3, 10), &events).unwrap();

        let rendered: Vec<String> = outcome.transcript.iter().map(ToString::to_string).collect();
        assert_snapshot!(rendered.join("\n"), @r"
        08:48 1 client1
        08:48 13 NotOpenYet
        09:41 1 client1
        09:48 1 client2
        09:52 3 client1
        09:52 13 ICanWaitNoLonger!
        09:54 2 client1 1
        10:25 2 client2 2
        10:58 1 client3
        10:59 2 client3 3
        11:30 1 client4
        11:35 2 client4 2
        11:35 13 PlaceIsBusy
        11:45 3 client4
        12:33 4 client1
        12:33 12 client4 1
        12:43 4 client2
        15:52 4 client4
        19:00 11 client3
        ");

        let takings: Vec<(u32, i64, i64)> = outcome
            .report
            .tables
            .iter()
            .map(|t| (t.table.get(), t.revenue, t.minutes_used))
            .collect();
        assert_eq!(takings, vec![(1, 70, 358), (2, 30, 138), (3, 90, 481)]);
        assert_eq!(outcome.report.total_revenue, 190);
    }
}
