//! The event-interpretation state machine.
//!
//! [`interpret`] applies one event to the aggregate and returns the events it
//! synthesized in response (rejections, forced departures, queue promotions),
//! in emission order. Synthesized events are applied in-process; synthesis
//! never cascades past one reseat or ejection per trigger.

use tracing::debug;

use crate::event::{Direction, Event, EventKind, Rejection};
use crate::report::{DayReport, TableReport};
use crate::state::{CafeState, StateError};
use crate::types::{ClientName, TableId, TimePoint};

/// Whole started hours for a stay of `minutes`: any fraction bills a full
/// hour, so a single-minute stay costs one hour.
pub(crate) const fn ceil_hours(minutes: i64) -> i64 {
    (minutes + 59) / 60
}

/// Applies `event` to `state`, returning synthesized output events in
/// emission order.
///
/// Business-rule violations come back as [`EventKind::Rejected`] events, not
/// errors; only a table number outside the cafe fails the run.
pub fn interpret(state: &mut CafeState, event: &Event) -> Result<Vec<Event>, StateError> {
    match event.kind() {
        EventKind::Arrived { client } => Ok(handle_arrival(state, event.time(), client)),
        EventKind::Sat { client, table } => {
            handle_sitting(state, event.time(), client, *table, event.direction())
        }
        EventKind::Waiting { client } => handle_waiting(state, event.time(), client),
        EventKind::Left { client } => handle_departure(state, event.time(), client, event.direction()),
        EventKind::Rejected { .. } => Ok(Vec::new()),
    }
}

fn handle_arrival(state: &mut CafeState, time: TimePoint, client: &ClientName) -> Vec<Event> {
    if state.present.contains(client) {
        return vec![Event::rejected(time, Rejection::YouShallNotPass)];
    }
    if !state.is_open(time) {
        return vec![Event::rejected(time, Rejection::NotOpenYet)];
    }
    state.present.insert(client.clone());
    Vec::new()
}

fn handle_sitting(
    state: &mut CafeState,
    time: TimePoint,
    client: &ClientName,
    table: TableId,
    direction: Direction,
) -> Result<Vec<Event>, StateError> {
    if direction == Direction::Incoming {
        if !state.is_table_free(table)? {
            return Ok(vec![Event::rejected(time, Rejection::PlaceIsBusy)]);
        }
        if !state.present.contains(client) {
            return Ok(vec![Event::rejected(time, Rejection::ClientUnknown)]);
        }
        if state.seated.contains_key(client) {
            settle_departure(state, client, time);
            state.present.insert(client.clone());
        }
        state.queue.retain(|waiting| waiting != client);
    }

    // Assignment and occupancy start are one atomic step.
    state.seated.insert(client.clone(), table);
    state.occupied_since.insert(table, time);
    Ok(Vec::new())
}

fn handle_waiting(
    state: &mut CafeState,
    time: TimePoint,
    client: &ClientName,
) -> Result<Vec<Event>, StateError> {
    if state.has_free_table() {
        return Ok(vec![Event::rejected(time, Rejection::ICanWaitNoLonger)]);
    }
    if state.seated.contains_key(client) {
        return Ok(vec![Event::rejected(time, Rejection::YouAlreadyAtTable)]);
    }
    if state.queue.len() >= state.table_capacity() {
        debug!(client = %client, "queue full, ejecting client");
        let ejected = Event::left(time, client.clone(), Direction::Outgoing);
        let mut outputs = vec![ejected.clone()];
        outputs.extend(interpret(state, &ejected)?);
        return Ok(outputs);
    }
    if !state.present.contains(client) {
        return Ok(vec![Event::rejected(time, Rejection::ClientUnknown)]);
    }
    state.queue.push_back(client.clone());
    Ok(Vec::new())
}

fn handle_departure(
    state: &mut CafeState,
    time: TimePoint,
    client: &ClientName,
    direction: Direction,
) -> Result<Vec<Event>, StateError> {
    match direction {
        Direction::Incoming => {
            if !state.present.contains(client) {
                return Ok(vec![Event::rejected(time, Rejection::ClientUnknown)]);
            }
            let Some(&table) = state.seated.get(client) else {
                state.present.remove(client);
                state.queue.retain(|waiting| waiting != client);
                return Ok(Vec::new());
            };
            settle_departure(state, client, time);

            let Some(next) = state.queue.pop_front() else {
                return Ok(Vec::new());
            };
            debug!(client = %next, table = %table, "promoting waiting client");
            let seat_next = Event::sat(time, next, table, Direction::Outgoing);
            let mut outputs = vec![seat_next.clone()];
            outputs.extend(interpret(state, &seat_next)?);
            Ok(outputs)
        }
        // Forced departures never promote the queue.
        Direction::Outgoing => {
            if state.seated.contains_key(client) {
                settle_departure(state, client, time);
            } else {
                state.present.remove(client);
                state.queue.retain(|waiting| waiting != client);
            }
            Ok(Vec::new())
        }
    }
}

/// Closes out a seated client's stay: bills started hours, accumulates the
/// table's daily minutes and revenue, and removes the client from the
/// aggregate.
fn settle_departure(state: &mut CafeState, client: &ClientName, time: TimePoint) {
    let Some(table) = state.seated.remove(client) else {
        return;
    };
    let opened = state.occupied_since.remove(&table).unwrap_or(time);
    let minutes = time.minutes_since(opened);
    let billed = ceil_hours(minutes) * state.config.hourly_rate();

    *state.minutes_used.entry(table).or_insert(0) += minutes;
    *state.revenue.entry(table).or_insert(0) += billed;
    state.total_revenue += billed;

    state.present.remove(client);
    debug!(client = %client, table = %table, minutes, billed, "settled departure");
}

/// Opens the day: zeroes each table's accumulators.
pub fn open_day(state: &mut CafeState) {
    for id in 1..=state.config().tables() {
        let table = TableId::new_unchecked(id);
        state.minutes_used.insert(table, 0);
        state.revenue.insert(table, 0);
    }
}

/// Closes the day: forces every remaining client out in the departure name
/// order, then reports per-table takings (tables ascending) and clears the
/// daily accounting.
///
/// Closing an already-emptied state changes nothing further.
pub fn close_day(state: &mut CafeState) -> Result<(Vec<Event>, DayReport), StateError> {
    let mut remaining: Vec<ClientName> = state.present.iter().cloned().collect();
    remaining.sort_unstable();

    let closing = state.config().closing();
    let mut outputs = Vec::with_capacity(remaining.len());
    for client in remaining {
        let eject = Event::left(closing, client, Direction::Outgoing);
        outputs.push(eject.clone());
        outputs.extend(interpret(state, &eject)?);
    }

    let tables = (1..=state.config().tables())
        .map(|id| {
            let table = TableId::new_unchecked(id);
            TableReport {
                table,
                revenue: state.revenue_for(table),
                minutes_used: state.minutes_for(table),
            }
        })
        .collect();
    let report = DayReport {
        opening: state.config().opening(),
        closing,
        tables,
        total_revenue: state.total_revenue(),
    };

    state.minutes_used.clear();
    state.revenue.clear();
    state.occupied_since.clear();

    Ok((outputs, report))
}
