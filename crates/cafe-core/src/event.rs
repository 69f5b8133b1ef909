//! Events of the simulated day.
//!
//! Events are immutable value objects: created once (by the input
//! collaborator or by the interpreter itself) and never mutated. Each knows
//! its numeric wire code and renders its own output line via [`fmt::Display`].

use std::fmt;

use serde::Serialize;

use crate::types::{ClientName, TableId, TimePoint};

/// Whether an event came from the day's input or was synthesized while
/// handling another event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// Business-rule violations reported as regular output events.
///
/// These are not failures: the triggering event leaves the state unchanged
/// and the run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejection {
    /// Arrival outside opening hours.
    NotOpenYet,
    /// Arrival of a client who is already inside.
    YouShallNotPass,
    /// Attempt to sit at an occupied table.
    PlaceIsBusy,
    /// The named client never arrived.
    ClientUnknown,
    /// Waiting requested while a table is still free.
    ICanWaitNoLonger,
    /// Waiting requested by a client who is already seated.
    YouAlreadyAtTable,
}

impl Rejection {
    /// The exact message rendered on the output line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotOpenYet => "NotOpenYet",
            Self::YouShallNotPass => "YouShallNotPass",
            Self::PlaceIsBusy => "PlaceIsBusy",
            Self::ClientUnknown => "ClientUnknown",
            Self::ICanWaitNoLonger => "ICanWaitNoLonger!",
            Self::YouAlreadyAtTable => "YouAlreadyAtTable!",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened, with the kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A client entered the cafe.
    Arrived { client: ClientName },
    /// A client took a table.
    Sat { client: ClientName, table: TableId },
    /// A client asked to wait for a table.
    Waiting { client: ClientName },
    /// A client left the cafe.
    Left { client: ClientName },
    /// A business rule turned the triggering event down.
    Rejected { reason: Rejection },
}

/// One event of the day: a time, a direction and a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    time: TimePoint,
    direction: Direction,
    kind: EventKind,
}

impl Event {
    /// A client arrival. Always external input.
    #[must_use]
    pub fn arrived(time: TimePoint, client: ClientName) -> Self {
        Self {
            time,
            direction: Direction::Incoming,
            kind: EventKind::Arrived { client },
        }
    }

    /// A client taking a table, either requested (incoming) or performed by
    /// the system when promoting a waiting client (outgoing).
    #[must_use]
    pub fn sat(
        time: TimePoint,
        client: ClientName,
        table: TableId,
        direction: Direction,
    ) -> Self {
        Self {
            time,
            direction,
            kind: EventKind::Sat { client, table },
        }
    }

    /// A request to wait for a table. Always external input.
    #[must_use]
    pub fn waiting(time: TimePoint, client: ClientName) -> Self {
        Self {
            time,
            direction: Direction::Incoming,
            kind: EventKind::Waiting { client },
        }
    }

    /// A departure, either voluntary (incoming) or forced by the system
    /// (outgoing): queue overflow or end-of-day closure.
    #[must_use]
    pub fn left(time: TimePoint, client: ClientName, direction: Direction) -> Self {
        Self {
            time,
            direction,
            kind: EventKind::Left { client },
        }
    }

    /// A rejection notice. Always synthesized.
    #[must_use]
    pub fn rejected(time: TimePoint, reason: Rejection) -> Self {
        Self {
            time,
            direction: Direction::Outgoing,
            kind: EventKind::Rejected { reason },
        }
    }

    /// When the event happened.
    #[must_use]
    pub const fn time(&self) -> TimePoint {
        self.time
    }

    /// External input or synthesized.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// The kind-specific payload.
    #[must_use]
    pub const fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Numeric kind code, preserved for output formatting: 1 arrived,
    /// 2/12 sat (incoming/outgoing), 3 waiting, 4/11 left
    /// (incoming/outgoing), 13 rejected.
    #[must_use]
    pub fn code(&self) -> u8 {
        match (&self.kind, self.direction) {
            (EventKind::Arrived { .. }, _) => 1,
            (EventKind::Sat { .. }, Direction::Incoming) => 2,
            (EventKind::Sat { .. }, Direction::Outgoing) => 12,
            (EventKind::Waiting { .. }, _) => 3,
            (EventKind::Left { .. }, Direction::Incoming) => 4,
            (EventKind::Left { .. }, Direction::Outgoing) => 11,
            (EventKind::Rejected { .. }, _) => 13,
        }
    }
}

impl fmt::Display for Event {
    /// Renders the full output line: `HH:MM <code> <body>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.time, self.code())?;
        match &self.kind {
            EventKind::Arrived { client }
            | EventKind::Waiting { client }
            | EventKind::Left { client } => write!(f, "{client}"),
            EventKind::Sat { client, table } => write!(f, "{client} {table}"),
            EventKind::Rejected { reason } => write!(f, "{reason}"),
        }
    }
}
