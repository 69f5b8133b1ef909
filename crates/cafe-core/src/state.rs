//! The mutable aggregate for one simulated day.
//!
//! [`CafeState`] stores who is inside, who sits where and since when, who is
//! waiting, and the per-table accounting. It answers queries about the
//! aggregate; every transition lives in [`crate::interpret`].

use std::collections::{HashMap, HashSet, VecDeque};

use thiserror::Error;

use crate::types::{ClientName, TableId, TimePoint, ValidationError};

/// Fixed parameters of one business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CafeConfig {
    opening: TimePoint,
    closing: TimePoint,
    tables: u32,
    hourly_rate: i64,
}

impl CafeConfig {
    /// Creates a day configuration, rejecting a table count or hourly rate
    /// below 1.
    pub fn new(
        opening: TimePoint,
        closing: TimePoint,
        tables: u32,
        hourly_rate: i64,
    ) -> Result<Self, ValidationError> {
        if tables < 1 {
            return Err(ValidationError::InvalidTableCount { count: tables });
        }
        if hourly_rate < 1 {
            return Err(ValidationError::InvalidHourlyRate { rate: hourly_rate });
        }
        Ok(Self {
            opening,
            closing,
            tables,
            hourly_rate,
        })
    }

    /// When the cafe opens.
    #[must_use]
    pub const fn opening(self) -> TimePoint {
        self.opening
    }

    /// When the cafe closes.
    #[must_use]
    pub const fn closing(self) -> TimePoint {
        self.closing
    }

    /// Number of tables, numbered `1..=tables`.
    #[must_use]
    pub const fn tables(self) -> u32 {
        self.tables
    }

    /// Price of one started hour at a table.
    #[must_use]
    pub const fn hourly_rate(self) -> i64 {
        self.hourly_rate
    }
}

/// Failures of the aggregate itself, fatal for the whole run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A table number outside `1..=tables` reached the state machine.
    #[error("table {id} is out of range 1..={tables}")]
    InvalidTable { id: u32, tables: u32 },
}

/// The single mutable aggregate of the simulation.
#[derive(Debug)]
pub struct CafeState {
    pub(crate) config: CafeConfig,
    /// Clients currently inside, seated or not.
    pub(crate) present: HashSet<ClientName>,
    /// Client to table, for clients currently seated.
    pub(crate) seated: HashMap<ClientName, TableId>,
    /// Start of each table's current occupancy; kept in lockstep with
    /// `seated`.
    pub(crate) occupied_since: HashMap<TableId, TimePoint>,
    /// Clients waiting for a table, FIFO.
    pub(crate) queue: VecDeque<ClientName>,
    /// Accumulated occupancy minutes per table for the day.
    pub(crate) minutes_used: HashMap<TableId, i64>,
    /// Accumulated revenue per table for the day.
    pub(crate) revenue: HashMap<TableId, i64>,
    /// Running sum across all tables.
    pub(crate) total_revenue: i64,
}

impl CafeState {
    /// Creates the empty aggregate for one day.
    #[must_use]
    pub fn new(config: CafeConfig) -> Self {
        Self {
            config,
            present: HashSet::new(),
            seated: HashMap::new(),
            occupied_since: HashMap::new(),
            queue: VecDeque::new(),
            minutes_used: HashMap::new(),
            revenue: HashMap::new(),
            total_revenue: 0,
        }
    }

    /// The day's fixed parameters.
    #[must_use]
    pub const fn config(&self) -> CafeConfig {
        self.config
    }

    /// True iff `time` falls within opening hours (`opening <= time < closing`).
    #[must_use]
    pub fn is_open(&self, time: TimePoint) -> bool {
        self.config.opening <= time && time < self.config.closing
    }

    /// True iff at least one table is unoccupied.
    #[must_use]
    pub fn has_free_table(&self) -> bool {
        self.seated.len() < self.table_capacity()
    }

    /// Whether `table` is unoccupied; fails if the number is outside
    /// `1..=tables`.
    pub fn is_table_free(&self, table: TableId) -> Result<bool, StateError> {
        if table.get() > self.config.tables {
            return Err(StateError::InvalidTable {
                id: table.get(),
                tables: self.config.tables,
            });
        }
        Ok(!self.seated.values().any(|occupied| *occupied == table))
    }

    /// Whether `client` is inside the cafe (seated or not).
    #[must_use]
    pub fn is_present(&self, client: &ClientName) -> bool {
        self.present.contains(client)
    }

    /// The table `client` currently occupies, if any.
    #[must_use]
    pub fn table_of(&self, client: &ClientName) -> Option<TableId> {
        self.seated.get(client).copied()
    }

    /// Start of `table`'s current occupancy, if occupied.
    #[must_use]
    pub fn occupied_since(&self, table: TableId) -> Option<TimePoint> {
        self.occupied_since.get(&table).copied()
    }

    /// Whether `client` is in the waiting queue.
    #[must_use]
    pub fn is_waiting(&self, client: &ClientName) -> bool {
        self.queue.contains(client)
    }

    /// Number of clients waiting for a table.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Accumulated revenue of `table` for the day.
    #[must_use]
    pub fn revenue_for(&self, table: TableId) -> i64 {
        self.revenue.get(&table).copied().unwrap_or(0)
    }

    /// Accumulated occupancy minutes of `table` for the day.
    #[must_use]
    pub fn minutes_for(&self, table: TableId) -> i64 {
        self.minutes_used.get(&table).copied().unwrap_or(0)
    }

    /// Running revenue sum across all tables.
    #[must_use]
    pub const fn total_revenue(&self) -> i64 {
        self.total_revenue
    }

    /// The table count as a collection capacity.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn table_capacity(&self) -> usize {
        self.config.tables as usize
    }
}
