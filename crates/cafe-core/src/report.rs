//! End-of-day accounting report.

use serde::Serialize;

use crate::types::{TableId, TimePoint};

/// One table's accumulated takings for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableReport {
    /// The table number.
    pub table: TableId,
    /// Revenue billed at this table, in currency units.
    pub revenue: i64,
    /// Minutes the table was occupied.
    pub minutes_used: i64,
}

/// Per-table takings plus the running total, tables ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub opening: TimePoint,
    pub closing: TimePoint,
    pub tables: Vec<TableReport>,
    pub total_revenue: i64,
}

/// Formats accumulated minutes as zero-padded `HH:MM`.
#[must_use]
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
