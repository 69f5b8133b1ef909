//! Core domain logic for the cybercafe day simulator.
//!
//! This crate contains the fundamental types and logic for:
//! - Event model: the day's event kinds and their output lines
//! - Cafe state: clients, table assignments, waiting queue, accounting
//! - Interpretation: the transition rules and synthesized follow-up events
//! - Replay: folding one day's ordered event list into a closing report

mod interpret;
pub mod event;
pub mod replay;
pub mod report;
pub mod state;
pub mod types;

pub use event::{Direction, Event, EventKind, Rejection};
pub use interpret::{close_day, interpret, open_day};
pub use replay::{DayOutcome, ReplayError, run_day, validate_order};
pub use report::{DayReport, TableReport, format_minutes};
pub use state::{CafeConfig, CafeState, StateError};
pub use types::{ClientName, TableId, TimePoint, ValidationError};
