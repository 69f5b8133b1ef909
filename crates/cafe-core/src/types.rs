//! Core type definitions with validation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The client name was empty or contained a character outside `[a-z0-9_-]`.
    #[error("invalid client name: {name:?}")]
    InvalidClientName { name: String },

    /// The time was not a valid `HH:MM` within a single day.
    #[error("invalid time (expected HH:MM): {text:?}")]
    InvalidTime { text: String },

    /// Table numbers start at 1.
    #[error("invalid table number: {id}")]
    InvalidTable { id: u32 },

    /// A cafe needs at least one table.
    #[error("tables count must be at least 1, got {count}")]
    InvalidTableCount { count: u32 },

    /// The hourly rate must be a positive amount.
    #[error("hourly rate must be at least 1, got {rate}")]
    InvalidHourlyRate { rate: i64 },
}

/// A minute-granularity point in time within a single day.
///
/// Totally ordered and immutable; the day runs from `00:00` (minute 0) to
/// `23:59` (minute 1439).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimePoint(u16);

/// Minutes in one day; `TimePoint` values are strictly below this.
const MINUTES_PER_DAY: u16 = 24 * 60;

impl TimePoint {
    /// Creates a time point from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, ValidationError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ValidationError::InvalidTime {
                text: minutes.to_string(),
            });
        }
        Ok(Self(minutes))
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn total_minutes(self) -> u16 {
        self.0
    }

    /// The hour component (0-23).
    #[must_use]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    /// The minute component (0-59).
    #[must_use]
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Minutes elapsed since `earlier`. Negative if `earlier` is later.
    #[must_use]
    pub const fn minutes_since(self, earlier: Self) -> i64 {
        self.0 as i64 - earlier.0 as i64
    }
}

impl From<NaiveTime> for TimePoint {
    fn from(time: NaiveTime) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let minutes = (time.hour() * 60 + time.minute()) as u16;
        Self(minutes)
    }
}

impl FromStr for TimePoint {
    type Err = ValidationError;

    /// Parses strict `HH:MM`: exactly five characters, zero-padded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime { text: s.to_string() };

        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }

        let parsed = NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| invalid())?;
        Ok(Self::from(parsed))
    }
}

impl TryFrom<String> for TimePoint {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimePoint> for String {
    fn from(time: TimePoint) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A validated client name.
///
/// Non-empty, over the alphabet `[a-z0-9_-]`. Invalid names fail construction
/// and never reach the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientName(String);

impl ClientName {
    /// Creates a new client name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let alphabet = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-';
        if name.is_empty() || !name.bytes().all(alphabet) {
            return Err(ValidationError::InvalidClientName { name });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rank of a name character in the departure order.
const fn rank(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'z' => 10 + (byte - b'a'),
        b'_' => 36,
        _ => 37,
    }
}

impl Ord for ClientName {
    /// The order end-of-day forced departures happen in: per-character rank
    /// `digit < lowercase letter < '_' < '-'`, shorter names first on prefix
    /// ties. Not plain ASCII order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.bytes().map(rank).cmp(other.0.bytes().map(rank))
    }
}

impl PartialOrd for ClientName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for ClientName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientName> for String {
    fn from(name: ClientName) -> Self {
        name.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A 1-based table number.
///
/// Construction rejects 0; the upper bound depends on the day's table count
/// and is checked by [`crate::CafeState::is_table_free`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TableId(u32);

impl TableId {
    /// Creates a table number, rejecting 0.
    pub fn new(id: u32) -> Result<Self, ValidationError> {
        if id < 1 {
            return Err(ValidationError::InvalidTable { id });
        }
        Ok(Self(id))
    }

    /// Internal constructor for ids already known to be in range.
    pub(crate) const fn new_unchecked(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw table number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ClientName {
        ClientName::new(s).unwrap()
    }

    #[test]
    fn client_name_accepts_full_alphabet() {
        assert!(ClientName::new("abc-xyz_09").is_ok());
        assert!(ClientName::new("a").is_ok());
        assert!(ClientName::new("0").is_ok());
    }

    #[test]
    fn client_name_rejects_invalid() {
        assert!(ClientName::new("").is_err());
        assert!(ClientName::new("Client").is_err());
        assert!(ClientName::new("client one").is_err());
        assert!(ClientName::new("client@cafe").is_err());
        assert!(ClientName::new("клиент").is_err());
    }

    #[test]
    fn client_name_serde_rejects_invalid() {
        let result: Result<ClientName, _> = serde_json::from_str("\"Bad Name\"");
        assert!(result.is_err());

        let parsed: ClientName = serde_json::from_str("\"good-name\"").unwrap();
        assert_eq!(parsed.as_str(), "good-name");
    }

    #[test]
    fn client_name_order_ranks_digits_before_letters() {
        assert!(name("0zz") < name("a"));
        assert!(name("9") < name("a"));
        assert!(name("client1") < name("clienta"));
    }

    #[test]
    fn client_name_order_ranks_underscore_and_dash_last() {
        assert!(name("z") < name("_"));
        assert!(name("_") < name("-"));
        assert!(name("ab") < name("a_"));
        assert!(name("a_") < name("a-"));
    }

    #[test]
    fn client_name_order_prefers_shorter_on_prefix_tie() {
        assert!(name("a") < name("ab"));
        assert!(name("client") < name("client1"));
    }

    #[test]
    fn time_point_parses_strict_hh_mm() {
        let t: TimePoint = "09:05".parse().unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 5);

        assert_eq!("00:00".parse::<TimePoint>().unwrap().total_minutes(), 0);
        assert_eq!("23:59".parse::<TimePoint>().unwrap().total_minutes(), 1439);
    }

    #[test]
    fn time_point_rejects_malformed_text() {
        assert!("9:05".parse::<TimePoint>().is_err());
        assert!("09.05".parse::<TimePoint>().is_err());
        assert!("24:00".parse::<TimePoint>().is_err());
        assert!("12:60".parse::<TimePoint>().is_err());
        assert!("ab:cd".parse::<TimePoint>().is_err());
        assert!("09:050".parse::<TimePoint>().is_err());
    }

    #[test]
    fn time_point_display_is_zero_padded() {
        let t: TimePoint = "08:07".parse().unwrap();
        assert_eq!(t.to_string(), "08:07");
    }

    #[test]
    fn time_point_from_minutes_bounds() {
        assert!(TimePoint::from_minutes(1439).is_ok());
        assert!(TimePoint::from_minutes(1440).is_err());
    }

    #[test]
    fn time_point_minutes_since() {
        let open: TimePoint = "10:00".parse().unwrap();
        let leave: TimePoint = "12:33".parse().unwrap();
        assert_eq!(leave.minutes_since(open), 153);
        assert_eq!(open.minutes_since(leave), -153);
    }

    #[test]
    fn time_point_serde_roundtrip() {
        let t: TimePoint = "19:00".parse().unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"19:00\"");
        let parsed: TimePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, t);
    }

    #[test]
    fn table_id_rejects_zero() {
        assert!(TableId::new(0).is_err());
        assert_eq!(TableId::new(3).unwrap().get(), 3);
    }
}
