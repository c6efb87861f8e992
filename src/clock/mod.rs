// src/clock/mod.rs
pub mod abbrev;
pub mod converter;
pub mod formatter;
pub mod live;
pub mod sync;
#[cfg(test)]
pub(crate) mod testing;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use abbrev::zone_abbreviation;
pub use converter::WallClockConverter;
pub use formatter::{FieldSet, NameStyle, TzFormatter, ZoneFormatter};
pub use sync::{Anchor, Side, SyncEvent, SyncState};

/// Input/output format of a wall-clock field (`datetime-local` style).
pub const WALL_CLOCK_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Unknown timezone identifier '{0}'")]
    UnknownZone(String),

    #[error("Invalid wall-clock fields: {0}")]
    InvalidWallClock(String),

    #[error("Failed to parse wall clock '{input}', expected YYYY-MM-DDTHH:MM")]
    Unparsable { input: String },
}

/// IANA timezone identifier (e.g. "Asia/Kolkata").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Absolute point in time, milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl Instant {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub fn shifted(self, delta_ms: i64) -> Self {
        Self(self.0.saturating_add(delta_ms))
    }

    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// Calendar reading with no zone attached, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallClock(NaiveDateTime);

impl WallClock {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self, ClockError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .map(Self)
            .ok_or_else(|| {
                ClockError::InvalidWallClock(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"
                ))
            })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// The fields read as if they were UTC, in epoch milliseconds.
    pub fn naive_millis(&self) -> i64 {
        self.0.and_utc().timestamp_millis()
    }

    /// Top of the following hour.
    pub fn next_whole_hour(&self) -> Self {
        let truncated = self.0.with_minute(0).unwrap_or(self.0);
        Self(truncated + Duration::hours(1))
    }
}

impl FromStr for WallClock {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), WALL_CLOCK_FORMAT)
            .map(|dt| Self(dt.with_second(0).unwrap_or(dt)))
            .map_err(|_| ClockError::Unparsable {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WALL_CLOCK_FORMAT))
    }
}

/// Fields a clock in some zone displays for an instant, as the formatter
/// reports them. `hour` may be 24 at midnight on some platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarFields {
    /// Hour 24 becomes hour 0 of the same calendar day.
    pub fn normalized(self) -> Self {
        if self.hour == 24 {
            Self { hour: 0, ..self }
        } else {
            self
        }
    }

    pub fn to_naive(self) -> Result<NaiveDateTime, ClockError> {
        let f = self.normalized();
        NaiveDate::from_ymd_opt(f.year, f.month, f.day)
            .and_then(|d| d.and_hms_opt(f.hour, f.minute, f.second))
            .ok_or_else(|| ClockError::InvalidWallClock(format!("{f:?}")))
    }

    pub fn naive_millis(self) -> Result<i64, ClockError> {
        Ok(self.to_naive()?.and_utc().timestamp_millis())
    }

    pub fn wall_clock(self) -> Result<WallClock, ClockError> {
        let f = self.normalized();
        WallClock::new(f.year, f.month, f.day, f.hour, f.minute)
    }
}
