//! Wall-clock time-of-day and the date+time ordering used by the store.
//!
//! Times are plain `HH:MM` values with no timezone attached. Every event is
//! assumed to live in the same implicit local timezone.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Minutes in a day; `TimeOfDay` values are always below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A 24-hour wall-clock time with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Build from hours (0-23) and minutes (0-59).
    pub fn new(hours: u8, minutes: u8) -> Result<Self, ValidationError> {
        if hours > 23 || minutes > 59 {
            return Err(ValidationError::InvalidTime(format!("{hours:02}:{minutes:02}")));
        }
        Ok(Self {
            minutes: u16::from(hours) * 60 + u16::from(minutes),
        })
    }

    /// Build from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, ValidationError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ValidationError::InvalidTime(format!("{minutes} minutes")));
        }
        Ok(Self { minutes })
    }

    pub fn hours(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minutes(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// `hours * 60 + minutes`.
    pub fn minutes_since_midnight(&self) -> u16 {
        self.minutes
    }

    /// Add a duration, saturating at 23:59.
    pub fn saturating_add_minutes(&self, delta: u16) -> Self {
        Self {
            minutes: self.minutes.saturating_add(delta).min(MINUTES_PER_DAY - 1),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Accepts `H:MM` and `HH:MM`. A trailing `:SS` is tolerated and ignored,
    /// since time inputs sometimes carry seconds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime(s.to_string());
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        let mut parts = s.trim().split(':');
        let hours = parts.next().ok_or_else(invalid)?;
        let minutes = parts.next().ok_or_else(invalid)?;
        if let Some(seconds) = parts.next() {
            if seconds.len() != 2
                || !digits(seconds)
                || seconds.parse::<u8>().map_or(true, |secs| secs > 59)
            {
                return Err(invalid());
            }
        }
        if parts.next().is_some()
            || hours.is_empty()
            || hours.len() > 2
            || minutes.len() != 2
            || !digits(hours)
            || !digits(minutes)
        {
            return Err(invalid());
        }
        let hours: u8 = hours.parse().map_err(|_| invalid())?;
        let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
        Self::new(hours, minutes).map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Compare two date+time points: date first, then minutes since midnight.
pub fn compare_date_time(
    a_date: NaiveDate,
    a_time: TimeOfDay,
    b_date: NaiveDate,
    b_time: TimeOfDay,
) -> Ordering {
    a_date
        .cmp(&b_date)
        .then_with(|| a_time.minutes_since_midnight().cmp(&b_time.minutes_since_midnight()))
}

/// Half-open interval overlap: `[a_start, a_end)` against `[b_start, b_end)`.
///
/// Back-to-back intervals never overlap.
pub fn intervals_overlap(
    a_start: TimeOfDay,
    a_end: TimeOfDay,
    b_start: TimeOfDay,
    b_end: TimeOfDay,
) -> bool {
    a_start < b_end && a_end > b_start
}
