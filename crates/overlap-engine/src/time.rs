//! Day-local wall-clock times and half-open time spans.
//!
//! Availability times carry no timezone and no date; they are reduced to whole
//! minutes since midnight so that breakpoints compare as plain integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{OverlapError, Result};

/// A wall-clock time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Build a time from hour and minute. Returns `None` outside `00:00..=23:59`.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Parse `HH:MM` or `HH:MM:SS`.
    ///
    /// The hour may be a single digit (`9:30`); minutes and seconds must be two
    /// digits. Seconds are accepted only when they are `00`, since a `TIME`
    /// column read back from storage carries them even though the form that
    /// produced it only had minute resolution.
    ///
    /// # Errors
    /// Returns `OverlapError::InvalidTime` for anything else.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || OverlapError::InvalidTime(s.to_string());
        let mut parts = s.trim().split(':');

        let hour = parts.next().ok_or_else(invalid)?;
        let minute = parts.next().ok_or_else(invalid)?;
        if let Some(second) = parts.next() {
            if second != "00" {
                return Err(invalid());
            }
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u16 = hour.parse().map_err(|_| invalid())?;
        let minute: u16 = minute.parse().map_err(|_| invalid())?;
        TimeOfDay::from_hm(hour, minute).ok_or_else(invalid)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// 12-hour display form, e.g. `9:30 AM`, `12:00 PM`, `12:05 AM`.
    pub fn to_12h_string(self) -> String {
        let hour = self.hour();
        let display_hour = match hour {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        let suffix = if hour >= 12 { "PM" } else { "AM" };
        format!("{}:{:02} {}", display_hour, self.minute(), suffix)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self> {
        TimeOfDay::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A half-open `[start, end)` range within one day. Always non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeSpan {
    /// # Errors
    /// Returns `OverlapError::EmptyRange` unless `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start < end {
            Ok(TimeSpan { start, end })
        } else {
            Err(OverlapError::EmptyRange {
                start: start.to_string(),
                end: end.to_string(),
            })
        }
    }

    /// Parse both ends and check ordering.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        TimeSpan::new(TimeOfDay::parse(start)?, TimeOfDay::parse(end)?)
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        u32::from(self.end.minutes() - self.start.minutes())
    }

    /// True if `other` lies entirely within this span.
    pub fn contains(&self, other: &TimeSpan) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// True if the spans share at least one minute. Touching spans do not overlap.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
