//! Reminder timing relative to a task's due date.
//!
//! Stored as a nullable integer column: `NULL` means no reminder, `0` means
//! "at the due time", anything else is a signed offset in seconds (negative
//! values fire before the due date).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// When to remind the user about a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "seconds", rename_all = "snake_case")]
pub enum Reminder {
    /// No reminder.
    #[default]
    Off,
    /// Fire exactly at the due date.
    AtDueTime,
    /// Fire `seconds` relative to the due date. Never zero when built through
    /// [`Reminder::from_offset_secs`].
    Offset(i64),
}

impl Reminder {
    pub const FIVE_MINUTES_BEFORE: Self = Self::Offset(-5 * MINUTE);
    pub const THIRTY_MINUTES_BEFORE: Self = Self::Offset(-30 * MINUTE);
    pub const ONE_HOUR_BEFORE: Self = Self::Offset(-HOUR);
    pub const ONE_DAY_BEFORE: Self = Self::Offset(-DAY);

    /// Choices offered to users when editing a task.
    pub const PRESETS: [Self; 6] = [
        Self::Off,
        Self::AtDueTime,
        Self::FIVE_MINUTES_BEFORE,
        Self::THIRTY_MINUTES_BEFORE,
        Self::ONE_HOUR_BEFORE,
        Self::ONE_DAY_BEFORE,
    ];

    /// Build a reminder from a signed offset; zero means "at due time".
    #[must_use]
    pub const fn from_offset_secs(secs: i64) -> Self {
        if secs == 0 {
            Self::AtDueTime
        } else {
            Self::Offset(secs)
        }
    }

    /// Decode the nullable storage column.
    #[must_use]
    pub const fn from_column(value: Option<i64>) -> Self {
        match value {
            Some(secs) => Self::from_offset_secs(secs),
            None => Self::Off,
        }
    }

    /// Encode for the nullable storage column.
    #[must_use]
    pub const fn to_column(self) -> Option<i64> {
        self.offset_secs()
    }

    /// Signed offset from the due date, `None` when switched off.
    #[must_use]
    pub const fn offset_secs(self) -> Option<i64> {
        match self {
            Self::Off => None,
            Self::AtDueTime => Some(0),
            Self::Offset(secs) => Some(secs),
        }
    }

    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Point in time the reminder should fire for a task due at `due`.
    ///
    /// `None` when switched off or when the result falls outside the
    /// representable date range.
    #[must_use]
    pub fn fire_at(self, due: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let secs = self.offset_secs()?;
        TimeDelta::try_seconds(secs).and_then(|delta| due.checked_add_signed(delta))
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Off => f.write_str("off"),
            Self::AtDueTime => f.write_str("at due time"),
            Self::Offset(secs) => {
                let direction = if secs < 0 { "before" } else { "after" };
                let abs = secs.unsigned_abs();
                let (amount, unit) = if abs % DAY.unsigned_abs() == 0 {
                    (abs / DAY.unsigned_abs(), "d")
                } else if abs % HOUR.unsigned_abs() == 0 {
                    (abs / HOUR.unsigned_abs(), "h")
                } else if abs % MINUTE.unsigned_abs() == 0 {
                    (abs / MINUTE.unsigned_abs(), "m")
                } else {
                    (abs, "s")
                };
                write!(f, "{amount}{unit} {direction}")
            }
        }
    }
}

/// Parses `off`, `due`, or a duration such as `30m`, `-1h`, `+15m`, `1d`.
///
/// An unsigned duration means "before the due date".
impl FromStr for Reminder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        match raw.as_str() {
            "off" | "none" => return Ok(Self::Off),
            "due" | "at-due" => return Ok(Self::AtDueTime),
            _ => {}
        }

        let invalid = || CoreError::Validation(format!("invalid reminder '{s}'"));
        let (sign, rest) = match raw.strip_prefix('+') {
            Some(rest) => (1, rest),
            None => (-1, raw.strip_prefix('-').unwrap_or(&raw)),
        };
        let split = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (digits, unit) = rest.split_at(split);
        let amount: i64 = digits.parse().map_err(|_| invalid())?;
        let scale = match unit {
            "s" => 1,
            "" | "m" => MINUTE,
            "h" => HOUR,
            "d" => DAY,
            _ => return Err(invalid()),
        };
        let secs = amount.checked_mul(scale).ok_or_else(invalid)?;
        TimeDelta::try_seconds(secs).ok_or_else(invalid)?;
        Ok(Self::from_offset_secs(sign * secs))
    }
}
