//! Category and list-filter enums.
//!
//! Categories serialize as `snake_case` strings. Deserialization is lenient:
//! anything unrecognized (or missing) becomes [`TaskCategory::Other`], which is
//! the only coercion applied when reading stored tasks or widget snapshots.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::Task;
use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// TaskCategory
// ---------------------------------------------------------------------------

/// Fixed set of task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Private,
    Work,
    Important,
    #[default]
    Other,
}

impl TaskCategory {
    pub const ALL: [Self; 4] = [Self::Private, Self::Work, Self::Important, Self::Other];

    /// Return the string representation used in SQL storage and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Work => "work",
            Self::Important => "important",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Private => "Private",
            Self::Work => "Work",
            Self::Important => "Important",
            Self::Other => "Other",
        }
    }

    /// Parse a stored value, coercing anything unrecognized to `Other`.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::Validation(format!("unknown category '{s}'")))
    }
}

impl<'de> Deserialize<'de> for TaskCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or(Self::Other, |s| Self::from_stored(&s)))
    }
}

// ---------------------------------------------------------------------------
// TaskFilter
// ---------------------------------------------------------------------------

/// List filter applied to the in-memory task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    /// Due on the same (UTC) calendar day as `now`.
    Today,
    /// Due before the start of `now`'s day.
    Past,
}

impl TaskFilter {
    #[must_use]
    pub fn matches(self, task: &Task, now: DateTime<Utc>) -> bool {
        let today = now.date_naive();
        match self {
            Self::All => true,
            Self::Today => task.due_date.date_naive() == today,
            Self::Past => task.due_date.date_naive() < today,
        }
    }
}

impl FromStr for TaskFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "past" => Ok(Self::Past),
            other => Err(CoreError::Validation(format!("unknown filter '{other}'"))),
        }
    }
}
