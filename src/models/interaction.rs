// src/models/interaction.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-item, user-owned state. Absence from the store means `Default`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub downloaded: bool,

    /// Set once the item has been opened.
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,

    /// Watch percentage in [0, 100]. Only tutorials use it for status.
    #[serde(default)]
    pub progress: Option<f64>,

    /// Latest quiz attempt, supplied from outside.
    #[serde(default)]
    pub attempt: Option<AttemptRecord>,
}

impl InteractionState {
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Liked => self.liked,
            Flag::Saved => self.saved,
            Flag::Downloaded => self.downloaded,
        }
    }

    pub(crate) fn flag_mut(&mut self, flag: Flag) -> &mut bool {
        match flag {
            Flag::Liked => &mut self.liked,
            Flag::Saved => &mut self.saved,
            Flag::Downloaded => &mut self.downloaded,
        }
    }
}

/// Boolean flags a user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    Liked,
    Saved,
    Downloaded,
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Liked => f.write_str("liked"),
            Flag::Saved => f.write_str("saved"),
            Flag::Downloaded => f.write_str("downloaded"),
        }
    }
}

/// Result of a quiz attempt recorded by the exam flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub score: Option<u32>,
    pub completed: bool,
    pub attempted_at: DateTime<Utc>,
}

/// Completion classification used by the status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    NotAttempted,
    InProgress,
    Completed,
}

impl FromStr for ItemStatus {
    type Err = String;

    /// Accepts `not_attempted`, `not-attempted` or `Not Attempted`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "notattempted" => Ok(ItemStatus::NotAttempted),
            "inprogress" => Ok(ItemStatus::InProgress),
            "completed" => Ok(ItemStatus::Completed),
            _ => Err(format!("unknown status '{}'", s.trim())),
        }
    }
}
