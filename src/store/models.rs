//! Record types for the habit and check-in tables.

use chrono::NaiveDate;

/// One user's tracked habits.
///
/// At most one record exists per user; a save fully replaces the previous
/// habit list. Order is preserved from the most recent save, and habit
/// names need not be unique within a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitRecord {
    /// Externally supplied user identifier.
    pub user_id: i64,

    /// Habit names in save order.
    pub habits: Vec<String>,
}

/// A single day's completion record for one user's one habit.
///
/// `(date, user_id, habit)` is the natural key: at most one record with
/// that triple exists in the table, and a later write overwrites the
/// status in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinRecord {
    pub date: NaiveDate,
    pub user_id: i64,
    pub habit: String,
    pub status: CheckinStatus,
}

/// Completion status of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinStatus {
    Completed,
    Missed,
}

impl CheckinStatus {
    /// The glyph stored in the table file.
    pub fn glyph(self) -> &'static str {
        match self {
            CheckinStatus::Completed => "✅",
            CheckinStatus::Missed => "❌",
        }
    }

    /// Parses the stored glyph. Any other token is a data-integrity
    /// problem and maps to `None`.
    pub fn from_glyph(token: &str) -> Option<Self> {
        match token {
            "✅" => Some(CheckinStatus::Completed),
            "❌" => Some(CheckinStatus::Missed),
            _ => None,
        }
    }
}

impl std::fmt::Display for CheckinStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Per-habit check-in counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HabitStats {
    /// Check-ins recorded for this habit.
    pub total: u32,

    /// Check-ins recorded with [`CheckinStatus::Completed`].
    pub completed: u32,
}

impl HabitStats {
    /// Completion percentage, 0.0 when there is no data.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.completed) / f64::from(self.total) * 100.0
        }
    }
}
