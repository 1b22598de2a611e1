//! Habit list table: which habits each user tracks.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::models::HabitRecord;
use super::table;
use super::StoreError;

/// Header row of the habit table. One data row per `(user, habit)` pair.
pub const HABITS_HEADER: &str = "user_id,habit";

/// File-backed habit table.
///
/// Every mutation does a full load-modify-rewrite cycle; callers needing
/// concurrent access must serialize mutations externally (see
/// [`HabitTracker`](crate::tracker::HabitTracker)).
pub struct HabitStore {
    path: PathBuf,
}

impl HabitStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces a user's habit list.
    ///
    /// Entries are trimmed and blanks dropped; the store does not reject an
    /// empty result (the caller validates non-emptiness). Any prior record
    /// for the user is removed before the fresh one is appended.
    pub fn save_habits(&mut self, user_id: i64, habits: &[String]) -> Result<(), StoreError> {
        let cleaned: Vec<String> = habits
            .iter()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .collect();

        let mut records = self.load()?;
        records.retain(|r| r.user_id != user_id);
        records.push(HabitRecord {
            user_id,
            habits: cleaned,
        });

        let rows: Vec<Vec<String>> = records
            .iter()
            .flat_map(|r| {
                r.habits
                    .iter()
                    .map(|h| vec![r.user_id.to_string(), h.clone()])
            })
            .collect();
        table::write_rows(&self.path, HABITS_HEADER, &rows)
    }

    /// Returns a user's habits in file order. Missing file or unknown user
    /// reads as an empty list, never an error.
    pub fn habits_for(&self, user_id: i64) -> Result<Vec<String>, StoreError> {
        let mut habits = Vec::new();
        for (uid, habit) in self.scan()? {
            if uid == user_id {
                habits.push(habit);
            }
        }
        Ok(habits)
    }

    /// Distinct user ids present in the table.
    pub fn all_users(&self) -> Result<BTreeSet<i64>, StoreError> {
        Ok(self.scan()?.into_iter().map(|(uid, _)| uid).collect())
    }

    /// Loads the table grouped into one record per user, preserving the
    /// order users first appear in the file.
    fn load(&self) -> Result<Vec<HabitRecord>, StoreError> {
        let mut records: Vec<HabitRecord> = Vec::new();
        for (uid, habit) in self.scan()? {
            match records.iter_mut().find(|r| r.user_id == uid) {
                Some(record) => record.habits.push(habit),
                None => records.push(HabitRecord {
                    user_id: uid,
                    habits: vec![habit],
                }),
            }
        }
        Ok(records)
    }

    fn scan(&self) -> Result<Vec<(i64, String)>, StoreError> {
        let rows = table::read_rows(&self.path, HABITS_HEADER)?;
        let mut pairs = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            let uid = row[0].parse::<i64>().map_err(|_| StoreError::MalformedRow {
                path: self.path.clone(),
                line: idx + 2,
                reason: format!("invalid user id '{}'", row[0]),
            })?;
            pairs.push((uid, row[1].clone()));
        }
        Ok(pairs)
    }
}
