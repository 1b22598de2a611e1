//! Check-in log table: one row per `(date, user, habit)` triple.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::models::{CheckinRecord, CheckinStatus, HabitStats};
use super::table;
use super::StoreError;

/// Header row of the check-in table.
pub const CHECKINS_HEADER: &str = "date,user_id,habit,status";

/// File-backed check-in table.
///
/// Append-only in spirit: a mutation merges into the existing rows (the
/// natural key may only appear once) and rewrites the whole file.
pub struct CheckinStore {
    path: PathBuf,
}

impl CheckinStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records one check-in, overwriting the status in place when a record
    /// with the same `(date, user, habit)` key already exists.
    pub fn record(
        &mut self,
        date: NaiveDate,
        user_id: i64,
        habit: &str,
        status: CheckinStatus,
    ) -> Result<(), StoreError> {
        let mut records = self.load()?;

        match records
            .iter_mut()
            .find(|r| r.date == date && r.user_id == user_id && r.habit == habit)
        {
            Some(existing) => existing.status = status,
            None => records.push(CheckinRecord {
                date,
                user_id,
                habit: habit.to_string(),
                status,
            }),
        }

        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| {
                vec![
                    r.date.format("%Y-%m-%d").to_string(),
                    r.user_id.to_string(),
                    r.habit.clone(),
                    r.status.glyph().to_string(),
                ]
            })
            .collect();
        table::write_rows(&self.path, CHECKINS_HEADER, &rows)
    }

    /// True once any habit has a record for this user on this date. This is
    /// a coarse per-day check, deliberately habit-agnostic.
    pub fn has_checkin(&self, user_id: i64, date: NaiveDate) -> Result<bool, StoreError> {
        Ok(self
            .load()?
            .iter()
            .any(|r| r.user_id == user_id && r.date == date))
    }

    /// Per-habit totals for one user.
    pub fn stats_for(&self, user_id: i64) -> Result<BTreeMap<String, HabitStats>, StoreError> {
        let mut stats: BTreeMap<String, HabitStats> = BTreeMap::new();
        for record in self.load()? {
            if record.user_id != user_id {
                continue;
            }
            let entry = stats.entry(record.habit).or_default();
            entry.total += 1;
            if record.status == CheckinStatus::Completed {
                entry.completed += 1;
            }
        }
        Ok(stats)
    }

    fn load(&self) -> Result<Vec<CheckinRecord>, StoreError> {
        let rows = table::read_rows(&self.path, CHECKINS_HEADER)?;
        let mut records = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            let line = idx + 2;
            let date = NaiveDate::parse_from_str(&row[0], "%Y-%m-%d").map_err(|_| {
                self.malformed(line, format!("invalid date '{}'", row[0]))
            })?;
            let user_id = row[1]
                .parse::<i64>()
                .map_err(|_| self.malformed(line, format!("invalid user id '{}'", row[1])))?;
            let status = CheckinStatus::from_glyph(&row[3])
                .ok_or_else(|| self.malformed(line, format!("unknown status '{}'", row[3])))?;
            records.push(CheckinRecord {
                date,
                user_id,
                habit: row[2].clone(),
                status,
            });
        }
        Ok(records)
    }

    fn malformed(&self, line: usize, reason: String) -> StoreError {
        StoreError::MalformedRow {
            path: self.path.clone(),
            line,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_store() -> (CheckinStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = CheckinStore::new(dir.path().join("checkins.csv"));
        (store, dir)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_record_creates_file_with_header_and_one_row() {
        let (mut store, _dir) = test_store();
        store
            .record(date("2024-03-01"), 7, "read", CheckinStatus::Completed)
            .unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec![CHECKINS_HEADER, "2024-03-01,7,read,✅"]);
    }

    #[test]
    fn test_record_overwrites_same_key() {
        let (mut store, _dir) = test_store();
        let d = date("2024-03-01");
        store.record(d, 7, "read", CheckinStatus::Completed).unwrap();
        store.record(d, 7, "read", CheckinStatus::Missed).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 2); // header + one row
        assert!(content.contains("2024-03-01,7,read,❌"));
    }

    #[test]
    fn test_record_different_keys_append() {
        let (mut store, _dir) = test_store();
        let d = date("2024-03-01");
        store.record(d, 7, "read", CheckinStatus::Completed).unwrap();
        store.record(d, 7, "run", CheckinStatus::Missed).unwrap();
        store
            .record(date("2024-03-02"), 7, "read", CheckinStatus::Completed)
            .unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn test_has_checkin_flips_after_first_record() {
        let (mut store, _dir) = test_store();
        let d = date("2024-03-01");
        assert!(!store.has_checkin(7, d).unwrap());

        store.record(d, 7, "read", CheckinStatus::Missed).unwrap();
        assert!(store.has_checkin(7, d).unwrap());
        // Habit-agnostic and user/date scoped.
        assert!(!store.has_checkin(7, date("2024-03-02")).unwrap());
        assert!(!store.has_checkin(8, d).unwrap());
    }

    #[test]
    fn test_stats_counts_totals_and_completions() {
        let (mut store, _dir) = test_store();
        store
            .record(date("2024-03-01"), 7, "read", CheckinStatus::Completed)
            .unwrap();
        store
            .record(date("2024-03-02"), 7, "read", CheckinStatus::Missed)
            .unwrap();
        store
            .record(date("2024-03-01"), 9, "read", CheckinStatus::Completed)
            .unwrap();

        let stats = store.stats_for(7).unwrap();
        assert_eq!(stats.len(), 1);
        let read = stats["read"];
        assert_eq!(read.total, 2);
        assert_eq!(read.completed, 1);
    }

    #[test]
    fn test_habit_name_with_line_break_stays_readable() {
        let (mut store, _dir) = test_store();
        let d = date("2024-03-01");
        store
            .record(d, 7, "bad\nname", CheckinStatus::Completed)
            .unwrap();

        assert!(store.has_checkin(7, d).unwrap());
        let stats = store.stats_for(7).unwrap();
        assert_eq!(stats["bad\nname"].total, 1);
    }

    #[test]
    fn test_missing_file_reads_as_zero_rows() {
        let (store, _dir) = test_store();
        assert!(!store.has_checkin(1, date("2024-03-01")).unwrap());
        assert!(store.stats_for(1).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_status_glyph_fails_scan() {
        let (store, dir) = test_store();
        std::fs::write(
            dir.path().join("checkins.csv"),
            "date,user_id,habit,status\n2024-03-01,7,read,maybe\n",
        )
        .unwrap();
        assert!(matches!(
            store.stats_for(7),
            Err(StoreError::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_bad_date_fails_scan() {
        let (store, dir) = test_store();
        std::fs::write(
            dir.path().join("checkins.csv"),
            "date,user_id,habit,status\n03/01/2024,7,read,✅\n",
        )
        .unwrap();
        assert!(store.has_checkin(7, date("2024-03-01")).is_err());
    }
}
