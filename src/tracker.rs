//! The public facade over the stores and the sync coordinator.
//!
//! Each table sits behind its own mutex so a mutation's whole
//! load-modify-rewrite-push sequence runs single-writer; the classic
//! lost-update race of unsynchronized read-modify-write cycles cannot
//! happen within one process.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use crate::config::Config;
use crate::store::{CheckinStatus, CheckinStore, HabitStats, HabitStore, StoreError};
use crate::sync::SyncCoordinator;

/// Habit tracking core: two file-backed tables plus their remote mirrors.
pub struct HabitTracker {
    habits: Mutex<HabitStore>,
    checkins: Mutex<CheckinStore>,
    sync: SyncCoordinator,
}

impl HabitTracker {
    /// Opens the tracker, pulling both tables from their mirrors first when
    /// a mirror is configured. Pull failures are logged and leave the
    /// existing local files in place.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&config.data_dir)?;

        let sync = SyncCoordinator::from_config(config);
        if sync.is_enabled() {
            sync.pull_all();
        }

        Ok(Self {
            habits: Mutex::new(HabitStore::new(config.habits_file())),
            checkins: Mutex::new(CheckinStore::new(config.checkins_file())),
            sync,
        })
    }

    /// Replaces a user's habit list, then pushes the habit table.
    ///
    /// The local rewrite always completes before the push is attempted; a
    /// push failure is logged via the coordinator and never rolls back or
    /// fails the local save.
    pub fn save_habits(&self, user_id: i64, habits: &[String]) -> Result<(), StoreError> {
        let mut store = lock(&self.habits);
        store.save_habits(user_id, habits)?;
        self.sync.push_habits();
        Ok(())
    }

    /// A user's habits in saved order; empty when unknown.
    pub fn get_habits(&self, user_id: i64) -> Result<Vec<String>, StoreError> {
        lock(&self.habits).habits_for(user_id)
    }

    /// Distinct users with a saved habit list.
    pub fn get_all_users(&self) -> Result<BTreeSet<i64>, StoreError> {
        lock(&self.habits).all_users()
    }

    /// Records one check-in, then pushes the check-in table.
    pub fn record_checkin(
        &self,
        date: NaiveDate,
        user_id: i64,
        habit: &str,
        status: CheckinStatus,
    ) -> Result<(), StoreError> {
        let mut store = lock(&self.checkins);
        store.record(date, user_id, habit, status)?;
        self.sync.push_checkins();
        Ok(())
    }

    /// True once the user has any check-in recorded for the date.
    pub fn has_checked_in_today(&self, user_id: i64, date: NaiveDate) -> Result<bool, StoreError> {
        lock(&self.checkins).has_checkin(user_id, date)
    }

    /// Per-habit totals for one user.
    pub fn get_stats(&self, user_id: i64) -> Result<BTreeMap<String, HabitStats>, StoreError> {
        lock(&self.checkins).stats_for(user_id)
    }

    /// Manual full resync of both tables. Holds both table locks so no
    /// mutation interleaves with the push/pull cycle.
    pub fn sync_all(&self) -> bool {
        let _habits = lock(&self.habits);
        let _checkins = lock(&self.checkins);
        self.sync.sync_all()
    }

    /// True when a remote mirror is configured.
    pub fn sync_enabled(&self) -> bool {
        self.sync.is_enabled()
    }
}

/// Takes a table lock, recovering from poisoning: a panicked writer aborted
/// before its rewrite, so the on-disk table is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
