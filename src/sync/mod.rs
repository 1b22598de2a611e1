//! Sync orchestration across the two table mirrors.
//!
//! The coordinator sequences pull-on-startup and push-after-mutation, and
//! offers a manual "sync everything now" operation. It never retries and
//! never resolves conflicts; a caller-invoked full resync is the only
//! repair path.

use std::path::PathBuf;

use crate::config::Config;
use crate::mirror::{RemoteClient, RemoteMirror};
use crate::store::checkins::CHECKINS_HEADER;
use crate::store::habits::HABITS_HEADER;

struct TableSync {
    mirror: RemoteMirror,
    local_path: PathBuf,
    label: &'static str,
}

/// Orchestrates pull/push for both tables.
///
/// With no mirror configured every operation is a no-op that reports
/// success: local-only mode is not an error.
pub struct SyncCoordinator {
    habits: Option<TableSync>,
    checkins: Option<TableSync>,
}

impl SyncCoordinator {
    /// Builds the coordinator; mirrors exist only when the config has
    /// complete mirror settings.
    pub fn from_config(config: &Config) -> Self {
        let Some(mirror_config) = &config.mirror else {
            return Self {
                habits: None,
                checkins: None,
            };
        };

        Self {
            habits: Some(TableSync {
                mirror: RemoteMirror::new(
                    RemoteClient::new(mirror_config),
                    mirror_config.habits_path.clone(),
                    HABITS_HEADER,
                ),
                local_path: config.habits_file(),
                label: "habits",
            }),
            checkins: Some(TableSync {
                mirror: RemoteMirror::new(
                    RemoteClient::new(mirror_config),
                    mirror_config.checkins_path.clone(),
                    CHECKINS_HEADER,
                ),
                local_path: config.checkins_file(),
                label: "checkins",
            }),
        }
    }

    /// True when a remote mirror is configured.
    pub fn is_enabled(&self) -> bool {
        self.habits.is_some()
    }

    /// Pulls both tables into their local files (startup). Failures are
    /// logged and leave the pre-existing local files in place.
    pub fn pull_all(&self) {
        for table in [&self.habits, &self.checkins].into_iter().flatten() {
            if let Err(e) = table.mirror.pull(&table.local_path) {
                tracing::warn!("Pull of {} table failed: {e}", table.label);
            }
        }
    }

    /// Pushes the habit table after a mutation. Returns sync health; a
    /// failed push never affects the local write that already happened.
    pub fn push_habits(&self) -> bool {
        Self::push(&self.habits)
    }

    /// Pushes the check-in table after a mutation.
    pub fn push_checkins(&self) -> bool {
        Self::push(&self.checkins)
    }

    fn push(table: &Option<TableSync>) -> bool {
        let Some(table) = table else {
            return true;
        };
        match table.mirror.push(&table.local_path) {
            Ok(()) => true,
            Err(e) if e.is_conflict() => {
                tracing::warn!(
                    "Push of {} table rejected: remote changed since last pull; \
                     run a full sync to repair",
                    table.label
                );
                false
            }
            Err(e) => {
                tracing::warn!("Push of {} table failed: {e}", table.label);
                false
            }
        }
    }

    /// Full resync of both tables: push then pull per table. Overall
    /// success is the logical AND of the two table results.
    pub fn sync_all(&self) -> bool {
        let habits_ok = Self::sync_table(&self.habits);
        let checkins_ok = Self::sync_table(&self.checkins);
        habits_ok && checkins_ok
    }

    fn sync_table(table: &Option<TableSync>) -> bool {
        let Some(table) = table else {
            return true;
        };
        let pushed = match table.mirror.push(&table.local_path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Sync push of {} table failed: {e}", table.label);
                false
            }
        };
        let pulled = match table.mirror.pull(&table.local_path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Sync pull of {} table failed: {e}", table.label);
                false
            }
        };
        pushed && pulled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_only_config() -> Config {
        Config {
            data_dir: PathBuf::from("/tmp/habit-test"),
            mirror: None,
        }
    }

    #[test]
    fn test_local_only_mode_is_disabled_but_healthy() {
        let coordinator = SyncCoordinator::from_config(&local_only_config());
        assert!(!coordinator.is_enabled());
        assert!(coordinator.sync_all());
        assert!(coordinator.push_habits());
        assert!(coordinator.push_checkins());
    }

    #[test]
    fn test_mirror_config_enables_both_tables() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/habit-test"),
            mirror: Some(crate::config::MirrorConfig {
                owner: "alice".to_string(),
                repo: "habits".to_string(),
                token: "tok".to_string(),
                branch: "main".to_string(),
                api_url: "http://localhost:9".to_string(),
                habits_path: "data/habits.csv".to_string(),
                checkins_path: "data/checkins.csv".to_string(),
            }),
        };
        let coordinator = SyncCoordinator::from_config(&config);
        assert!(coordinator.is_enabled());
        let habits = coordinator.habits.as_ref().unwrap();
        assert_eq!(habits.mirror.remote_path(), "data/habits.csv");
        assert_eq!(habits.local_path, config.habits_file());
    }
}
