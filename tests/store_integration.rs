//! Integration tests for the habit tracker core.
//!
//! These exercise the public facade over real table files in temporary
//! directories, in local-only mode (no mirror configured).

use chrono::NaiveDate;
use habit_cli::config::Config;
use habit_cli::store::{CheckinStatus, HabitStats};
use habit_cli::tracker::HabitTracker;
use tempfile::tempdir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Opens a tracker over a fresh temp directory (which must be kept alive).
fn create_test_tracker() -> (HabitTracker, tempfile::TempDir) {
    let dir = tempdir().expect("Failed to create temp directory");
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        mirror: None,
    };
    let tracker = HabitTracker::open(&config).expect("Failed to open tracker");
    (tracker, dir)
}

fn habits(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// =============================================================================
// Habit list
// =============================================================================

#[test]
fn save_then_get_returns_exact_list_in_order() {
    let (tracker, _dir) = create_test_tracker();
    let list = habits(&["workout", "drink water", "read 30 minutes", "meditate"]);

    tracker.save_habits(7, &list).unwrap();
    assert_eq!(tracker.get_habits(7).unwrap(), list);
}

#[test]
fn save_habits_is_idempotent() {
    let (tracker, _dir) = create_test_tracker();
    tracker.save_habits(1, &habits(&["run", "sleep"])).unwrap();
    tracker.save_habits(2, &habits(&["read"])).unwrap();

    tracker.save_habits(1, &habits(&["run", "sleep"])).unwrap();
    tracker.save_habits(1, &habits(&["run", "sleep"])).unwrap();

    assert_eq!(tracker.get_habits(1).unwrap(), habits(&["run", "sleep"]));
    assert_eq!(tracker.get_habits(2).unwrap(), habits(&["read"]));
}

#[test]
fn second_user_save_leaves_first_user_untouched() {
    let (tracker, _dir) = create_test_tracker();
    tracker.save_habits(1, &habits(&["run", "sleep"])).unwrap();
    tracker.save_habits(2, &habits(&["read"])).unwrap();

    let users: Vec<i64> = tracker.get_all_users().unwrap().into_iter().collect();
    assert_eq!(users, vec![1, 2]);
    assert_eq!(tracker.get_habits(1).unwrap(), habits(&["run", "sleep"]));
}

#[test]
fn habit_name_with_line_break_survives_round_trip() {
    let (tracker, _dir) = create_test_tracker();
    tracker
        .save_habits(1, &habits(&["bad\nname", "run"]))
        .unwrap();

    // Every later read must still parse the table.
    assert_eq!(
        tracker.get_habits(1).unwrap(),
        habits(&["bad\nname", "run"])
    );
    assert_eq!(tracker.get_all_users().unwrap().len(), 1);
}

#[test]
fn unknown_user_reads_as_no_data() {
    let (tracker, _dir) = create_test_tracker();
    assert!(tracker.get_habits(999).unwrap().is_empty());
    assert!(tracker.get_all_users().unwrap().is_empty());
    assert!(!tracker
        .has_checked_in_today(999, date("2024-03-01"))
        .unwrap());
    assert!(tracker.get_stats(999).unwrap().is_empty());
}

// =============================================================================
// Check-ins
// =============================================================================

#[test]
fn record_checkin_creates_table_with_header_and_one_row() {
    let (tracker, dir) = create_test_tracker();
    tracker
        .record_checkin(date("2024-03-01"), 7, "read", CheckinStatus::Completed)
        .unwrap();

    let content = std::fs::read_to_string(dir.path().join("checkins.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "date,user_id,habit,status");
    assert_eq!(lines[1], "2024-03-01,7,read,✅");
}

#[test]
fn second_write_with_same_key_overwrites_without_duplication() {
    let (tracker, dir) = create_test_tracker();
    let d = date("2024-03-01");

    tracker
        .record_checkin(d, 7, "read", CheckinStatus::Completed)
        .unwrap();
    tracker
        .record_checkin(d, 7, "read", CheckinStatus::Missed)
        .unwrap();

    let content = std::fs::read_to_string(dir.path().join("checkins.csv")).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("2024-03-01,7,read,❌"));

    let stats = tracker.get_stats(7).unwrap();
    assert_eq!(stats["read"], HabitStats { total: 1, completed: 0 });
}

#[test]
fn has_checked_in_flips_after_first_record() {
    let (tracker, _dir) = create_test_tracker();
    let d = date("2024-03-01");

    assert!(!tracker.has_checked_in_today(7, d).unwrap());
    tracker
        .record_checkin(d, 7, "read", CheckinStatus::Completed)
        .unwrap();
    assert!(tracker.has_checked_in_today(7, d).unwrap());
}

#[test]
fn stats_group_by_habit_and_count_completions() {
    let (tracker, _dir) = create_test_tracker();
    tracker
        .record_checkin(date("2024-03-01"), 7, "read", CheckinStatus::Completed)
        .unwrap();
    tracker
        .record_checkin(date("2024-03-02"), 7, "read", CheckinStatus::Missed)
        .unwrap();

    let stats = tracker.get_stats(7).unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats["read"], HabitStats { total: 2, completed: 1 });
}

// =============================================================================
// Sync
// =============================================================================

#[test]
fn sync_all_without_mirror_reports_success() {
    let (tracker, _dir) = create_test_tracker();
    assert!(!tracker.sync_enabled());
    assert!(tracker.sync_all());
}

#[test]
fn tracker_open_creates_data_dir() {
    let dir = tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().join("nested").join("data"),
        mirror: None,
    };
    let tracker = HabitTracker::open(&config).unwrap();
    assert!(config.data_dir.exists());
    tracker.save_habits(1, &habits(&["run"])).unwrap();
    assert!(config.habits_file().exists());
}
