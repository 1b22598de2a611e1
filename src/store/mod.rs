//! File-backed table store for habits and check-ins.
//!
//! Each table is a UTF-8 CSV file with a mandatory header row, created
//! empty-with-header on first write and fully rewritten on every mutation.
//! The local files are the durable source of truth between mirror syncs.
//!
//! # Submodules
//!
//! - `table` - CSV row primitives and atomic file rewrite
//! - `models` - record types shared by both tables
//! - `habits` - per-user habit list table
//! - `checkins` - daily check-in log table

pub mod checkins;
pub mod habits;
pub mod models;
pub mod table;

pub use checkins::CheckinStore;
pub use habits::HabitStore;
pub use models::{CheckinRecord, CheckinStatus, HabitRecord, HabitStats};

use std::path::PathBuf;

/// Custom error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Local file I/O failed. The mutation aborts before any rewrite, so
    /// the prior file content stays intact.
    #[error("table file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A row failed to parse during a scan. The scan stops here rather
    /// than skipping the row.
    #[error("{path}:{line}: malformed row: {reason}")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}
