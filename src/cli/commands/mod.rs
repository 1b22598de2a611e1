//! CLI commands for the habit tracker.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Record a day's check-in.
pub mod checkin;

/// List users who have not checked in yet.
pub mod due;

/// Set and list a user's habits.
pub mod habits;

/// Per-habit statistics.
pub mod stats;

/// Manual full resync against the remote mirror.
pub mod sync;

/// List tracked users.
pub mod users;
