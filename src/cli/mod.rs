//! Command-line interface for the habit tracker.
//!
//! This is the conversational layer: it validates operator input (habit
//! lists, status tokens, dates) and only then calls into the core through
//! the [`HabitTracker`](crate::tracker::HabitTracker) facade.

/// Individual CLI command implementations.
pub mod commands;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::tracker::HabitTracker;

/// Loads configuration and opens the tracker (pulling mirrors when
/// configured).
pub fn open_tracker() -> Result<HabitTracker> {
    let config = Config::load().context("Could not load configuration")?;
    HabitTracker::open(&config).context("Could not open habit tracker")
}
