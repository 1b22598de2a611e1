//! habit-cli - daily habit check-ins in flat CSV tables
//!
//! Tracks per-user habit lists and daily check-in records in local CSV
//! files, optionally mirrored to a remote version-controlled repository
//! over an HTTP content API with optimistic concurrency.

pub mod cli;
pub mod config;
pub mod mirror;
pub mod quotes;
pub mod store;
pub mod sync;
pub mod tracker;
