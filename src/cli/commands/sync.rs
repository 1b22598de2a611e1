//! Sync command - manual full resync against the remote mirror.

use anyhow::{bail, Result};
use colored::Colorize;

use crate::cli::open_tracker;

/// Arguments for the sync command.
#[derive(clap::Args)]
pub struct Args {}

pub fn run(_args: Args) -> Result<()> {
    let tracker = open_tracker()?;

    if !tracker.sync_enabled() {
        println!(
            "{}",
            "No remote mirror configured; data stays local-only".yellow()
        );
        return Ok(());
    }

    println!("Syncing both tables with the remote mirror...");
    if tracker.sync_all() {
        println!("{}", "Sync complete".green());
        Ok(())
    } else {
        bail!("Sync failed for at least one table; see the log for details");
    }
}
