//! Users command - list tracked user ids.

use anyhow::Result;
use colored::Colorize;

use crate::cli::open_tracker;

/// Arguments for the users command.
#[derive(clap::Args)]
pub struct Args {}

pub fn run(_args: Args) -> Result<()> {
    let tracker = open_tracker()?;
    let users = tracker.get_all_users()?;

    if users.is_empty() {
        println!("{}", "No users tracked yet".yellow());
        return Ok(());
    }

    println!("{}", format!("{} tracked user(s):", users.len()).bold());
    for user_id in users {
        println!("  {user_id}");
    }
    Ok(())
}
