//! Due command - the daily check-in sweep.
//!
//! Lists every tracked user who has not checked in on the given date,
//! with their habit list and a motivational quote. The cron-style trigger
//! that decides when to run this lives outside; this is its operator form.

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;

use crate::cli::open_tracker;
use crate::quotes;

/// Arguments for the due command.
#[derive(clap::Args)]
pub struct Args {
    /// Date to sweep (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: Args) -> Result<()> {
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let tracker = open_tracker()?;
    let mut due = Vec::new();

    for user_id in tracker.get_all_users()? {
        if tracker.has_checked_in_today(user_id, date)? {
            continue;
        }
        let habits = tracker.get_habits(user_id)?;
        if habits.is_empty() {
            continue;
        }
        due.push((user_id, habits));
    }

    if due.is_empty() {
        println!("{}", format!("Everyone has checked in for {date}").green());
        return Ok(());
    }

    println!("{}", format!("Due for check-in on {date}:").bold());
    println!("  {}", quotes::random_quote().italic());
    println!();
    for (user_id, habits) in due {
        println!("  user {}: {}", user_id, habits.join(", "));
    }
    Ok(())
}
