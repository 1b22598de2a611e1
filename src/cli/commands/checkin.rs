//! Checkin command - record a day's habit statuses.
//!
//! Free-text status tokens are classified here, before the core is ever
//! called: the store only receives a validated two-valued status.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use colored::Colorize;

use crate::cli::open_tracker;
use crate::store::CheckinStatus;

/// Classification of a free-text status token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusToken {
    Completed,
    Missed,
    Unrecognized,
}

/// Maps operator input to a status. Total: every token classifies, and
/// anything unknown is `Unrecognized` rather than a guess.
pub fn classify(token: &str) -> StatusToken {
    match token.trim().to_lowercase().as_str() {
        "✅" | "y" | "yes" | "1" | "t" | "true" | "done" => StatusToken::Completed,
        "❌" | "n" | "no" | "0" | "f" | "false" | "missed" => StatusToken::Missed,
        _ => StatusToken::Unrecognized,
    }
}

/// Arguments for the checkin command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    habit checkin 42 yes no yes            One token per habit, in saved order\n    \
    habit checkin 42 ✅ ❌ ✅               Glyphs work too\n    \
    habit checkin 42 --habit read yes      Check in a single habit\n    \
    habit checkin 42 yes --date 2024-03-01 Backfill a past date")]
pub struct Args {
    /// User identifier
    pub user_id: i64,

    /// Status tokens (✅/yes/y/1 or ❌/no/n/0), one per habit in saved order
    #[arg(required = true)]
    pub statuses: Vec<String>,

    /// Record for a single named habit instead of the whole list
    #[arg(long)]
    pub habit: Option<String>,

    /// Check-in date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: Args) -> Result<()> {
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let statuses = parse_statuses(&args.statuses)?;
    let tracker = open_tracker()?;

    let habits = match &args.habit {
        Some(habit) => {
            if statuses.len() != 1 {
                bail!("--habit takes exactly one status token");
            }
            vec![habit.clone()]
        }
        None => {
            let habits = tracker.get_habits(args.user_id)?;
            if habits.is_empty() {
                bail!(
                    "No habits saved for user {}. Run 'habit habits set' first",
                    args.user_id
                );
            }
            if statuses.len() != habits.len() {
                bail!(
                    "Expected one status per habit ({} habits, got {} statuses)",
                    habits.len(),
                    statuses.len()
                );
            }
            habits
        }
    };

    for (habit, status) in habits.iter().zip(&statuses) {
        tracker.record_checkin(date, args.user_id, habit, *status)?;
    }

    let completed = statuses
        .iter()
        .filter(|s| **s == CheckinStatus::Completed)
        .count();
    let total = statuses.len();
    let rate = completed as f64 / total as f64 * 100.0;

    println!("{}", format!("Check-in recorded for {date}:").bold());
    for (i, (habit, status)) in habits.iter().zip(&statuses).enumerate() {
        println!("  {}. {habit}: {status}", i + 1);
    }
    println!();
    println!("Completion rate: {completed}/{total} ({rate:.1}%)");
    if completed == total {
        println!("{}", "Perfect! You completed all your habits today!".green());
    } else if rate >= 60.0 {
        println!("{}", "Good progress! Keep it up!".green());
    } else {
        println!("{}", "Tomorrow is a new day. Don't give up!".yellow());
    }
    Ok(())
}

fn parse_statuses(tokens: &[String]) -> Result<Vec<CheckinStatus>> {
    tokens
        .iter()
        .map(|token| match classify(token) {
            StatusToken::Completed => Ok(CheckinStatus::Completed),
            StatusToken::Missed => Ok(CheckinStatus::Missed),
            StatusToken::Unrecognized => {
                bail!("Unrecognized status token '{token}' (try ✅/yes or ❌/no)")
            }
        })
        .collect()
}
