//! Stats command - per-habit completion statistics.

use anyhow::Result;
use colored::Colorize;

use crate::cli::open_tracker;

/// Arguments for the stats command.
#[derive(clap::Args)]
pub struct Args {
    /// User identifier
    pub user_id: i64,
}

pub fn run(args: Args) -> Result<()> {
    let tracker = open_tracker()?;
    let habits = tracker.get_habits(args.user_id)?;
    let stats = tracker.get_stats(args.user_id)?;

    if habits.is_empty() && stats.is_empty() {
        println!(
            "{}",
            format!("No habits saved for user {} yet", args.user_id).yellow()
        );
        return Ok(());
    }

    println!("{}", format!("Habit statistics for user {}:", args.user_id).bold());
    println!();

    // Current habits first, in saved order, then any retired habits that
    // still have history.
    for habit in &habits {
        print_habit(habit, stats.get(habit).copied());
    }
    for (habit, habit_stats) in &stats {
        if !habits.contains(habit) {
            print_habit(habit, Some(*habit_stats));
        }
    }
    Ok(())
}

fn print_habit(habit: &str, stats: Option<crate::store::HabitStats>) {
    match stats {
        Some(s) => {
            println!(
                "  {}  {}/{} completed ({:.1}%)",
                habit.bold(),
                s.completed,
                s.total,
                s.success_rate()
            );
        }
        None => println!("  {}  {}", habit.bold(), "no data yet".dimmed()),
    }
}
