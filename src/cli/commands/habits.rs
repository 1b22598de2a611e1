//! Habits command - set and list a user's tracked habits.

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;

use crate::cli::open_tracker;

/// Arguments for the habits command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    habit habits set 42 workout \"drink water\" read       Save three habits\n    \
    habit habits set 42 \"workout, drink water, read\"      Comma form also works\n    \
    habit habits list 42                                  Show the saved list")]
pub struct Args {
    #[command(subcommand)]
    pub command: HabitsCommand,
}

#[derive(Subcommand)]
pub enum HabitsCommand {
    /// Replace a user's habit list
    Set {
        /// User identifier
        user_id: i64,
        /// Habit names; entries may also be comma-separated
        #[arg(required = true)]
        habits: Vec<String>,
    },
    /// Show a user's habit list in saved order
    List {
        /// User identifier
        user_id: i64,
    },
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        HabitsCommand::Set { user_id, habits } => set_habits(user_id, &habits),
        HabitsCommand::List { user_id } => list_habits(user_id),
    }
}

fn set_habits(user_id: i64, raw: &[String]) -> Result<()> {
    // The store accepts whatever it is given; non-emptiness is this
    // layer's job.
    let habits: Vec<String> = raw
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect();
    if habits.is_empty() {
        bail!("Provide at least one non-blank habit name");
    }

    let tracker = open_tracker()?;
    tracker.save_habits(user_id, &habits)?;

    println!(
        "{}",
        format!("Saved {} habit(s) for user {user_id}:", habits.len()).bold()
    );
    for (i, habit) in habits.iter().enumerate() {
        println!("  {}. {habit}", i + 1);
    }
    Ok(())
}

fn list_habits(user_id: i64) -> Result<()> {
    let tracker = open_tracker()?;
    let habits = tracker.get_habits(user_id)?;

    if habits.is_empty() {
        println!(
            "{}",
            format!("No habits saved for user {user_id} yet").yellow()
        );
        return Ok(());
    }

    println!("{}", format!("Habits for user {user_id}:").bold());
    for (i, habit) in habits.iter().enumerate() {
        println!("  {}. {habit}", i + 1);
    }
    Ok(())
}
