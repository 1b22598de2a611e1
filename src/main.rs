use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use habit_cli::cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "habit")]
#[command(version)]
#[command(about = "Track daily habit check-ins in flat CSV tables")]
#[command(long_about = "Tracks per-user habit lists and daily check-in records in local\n\
    CSV files. When a remote mirror is configured through the\n\
    HABIT_MIRROR_* environment variables, every run pulls the tables\n\
    from the mirror and every mutation pushes them back.")]
#[command(after_help = "EXAMPLES:\n    \
    habit habits set 42 workout read   Save a user's habit list\n    \
    habit habits list 42               Show the saved list\n    \
    habit checkin 42 yes no            Record today's check-in\n    \
    habit stats 42                     Per-habit completion stats\n    \
    habit due                          Who still owes a check-in today\n    \
    habit sync                         Manual full resync with the mirror\n\n\
    For more information about a command, run 'habit <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Set and list a user's tracked habits
    #[command(long_about = "Saves or displays a user's habit list. A save fully replaces the\n\
        previous list; order is preserved and blank entries are dropped.")]
    Habits(commands::habits::Args),

    /// Record a day's habit check-in
    #[command(long_about = "Records completion statuses for a user's habits. One token per\n\
        habit in saved order, or a single habit via --habit. Re-recording\n\
        the same date and habit overwrites the status in place.")]
    Checkin(commands::checkin::Args),

    /// Show per-habit completion statistics
    Stats(commands::stats::Args),

    /// List all tracked user ids
    Users(commands::users::Args),

    /// List users who have not checked in yet
    #[command(long_about = "Lists every tracked user without a check-in on the given date,\n\
        along with their habits and a motivational quote. Meant to be run\n\
        by an operator or an external scheduler.")]
    Due(commands::due::Args),

    /// Sync both tables with the remote mirror
    #[command(long_about = "Pushes then pulls both table files against the remote mirror and\n\
        reports overall success. This is the only repair path after a\n\
        rejected push: the mirror never retries or merges on its own.")]
    Sync(commands::sync::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "habit_cli=debug"
    } else {
        "habit_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Habits(args) => commands::habits::run(args),
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Users(args) => commands::users::run(args),
        Commands::Due(args) => commands::due::run(args),
        Commands::Sync(args) => commands::sync::run(args),
    }
}
