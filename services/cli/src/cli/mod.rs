//! services/cli/src/cli/mod.rs
//!
//! The command tree. Each invocation is one session: saved state is loaded once,
//! the command runs, and every change is persisted as it happens.

pub mod commands;
pub mod render;

use cinematcher_core::TimeBucket;
use clap::{Parser, Subcommand};

pub use commands::handle_command;

#[derive(Parser, Debug)]
#[command(name = "cinematcher")]
#[command(
    about = "Tell it how much time you have and what you are in the mood for; get three titles back.",
    long_about = "CineMatcher asks a generative model for three films or series that fit your \
                  available time and up to ten free-text clues. Results are kept in a local \
                  history, and titles you like can be saved to a watchlist."
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List the available time buckets
    Times,
    /// Ask for three recommendations
    Match {
        /// Time bucket slug or label (see `times`)
        #[arg(short, long, conflicts_with = "surprise")]
        time: Option<TimeBucket>,
        /// A clue (genre, mood, era, place...). Repeat up to ten times
        #[arg(short = 'c', long = "clue", conflicts_with = "surprise")]
        clues: Vec<String>,
        /// Fill the time and all ten clues at random
        #[arg(long)]
        surprise: bool,
        /// Seed for `--surprise`, for repeatable picks
        #[arg(long, requires = "surprise")]
        seed: Option<u64>,
    },
    /// Browse or clear past results
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Show or edit saved titles
    Watchlist {
        #[command(subcommand)]
        action: WatchlistAction,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    /// List past results, most recent first
    #[command(visible_alias = "ls")]
    List,
    /// Show a past result again without asking the service
    Open {
        /// Position in the list (1 = most recent)
        position: usize,
    },
    /// Forget every past result
    Clear,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum WatchlistAction {
    /// List saved titles
    #[command(visible_alias = "ls")]
    List,
    /// Save a recommendation, or remove it if a title with that name is already saved
    Toggle {
        /// Which of the entry's recommendations (1-3)
        recommendation: usize,
        /// History position the recommendation comes from (1 = most recent)
        #[arg(short, long, default_value_t = 1)]
        entry: usize,
    },
    /// Remove a saved title by its position in `watchlist list`
    #[command(visible_alias = "rm")]
    Remove {
        /// Position in the list (1 = first saved)
        position: usize,
    },
}

impl Commands {
    /// Whether the command may call the recommendation service.
    pub fn needs_service(&self) -> bool {
        matches!(self, Commands::Match { .. })
    }
}
