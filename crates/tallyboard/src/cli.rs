//! Command-line interface for tallyboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tallyboard - tic-tac-toe with persistent player statistics
#[derive(Parser, Debug)]
#[command(name = "tallyboard")]
#[command(about = "Two-player console tic-tac-toe with a persistent leaderboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the database file (created if it doesn't exist)
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive main menu
    Menu,

    /// Play one session between two players
    Play {
        /// Player 1 name (plays X)
        #[arg(long)]
        player1: Option<String>,

        /// Player 2 name (plays O)
        #[arg(long)]
        player2: Option<String>,
    },

    /// Print the ranked leaderboard
    Leaderboard {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print one player's statistics
    Stats {
        /// Player name (case-sensitive)
        name: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print recent games
    History {
        /// Only games involving this player
        #[arg(long)]
        player: Option<String>,

        /// Maximum number of games (defaults to the configured limit)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
