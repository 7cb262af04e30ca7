//! Tallyboard - tic-tac-toe with durable player statistics.
//!
//! # Architecture
//!
//! - **Engine**: [`tallyboard_tictactoe`] owns the board and the rules
//! - **Stats store**: [`StatsStore`] owns the `players` and `games` tables
//! - **Session**: [`Session`] is the console controller wiring the two
//!
//! # Example
//!
//! ```no_run
//! use tallyboard::{MatchOutcome, StatsStore};
//!
//! # fn example() -> Result<(), tallyboard::StatsError> {
//! let mut store = StatsStore::open("tictactoe_stats.db")?;
//! store.register_player("Alice")?;
//! store.register_player("Bob")?;
//! store.record_outcome("Alice", "Bob", MatchOutcome::PlayerOneWins)?;
//!
//! for player in store.list_players_ranked()? {
//!     println!("{}: {:.1}%", player.name(), player.win_rate());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod db;
pub mod report;
mod session;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DB_PATH_ENV, DEFAULT_CONFIG_FILE};

// Crate-level exports - Stats store
pub use db::{
    GameOutcome, GameRecord, MatchOutcome, NewGameRecord, NewPlayer, Player, Registration, StatsError,
    StatsErrorKind, StatsStore,
};

// Crate-level exports - Session controller
pub use session::{Matchup, Session, match_outcome};

// Crate-level exports - Game types (tic-tac-toe)
pub use tallyboard_tictactoe::{Board, GameState, GameStatus, Marker, MoveResult, Position, Square};
