//! Persistence layer for player records and game history.

mod error;
mod models;
mod schema; // Diesel generated schema - internal use only
mod store;

pub use error::{StatsError, StatsErrorKind};
pub use models::{GameOutcome, GameRecord, MatchOutcome, NewGameRecord, NewPlayer, Player, Registration};
pub use store::StatsStore;
