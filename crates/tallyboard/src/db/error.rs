//! Statistics store error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong in the statistics store.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StatsErrorKind {
    /// Connection, query, or constraint failure reported by SQLite.
    #[display("Database error: {_0}")]
    Database(String),
    /// Schema migration could not be applied.
    #[display("Migration error: {_0}")]
    Migration(String),
    /// Outcome names a player that was never registered.
    #[display("Player '{_0}' is not registered")]
    UnknownPlayer(String),
    /// Player names must contain a non-whitespace character.
    #[display("Invalid player name: {_0:?}")]
    InvalidName(String),
    /// Both seats of a game name the same player.
    #[display("Player '{_0}' cannot play against themselves")]
    SamePlayer(String),
}

/// Statistics store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct StatsError {
    /// Error category.
    pub kind: StatsErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StatsError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: StatsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> &StatsErrorKind {
        &self.kind
    }
}

impl From<diesel::result::Error> for StatsError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(StatsErrorKind::Database(err.to_string()))
    }
}

impl From<diesel::ConnectionError> for StatsError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(StatsErrorKind::Database(format!("Connection error: {}", err)))
    }
}
