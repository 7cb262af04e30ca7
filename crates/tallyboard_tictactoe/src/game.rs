//! Game state for a single tic-tac-toe game.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::position::Position;
use crate::rules;
use crate::types::{Board, GameStatus, Marker, Square};

/// Outcome of [`GameState::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct MoveResult {
    /// Whether the marker was placed.
    pub applied: bool,
}

/// Board plus the marker whose turn it is.
///
/// A controller owns one value per game and drives it through
/// [`apply_move`](Self::apply_move), [`check_outcome`](Self::check_outcome)
/// and [`switch_active_player`](Self::switch_active_player), in that order.
/// Applying a move never rotates the turn, so the outcome is always judged on
/// the board as played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    active: Marker,
    history: Vec<Position>,
}

impl GameState {
    /// Marker that opens every new game.
    pub const FIRST_MOVER: Marker = Marker::X;

    /// Creates a new game: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active: Self::FIRST_MOVER,
            history: Vec::new(),
        }
    }

    /// Resumes from an arbitrary board with `active` to move. History starts empty.
    pub fn from_board(board: Board, active: Marker) -> Self {
        Self {
            board,
            active,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the marker whose turn it is.
    pub fn active_player(&self) -> Marker {
        self.active
    }

    /// Positions applied since the last reset, oldest first.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// True iff `index` is on the board (0-8) and that square is empty.
    pub fn is_valid_move(&self, index: usize) -> bool {
        Position::from_index(index).is_some_and(|pos| self.board.is_empty(pos))
    }

    /// Places the active marker at `index` if the move is valid.
    ///
    /// Invalid moves leave the state untouched and report `applied: false`.
    #[instrument(skip(self), fields(active = %self.active))]
    pub fn apply_move(&mut self, index: usize) -> MoveResult {
        let Some(pos) = Position::from_index(index).filter(|pos| self.board.is_empty(*pos)) else {
            debug!("Rejected move");
            return MoveResult { applied: false };
        };

        self.board.set(pos, Square::Occupied(self.active));
        self.history.push(pos);
        debug!(position = %pos, "Move applied");
        MoveResult { applied: true }
    }

    /// Evaluates the board as it stands.
    pub fn check_outcome(&self) -> GameStatus {
        rules::evaluate(&self.board)
    }

    /// The line that decided the game, if any.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        rules::winning_line(&self.board)
    }

    /// Empty positions in index order.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Hands the turn to the other marker.
    pub fn switch_active_player(&mut self) {
        self.active = self.active.opponent();
    }

    /// Clears the board and gives the first move back to X.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(moves = self.history.len(), "Resetting game");
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
