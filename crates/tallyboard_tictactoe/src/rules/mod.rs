//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. They are kept apart from
//! [`GameState`](crate::GameState) so a board can be judged without a game
//! around it.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, winning_line};

use tracing::instrument;

use crate::types::{Board, GameStatus};

/// Evaluates the board.
///
/// Lines are checked first, so a full board that also holds a winning line
/// is a win, never a draw.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameStatus {
    match check_winner(board) {
        Some(winner) => GameStatus::Won(winner),
        None if is_draw(board) => GameStatus::Draw,
        None => GameStatus::InProgress,
    }
}
