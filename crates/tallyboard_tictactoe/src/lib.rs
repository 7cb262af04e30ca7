//! Pure tic-tac-toe game logic.
//!
//! The engine owns the board, the active marker, and the rules that decide
//! whether a move is legal and whether the game has ended. It performs no
//! I/O and knows nothing about persistence; a controller drives it one move
//! at a time.
//!
//! # Example
//!
//! ```
//! use tallyboard_tictactoe::{GameState, GameStatus, Marker};
//!
//! let mut game = GameState::new();
//! for index in [0, 3, 1, 4, 2] {
//!     assert!(game.apply_move(index).applied);
//!     if game.check_outcome().is_terminal() {
//!         break;
//!     }
//!     game.switch_active_player();
//! }
//! assert_eq!(game.check_outcome(), GameStatus::Won(Marker::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod position;
pub mod rules;
mod types;

pub use game::{GameState, MoveResult};
pub use position::Position;
pub use types::{Board, BoardParseError, GameStatus, Marker, Square};
