//! Core domain types for tic-tac-toe.

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Marker identifying the cells a player has claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Marker {
    /// Marker X (always moves first).
    #[display("X")]
    X,
    /// Marker O.
    #[display("O")]
    O,
}

impl Marker {
    /// Returns the other marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square claimed by a marker.
    Occupied(Marker),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Claims a square. Only the engine writes squares, and only empty ones.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if the square at `pos` is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns true when no empty square remains.
    pub fn is_full(&self) -> bool {
        crate::rules::is_full(self)
    }
}

impl fmt::Display for Board {
    /// Renders the grid with keypad numbers (1-9) in empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, position) in Position::ALL.iter().enumerate() {
            match self.get(*position) {
                Square::Empty => write!(f, " {} ", position.keypad())?,
                Square::Occupied(marker) => write!(f, " {marker} ")?,
            }
            match index % 3 {
                2 if index < 8 => f.write_str("\n---+---+---\n")?,
                2 => {}
                _ => f.write_str("|")?,
            }
        }
        Ok(())
    }
}

/// Error returned when a board layout string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// A character other than a marker, an empty-cell symbol, or a separator.
    #[display("unexpected character '{_0}' in board layout")]
    UnexpectedChar(#[error(not(source))] char),
    /// The layout did not describe exactly nine cells.
    #[display("board layout has {_0} cells, expected 9")]
    WrongLength(#[error(not(source))] usize),
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses a row-major layout such as `"XXX......"` or `"X O|_ X _|O _ _"`.
    ///
    /// `X`/`O` (any case) are markers; `.`, `_` and `-` are empty cells.
    /// Whitespace and `|` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(9);
        for c in s.chars() {
            let square = match c {
                'X' | 'x' => Square::Occupied(Marker::X),
                'O' | 'o' => Square::Occupied(Marker::O),
                '.' | '_' | '-' => Square::Empty,
                '|' => continue,
                c if c.is_whitespace() => continue,
                other => return Err(BoardParseError::UnexpectedChar(other)),
            };
            cells.push(square);
        }

        let squares: [Square; 9] = cells
            .try_into()
            .map_err(|cells: Vec<Square>| BoardParseError::WrongLength(cells.len()))?;
        Ok(Self { squares })
    }
}

/// Result of evaluating the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No winning line and at least one empty square.
    InProgress,
    /// A marker claimed a full line.
    Won(Marker),
    /// Board is full with no winning line.
    Draw,
}

impl GameStatus {
    /// Returns true for a win or a draw.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winning marker, if any.
    pub fn winner(self) -> Option<Marker> {
        match self {
            GameStatus::Won(marker) => Some(marker),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}
