//! Type definitions and utilities for checkers game logic
//!
//! Provides newtype patterns and small value types for board coordinates,
//! sides, diagonal directions and the playable-tile parity so the rest of the
//! engine never passes bare integer tuples around.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board square position (row, col)
///
/// Rows grow from side A's home edge (row 0) toward side B's home edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Create a square from row and column indices
    ///
    /// # Examples
    ///
    /// ```rust
    /// use xfcheckers::game::types::Square;
    ///
    /// let square = Square::new(2, 1);
    /// assert_eq!(square.to_tuple(), (2, 1));
    /// ```
    pub const fn new(row: u8, col: u8) -> Self {
        Square { row, col }
    }

    /// Convert to tuple (row, col)
    pub fn to_tuple(self) -> (u8, u8) {
        (self.row, self.col)
    }

    /// Step `distance` squares along `dir`, returning signed coordinates
    ///
    /// The result may lie off the board; bounds are the board's concern.
    pub fn shifted(self, dir: Direction, distance: i32) -> (i32, i32) {
        (
            self.row as i32 + dir.dr as i32 * distance,
            self.col as i32 + dir.dc as i32 * distance,
        )
    }
}

impl From<(u8, u8)> for Square {
    fn from((row, col): (u8, u8)) -> Self {
        Square::new(row, col)
    }
}

impl From<Square> for (u8, u8) {
    fn from(square: Square) -> Self {
        square.to_tuple()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// Starts on rows 0.. and moves toward the last row
    A,
    /// Starts on the last rows and moves toward row 0
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Row delta of a forward step for this side's men
    pub fn forward(self) -> i8 {
        match self {
            Side::A => 1,
            Side::B => -1,
        }
    }

    /// Row on which this side's men are crowned
    pub fn king_row(self, board_size: u8) -> u8 {
        match self {
            Side::A => board_size - 1,
            Side::B => 0,
        }
    }

    /// Edge this side starts from
    pub fn home_row(self, board_size: u8) -> u8 {
        self.opponent().king_row(board_size)
    }

    /// Index into per-side arrays
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Unit diagonal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dr: i8,
    pub dc: i8,
}

impl Direction {
    /// Fixed scan order used by every probe
    pub const ALL: [Direction; 4] = [
        Direction { dr: -1, dc: -1 },
        Direction { dr: -1, dc: 1 },
        Direction { dr: 1, dc: -1 },
        Direction { dr: 1, dc: 1 },
    ];

    pub const fn new(dr: i8, dc: i8) -> Self {
        Direction { dr, dc }
    }

    pub fn reversed(self) -> Direction {
        Direction {
            dr: -self.dr,
            dc: -self.dc,
        }
    }

    /// Directions a piece may travel in: all four for kings, forward two for men
    pub fn for_piece(side: Side, is_king: bool) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |dir| is_king || dir.dr == side.forward())
    }
}

/// Which colour of the checkerboard pattern holds pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    /// `(row + col)` even
    Even,
    /// `(row + col)` odd
    #[default]
    Odd,
}

impl Parity {
    pub fn is_playable(self, row: u8, col: u8) -> bool {
        let sum = (row as u16 + col as u16) % 2;
        match self {
            Parity::Even => sum == 0,
            Parity::Odd => sum == 1,
        }
    }
}

/// Stable identity of a piece for the duration of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u16);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
