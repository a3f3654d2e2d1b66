//! Board state representation for move validation
//!
//! The board is the ground truth for occupancy. It owns an `N×N` grid of
//! tiles, each holding at most one [`Piece`], and answers the pure geometric
//! questions the piece probes are built from: bounds, freedom, one-step and
//! two-step diagonals, king rays and recapture threats.
//!
//! `place`, `remove` and `crown` are the only mutators. Everything else is a
//! read-only query, so a cloned board doubles as a scratch position for the
//! risk model.

use std::fmt;

use tracing::trace;

use crate::game::error::{GameError, GameResult};
use crate::game::rules::piece_moves::Piece;
use crate::game::types::{Direction, Parity, PieceId, Side, Square};

/// Standard board edge length
pub const DEFAULT_BOARD_SIZE: u8 = 8;

/// A single tile of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub square: Square,
    pub playable: bool,
    pub occupant: Option<Piece>,
}

/// Geometry of a two-step capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpTarget {
    pub over: Square,
    pub landing: Square,
}

/// Geometry of a king's long-range capture along one ray
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlyCapturePath {
    /// Free squares between the king and the captured piece
    pub passed_through: Vec<Square>,
    pub captured: Square,
    /// Free squares beyond the captured piece, nearest first
    pub landings: Vec<Square>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatKind {
    /// Adjacent man able to jump in its forward direction
    Man,
    /// King anywhere along an open ray
    King,
}

/// An enemy piece able to capture on a given square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threat {
    pub attacker: Piece,
    pub kind: ThreatKind,
}

/// Represents the state of the board for move validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    parity: Parity,
    tiles: Vec<Tile>,
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

impl Board {
    /// Board with no pieces on it
    pub fn empty(size: u8, parity: Parity) -> Self {
        let mut tiles = Vec::with_capacity(size as usize * size as usize);
        for row in 0..size {
            for col in 0..size {
                tiles.push(Tile {
                    square: Square::new(row, col),
                    playable: parity.is_playable(row, col),
                    occupant: None,
                });
            }
        }
        Board {
            size,
            parity,
            tiles,
        }
    }

    /// Standard 8×8 opening position
    pub fn standard() -> Self {
        Board::new_game(DEFAULT_BOARD_SIZE, Parity::default())
    }

    /// Opening position: each side fills the playable tiles of its
    /// `size / 2 - 1` home rows. Side A's pieces get the lower ids.
    pub fn new_game(size: u8, parity: Parity) -> Self {
        let mut board = Board::empty(size, parity);
        let rows = (size / 2).saturating_sub(1);
        let mut next_id = 0u16;

        for side in Side::BOTH {
            let home_rows: Vec<u8> = match side {
                Side::A => (0..rows).collect(),
                Side::B => (size - rows..size).collect(),
            };
            for row in home_rows {
                for col in 0..size {
                    let square = Square::new(row, col);
                    if !parity.is_playable(row, col) {
                        continue;
                    }
                    let idx = board.index_of(square);
                    board.tiles[idx].occupant = Some(Piece::man(PieceId(next_id), side, square));
                    next_id += 1;
                }
            }
        }

        trace!("[BOARD] new {}x{} game with {} pieces", size, size, next_id);
        board
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    fn index_of(&self, square: Square) -> usize {
        square.row as usize * self.size as usize + square.col as usize
    }

    pub fn is_in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.size as i32 && col >= 0 && col < self.size as i32
    }

    /// Checked conversion of signed coordinates
    pub fn square_at(&self, row: i32, col: i32) -> GameResult<Square> {
        if self.is_in_bounds(row, col) {
            Ok(Square::new(row as u8, col as u8))
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }

    /// Square `distance` steps along `dir`, if still on the board
    pub fn offset(&self, from: Square, dir: Direction, distance: i32) -> Option<Square> {
        let (row, col) = from.shifted(dir, distance);
        self.square_at(row, col).ok()
    }

    pub fn tile(&self, square: Square) -> GameResult<&Tile> {
        self.check(square)?;
        Ok(&self.tiles[self.index_of(square)])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    fn check(&self, square: Square) -> GameResult<()> {
        self.square_at(square.row as i32, square.col as i32).map(|_| ())
    }

    pub fn is_playable(&self, square: Square) -> bool {
        self.tile(square).map(|tile| tile.playable).unwrap_or(false)
    }

    /// In bounds and unoccupied
    pub fn is_free(&self, square: Square) -> bool {
        self.tile(square)
            .map(|tile| tile.occupant.is_none())
            .unwrap_or(false)
    }

    pub fn occupant(&self, square: Square) -> Option<&Piece> {
        self.tile(square).ok().and_then(|tile| tile.occupant.as_ref())
    }

    pub fn occupant_side(&self, square: Square) -> Option<Side> {
        self.occupant(square).map(|piece| piece.side)
    }

    /// Put `piece` on `square`, updating its position
    pub fn place(&mut self, mut piece: Piece, square: Square) -> GameResult<Piece> {
        let tile = self.tile(square)?;
        if !tile.playable {
            return Err(GameError::illegal(format!("square {square} is not playable")));
        }
        if tile.occupant.is_some() {
            return Err(GameError::SquareOccupied { square });
        }
        piece.position = square;
        let idx = self.index_of(square);
        self.tiles[idx].occupant = Some(piece);
        Ok(piece)
    }

    /// Take the piece off `square`
    pub fn remove(&mut self, square: Square) -> GameResult<Piece> {
        self.check(square)?;
        let idx = self.index_of(square);
        self.tiles[idx]
            .occupant
            .take()
            .ok_or(GameError::EmptySquare { square })
    }

    /// Promote the piece on `square` to king
    pub fn crown(&mut self, square: Square) -> GameResult<Piece> {
        self.check(square)?;
        let idx = self.index_of(square);
        let piece = self.tiles[idx]
            .occupant
            .as_mut()
            .ok_or(GameError::EmptySquare { square })?;
        piece.is_king = true;
        Ok(*piece)
    }

    pub fn find(&self, id: PieceId) -> Option<&Piece> {
        self.tiles
            .iter()
            .filter_map(|tile| tile.occupant.as_ref())
            .find(|piece| piece.id == id)
    }

    /// Pieces of `side` in row-major order
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.tiles
            .iter()
            .filter_map(|tile| tile.occupant.as_ref())
            .filter(move |piece| piece.side == side)
    }

    pub fn count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }

    /// One-step diagonal destination; men may only step forward
    pub fn step_move_target(
        &self,
        side: Side,
        king: bool,
        from: Square,
        dir: Direction,
    ) -> Option<Square> {
        if !king && dir.dr != side.forward() {
            return None;
        }
        self.offset(from, dir, 1)
            .filter(|target| self.is_free(*target))
    }

    /// Two-step capture over an adjacent opponent onto a free tile
    pub fn jump_target(&self, side: Side, from: Square, dir: Direction) -> Option<JumpTarget> {
        let over = self.offset(from, dir, 1)?;
        let landing = self.offset(from, dir, 2)?;
        if self.occupant_side(over) == Some(side.opponent()) && self.is_free(landing) {
            Some(JumpTarget { over, landing })
        } else {
            None
        }
    }

    /// Free extent of the ray from `from` along `dir`, nearest first
    pub fn fly_path(&self, from: Square, dir: Direction) -> Vec<Square> {
        let mut path = Vec::new();
        let mut distance = 1;
        while let Some(square) = self.offset(from, dir, distance) {
            if !self.is_free(square) {
                break;
            }
            path.push(square);
            distance += 1;
        }
        path
    }

    /// Long-range capture along one ray: free squares, exactly one opponent
    /// piece, then at least one free landing square
    pub fn fly_capture_path(
        &self,
        side: Side,
        from: Square,
        dir: Direction,
    ) -> Option<FlyCapturePath> {
        let mut passed_through = Vec::new();
        let mut distance = 1;
        let captured = loop {
            let square = self.offset(from, dir, distance)?;
            match self.occupant_side(square) {
                None => passed_through.push(square),
                Some(owner) if owner == side.opponent() => break square,
                Some(_) => return None,
            }
            distance += 1;
        };

        let mut landings = Vec::new();
        distance += 1;
        while let Some(square) = self.offset(from, dir, distance) {
            if !self.is_free(square) {
                break;
            }
            landings.push(square);
            distance += 1;
        }

        if landings.is_empty() {
            return None;
        }
        Some(FlyCapturePath {
            passed_through,
            captured,
            landings,
        })
    }

    /// Most severe enemy threat against a piece standing on `square`
    ///
    /// Looks outward along the four rays. A king of `attacker` found as the
    /// first piece on a ray threatens the square when the tile behind it
    /// (on the opposite side) is free; an adjacent man threatens it only when
    /// that jump is in the man's forward direction. King threats win.
    pub fn find_threatening_piece(&self, square: Square, attacker: Side) -> Option<Threat> {
        let mut man_threat = None;

        for dir in Direction::ALL {
            let Some(landing) = self.offset(square, dir.reversed(), 1) else {
                continue;
            };
            if !self.is_free(landing) {
                continue;
            }

            let mut distance = 1;
            while let Some(probe) = self.offset(square, dir, distance) {
                let Some(piece) = self.occupant(probe) else {
                    distance += 1;
                    continue;
                };
                if piece.side == attacker {
                    if piece.is_king {
                        return Some(Threat {
                            attacker: *piece,
                            kind: ThreatKind::King,
                        });
                    }
                    if distance == 1 && piece.side.forward() == -dir.dr && man_threat.is_none() {
                        man_threat = Some(Threat {
                            attacker: *piece,
                            kind: ThreatKind::Man,
                        });
                    }
                }
                break;
            }
        }

        man_threat
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.size {
            write!(f, " {}", col % 10)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>2}", row)?;
            for col in 0..self.size {
                let tile = &self.tiles[self.index_of(Square::new(row, col))];
                let symbol = match (&tile.occupant, tile.playable) {
                    (Some(piece), _) => piece.symbol(),
                    (None, true) => '.',
                    (None, false) => ' ',
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
