use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board.
pub const BOARD_SIZE: u8 = 8;

/// The two players. White (0) always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    pub fn from_idx(idx: u8) -> Option<Color> {
        match idx {
            0 => Some(Color::White),
            1 => Some(Color::Black),
            _ => None,
        }
    }

    /// Rank holding this side's king and rooks at the start.
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
    pub fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }
    pub fn promotion_rank(self) -> u8 {
        self.other().back_rank()
    }
    /// Direction pawns of this side advance along `y`.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl From<Color> for u8 {
    fn from(c: Color) -> u8 {
        c.idx() as u8
    }
}

impl TryFrom<u8> for Color {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Color::from_idx(v).ok_or_else(|| format!("player must be 0 or 1, got {v}"))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may turn into on the last rank.
    pub fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// A board coordinate. `x` is the file (0 = a), `y` the rank (0 = White's back rank).
///
/// Coordinates are not range-checked on construction: off-board squares are
/// representable so that callers can look around freely, and every board lookup
/// treats them as empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Build a square from signed coordinates, `None` when off the board.
    pub fn from_xy(x: i8, y: i8) -> Option<Square> {
        if (0..BOARD_SIZE as i8).contains(&x) && (0..BOARD_SIZE as i8).contains(&y) {
            Some(Square::new(x as u8, y as u8))
        } else {
            None
        }
    }

    pub fn is_on_board(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Flat index into a 64-entry array, `None` when off the board.
    pub fn index(self) -> Option<usize> {
        self.is_on_board()
            .then(|| self.y as usize * BOARD_SIZE as usize + self.x as usize)
    }

    pub fn from_index(idx: usize) -> Square {
        Square::new((idx % BOARD_SIZE as usize) as u8, (idx / BOARD_SIZE as usize) as u8)
    }

    pub fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        if !self.is_on_board() {
            return None;
        }
        Square::from_xy(self.x as i8 + dx, self.y as i8 + dy)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            let file = (b'a' + self.x) as char;
            let rank = (b'1' + self.y) as char;
            write!(f, "{file}{rank}")
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// Stable identity of a piece for the whole match, including after capture
/// or promotion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub owner: Color,
    pub has_moved: bool,
    pub position: Square,
}

impl Piece {
    pub fn new(id: u32, kind: PieceKind, owner: Color, position: Square) -> Self {
        Self {
            id: PieceId(id),
            kind,
            owner,
            has_moved: false,
            position,
        }
    }
}
