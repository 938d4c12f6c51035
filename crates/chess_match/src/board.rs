use crate::movegen::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::types::*;

const SQUARE_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 8x8 grid holding at most one piece per square.
///
/// Every occupant's `position` equals the square it sits on. `place` and
/// `relocate` are the only writers and both maintain that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; SQUARE_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [None; SQUARE_COUNT],
        }
    }

    /// Standard starting position. Ids are handed out in placement order:
    /// White's back rank, White's pawns, Black's pawns, Black's back rank.
    pub fn standard() -> Self {
        let mut b = Board::empty();
        let mut next_id = 0u32;
        let mut put = |b: &mut Board, kind: PieceKind, owner: Color, x: u8, y: u8| {
            let sq = Square::new(x, y);
            b.place(Piece::new(next_id, kind, owner, sq), sq);
            next_id += 1;
        };

        for (x, &kind) in BACK_RANK.iter().enumerate() {
            put(&mut b, kind, Color::White, x as u8, Color::White.back_rank());
        }
        for x in 0..BOARD_SIZE {
            put(&mut b, PieceKind::Pawn, Color::White, x, Color::White.pawn_rank());
        }
        for x in 0..BOARD_SIZE {
            put(&mut b, PieceKind::Pawn, Color::Black, x, Color::Black.pawn_rank());
        }
        for (x, &kind) in BACK_RANK.iter().enumerate() {
            put(&mut b, kind, Color::Black, x as u8, Color::Black.back_rank());
        }
        b
    }

    /// Put `piece` on `sq`, overwriting whatever was there. The piece's
    /// position is rewritten to `sq`. Returns the previous occupant.
    ///
    /// Meant for setup and import; normal play goes through the move engine.
    /// Off-board squares are ignored.
    pub fn place(&mut self, mut piece: Piece, sq: Square) -> Option<Piece> {
        let idx = sq.index()?;
        piece.position = sq;
        self.squares[idx].replace(piece)
    }

    /// Occupant of `sq`; `None` for empty or off-board squares.
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.index()?].as_ref()
    }

    /// Like [`Board::piece_at`] but for signed coordinates, so border lookups
    /// such as `(-1, 3)` simply come back empty.
    pub fn piece_at_xy(&self, x: i8, y: i8) -> Option<&Piece> {
        self.piece_at(Square::from_xy(x, y)?)
    }

    pub fn is_occupied(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some()
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()?].take()
    }

    /// Move the occupant of `from` onto `to`, marking it as moved and
    /// updating its position. Returns whatever stood on `to`.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let to_idx = to.index()?;
        let mut piece = self.remove(from)?;
        piece.position = to;
        piece.has_moved = true;
        self.squares[to_idx].replace(piece)
    }

    pub(crate) fn set_kind(&mut self, sq: Square, kind: PieceKind) {
        if let Some(idx) = sq.index()
            && let Some(pc) = self.squares[idx].as_mut()
        {
            pc.kind = kind;
        }
    }

    /// All occupants in square order (a1, b1, ..., h8).
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }

    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |pc| pc.owner == c)
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces_of(c)
            .find(|pc| pc.kind == PieceKind::King)
            .map(|pc| pc.position)
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_square(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// Whether any piece of `by` attacks `target`. Occupancy of `target`
    /// itself does not matter.
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let hit = |sq: Option<Square>, kinds: &[PieceKind]| {
            sq.and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.owner == by && kinds.contains(&pc.kind))
        };

        // A pawn of `by` attacks diagonally forward, so look one step backward.
        let back = -by.forward();
        if hit(target.offset(-1, back), &[PieceKind::Pawn])
            || hit(target.offset(1, back), &[PieceKind::Pawn])
        {
            return true;
        }

        if KNIGHT_DELTAS
            .iter()
            .any(|&(dx, dy)| hit(target.offset(dx, dy), &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_DELTAS
            .iter()
            .any(|&(dx, dy)| hit(target.offset(dx, dy), &[PieceKind::King]))
        {
            return true;
        }

        self.slider_hits(target, by, &DIAGONALS, &[PieceKind::Bishop, PieceKind::Queen])
            || self.slider_hits(target, by, &ORTHOGONALS, &[PieceKind::Rook, PieceKind::Queen])
    }

    fn slider_hits(
        &self,
        target: Square,
        by: Color,
        dirs: &[(i8, i8)],
        kinds: &[PieceKind],
    ) -> bool {
        for &(dx, dy) in dirs {
            let mut cur = target.offset(dx, dy);
            while let Some(sq) = cur {
                if let Some(pc) = self.piece_at(sq) {
                    if pc.owner == by && kinds.contains(&pc.kind) {
                        return true;
                    }
                    break;
                }
                cur = sq.offset(dx, dy);
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
