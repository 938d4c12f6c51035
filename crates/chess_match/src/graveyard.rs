use crate::types::{Color, Piece};

/// Captured pieces, one ledger per player.
///
/// A piece is filed under its *owner*: `removed_pieces(White)` lists the
/// white pieces Black has taken, in capture order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graveyard {
    removed: [Vec<Piece>; 2],
}

impl Graveyard {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bury(&mut self, piece: Piece) {
        self.removed[piece.owner.idx()].push(piece);
    }

    pub fn removed_pieces(&self, owner: Color) -> &[Piece] {
        &self.removed[owner.idx()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.removed.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.removed.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
