use crate::engine::MoveOutcome;
use crate::types::{Piece, Square};

/// The square the player has picked up, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    /// `piece` is the occupant as it was when selected.
    Selected { square: Square, piece: Piece },
}

impl Selection {
    pub fn square(&self) -> Option<Square> {
        match self {
            Selection::Unselected => None,
            Selection::Selected { square, .. } => Some(*square),
        }
    }

    pub fn piece(&self) -> Option<&Piece> {
        match self {
            Selection::Unselected => None,
            Selection::Selected { piece, .. } => Some(piece),
        }
    }

    pub fn is_selected_square(&self, sq: Square) -> bool {
        self.square() == Some(sq)
    }
}

/// What a single `select` intent did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing changed: empty/opponent square with no selection, paused or
    /// finished match, or an illegal target that holds no own piece.
    Ignored,
    Selected(Square),
    /// The selected square was clicked again.
    Unselected,
    /// Illegal target holding one of the mover's pieces; it is now selected.
    Reselected(Square),
    Moved(MoveOutcome),
}
