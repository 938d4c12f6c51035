//! Per-piece move generation.
//!
//! Generation is pseudo-legal: it knows nothing about whose turn it is and
//! does not check whether the mover's own king is left attacked. The move
//! engine layers turn ownership and king safety on top.

use crate::{board::Board, ruleset::Ruleset, types::*};

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// What has to happen besides moving the piece itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    /// Pawn advance by two; the square passed over becomes the en-passant target.
    DoubleStep { passed: Square },
    EnPassant { captured: Square },
    Castle { rook_from: Square, rook_to: Square },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Normal,
        }
    }
}

/// Candidate moves for the piece on `from`. Empty when `from` is empty or
/// off the board.
///
/// `en_passant` is the square a pawn skipped over on the previous half-move.
pub fn pseudo_moves(
    board: &Board,
    from: Square,
    rules: &Ruleset,
    en_passant: Option<Square>,
) -> Vec<Move> {
    let mut out = Vec::new();
    let Some(&pc) = board.piece_at(from) else {
        return out;
    };
    match pc.kind {
        PieceKind::Pawn => {
            let ep = en_passant.filter(|_| rules.en_passant);
            gen_pawn(board, &pc, ep, &mut out)
        }
        PieceKind::Knight => gen_steps(board, &pc, &KNIGHT_DELTAS, &mut out),
        PieceKind::Bishop => gen_slider(board, &pc, &DIAGONALS, &mut out),
        PieceKind::Rook => gen_slider(board, &pc, &ORTHOGONALS, &mut out),
        PieceKind::Queen => {
            gen_slider(board, &pc, &DIAGONALS, &mut out);
            gen_slider(board, &pc, &ORTHOGONALS, &mut out);
        }
        PieceKind::King => {
            gen_steps(board, &pc, &KING_DELTAS, &mut out);
            if rules.castling {
                gen_castle(board, &pc, &mut out);
            }
        }
    }
    out
}

/// Target squares of [`pseudo_moves`].
pub fn destinations(
    board: &Board,
    from: Square,
    rules: &Ruleset,
    en_passant: Option<Square>,
) -> Vec<Square> {
    pseudo_moves(board, from, rules, en_passant)
        .into_iter()
        .map(|mv| mv.to)
        .collect()
}

fn gen_pawn(board: &Board, pc: &Piece, en_passant: Option<Square>, out: &mut Vec<Move>) {
    let from = pc.position;
    let dir = pc.owner.forward();

    // forward 1, then 2 from the start rank through an empty square
    if let Some(one) = from.offset(0, dir)
        && !board.is_occupied(one)
    {
        out.push(Move::new(from, one));

        if !pc.has_moved
            && from.y == pc.owner.pawn_rank()
            && let Some(two) = from.offset(0, 2 * dir)
            && !board.is_occupied(two)
        {
            out.push(Move {
                from,
                to: two,
                kind: MoveKind::DoubleStep { passed: one },
            });
        }
    }

    // captures + en passant
    for dx in [-1, 1] {
        let Some(to) = from.offset(dx, dir) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.owner != pc.owner => out.push(Move::new(from, to)),
            Some(_) => {}
            None if en_passant == Some(to) => {
                let captured = Square::new(to.x, from.y);
                if board
                    .piece_at(captured)
                    .is_some_and(|v| v.owner != pc.owner && v.kind == PieceKind::Pawn)
                {
                    out.push(Move {
                        from,
                        to,
                        kind: MoveKind::EnPassant { captured },
                    });
                }
            }
            None => {}
        }
    }
}

fn gen_steps(board: &Board, pc: &Piece, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(dx, dy) in deltas {
        if let Some(to) = pc.position.offset(dx, dy) {
            match board.piece_at(to) {
                Some(other) if other.owner == pc.owner => {}
                _ => out.push(Move::new(pc.position, to)),
            }
        }
    }
}

fn gen_slider(board: &Board, pc: &Piece, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(dx, dy) in dirs {
        let mut cur = pc.position.offset(dx, dy);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => out.push(Move::new(pc.position, to)),
                Some(other) if other.owner != pc.owner => {
                    out.push(Move::new(pc.position, to));
                    break;
                }
                _ => break,
            }
            cur = to.offset(dx, dy);
        }
    }
}

fn gen_castle(board: &Board, king: &Piece, out: &mut Vec<Move>) {
    let rank = king.owner.back_rank();
    if king.has_moved || king.position != Square::new(4, rank) {
        return;
    }
    let enemy = king.owner.other();

    // (rook file, squares that must be empty, king destination file, rook destination file)
    let sides: [(u8, &[u8], u8, u8); 2] = [(7, &[5, 6], 6, 5), (0, &[1, 2, 3], 2, 3)];

    for (rook_file, between, king_to, rook_to) in sides {
        let rook_sq = Square::new(rook_file, rank);
        let rook_ok = board.piece_at(rook_sq).is_some_and(|r| {
            r.kind == PieceKind::Rook && r.owner == king.owner && !r.has_moved
        });
        if !rook_ok {
            continue;
        }
        if between
            .iter()
            .any(|&x| board.is_occupied(Square::new(x, rank)))
        {
            continue;
        }
        // The king may not start on, pass through or land on an attacked square.
        let (lo, hi) = (king_to.min(4), king_to.max(4));
        if (lo..=hi).any(|x| board.is_square_attacked(Square::new(x, rank), enemy)) {
            continue;
        }
        out.push(Move {
            from: king.position,
            to: Square::new(king_to, rank),
            kind: MoveKind::Castle {
                rook_from: rook_sq,
                rook_to: Square::new(rook_to, rank),
            },
        });
    }
}

/// Play `mv` on `board`, promoting a pawn that lands on its last rank to
/// `promotion`. Returns the captured piece, if any.
///
/// This is the one place where pieces move during play, so board placement
/// and piece positions cannot drift apart.
pub(crate) fn apply_move(board: &mut Board, mv: Move, promotion: PieceKind) -> Option<Piece> {
    let ep_victim = match mv.kind {
        MoveKind::EnPassant { captured } => board.remove(captured),
        _ => None,
    };
    let captured = board.relocate(mv.from, mv.to).or(ep_victim);

    if let MoveKind::Castle { rook_from, rook_to } = mv.kind {
        board.relocate(rook_from, rook_to);
    }

    if let Some(&moved) = board.piece_at(mv.to)
        && moved.kind == PieceKind::Pawn
        && mv.to.y == moved.owner.promotion_rank()
    {
        board.set_kind(mv.to, promotion);
    }

    captured
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
