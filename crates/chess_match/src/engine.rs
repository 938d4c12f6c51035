//! The move engine: the only code path that changes the board during play.

use chrono::Utc;
use tracing::debug;

use crate::game::{Match, Outcome};
use crate::movegen::{Move, MoveKind, apply_move, pseudo_moves};
use crate::selection::Selection;
use crate::types::*;

/// Result of a move attempt. An illegal attempt is `moved: false` with
/// nothing changed; it is never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub captured: Option<Piece>,
}

impl MoveOutcome {
    pub fn rejected() -> Self {
        Self {
            moved: false,
            captured: None,
        }
    }
}

impl Match {
    /// Legal moves of the piece on `from`, regardless of whose turn it is.
    /// With king safety on, moves that leave the owner's king attacked are
    /// filtered out.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        let Some(&pc) = self.board.piece_at(from) else {
            return Vec::new();
        };
        let mut moves = pseudo_moves(&self.board, from, &self.ruleset, self.en_passant);
        if self.ruleset.king_safety {
            let promotion = self.ruleset.default_promotion;
            moves.retain(|&mv| {
                let mut after = self.board.clone();
                apply_move(&mut after, mv, promotion);
                !after.in_check(pc.owner)
            });
        }
        moves
    }

    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        self.legal_moves_from(from)
            .into_iter()
            .map(|mv| mv.to)
            .collect()
    }

    pub fn has_any_legal_move(&self, c: Color) -> bool {
        self.board
            .pieces_of(c)
            .any(|pc| !self.legal_moves_from(pc.position).is_empty())
    }

    pub fn is_in_check(&self, c: Color) -> bool {
        self.board.in_check(c)
    }

    /// Move the current player's piece from `from` to `to`, promoting to the
    /// ruleset's default kind if a pawn reaches the last rank.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> MoveOutcome {
        let promotion = self.ruleset.default_promotion;
        self.attempt_move_with_promotion(from, to, promotion)
    }

    /// Like [`Match::attempt_move`] with an explicit promotion choice. The
    /// choice is ignored unless the move is a promotion, but it must always
    /// be a kind a pawn can become.
    pub fn attempt_move_with_promotion(
        &mut self,
        from: Square,
        to: Square,
        promotion: PieceKind,
    ) -> MoveOutcome {
        if self.is_over() || self.is_paused() || !promotion.is_promotion_target() {
            return MoveOutcome::rejected();
        }
        let mover = self.current_player();
        let Some(&piece) = self.board.piece_at(from) else {
            return MoveOutcome::rejected();
        };
        if piece.owner != mover {
            return MoveOutcome::rejected();
        }
        let Some(mv) = self
            .legal_moves_from(from)
            .into_iter()
            .find(|mv| mv.to == to)
        else {
            return MoveOutcome::rejected();
        };

        let captured = apply_move(&mut self.board, mv, promotion);
        if let Some(victim) = captured {
            debug!(piece = ?victim.kind, owner = %victim.owner, square = %victim.position, "captured");
            self.graveyard.bury(victim);
        }

        self.en_passant = match mv.kind {
            MoveKind::DoubleStep { passed } if self.ruleset.en_passant => Some(passed),
            _ => None,
        };
        self.turns.advance();
        self.selection = Selection::Unselected;
        self.last_move = Some((from, to));
        debug!(
            kind = ?piece.kind,
            %from,
            %to,
            turn = self.current_turn(),
            "moved"
        );

        self.detect_game_end(mover, captured);

        MoveOutcome {
            moved: true,
            captured,
        }
    }

    fn detect_game_end(&mut self, mover: Color, captured: Option<Piece>) {
        let outcome = if captured.is_some_and(|pc| pc.kind == PieceKind::King) {
            Some(Outcome::KingCaptured { winner: mover })
        } else if self.ruleset.king_safety && !self.has_any_legal_move(mover.other()) {
            if self.board.in_check(mover.other()) {
                Some(Outcome::Checkmate { winner: mover })
            } else {
                Some(Outcome::Stalemate)
            }
        } else {
            None
        };

        if let Some(outcome) = outcome {
            self.finish(outcome, Utc::now());
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
