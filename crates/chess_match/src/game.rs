//! The match aggregate: everything that makes up one game session.
//!
//! A `Match` is an ordinary owned value. The host keeps it and hands
//! `&mut Match` to each intent; nothing here is global or shared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::board::Board;
use crate::clock::{MatchClock, TurnTracker};
use crate::graveyard::Graveyard;
use crate::ruleset::Ruleset;
use crate::selection::{SelectOutcome, Selection};
use crate::types::*;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    /// Only reachable with king safety switched off.
    KingCaptured { winner: Color },
    /// Ended by the host without a decision on the board.
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub(crate) game_id: String,
    pub(crate) board: Board,
    pub(crate) graveyard: Graveyard,
    pub(crate) selection: Selection,
    pub(crate) turns: TurnTracker,
    pub(crate) clock: MatchClock,
    pub(crate) ruleset: Ruleset,
    pub(crate) en_passant: Option<Square>,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) last_move: Option<(Square, Square)>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// Fresh game from the standard starting position.
    pub fn new() -> Self {
        Self::with_ruleset(Ruleset::default())
    }

    pub fn with_ruleset(ruleset: Ruleset) -> Self {
        let m = Self::from_board(Board::standard(), ruleset);
        info!(game_id = %m.game_id, "new match");
        m
    }

    /// Start a game from an arbitrary setup with White to move.
    pub fn from_board(board: Board, ruleset: Ruleset) -> Self {
        Self {
            game_id: Uuid::new_v4().to_string(),
            board,
            graveyard: Graveyard::new(),
            selection: Selection::Unselected,
            turns: TurnTracker::default(),
            clock: MatchClock::new(Utc::now()),
            ruleset,
            en_passant: None,
            outcome: None,
            last_move: None,
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.board.piece_at(sq)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected_square(&self, sq: Square) -> bool {
        self.selection.is_selected_square(sq)
    }

    /// Where the selected piece may go, for highlighting.
    pub fn legal_destinations_from_selected(&self) -> Vec<Square> {
        match self.selection.square() {
            Some(sq) => self.legal_destinations(sq),
            None => Vec::new(),
        }
    }

    pub fn current_player(&self) -> Color {
        self.turns.current_player()
    }

    pub fn current_turn(&self) -> u32 {
        self.turns.current_turn()
    }

    pub fn display_turn(&self) -> u32 {
        self.turns.display_turn()
    }

    pub fn total_time_played(&self) -> Duration {
        self.clock.total_time_played()
    }

    pub fn format_time_played(&self) -> String {
        self.clock.format_time_played()
    }

    pub fn removed_pieces(&self, owner: Color) -> &[Piece] {
        self.graveyard.removed_pieces(owner)
    }

    pub fn graveyard(&self) -> &Graveyard {
        &self.graveyard
    }

    pub fn game_started_at(&self) -> DateTime<Utc> {
        self.clock.started_at()
    }

    pub fn game_ended_at(&self) -> Option<DateTime<Utc>> {
        self.clock.ended_at()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn is_over(&self) -> bool {
        self.clock.ended_at().is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Handle a click on `sq`: select, unselect, reselect or move.
    pub fn select(&mut self, sq: Square) -> SelectOutcome {
        if self.is_paused() || self.is_over() {
            return SelectOutcome::Ignored;
        }

        let mover = self.current_player();
        let own_piece = self.board.piece_at(sq).filter(|pc| pc.owner == mover).copied();

        let current = self.selection;
        match current {
            Selection::Unselected => match own_piece {
                Some(piece) => {
                    self.selection = Selection::Selected { square: sq, piece };
                    debug!(square = %sq, "selected");
                    SelectOutcome::Selected(sq)
                }
                None => SelectOutcome::Ignored,
            },
            Selection::Selected { square, .. } if square == sq => {
                self.selection = Selection::Unselected;
                debug!(square = %sq, "unselected");
                SelectOutcome::Unselected
            }
            Selection::Selected { square, .. } => {
                let outcome = self.attempt_move(square, sq);
                if outcome.moved {
                    return SelectOutcome::Moved(outcome);
                }
                match own_piece {
                    Some(piece) => {
                        self.selection = Selection::Selected { square: sq, piece };
                        debug!(from = %square, square = %sq, "reselected");
                        SelectOutcome::Reselected(sq)
                    }
                    None => SelectOutcome::Ignored,
                }
            }
        }
    }

    pub fn unselect(&mut self) {
        self.selection = Selection::Unselected;
    }

    // ---------------------------------------------------------------------
    // Clock
    // ---------------------------------------------------------------------

    /// One second of play, as delivered by the host's timer.
    pub fn tick(&mut self) -> bool {
        self.clock.tick()
    }

    pub fn update_time_played(&mut self, elapsed: Duration) -> bool {
        self.clock.update_time_played(elapsed)
    }

    /// Freeze the clock and drop any selection. The match stays in progress.
    pub fn pause(&mut self) {
        self.selection = Selection::Unselected;
        if self.clock.pause() {
            info!(game_id = %self.game_id, "match paused");
        }
    }

    pub fn resume(&mut self) {
        self.selection = Selection::Unselected;
        if self.clock.resume() {
            info!(game_id = %self.game_id, "match resumed");
        }
    }

    /// End the game at `at`. Has no effect if it already ended.
    pub fn end_game(&mut self, at: DateTime<Utc>) -> bool {
        self.finish(Outcome::Ended, at)
    }

    pub(crate) fn finish(&mut self, outcome: Outcome, at: DateTime<Utc>) -> bool {
        if !self.clock.end(at) {
            return false;
        }
        self.outcome = Some(outcome);
        self.selection = Selection::Unselected;
        info!(game_id = %self.game_id, ?outcome, "match over");
        true
    }

    // ---------------------------------------------------------------------
    // Invariants
    // ---------------------------------------------------------------------

    /// Check the structural invariants that every reachable match satisfies.
    ///
    /// The public API never produces a violation; this exists so tests can
    /// assert that.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut ids = std::collections::HashSet::new();

        for idx in 0..64 {
            let sq = Square::from_index(idx);
            if let Some(pc) = self.board.piece_at(sq) {
                if pc.position != sq {
                    return Err(format!("piece {:?} on {sq} thinks it is on {}", pc.id, pc.position));
                }
                if !ids.insert(pc.id) {
                    return Err(format!("piece id {:?} appears twice", pc.id));
                }
            }
        }

        for owner in [Color::White, Color::Black] {
            for pc in self.graveyard.removed_pieces(owner) {
                if pc.owner != owner {
                    return Err(format!("piece {:?} filed under the wrong player", pc.id));
                }
                if !ids.insert(pc.id) {
                    return Err(format!("captured piece id {:?} is still in play", pc.id));
                }
            }
        }

        for c in [Color::White, Color::Black] {
            let kings = self
                .board
                .pieces_of(c)
                .filter(|pc| pc.kind == PieceKind::King)
                .count();
            if kings > 1 {
                return Err(format!("{c} has {kings} kings"));
            }
        }

        if let Selection::Selected { square, piece } = self.selection {
            match self.board.piece_at(square) {
                Some(pc) if pc.id == piece.id && pc.owner == self.current_player() => {}
                _ => return Err(format!("selection on {square} is stale")),
            }
        }

        if self.outcome.is_some() != self.clock.ended_at().is_some() {
            return Err("outcome and end timestamp disagree".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
