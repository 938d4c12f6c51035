//! Portable match snapshots (export / import).
//!
//! A snapshot is a JSON document with camelCase keys. `totalTimePlayed` is
//! in milliseconds and timestamps are RFC 3339. Selection is never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::board::Board;
use crate::clock::{MatchClock, TurnTracker};
use crate::error::{MatchError, Result};
use crate::game::{Match, Outcome};
use crate::graveyard::Graveyard;
use crate::ruleset::Ruleset;
use crate::selection::Selection;
use crate::types::*;

pub const SNAPSHOT_VERSION: u32 = 1;

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

/// One piece, on the board or in a graveyard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceRecord {
    pub id: PieceId,
    pub square: Square,
    pub piece_type: PieceKind,
    pub owner: u8,
    pub has_moved: bool,
}

impl From<&Piece> for PieceRecord {
    fn from(pc: &Piece) -> Self {
        Self {
            id: pc.id,
            square: pc.position,
            piece_type: pc.kind,
            owner: pc.owner.idx() as u8,
            has_moved: pc.has_moved,
        }
    }
}

impl PieceRecord {
    fn to_piece(self) -> Result<Piece> {
        let owner = Color::from_idx(self.owner).ok_or_else(|| {
            MatchError::malformed(format!("piece {:?} has owner {}", self.id, self.owner))
        })?;
        if !self.square.is_on_board() {
            return Err(MatchError::malformed(format!(
                "piece {:?} is off the board at {}",
                self.id, self.square
            )));
        }
        Ok(Piece {
            id: self.id,
            kind: self.piece_type,
            owner,
            has_moved: self.has_moved,
            position: self.square,
        })
    }
}

/// Complete, self-contained state of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "current_version")]
    pub version: u32,
    pub game_id: String,
    pub board: Vec<PieceRecord>,
    /// Indexed by the player who lost the pieces, in capture order.
    pub graveyard: [Vec<PieceRecord>; 2],
    pub current_player: u8,
    pub current_turn: u32,
    /// Milliseconds.
    pub total_time_played: u64,
    #[serde(default)]
    pub game_started_at: Option<DateTime<Utc>>,
    pub game_ended_at: Option<DateTime<Utc>>,
    pub paused: bool,
    #[serde(default)]
    pub en_passant: Option<Square>,
    #[serde(default)]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub ruleset: Ruleset,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot. Anything that does not decode, including missing
    /// fields and negative numbers, is reported as a malformed snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MatchError::malformed(e.to_string()))
    }

    /// Save snapshot to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

impl Match {
    /// Capture the whole match. Pure: reads nothing but `self`.
    pub fn export(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            game_id: self.game_id.clone(),
            board: self.board.pieces().map(PieceRecord::from).collect(),
            graveyard: [Color::White, Color::Black]
                .map(|c| self.graveyard.removed_pieces(c).iter().map(PieceRecord::from).collect()),
            current_player: self.current_player().idx() as u8,
            current_turn: self.current_turn(),
            total_time_played: self.clock.played_ms(),
            game_started_at: Some(self.clock.started_at()),
            game_ended_at: self.clock.ended_at(),
            paused: self.clock.is_paused(),
            en_passant: self.en_passant,
            outcome: self.outcome,
            ruleset: self.ruleset,
        }
    }

    pub fn export_json(&self) -> Result<String> {
        let json = self.export().to_json()?;
        info!(game_id = %self.game_id, turn = self.current_turn(), "match exported");
        Ok(json)
    }

    /// Rebuild a match from a snapshot. The selection starts out empty.
    pub fn import(snapshot: Snapshot) -> Result<Match> {
        match restore(snapshot) {
            Ok(m) => {
                info!(game_id = %m.game_id, turn = m.current_turn(), "match imported");
                Ok(m)
            }
            Err(e) => {
                warn!(error = %e, "snapshot rejected");
                Err(e)
            }
        }
    }

    pub fn import_json(json: &str) -> Result<Match> {
        Self::import(Snapshot::from_json(json)?)
    }

    /// Replace this match with the one in `snapshot`. On error `self` is
    /// left exactly as it was.
    pub fn import_in_place(&mut self, snapshot: Snapshot) -> Result<()> {
        *self = Self::import(snapshot)?;
        Ok(())
    }
}

fn restore(s: Snapshot) -> Result<Match> {
    if s.version == 0 || s.version > SNAPSHOT_VERSION {
        return Err(MatchError::malformed(format!(
            "unsupported snapshot version {}",
            s.version
        )));
    }
    if s.game_id.trim().is_empty() {
        return Err(MatchError::malformed("empty gameId"));
    }
    let current_player = Color::from_idx(s.current_player).ok_or_else(|| {
        MatchError::malformed(format!("currentPlayer must be 0 or 1, got {}", s.current_player))
    })?;
    s.ruleset
        .validate()
        .map_err(|e| MatchError::malformed(e.to_string()))?;

    let mut ids = HashSet::new();
    let mut board = Board::empty();
    for rec in &s.board {
        let pc = rec.to_piece()?;
        if !ids.insert(pc.id) {
            return Err(MatchError::malformed(format!("duplicate piece id {:?}", pc.id)));
        }
        if pc.kind == PieceKind::Pawn && (pc.position.y == 0 || pc.position.y == BOARD_SIZE - 1) {
            return Err(MatchError::malformed(format!(
                "pawn {:?} stands on back rank square {}",
                pc.id, pc.position
            )));
        }
        if board.place(pc, pc.position).is_some() {
            return Err(MatchError::malformed(format!(
                "two pieces on {}",
                pc.position
            )));
        }
    }

    let mut graveyard = Graveyard::new();
    for (idx, pile) in s.graveyard.iter().enumerate() {
        for rec in pile {
            let pc = rec.to_piece()?;
            if pc.owner.idx() != idx {
                return Err(MatchError::malformed(format!(
                    "piece {:?} of player {} filed in graveyard {}",
                    pc.id,
                    pc.owner.idx(),
                    idx
                )));
            }
            if !ids.insert(pc.id) {
                return Err(MatchError::malformed(format!("duplicate piece id {:?}", pc.id)));
            }
            graveyard.bury(pc);
        }
    }

    for c in [Color::White, Color::Black] {
        let kings = board
            .pieces_of(c)
            .filter(|pc| pc.kind == PieceKind::King)
            .count();
        if kings > 1 || (kings == 0 && s.game_ended_at.is_none()) {
            return Err(MatchError::malformed(format!("{c} has {kings} kings on the board")));
        }
    }

    if let Some(ep) = s.en_passant {
        validate_en_passant(&board, ep, current_player)?;
    }

    if s.outcome.is_some() && s.game_ended_at.is_none() {
        return Err(MatchError::malformed("outcome given for a game that has not ended"));
    }
    let outcome = match s.game_ended_at {
        Some(_) => Some(s.outcome.unwrap_or(Outcome::Ended)),
        None => None,
    };

    if s.ruleset.king_safety
        && s.game_ended_at.is_none()
        && board.in_check(current_player.other())
    {
        return Err(MatchError::malformed(format!(
            "{} is in check but it is {current_player} to move",
            current_player.other()
        )));
    }

    let started_at = s.game_started_at.unwrap_or_else(Utc::now);
    let m = Match {
        game_id: s.game_id,
        board,
        graveyard,
        selection: Selection::Unselected,
        turns: TurnTracker::new(current_player, s.current_turn),
        clock: MatchClock::restore(s.total_time_played, s.paused, started_at, s.game_ended_at),
        ruleset: s.ruleset,
        en_passant: s.en_passant,
        outcome,
        last_move: None,
    };

    // A live move would already have ended this game.
    if m.ruleset.king_safety && !m.is_over() && !m.has_any_legal_move(current_player) {
        return Err(MatchError::malformed(format!(
            "{current_player} has no legal move in an unfinished game"
        )));
    }
    Ok(m)
}

/// The target must be the empty square just behind a pawn of the side that
/// moved last, on that pawn's double-step rank.
fn validate_en_passant(board: &Board, ep: Square, to_move: Color) -> Result<()> {
    let pusher = to_move.other();
    let expected_rank = pusher.pawn_rank() as i8 + pusher.forward();
    let pawn_sq = ep.offset(0, pusher.forward());
    let pawn_ok = pawn_sq
        .and_then(|sq| board.piece_at(sq))
        .is_some_and(|pc| pc.owner == pusher && pc.kind == PieceKind::Pawn);

    if !ep.is_on_board() || ep.y as i8 != expected_rank || board.is_occupied(ep) || !pawn_ok {
        return Err(MatchError::malformed(format!(
            "en passant target {ep} does not match the board"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
