//! End-to-end walks through a match the way a board UI drives it:
//! clicks, ticks, pause/resume, save and load.

use chess_match::{Color, Match, PieceKind, SelectOutcome, Selection, Snapshot, Square};
use std::time::Duration;

fn sq(x: u8, y: u8) -> Square {
    Square::new(x, y)
}

// =============================================================================
// Selection and moves
// =============================================================================

#[test]
fn test_pawn_opening_by_clicks() {
    let mut m = Match::new();
    assert_eq!(m.select(sq(4, 1)), SelectOutcome::Selected(sq(4, 1)));

    match m.select(sq(4, 3)) {
        SelectOutcome::Moved(out) => {
            assert!(out.moved);
            assert!(out.captured.is_none());
        }
        other => panic!("expected a move, got {other:?}"),
    }

    let pawn = m.piece_at(sq(4, 3)).expect("pawn on e4");
    assert_eq!(pawn.kind, PieceKind::Pawn);
    assert_eq!(pawn.owner, Color::White);
    assert!(m.piece_at(sq(4, 1)).is_none());
    assert_eq!(m.current_player(), Color::Black);
    assert_eq!(m.current_turn(), 1);
    assert_eq!(m.display_turn(), 2);
    assert_eq!(*m.selection(), Selection::Unselected);
}

#[test]
fn test_click_on_empty_square_does_nothing() {
    let mut m = Match::new();
    let before = m.export();
    assert_eq!(m.select(sq(3, 4)), SelectOutcome::Ignored);
    assert_eq!(*m.selection(), Selection::Unselected);
    assert_eq!(m.export(), before);
}

#[test]
fn test_double_click_cancels_selection() {
    let mut m = Match::new();
    m.select(sq(0, 0));
    assert!(m.is_selected_square(sq(0, 0)));
    assert_eq!(m.select(sq(0, 0)), SelectOutcome::Unselected);
    assert_eq!(*m.selection(), Selection::Unselected);
    assert_eq!(m.current_turn(), 0);
}

#[test]
fn test_capture_by_clicks() {
    let mut m = Match::new();
    for (from, to) in [((4, 1), (4, 3)), ((3, 6), (3, 4))] {
        m.select(sq(from.0, from.1));
        m.select(sq(to.0, to.1));
    }
    m.select(sq(4, 3));
    let out = match m.select(sq(3, 4)) {
        SelectOutcome::Moved(out) => out,
        other => panic!("expected capture, got {other:?}"),
    };

    let victim = out.captured.expect("captured pawn");
    assert_eq!(victim.owner, Color::Black);
    assert_eq!(m.removed_pieces(Color::Black).len(), 1);
    assert_eq!(m.removed_pieces(Color::Black)[0].id, victim.id);
    assert!(m.removed_pieces(Color::White).is_empty());

    let occupant = m.piece_at(sq(3, 4)).unwrap();
    assert_eq!(occupant.owner, Color::White);
    assert_eq!(occupant.kind, PieceKind::Pawn);
    assert!(m.piece_at(sq(4, 3)).is_none());
    assert!(m.check_invariants().is_ok());
}

#[test]
fn test_castling_by_clicks() {
    let mut m = Match::new();
    let script = [
        ((6, 0), (5, 2)), // Nf3
        ((6, 7), (5, 5)), // Nf6
        ((4, 1), (4, 2)), // e3
        ((4, 6), (4, 5)), // e6
        ((5, 0), (4, 1)), // Be2
        ((5, 7), (4, 6)), // Be7
    ];
    for (from, to) in script {
        m.select(sq(from.0, from.1));
        assert!(matches!(m.select(sq(to.0, to.1)), SelectOutcome::Moved(_)));
    }
    m.select(sq(4, 0));
    assert!(m.legal_destinations_from_selected().contains(&sq(6, 0)));
    assert!(matches!(m.select(sq(6, 0)), SelectOutcome::Moved(_)));
    assert_eq!(m.piece_at(sq(5, 0)).unwrap().kind, PieceKind::Rook);
    assert_eq!(m.piece_at(sq(6, 0)).unwrap().kind, PieceKind::King);
}

// =============================================================================
// Save / load
// =============================================================================

#[test]
fn test_export_then_import_into_new_match() {
    let mut m = Match::new();
    m.select(sq(4, 1));
    m.select(sq(4, 3));
    m.tick();

    let json = m.export_json().unwrap();
    let restored = Match::import_json(&json).unwrap();

    assert_eq!(restored.game_id(), m.game_id());
    assert_eq!(restored.current_player(), Color::Black);
    assert_eq!(restored.current_turn(), 1);
    assert_eq!(restored.total_time_played(), Duration::from_secs(1));
    for idx in 0..64 {
        let s = Square::new(idx % 8, idx / 8);
        assert_eq!(restored.piece_at(s), m.piece_at(s), "square {s}");
    }
    assert_eq!(restored.export(), m.export());
}

#[test]
fn test_resumed_match_plays_on_identically() {
    let mut a = Match::new();
    a.select(sq(6, 0));
    a.select(sq(5, 2));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    a.export().save(&path).unwrap();
    let mut b = Match::import(Snapshot::load(&path).unwrap()).unwrap();

    for (from, to) in [((4, 6), (4, 4)), ((5, 2), (4, 4)), ((3, 7), (6, 4))] {
        let ra = a.attempt_move(sq(from.0, from.1), sq(to.0, to.1));
        let rb = b.attempt_move(sq(from.0, from.1), sq(to.0, to.1));
        assert_eq!(ra, rb);
    }
    assert_eq!(a.export(), b.export());
}

#[test]
fn test_bad_load_keeps_current_game() {
    let mut m = Match::new();
    m.select(sq(4, 1));
    m.select(sq(4, 3));
    let before = m.export();

    let mut v: serde_json::Value = serde_json::from_str(&m.export_json().unwrap()).unwrap();
    v["board"][0]["square"]["x"] = serde_json::json!(11);
    let snapshot = Snapshot::from_json(&v.to_string()).unwrap();

    assert!(m.import_in_place(snapshot).is_err());
    assert_eq!(m.export(), before);
}

// =============================================================================
// Clock
// =============================================================================

#[test]
fn test_clock_through_pause_and_end() {
    let mut m = Match::new();
    for _ in 0..5 {
        m.tick();
    }
    m.pause();
    for _ in 0..5 {
        m.tick();
    }
    assert_eq!(m.total_time_played(), Duration::from_secs(5));
    m.resume();
    m.tick();
    assert_eq!(m.format_time_played(), "00:00:06");

    m.end_game(chrono::Utc::now());
    m.tick();
    m.pause();
    m.resume();
    m.tick();
    assert_eq!(m.total_time_played(), Duration::from_secs(6));
}
