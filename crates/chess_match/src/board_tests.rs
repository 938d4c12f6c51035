use super::*;

#[test]
fn test_standard_setup() {
    let b = Board::standard();
    assert_eq!(b.pieces().count(), 32);
    assert_eq!(b.pieces_of(Color::White).count(), 16);

    let king = b.piece_at(Square::new(4, 0)).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(king.owner, Color::White);
    assert_eq!(b.king_square(Color::Black), Some(Square::new(4, 7)));

    // ids are unique and follow placement order
    let mut ids: Vec<u32> = b.pieces().map(|pc| pc.id.0).collect();
    ids.sort();
    assert_eq!(ids, (0..32).collect::<Vec<_>>());
    assert_eq!(b.piece_at(Square::new(0, 0)).unwrap().id, PieceId(0));
    assert_eq!(b.piece_at(Square::new(0, 1)).unwrap().id, PieceId(8));
}

#[test]
fn test_off_board_lookups_are_empty() {
    let b = Board::standard();
    assert!(b.piece_at(Square::new(8, 0)).is_none());
    assert!(b.piece_at(Square::new(0, 200)).is_none());
    assert!(b.piece_at_xy(-1, 3).is_none());
    assert!(b.piece_at_xy(0, 0).is_some());
    assert!(!b.is_occupied(Square::new(9, 9)));
}

#[test]
fn test_place_overwrites_and_sets_position() {
    let mut b = Board::empty();
    let sq = Square::new(3, 3);
    let rook = Piece::new(1, PieceKind::Rook, Color::White, Square::new(0, 0));
    assert!(b.place(rook, sq).is_none());
    assert_eq!(b.piece_at(sq).unwrap().position, sq);

    let knight = Piece::new(2, PieceKind::Knight, Color::Black, sq);
    let prev = b.place(knight, sq).unwrap();
    assert_eq!(prev.id, PieceId(1));
    assert_eq!(b.piece_at(sq).unwrap().id, PieceId(2));
    assert_eq!(b.pieces().count(), 1);
}

#[test]
fn test_remove() {
    let mut b = Board::standard();
    let pawn = b.remove(Square::new(4, 1)).unwrap();
    assert_eq!(pawn.kind, PieceKind::Pawn);
    assert!(!b.is_occupied(Square::new(4, 1)));
    assert!(b.remove(Square::new(4, 1)).is_none());
    assert!(b.remove(Square::new(8, 8)).is_none());
}

#[test]
fn test_relocate_keeps_position_in_sync() {
    let mut b = Board::standard();
    let captured = b.relocate(Square::new(4, 1), Square::new(4, 3));
    assert!(captured.is_none());
    let pawn = b.piece_at(Square::new(4, 3)).unwrap();
    assert_eq!(pawn.position, Square::new(4, 3));
    assert!(pawn.has_moved);
    assert!(!b.is_occupied(Square::new(4, 1)));
}

#[test]
fn test_square_attacks() {
    let b = Board::standard();
    // e3 is covered by white pawns on d2 and f2
    assert!(b.is_square_attacked(Square::new(4, 2), Color::White));
    // c3 by the b1 knight
    assert!(b.is_square_attacked(Square::new(2, 2), Color::White));
    // nothing of White's reaches e5 yet
    assert!(!b.is_square_attacked(Square::new(4, 4), Color::White));
    assert!(b.is_square_attacked(Square::new(4, 5), Color::Black));
    assert!(!b.in_check(Color::White));
}

#[test]
fn test_slider_attack_blocked() {
    let mut b = Board::empty();
    b.place(Piece::new(0, PieceKind::Rook, Color::Black, Square::new(0, 7)), Square::new(0, 7));
    b.place(Piece::new(1, PieceKind::King, Color::White, Square::new(0, 0)), Square::new(0, 0));
    assert!(b.in_check(Color::White));

    b.place(Piece::new(2, PieceKind::Pawn, Color::White, Square::new(0, 3)), Square::new(0, 3));
    assert!(!b.in_check(Color::White));
}
