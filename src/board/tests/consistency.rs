//! Cross-view invariants checked over a corpus of positions.
//!
//! Every observable board must keep its piece bitboards, side bitboards
//! and piece list in agreement, and its stored Zobrist key equal to a
//! from-scratch recomputation.

use crate::board::{Board, Color, MailboxSquare, Piece};

const CORPUS: &[&str] = &[
    Board::STARTING_FEN,
    Board::EMPTY_BOARD_FEN,
    Board::TRICKY_FEN,
    Board::KILLER_FEN,
    Board::CMK_FEN,
    "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
    "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "4k3/8/8/8/8/8/8/QQQQQQQK w - - 0 1",
];

fn assert_views_agree(board: &Board, fen: &str) {
    // Piece bitboards are pairwise disjoint
    let mut all: Vec<_> = Vec::new();
    for color in Color::BOTH {
        for piece in Piece::ALL {
            all.push(board.piece_bb(color, piece));
        }
    }
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert!(a.is_disjoint(*b), "overlapping piece bitboards in {fen}");
        }
    }

    // Side bitboards are the union of their piece bitboards
    for color in Color::BOTH {
        let mut union = crate::board::Bitboard::EMPTY;
        for piece in Piece::ALL {
            union = union.or(board.piece_bb(color, piece));
        }
        assert_eq!(board.side_bb(color), union, "side bitboard drift in {fen}");
    }
    assert!(
        board.side_bb(Color::White).is_disjoint(board.side_bb(Color::Black)),
        "side overlap in {fen}"
    );
    assert_eq!(
        board.side_bb(Color::White).or(board.side_bb(Color::Black)),
        board.occupancy(),
        "occupancy drift in {fen}"
    );

    // Piece list enumerates exactly the set bits, lowest first
    for color in Color::BOTH {
        for piece in Piece::ALL {
            let bb = board.piece_bb(color, piece);
            let listed = board.piece_squares(color, piece);
            assert_eq!(
                board.piece_count(color, piece),
                bb.popcount() as usize,
                "count drift for {color} {piece:?} in {fen}"
            );
            for (square, listed_sq) in bb.iter().zip(listed) {
                assert_eq!(square.to_mailbox(), *listed_sq, "list drift in {fen}");
            }
        }
    }

    // Stored key matches a recomputation
    assert_eq!(board.zobrist_key(), board.compute_hash(), "stale key in {fen}");

    // En-passant target sits on the rank behind the double-pushed pawn
    if let Some(ep) = board.en_passant_target() {
        let expected = match board.side_to_move() {
            Color::White => 5,
            Color::Black => 2,
        };
        assert_eq!(ep.rank(), expected, "en passant rank in {fen}");
    }
}

#[test]
fn test_corpus_views_agree() {
    for fen in CORPUS {
        let board = Board::from_fen(fen);
        assert_views_agree(&board, fen);
    }
}

#[test]
fn test_corpus_kings_present() {
    for fen in CORPUS {
        let board = Board::from_fen(fen);
        if *fen == Board::EMPTY_BOARD_FEN {
            continue;
        }
        for color in Color::BOTH {
            assert_eq!(board.piece_count(color, Piece::King), 1, "king count in {fen}");
            assert!(board.king_square(color).is_some());
        }
    }
}

#[test]
fn test_corpus_zobrist_keys_distinct() {
    let keys: Vec<u64> = CORPUS
        .iter()
        .map(|fen| Board::from_fen(fen).zobrist_key())
        .collect();
    for (i, a) in keys.iter().enumerate() {
        for (j, b) in keys.iter().enumerate() {
            if i != j {
                assert_ne!(a, b, "key collision between {} and {}", CORPUS[i], CORPUS[j]);
            }
        }
    }
}

#[test]
fn test_same_fen_same_key() {
    for fen in CORPUS {
        let a = Board::from_fen(fen);
        let b = Board::from_fen(fen);
        assert_eq!(a.zobrist_key(), b.zobrist_key(), "unstable key for {fen}");
    }
}

#[test]
fn test_key_sensitive_to_side_to_move() {
    let white = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let black = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    assert_ne!(white.zobrist_key(), black.zobrist_key());
}

#[test]
fn test_key_sensitive_to_castling_rights() {
    let all = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let none = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1");
    let partial = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
    assert_ne!(all.zobrist_key(), none.zobrist_key());
    assert_ne!(all.zobrist_key(), partial.zobrist_key());
    assert_ne!(none.zobrist_key(), partial.zobrist_key());
}

#[test]
fn test_key_sensitive_to_en_passant_file() {
    let without = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    let with = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    assert_ne!(without.zobrist_key(), with.zobrist_key());
}

#[test]
fn test_key_ignores_move_counters() {
    // Clocks are not part of the hashed position
    let a = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let b = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 40 60");
    assert_eq!(a.zobrist_key(), b.zobrist_key());
}

#[test]
fn test_reset_then_reload_matches_fresh_load() {
    let mut board = Board::from_fen(Board::TRICKY_FEN);
    board.reset();
    board.setup_fen(Board::STARTING_FEN).unwrap();

    let fresh = Board::from_fen(Board::STARTING_FEN);
    assert_eq!(board.zobrist_key(), fresh.zobrist_key());
    assert_eq!(board.to_fen(), fresh.to_fen());
    for color in Color::BOTH {
        for piece in Piece::ALL {
            assert_eq!(board.piece_bb(color, piece), fresh.piece_bb(color, piece));
        }
    }
}

#[test]
fn test_mailbox_maps_are_inverse_bijections() {
    use crate::board::Square;

    let mut seen = std::collections::HashSet::new();
    for idx in 0..64 {
        let sq = Square::from_index(idx);
        let mailbox: MailboxSquare = sq.to_mailbox();
        assert!(seen.insert(mailbox.as_index()), "mailbox image not unique");
        assert_eq!(mailbox.to_packed(), Some(sq));
        assert!((21..=98).contains(&mailbox.as_index()));
    }
}
