//! Board state: the position views and their queries.
//!
//! A position is held in several redundant views -- per-piece bitboards,
//! per-side bitboards, and a piece list on the mailbox scale -- that must
//! agree whenever the board is observable. All mutation funnels through
//! FEN setup and `reset`, each of which rebuilds every derived view before
//! returning.

use super::attacks;
use super::pawn_targets;
use super::types::{
    pop_lsb, Bitboard, CastlingRights, Color, MailboxSquare, Piece, Square,
};
use crate::zobrist::ZOBRIST;

/// Upper bound of same-type pieces one side can hold (8 promoted pawns
/// plus the original pair).
pub(crate) const MAX_PIECES_PER_TYPE: usize = 10;

/// Filler for unused piece-list slots.
const NO_SLOT: MailboxSquare = MailboxSquare::from_raw(99);

/// The mutable header riding on top of the immutable attack tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GameState {
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<MailboxSquare>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }
}

/// Enumerated piece locations per (color, piece), on the mailbox scale,
/// kept in lockstep with the piece bitboards.
#[derive(Clone, Debug)]
pub(crate) struct PieceList {
    squares: [[[MailboxSquare; MAX_PIECES_PER_TYPE]; 6]; 2],
    counts: [[u8; 6]; 2],
}

impl PieceList {
    fn cleared() -> Self {
        PieceList {
            squares: [[[NO_SLOT; MAX_PIECES_PER_TYPE]; 6]; 2],
            counts: [[0; 6]; 2],
        }
    }

    /// Re-derive the list from the piece bitboards, lowest square first.
    fn rebuild(&mut self, pieces: &[[Bitboard; 6]; 2]) {
        *self = PieceList::cleared();
        for color in Color::BOTH {
            for piece in Piece::ALL {
                let mut bb = pieces[color.index()][piece.index()];
                while !bb.is_empty() {
                    let sq = pop_lsb(&mut bb);
                    let n = &mut self.counts[color.index()][piece.index()];
                    self.squares[color.index()][piece.index()][*n as usize] = sq.to_mailbox();
                    *n += 1;
                }
            }
        }
    }

    fn squares(&self, color: Color, piece: Piece) -> &[MailboxSquare] {
        let n = self.counts[color.index()][piece.index()] as usize;
        &self.squares[color.index()][piece.index()][..n]
    }

    fn count(&self, color: Color, piece: Piece) -> usize {
        self.counts[color.index()][piece.index()] as usize
    }
}

/// A chess position: piece and side bitboards, piece list, and the
/// game-state header.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) sides: [Bitboard; 2],
    pub(crate) piece_list: PieceList,
    pub(crate) state: GameState,
}

impl Board {
    pub const STARTING_FEN: &'static str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    pub const EMPTY_BOARD_FEN: &'static str = "8/8/8/8/8/8/8/8 w - -";
    pub const TRICKY_FEN: &'static str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    pub const KILLER_FEN: &'static str =
        "rnbqkb1r/pp1p1pPp/8/2p1pP2/1P1P4/3P3P/P1P1P3/RNBQKBNR w KQkq e6 0 1";
    pub const CMK_FEN: &'static str =
        "r2q1rk1/ppp2ppp/2n1bn2/2b1p3/3pP3/3P1NPP/PPP1NPB1/R1BQ1RK1 b - - 0 9";

    /// Create an empty board. The attack and Zobrist tables are forced into
    /// existence here so that no later query pays the construction cost.
    #[must_use]
    pub fn new() -> Self {
        attacks::init_tables();
        let mut board = Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            sides: [Bitboard::EMPTY; 2],
            piece_list: PieceList::cleared(),
            state: GameState::default(),
        };
        board.state.hash = board.compute_hash();
        board
    }

    /// Convenience constructor for the standard starting position.
    #[must_use]
    pub fn starting_position() -> Self {
        Self::from_fen(Self::STARTING_FEN)
    }

    /// Clear the position. Tables are untouched; the board returns to the
    /// state it had right after construction.
    pub fn reset(&mut self) {
        self.pieces = [[Bitboard::EMPTY; 6]; 2];
        self.sides = [Bitboard::EMPTY; 2];
        self.piece_list = PieceList::cleared();
        self.state = GameState::default();
        self.state.hash = self.compute_hash();
    }

    /// Place a piece during position construction. Derived views are stale
    /// until `rebuild_derived` runs.
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        debug_assert!(
            !self.occupancy_from_pieces().contains(sq),
            "square {sq} occupied twice"
        );
        self.pieces[color.index()][piece.index()] =
            self.pieces[color.index()][piece.index()].or(Bitboard::from_square(sq));
    }

    /// Recompute side bitboards, piece list and hash from the piece
    /// bitboards and header. Establishes every cross-view invariant.
    pub(crate) fn rebuild_derived(&mut self) {
        self.sides = [Bitboard::EMPTY; 2];
        for color in Color::BOTH {
            for piece in Piece::ALL {
                self.sides[color.index()] =
                    self.sides[color.index()].or(self.pieces[color.index()][piece.index()]);
            }
        }
        self.piece_list.rebuild(&self.pieces);
        self.state.hash = self.compute_hash();
    }

    fn occupancy_from_pieces(&self) -> Bitboard {
        let mut occ = Bitboard::EMPTY;
        for side in &self.pieces {
            for bb in side {
                occ = occ.or(*bb);
            }
        }
        occ
    }

    /// Bitboard of one piece type of one color.
    #[inline]
    #[must_use]
    pub fn piece_bb(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Bitboard of all pieces of one color.
    #[inline]
    #[must_use]
    pub fn side_bb(&self, color: Color) -> Bitboard {
        self.sides[color.index()]
    }

    /// Bitboard of all pieces of both colors.
    #[inline]
    #[must_use]
    pub fn occupancy(&self) -> Bitboard {
        self.sides[0].or(self.sides[1])
    }

    /// The piece standing on `sq`, if any.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        for color in Color::BOTH {
            if !self.sides[color.index()].contains(sq) {
                continue;
            }
            for piece in Piece::ALL {
                if self.pieces[color.index()][piece.index()].contains(sq) {
                    return Some((color, piece));
                }
            }
        }
        None
    }

    /// Mailbox square of the king of `color`, or None on an empty board.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<MailboxSquare> {
        let mut king = self.pieces[color.index()][Piece::King.index()];
        if king.is_empty() {
            None
        } else {
            Some(pop_lsb(&mut king).to_mailbox())
        }
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.state.castling_rights
    }

    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<MailboxSquare> {
        self.state.en_passant_target
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.state.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.state.fullmove_number
    }

    /// The position's Zobrist key.
    #[inline]
    #[must_use]
    pub fn zobrist_key(&self) -> u64 {
        self.state.hash
    }

    /// Number of pieces of one type and color on the board.
    #[must_use]
    pub fn piece_count(&self, color: Color, piece: Piece) -> usize {
        self.piece_list.count(color, piece)
    }

    /// Mailbox squares of all pieces of one type and color, lowest packed
    /// square first.
    #[must_use]
    pub fn piece_squares(&self, color: Color, piece: Piece) -> &[MailboxSquare] {
        self.piece_list.squares(color, piece)
    }

    /// True if `color` has bishops on both square colors.
    #[must_use]
    pub fn has_bishop_pair(&self, color: Color) -> bool {
        let bishops = self.pieces[color.index()][Piece::Bishop.index()];
        bishops.intersects(Bitboard::LIGHT_SQUARES) && bishops.intersects(Bitboard::DARK_SQUARES)
    }

    /// Recompute the Zobrist key of the current position from scratch.
    pub(crate) fn compute_hash(&self) -> u64 {
        let mut key = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                let mut bb = self.pieces[color.index()][piece.index()];
                while !bb.is_empty() {
                    let sq = pop_lsb(&mut bb);
                    key ^= ZOBRIST.piece_key(color, piece, sq.to_mailbox());
                }
            }
        }
        key ^= ZOBRIST.side_key(self.state.side_to_move);
        key ^= ZOBRIST.castling_key(self.state.castling_rights);
        if let Some(ep) = self.state.en_passant_target {
            key ^= ZOBRIST.en_passant_key(ep.file());
        }
        key
    }

    /// True if any piece of `by` attacks `square` under the current
    /// occupancy.
    ///
    /// The pawn test reads the pawn-attack table of the *defending* color
    /// from the target square: those are exactly the squares from which a
    /// pawn of the attacking color hits `square`, since pawn attacks are
    /// mirror images across the two colors.
    #[must_use]
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        let occupancy = self.occupancy();
        let them = &self.pieces[by.index()];

        if attacks::pawn_attacks(by.opponent(), square).intersects(them[Piece::Pawn.index()]) {
            return true;
        }
        if attacks::knight_attacks(square).intersects(them[Piece::Knight.index()]) {
            return true;
        }
        let bishop = attacks::bishop_attacks(square, occupancy);
        if bishop.intersects(them[Piece::Bishop.index()]) {
            return true;
        }
        let rook = attacks::rook_attacks(square, occupancy);
        if rook.intersects(them[Piece::Rook.index()]) {
            return true;
        }
        if bishop.or(rook).intersects(them[Piece::Queen.index()]) {
            return true;
        }
        attacks::king_attacks(square).intersects(them[Piece::King.index()])
    }

    /// One-square pawn push targets for `color`.
    #[must_use]
    pub fn pawn_single_pushes(&self, color: Color) -> Bitboard {
        pawn_targets::single_push_targets(
            color,
            self.piece_bb(color, Piece::Pawn),
            self.occupancy().not(),
        )
    }

    /// Two-square pawn push targets for `color`.
    #[must_use]
    pub fn pawn_double_pushes(&self, color: Color) -> Bitboard {
        pawn_targets::double_push_targets(
            color,
            self.piece_bb(color, Piece::Pawn),
            self.occupancy().not(),
        )
    }

    /// Pawn pushes of `color` that land on the promotion rank.
    #[must_use]
    pub fn pawn_promotion_pushes(&self, color: Color) -> Bitboard {
        pawn_targets::promotion_push_targets(
            color,
            self.piece_bb(color, Piece::Pawn),
            self.occupancy().not(),
        )
    }

    /// Pawn capture targets for `color` against current enemy occupancy.
    #[must_use]
    pub fn pawn_captures(&self, color: Color) -> Bitboard {
        pawn_targets::capture_targets(
            color,
            self.piece_bb(color, Piece::Pawn),
            self.side_bb(color.opponent()),
        )
    }

    /// Pawn captures of `color` that land on the promotion rank.
    #[must_use]
    pub fn pawn_promotion_captures(&self, color: Color) -> Bitboard {
        pawn_targets::promotion_capture_targets(
            color,
            self.piece_bb(color, Piece::Pawn),
            self.side_bb(color.opponent()),
        )
    }

    /// The en-passant target bit if a pawn of `color` can capture onto it.
    /// Only meaningful for the side to move; empty when no target is set.
    #[must_use]
    pub fn pawn_en_passant_targets(&self, color: Color) -> Bitboard {
        match self.state.en_passant_target.and_then(MailboxSquare::to_packed) {
            Some(ep) => pawn_targets::en_passant_targets(
                color,
                self.piece_bb(color, Piece::Pawn),
                ep,
            ),
            None => Bitboard::EMPTY,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.occupancy().is_empty());
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.castling_rights(), CastlingRights::none());
        assert!(board.en_passant_target().is_none());
        assert!(board.king_square(Color::White).is_none());
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut board = Board::starting_position();
        assert_eq!(board.occupancy().popcount(), 32);

        board.reset();
        assert!(board.occupancy().is_empty());
        assert_eq!(board.piece_count(Color::White, Piece::Pawn), 0);
        assert_eq!(board.zobrist_key(), Board::new().zobrist_key());
    }

    #[test]
    fn test_game_state_default() {
        let state = GameState::default();
        assert_eq!(state.side_to_move, Color::White);
        assert_eq!(state.castling_rights, CastlingRights::none());
        assert_eq!(state.en_passant_target, None);
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.fullmove_number, 1);
    }

    #[test]
    fn test_king_square_starting_position() {
        let board = Board::starting_position();
        let e1: Square = "e1".parse().unwrap();
        let e8: Square = "e8".parse().unwrap();
        assert_eq!(board.king_square(Color::White), Some(e1.to_mailbox()));
        assert_eq!(board.king_square(Color::Black), Some(e8.to_mailbox()));
    }

    #[test]
    fn test_piece_list_matches_bitboards() {
        let board = Board::from_fen(Board::TRICKY_FEN);
        for color in Color::BOTH {
            for piece in Piece::ALL {
                let bb = board.piece_bb(color, piece);
                let listed = board.piece_squares(color, piece);
                assert_eq!(listed.len(), bb.popcount() as usize);
                for (square, listed_sq) in bb.iter().zip(listed) {
                    assert_eq!(square.to_mailbox(), *listed_sq);
                }
            }
        }
    }

    #[test]
    fn test_piece_at() {
        let board = Board::starting_position();
        assert_eq!(
            board.piece_at("e1".parse().unwrap()),
            Some((Color::White, Piece::King))
        );
        assert_eq!(
            board.piece_at("d8".parse().unwrap()),
            Some((Color::Black, Piece::Queen))
        );
        assert_eq!(board.piece_at("e4".parse().unwrap()), None);
    }

    #[test]
    fn test_has_bishop_pair() {
        let board = Board::starting_position();
        assert!(board.has_bishop_pair(Color::White));
        assert!(board.has_bishop_pair(Color::Black));

        let one_bishop = Board::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1");
        assert!(!one_bishop.has_bishop_pair(Color::White));
    }

    #[test]
    fn test_side_bitboards_disjoint_and_complete() {
        let board = Board::from_fen(Board::KILLER_FEN);
        assert!(board.side_bb(Color::White).is_disjoint(board.side_bb(Color::Black)));
        assert_eq!(
            board.side_bb(Color::White).or(board.side_bb(Color::Black)),
            board.occupancy()
        );
    }
}
