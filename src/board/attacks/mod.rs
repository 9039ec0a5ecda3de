//! Attack-set queries for every piece kind.
//!
//! Leaper attacks come from const tables; slider attacks go through the
//! magic lookup tables, which are built (and self-verified) on first use.

mod leapers;
mod magics;

use once_cell::sync::Lazy;

use super::types::{Bitboard, Color, Square};

pub(crate) use magics::Slider;

/// Squares a knight on `square` attacks.
#[inline]
#[must_use]
pub fn knight_attacks(square: Square) -> Bitboard {
    leapers::KNIGHT_ATTACKS[square.as_index()]
}

/// Squares a king on `square` attacks.
#[inline]
#[must_use]
pub fn king_attacks(square: Square) -> Bitboard {
    leapers::KING_ATTACKS[square.as_index()]
}

/// Squares a pawn of `color` on `square` attacks (captures only, not
/// pushes).
#[inline]
#[must_use]
pub fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    leapers::PAWN_ATTACKS[color.index()][square.as_index()]
}

/// Squares a bishop on `square` attacks given full-board `occupancy`.
#[inline]
#[must_use]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    magics::BISHOP_TABLE.attack(square.as_index(), occupancy)
}

/// Squares a rook on `square` attacks given full-board `occupancy`.
#[inline]
#[must_use]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    magics::ROOK_TABLE.attack(square.as_index(), occupancy)
}

/// Squares a queen on `square` attacks given full-board `occupancy`.
#[inline]
#[must_use]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy).or(rook_attacks(square, occupancy))
}

/// Force construction of the lazily built tables (magic tables and the
/// Zobrist keys). Idempotent; later queries only ever read.
pub(crate) fn init_tables() {
    Lazy::force(&magics::BISHOP_TABLE);
    Lazy::force(&magics::ROOK_TABLE);
    Lazy::force(&crate::zobrist::ZOBRIST);
}

/// Re-run the exhaustive check of both magic tables against the ray
/// oracle. Construction already performs this check once; this entry point
/// exists for diagnostics and tests.
///
/// # Panics
/// Panics on the first stored attack set that disagrees with the oracle.
pub fn verify_magic_tables() {
    magics::BISHOP_TABLE.verify(Slider::Bishop);
    magics::ROOK_TABLE.verify(Slider::Rook);
}
