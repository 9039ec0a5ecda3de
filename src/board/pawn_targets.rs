//! Pseudo-legal pawn target generation.
//!
//! Every generator takes the pawn set plus the relevant occupancy view and
//! returns a bitboard of destination squares; callers enumerate the set
//! bits to synthesize moves. Legality (pins, exposed checks) is not this
//! layer's concern.

use super::types::{Bitboard, Color, Square};

/// Forward shift of a pawn set: north for White, south for Black.
#[inline]
fn push(color: Color, pawns: Bitboard) -> Bitboard {
    match color {
        Color::White => pawns.shift_north(),
        Color::Black => pawns.shift_south(),
    }
}

/// Both capture shifts of a pawn set, file wraparound masked off.
#[inline]
fn attack_span(color: Color, pawns: Bitboard) -> Bitboard {
    match color {
        Color::White => pawns.shift_north_east().or(pawns.shift_north_west()),
        Color::Black => pawns.shift_south_east().or(pawns.shift_south_west()),
    }
}

/// Squares reachable by a one-square pawn push.
#[inline]
#[must_use]
pub fn single_push_targets(color: Color, pawns: Bitboard, empty: Bitboard) -> Bitboard {
    push(color, pawns).and(empty)
}

/// Squares reachable by a two-square pawn push. Only pawns whose single
/// push also lands on an empty square qualify, and the destination rank
/// pins the move to pawns on their starting rank.
#[inline]
#[must_use]
pub fn double_push_targets(color: Color, pawns: Bitboard, empty: Bitboard) -> Bitboard {
    let single = single_push_targets(color, pawns, empty);
    let rank = match color {
        Color::White => Bitboard::RANK_4,
        Color::Black => Bitboard::RANK_5,
    };
    push(color, single).and(empty).and(rank)
}

/// Pushes that land on the promotion rank.
#[inline]
#[must_use]
pub fn promotion_push_targets(color: Color, pawns: Bitboard, empty: Bitboard) -> Bitboard {
    let rank = match color {
        Color::White => Bitboard::RANK_8,
        Color::Black => Bitboard::RANK_1,
    };
    push(color, pawns).and(empty).and(rank)
}

/// Capture destinations: diagonal shifts intersected with enemy occupancy.
#[inline]
#[must_use]
pub fn capture_targets(color: Color, pawns: Bitboard, enemy: Bitboard) -> Bitboard {
    attack_span(color, pawns).and(enemy)
}

/// Captures that land on the promotion rank.
#[inline]
#[must_use]
pub fn promotion_capture_targets(color: Color, pawns: Bitboard, enemy: Bitboard) -> Bitboard {
    let rank = match color {
        Color::White => Bitboard::RANK_8,
        Color::Black => Bitboard::RANK_1,
    };
    capture_targets(color, pawns, enemy).and(rank)
}

/// The en-passant target bit, if some pawn of `color` could capture onto
/// it. The target square itself is empty, so this intersects the attack
/// span rather than enemy occupancy.
#[inline]
#[must_use]
pub fn en_passant_targets(color: Color, pawns: Bitboard, ep_square: Square) -> Bitboard {
    attack_span(color, pawns).and(Bitboard::from_square(ep_square))
}
