//! Zobrist hashing keys for positions.
//!
//! One process-lifetime table of pseudo-random 64-bit values. A position's
//! key is the XOR of the piece/square keys of every occupied square, the
//! side-to-move key, the castling-rights key, and (when an en-passant
//! target exists) the key of its file.
//!
//! The table is filled by a 64-bit Mersenne Twister with a fixed seed, so
//! keys are reproducible across runs. The magic-number search draws from a
//! separate xorshift64* stream; the two generators never interact.

use once_cell::sync::Lazy;
use rand_mt::Mt64;

use crate::board::{CastlingRights, Color, MailboxSquare, Piece};

const ZOBRIST_SEED: u64 = 1023310525;

/// Mailbox cells; piece keys are indexed by mailbox square, so the border
/// entries exist but are never XORed in.
const MAILBOX_SIZE: usize = 120;

/// The Zobrist key table. Immutable once built.
pub struct Zobrist {
    pieces: [[[u64; MAILBOX_SIZE]; 6]; 2],
    side: [u64; 2],
    castling: [u64; 16],
    en_passant: [u64; 8],
}

impl Zobrist {
    fn new() -> Self {
        let mut rng = Mt64::new(ZOBRIST_SEED);

        let mut side = [0u64; 2];
        for key in &mut side {
            *key = rng.next_u64();
        }

        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = rng.next_u64();
        }

        let mut pieces = [[[0u64; MAILBOX_SIZE]; 6]; 2];
        for color in &mut pieces {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.next_u64();
                }
            }
        }

        let mut en_passant = [0u64; 8];
        for key in &mut en_passant {
            *key = rng.next_u64();
        }

        Zobrist {
            pieces,
            side,
            castling,
            en_passant,
        }
    }

    /// Key of a piece of `color` standing on `square`.
    #[inline]
    #[must_use]
    pub fn piece_key(&self, color: Color, piece: Piece, square: MailboxSquare) -> u64 {
        self.pieces[color.index()][piece.index()][square.as_index()]
    }

    /// Key of the side to move.
    #[inline]
    #[must_use]
    pub fn side_key(&self, color: Color) -> u64 {
        self.side[color.index()]
    }

    /// Key of a concrete castling-rights mask.
    #[inline]
    #[must_use]
    pub fn castling_key(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.as_u8() as usize]
    }

    /// Key of an en-passant target, by file (0-7).
    #[inline]
    #[must_use]
    pub fn en_passant_key(&self, file: usize) -> u64 {
        self.en_passant[file]
    }
}

/// The process-wide key table.
pub static ZOBRIST: Lazy<Zobrist> = Lazy::new(Zobrist::new);
