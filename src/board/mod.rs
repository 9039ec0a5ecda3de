//! Board representation and attack generation.

pub mod attacks;
#[cfg(debug_assertions)]
mod debug;
mod error;
mod fen;
pub mod pawn_targets;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, SquareError};
pub use state::Board;
pub use types::{Bitboard, BitboardIter, CastlingRights, Color, MailboxSquare, Piece, Square};

pub use attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
    verify_magic_tables,
};
