//! Value types shared across the board core.

mod bitboard;
mod castling;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use piece::{Color, Piece};
pub use square::{MailboxSquare, Square};

pub(crate) use bitboard::pop_lsb;
