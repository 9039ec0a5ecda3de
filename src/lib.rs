//! Chess board representation and attack generation core.
//!
//! Provides the position layer a search and evaluation stack builds on:
//! - Bitboard-based board representation with a mailbox view at the edges
//! - Magic-bitboard attack tables for the sliding pieces, searched and
//!   verified at startup
//! - Precomputed leaper attack tables (knight, king, pawn)
//! - Zobrist hashing with reproducible keys
//! - FEN parsing and emission
//! - Pseudo-legal pawn target generation
//!
//! # Quick Start
//!
//! ```
//! use lucena::board::Board;
//!
//! let board = Board::from_fen(Board::STARTING_FEN);
//! assert_eq!(board.occupancy().popcount(), 32);
//! assert_ne!(board.zobrist_key(), 0);
//! ```
//!
//! # Attack Queries
//!
//! ```
//! use lucena::board::{self, Bitboard, Square};
//!
//! let e4: Square = "e4".parse().unwrap();
//!
//! // A rook alone in the middle of the board sweeps 14 squares
//! assert_eq!(board::rook_attacks(e4, Bitboard::EMPTY).popcount(), 14);
//!
//! // Occupancy cuts the rays short at the first blocker
//! let blocker = Bitboard::from_square("e6".parse().unwrap());
//! let attacks = board::rook_attacks(e4, blocker);
//! assert!(attacks.contains("e6".parse().unwrap()));
//! assert!(!attacks.contains("e7".parse().unwrap()));
//! ```
//!
//! # Square-Attacked Queries
//!
//! ```
//! use lucena::board::{Board, Color, Square};
//!
//! let board = Board::from_fen("4k3/8/8/8/4R3/8/8/4K3 w - - 0 1");
//! let e8: Square = "e8".parse().unwrap();
//! assert!(board.is_attacked(e8, Color::White));
//! ```
//!
//! # Features
//!
//! - `serde` - Enable serialization for `Piece`, `Color`, `Square`,
//!   `MailboxSquare`, and `CastlingRights`

// Enable pedantic lints with sensible domain-specific exceptions
#![warn(clippy::pedantic)]
// Bitboard hex literals are clearer without separators (bit patterns visible)
#![allow(clippy::unreadable_literal)]
// Index casts are ubiquitous and safe in chess (board indices, square indices)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Large arrays are needed for attack tables
#![allow(clippy::large_stack_arrays)]
// Module-level documentation is sufficient for this codebase
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod board;
pub mod prng;
pub mod zobrist;
