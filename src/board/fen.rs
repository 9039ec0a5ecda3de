//! FEN parsing and emission.
//!
//! Parsing is atomic: a FEN string is parsed into a fresh board and the
//! caller's state is replaced only when the whole string is valid, so a
//! rejected record never leaves a half-written position behind.

use std::str::FromStr;

use super::error::FenError;
use super::types::{CastlingRights, Color, MailboxSquare, Piece, Square};
use super::Board;

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// The final two fields (halfmove clock, fullmove number) may be
    /// omitted and default to 0 and 1.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::new();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        // Piece placement, rank 8 down to rank 1
        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::InvalidRank { rank: rank_idx });
            }
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    board.set_piece(Square::new(7 - rank_idx, file), color, piece);
                    file += 1;
                }
            }
        }

        // Active side
        board.state.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        board.state.castling_rights = CastlingRights::from_fen_field(parts[2])?;

        // En passant target: '-' or a square on the rank behind the pawn
        // that just double-pushed (rank 6 with White to move, rank 3 with
        // Black to move)
        board.state.en_passant_target = if parts[3] == "-" {
            None
        } else {
            let square: Square = parts[3].parse().map_err(|_| FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            })?;
            let expected_rank = match board.state.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if square.rank() != expected_rank {
                return Err(FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                });
            }
            Some(square.to_mailbox())
        };

        if let Some(clock) = parts.get(4) {
            board.state.halfmove_clock = clock.parse().unwrap_or(0);
        }
        if let Some(moves) = parts.get(5) {
            board.state.fullmove_number = moves.parse().unwrap_or(1);
        }

        board.rebuild_derived();
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible
    /// parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Replace this board's position with one parsed from `fen`.
    ///
    /// On error the current position is left untouched.
    pub fn setup_fen(&mut self, fen: &str) -> Result<(), FenError> {
        *self = Self::try_from_fen(fen)?;
        Ok(())
    }

    /// Render the position as a FEN record.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::new(rank, file);
                if let Some((color, piece)) = self.piece_at(sq) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.state.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .state
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq: MailboxSquare| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.state.castling_rights.to_fen_field(),
            ep,
            self.state.halfmove_clock,
            self.state.fullmove_number
        )
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
