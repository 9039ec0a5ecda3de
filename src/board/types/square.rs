//! Square types: the packed 0-63 index used by all bitboard math, and the
//! 12x10 mailbox index used at the boundary (en-passant targets, king
//! location) where off-board sentinels make file/rank arithmetic structural.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// Number of cells in the padded mailbox board.
const MAILBOX_SIZE: usize = 120;

/// Marker stored in the mailbox-to-packed map for off-board cells.
const INVALID_PACKED: u8 = 65;

/// A square on the chess board, stored as a compact 0-63 index.
///
/// Index layout: rank * 8 + file, where a1=0, b1=1, ..., h8=63.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// Create a new square from rank and file (both 0-7).
    /// Does not perform bounds checking - use `try_new` for checked construction.
    #[inline]
    #[must_use]
    pub const fn new(rank: usize, file: usize) -> Self {
        Square((rank * 8 + file) as u8)
    }

    /// Create a new square with bounds checking
    #[must_use]
    pub const fn try_new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square::new(rank, file))
        } else {
            None
        }
    }

    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 / 8) as usize
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 % 8) as usize
    }

    /// Get the square's index (0-63, a1=0, b1=1, ..., h8=63)
    #[inline]
    #[must_use]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }

    /// Create a square from an index (0-63)
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square(idx as u8)
    }

    /// The mailbox counterpart of this square
    #[inline]
    #[must_use]
    pub const fn to_mailbox(self) -> MailboxSquare {
        MailboxSquare(PACKED_TO_MAILBOX[self.0 as usize])
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (self.file() as u8 + b'a') as char,
            self.rank() + 1
        )
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square::new(rank, file))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }

        let file = match chars[0] {
            'a'..='h' => chars[0] as usize - 'a' as usize,
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };

        let rank = match chars[1] {
            '1'..='8' => chars[1] as usize - '1' as usize,
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };

        Ok(Square::new(rank, file))
    }
}

/// A square on the 12x10 mailbox board.
///
/// The playable 8x8 area sits at a1=21 ... h8=98 inside a border of
/// off-board sentinels, so that naive +-1/+-10 offsets fall off the board
/// structurally instead of wrapping a file or rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MailboxSquare(u8);

impl MailboxSquare {
    pub const A1: MailboxSquare = MailboxSquare(21);
    pub const H1: MailboxSquare = MailboxSquare(28);
    pub const A8: MailboxSquare = MailboxSquare(91);
    pub const H8: MailboxSquare = MailboxSquare(98);

    /// Offset of a1 inside the mailbox grid.
    const OFFSET: u8 = 21;

    /// Build a mailbox square from file and rank (both 0-7)
    #[inline]
    #[must_use]
    pub const fn from_file_rank(file: usize, rank: usize) -> Self {
        MailboxSquare(Self::OFFSET + file as u8 + (rank as u8) * 10)
    }

    /// The raw mailbox index (21..98 for playable squares)
    #[inline]
    #[must_use]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }

    /// Reconstruct from a raw mailbox index
    #[inline]
    #[must_use]
    pub const fn from_raw(idx: usize) -> Self {
        MailboxSquare(idx as u8)
    }

    /// The packed 0-63 counterpart, or None for off-board cells
    #[inline]
    #[must_use]
    pub const fn to_packed(self) -> Option<Square> {
        let packed = MAILBOX_TO_PACKED[self.0 as usize];
        if packed == INVALID_PACKED {
            None
        } else {
            Some(Square(packed))
        }
    }

    /// True if this cell lies on the playable 8x8 area
    #[inline]
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        MAILBOX_TO_PACKED[self.0 as usize] != INVALID_PACKED
    }

    /// File of a playable square (0-7). Meaningless for off-board cells.
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 % 10 - 1) as usize
    }

    /// Rank of a playable square (0-7). Meaningless for off-board cells.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 / 10 - 2) as usize
    }
}

impl fmt::Display for MailboxSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_packed() {
            Some(sq) => write!(f, "{sq}"),
            None => write!(f, "--"),
        }
    }
}

impl From<Square> for MailboxSquare {
    fn from(sq: Square) -> Self {
        sq.to_mailbox()
    }
}

/// Maps mailbox cells onto packed indices; off-board cells map to
/// `INVALID_PACKED`.
const MAILBOX_TO_PACKED: [u8; MAILBOX_SIZE] = {
    let mut map = [INVALID_PACKED; MAILBOX_SIZE];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            let mailbox = 21 + file + rank * 10;
            map[mailbox] = (rank * 8 + file) as u8;
            file += 1;
        }
        rank += 1;
    }
    map
};

/// Maps packed indices onto mailbox cells (21..98).
const PACKED_TO_MAILBOX: [u8; 64] = {
    let mut map = [0u8; 64];
    let mut idx = 0;
    while idx < 64 {
        let rank = idx / 8;
        let file = idx % 8;
        map[idx] = (21 + file + rank * 10) as u8;
        idx += 1;
    }
    map
};
