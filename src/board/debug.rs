use super::{Board, Color, Piece};

#[cfg(debug_assertions)]
impl Board {
    /// Debug helper to dump all bitboard values
    pub fn debug_bitboards(&self) {
        println!("Side to move: {}", self.state.side_to_move);
        println!("Castling mask: {:#06b}", self.state.castling_rights.as_u8());
        if let Some(ep_target) = self.state.en_passant_target {
            println!("EP Target: {ep_target}");
        }
        println!("Zobrist key: {:#018x}", self.state.hash);
        println!("All occupied: {:#018x}", self.occupancy().0);

        for color in Color::BOTH {
            for piece in Piece::ALL {
                let bb = self.piece_bb(color, piece).0;
                println!("{color} {}: {bb:#018x}", piece.to_fen_char(color));
            }
        }
        println!("------------------------------------");
    }
}
