//! Magic bitboard tables for sliding piece attack generation.
//!
//! For every (square, slider kind) pair a 64-bit multiplier is searched at
//! table-build time such that `((occupancy & mask) * magic) >> shift` maps
//! every relevant-occupancy subset to a distinct slot of a dense attack
//! array (occupancies that produce the same attack set may share a slot).
//! The shift is `64 - popcount(mask)` and the per-square array holds
//! `1 << popcount(mask)` entries, at most 512 for bishops and 4096 for
//! rooks. After population the whole table is re-checked against the ray
//! oracle; any mismatch aborts, since nothing downstream can work without
//! correct slider attacks.

use once_cell::sync::Lazy;

use crate::board::types::Bitboard;
use crate::prng::XorShift64Star;

/// Seed of the candidate stream. Any non-zero value works; changing it only
/// changes which collision-free multipliers are found, not any attack set.
const MAGIC_SEED: u64 = 1804289383;

/// Candidate draws per (square, kind) before giving up.
const MAX_SEARCH_ATTEMPTS: u32 = 10_000_000;

/// The two sliding piece kinds with their own ray geometry. Queen attacks
/// are the union of both lookups and need no table of their own.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    const fn directions(self) -> [(i32, i32); 4] {
        match self {
            Slider::Bishop => [(1, 1), (1, -1), (-1, 1), (-1, -1)],
            Slider::Rook => [(1, 0), (-1, 0), (0, 1), (0, -1)],
        }
    }

    /// The relevant-occupancy mask: every ray square whose occupancy can
    /// change the attack set. The last square of each ray is left out -- a
    /// blocker on the rim produces the same attack set as an empty rim.
    fn relevance_mask(self, square: usize) -> u64 {
        let rank = (square / 8) as i32;
        let file = (square % 8) as i32;
        let mut mask = 0u64;
        for (dr, df) in self.directions() {
            let mut r = rank + dr;
            let mut f = file + df;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                // Stop short of the edge the ray is heading toward
                if (dr != 0 && (r == 0 || r == 7)) || (df != 0 && (f == 0 || f == 7)) {
                    break;
                }
                mask |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
        }
        mask
    }

    /// Ray-walking attack generation: scan outward from `square`, setting
    /// each square up to and including the first blocker. This is the slow
    /// oracle the dense tables are built from and verified against.
    pub(crate) fn attacks_on_the_fly(self, square: usize, occupied: u64) -> u64 {
        let rank = (square / 8) as i32;
        let file = (square % 8) as i32;
        let mut attacks = 0u64;
        for (dr, df) in self.directions() {
            let mut r = rank + dr;
            let mut f = file + df;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                let bit = 1u64 << (r * 8 + f);
                attacks |= bit;
                if occupied & bit != 0 {
                    break;
                }
                r += dr;
                f += df;
            }
        }
        attacks
    }
}

/// Spread the bits of `index` over the set bits of `mask`, lowest mask bit
/// first. Walking `index` through `0..1 << bits` enumerates every subset of
/// the mask exactly once.
pub(crate) fn set_occupancy(index: usize, bits: usize, mut mask: u64) -> u64 {
    let mut occupancy = 0u64;
    for i in 0..bits {
        let sq = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        if index & (1 << i) != 0 {
            occupancy |= 1u64 << sq;
        }
    }
    occupancy
}

/// Search for a collision-free multiplier for one (square, kind) pair.
///
/// Candidates are sparse random values; a quick popcount test on the top
/// byte of `mask * candidate` rejects multipliers that cannot mix enough
/// occupancy bits into the index. Surviving candidates are checked against
/// every subset of the mask: a slot may be reused only by occupancies that
/// share an attack set.
fn find_magic(square: usize, slider: Slider, rng: &mut XorShift64Star) -> Option<u64> {
    let mask = slider.relevance_mask(square);
    let bits = mask.count_ones() as usize;
    let shift = 64 - bits as u32;
    let subsets = 1usize << bits;

    let mut occupancies = vec![0u64; subsets];
    let mut reference = vec![0u64; subsets];
    for idx in 0..subsets {
        occupancies[idx] = set_occupancy(idx, bits, mask);
        reference[idx] = slider.attacks_on_the_fly(square, occupancies[idx]);
    }

    let mut used = vec![0u64; subsets];
    'candidates: for _ in 0..MAX_SEARCH_ATTEMPTS {
        let magic = rng.sparse_rand();
        if (mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        used.fill(0);
        for idx in 0..subsets {
            let slot = (occupancies[idx].wrapping_mul(magic) >> shift) as usize;
            if used[slot] == 0 {
                used[slot] = reference[idx];
            } else if used[slot] != reference[idx] {
                // Two occupancies with different attack sets landed on the
                // same slot; this candidate cannot work.
                continue 'candidates;
            }
        }
        return Some(magic);
    }
    None
}

#[derive(Clone, Copy)]
struct MagicEntry {
    mask: u64,
    magic: u64,
    shift: u8,
    offset: usize,
}

pub(crate) struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<u64>,
}

impl MagicTable {
    /// Search magics for all 64 squares, populate the dense attack arrays,
    /// and verify the result against the oracle.
    ///
    /// # Panics
    /// Panics if the search exhausts its attempt cap for any square or
    /// if verification finds a mismatch. Both are fatal: the engine cannot
    /// answer slider queries without a correct table.
    fn build(slider: Slider) -> Self {
        let mut rng = XorShift64Star::new(MAGIC_SEED);
        let mut entries = [MagicEntry {
            mask: 0,
            magic: 0,
            shift: 0,
            offset: 0,
        }; 64];
        let mut attacks: Vec<u64> = Vec::new();

        let mut offset = 0usize;
        for square in 0..64 {
            let mask = slider.relevance_mask(square);
            let bits = mask.count_ones() as usize;
            let shift = (64 - bits) as u8;
            let magic = find_magic(square, slider, &mut rng).unwrap_or_else(|| {
                panic!("magic search exhausted for {slider:?} on square {square}")
            });

            let size = 1usize << bits;
            attacks.resize(offset + size, 0);
            for idx in 0..size {
                let occupancy = set_occupancy(idx, bits, mask);
                let slot = (occupancy.wrapping_mul(magic) >> shift) as usize;
                attacks[offset + slot] = slider.attacks_on_the_fly(square, occupancy);
            }

            entries[square] = MagicEntry {
                mask,
                magic,
                shift,
                offset,
            };
            offset += size;
        }

        let table = MagicTable { entries, attacks };
        table.verify(slider);
        table
    }

    /// Look up the attack set for a slider on `square` under `occupancy`.
    #[inline]
    pub(crate) fn attack(&self, square: usize, occupancy: Bitboard) -> Bitboard {
        let entry = &self.entries[square];
        let relevant = occupancy.0 & entry.mask;
        let slot = (relevant.wrapping_mul(entry.magic) >> entry.shift) as usize;
        Bitboard(self.attacks[entry.offset + slot])
    }

    /// Re-check every stored attack set against the ray oracle.
    ///
    /// # Panics
    /// Panics on the first mismatch.
    pub(crate) fn verify(&self, slider: Slider) {
        for square in 0..64 {
            let entry = &self.entries[square];
            let bits = entry.mask.count_ones() as usize;
            for idx in 0..(1usize << bits) {
                let occupancy = set_occupancy(idx, bits, entry.mask);
                let expected = slider.attacks_on_the_fly(square, occupancy);
                let got = self.attack(square, Bitboard(occupancy));
                assert_eq!(
                    got.0, expected,
                    "magic table mismatch for {slider:?} on square {square}, occupancy {occupancy:#018x}"
                );
            }
        }
    }
}

pub(crate) static BISHOP_TABLE: Lazy<MagicTable> = Lazy::new(|| MagicTable::build(Slider::Bishop));
pub(crate) static ROOK_TABLE: Lazy<MagicTable> = Lazy::new(|| MagicTable::build(Slider::Rook));
