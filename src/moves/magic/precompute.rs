// Builds magic bitboard tables from scratch: relevant-occupancy masks, every
// blocker subset of each mask, a collision-free magic number per square, and
// the resulting attack table.

use super::attacks::{bishop_attacks_per_square, rook_attacks_per_square};
use super::search::find_magic_number_for_square;
use super::structs::{BishopMagicTables, MagicEntry, MagicTables, RookMagicTables};
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// Where the magic-number search gets its randomness from.
pub enum MagicTableSeed {
    /// Deterministic seed, used by tests and the `deterministic_magic` feature.
    Fixed(u64),
    /// Seeded from the OS entropy source.
    Entropy,
}

impl MagicTableSeed {
    fn into_rng(self) -> StdRng {
        match self {
            MagicTableSeed::Fixed(seed) => StdRng::seed_from_u64(seed),
            MagicTableSeed::Entropy => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        }
    }
}

fn rook_relevant_mask(square: usize) -> u64 {
    let rank = (square / 8) as i32;
    let file = (square % 8) as i32;
    let mut mask = 0u64;
    for r in (rank + 1)..=6 {
        mask |= 1u64 << (file + r * 8);
    }
    for r in (1..rank).rev() {
        mask |= 1u64 << (file + r * 8);
    }
    for f in (file + 1)..=6 {
        mask |= 1u64 << (f + rank * 8);
    }
    for f in (1..file).rev() {
        mask |= 1u64 << (f + rank * 8);
    }
    mask
}

fn bishop_relevant_mask(square: usize) -> u64 {
    let rank = (square / 8) as i32;
    let file = (square % 8) as i32;
    let mut mask = 0u64;

    let mut r = rank + 1;
    let mut f = file + 1;
    while r <= 6 && f <= 6 {
        mask |= 1u64 << (f + r * 8);
        r += 1;
        f += 1;
    }
    let mut r = rank + 1;
    let mut f = file - 1;
    while r <= 6 && f >= 1 {
        mask |= 1u64 << (f + r * 8);
        r += 1;
        f -= 1;
    }
    let mut r = rank - 1;
    let mut f = file + 1;
    while r >= 1 && f <= 6 {
        mask |= 1u64 << (f + r * 8);
        r -= 1;
        f += 1;
    }
    let mut r = rank - 1;
    let mut f = file - 1;
    while r >= 1 && f >= 1 {
        mask |= 1u64 << (f + r * 8);
        r -= 1;
        f -= 1;
    }
    mask
}

/// Every subset of `mask`'s set bits, via the carry-rippler trick.
fn subsets_of(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1 << mask.count_ones());
    let mut subset = 0u64;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

fn build_entry<R: RngCore>(
    square: usize,
    mask: u64,
    attacks_for: impl Fn(usize, u64) -> u64,
    rng: &mut R,
) -> Result<MagicEntry, String> {
    let blockers = subsets_of(mask);
    let attacks: Vec<u64> = blockers.iter().map(|&b| attacks_for(square, b)).collect();
    let shift = 64 - mask.count_ones();

    let magic = find_magic_number_for_square(&blockers, &attacks, shift, rng)?;

    let table_size = 1usize << mask.count_ones();
    let mut table = vec![0u64; table_size];
    for (i, &b) in blockers.iter().enumerate() {
        let index = ((b.wrapping_mul(magic)) >> shift) as usize;
        table[index] = attacks[i];
    }

    Ok(MagicEntry {
        magic,
        shift,
        mask,
        table: table.into_boxed_slice(),
    })
}

pub fn generate_magic_tables(seed: MagicTableSeed) -> Result<MagicTables, String> {
    let mut rng = seed.into_rng();

    let mut rook_entries = Vec::with_capacity(64);
    for square in 0..64 {
        let mask = rook_relevant_mask(square);
        rook_entries.push(build_entry(
            square,
            mask,
            rook_attacks_per_square,
            &mut rng,
        )?);
    }

    let mut bishop_entries = Vec::with_capacity(64);
    for square in 0..64 {
        let mask = bishop_relevant_mask(square);
        bishop_entries.push(build_entry(
            square,
            mask,
            bishop_attacks_per_square,
            &mut rng,
        )?);
    }

    Ok(MagicTables {
        rook: RookMagicTables {
            entries: rook_entries,
        },
        bishop: BishopMagicTables {
            entries: bishop_entries,
        },
    })
}
