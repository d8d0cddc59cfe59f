// Entry point the rest of the engine calls at startup to obtain a ready
// `MagicTables`. Behind the `load_magic` feature this deserializes a
// pre-baked table shipped with the binary instead of searching for magic
// numbers on every process start.

use super::precompute::{MagicTableSeed, generate_magic_tables};
use super::structs::MagicTables;

#[cfg(feature = "load_magic")]
const BAKED_MAGIC_TABLES: &[u8] = include_bytes!("../../../magic_tables.bin");

pub fn load_magic_tables() -> MagicTables {
    #[cfg(feature = "load_magic")]
    {
        bincode::deserialize(BAKED_MAGIC_TABLES).expect("embedded magic table data is corrupt")
    }
    #[cfg(not(feature = "load_magic"))]
    {
        let seed = if cfg!(feature = "deterministic_magic") {
            MagicTableSeed::Fixed(0x9E3779B97F4A7C15)
        } else {
            MagicTableSeed::Entropy
        };
        generate_magic_tables(seed).expect("magic number search failed")
    }
}
