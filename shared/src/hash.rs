use crate::data::world::SectorCoordinates;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Derives the generation seed of a sector. The coordinates are hashed as three little endian `u32`s in x, y, z
/// order, and the low half of the 128 bit MurmurHash3 digest is kept.
pub fn sector_seed(sector: &SectorCoordinates) -> u64 {
	let mut buffer = [0; 12];
	for (block, coordinate) in buffer.chunks_exact_mut(4).zip(sector.iter()) {
		block.copy_from_slice(&coordinate.to_le_bytes());
	}

	fastmurmur3::hash(&buffer) as u64
}

/// A fresh random stream for a sector. Every call yields the same sequence for the same sector.
pub fn sector_rng(sector: &SectorCoordinates) -> ChaCha8Rng {
	ChaCha8Rng::seed_from_u64(sector_seed(sector))
}
