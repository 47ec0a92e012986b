// src/math/probability/seed/cell_seed.rs

use super::key::ForecastKey;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Derives one independent generator per mesh cell from a [`ForecastKey`].
///
/// The seed of cell `(row, col)` is the SHA-256 digest of the key components
/// (each length-prefixed), the horizon and the cell indices. Nothing is
/// shared between cells, so the draw order does not matter.
#[derive(Debug, Clone)]
pub struct CellSeeder {
    key_digest: Sha256,
}

impl CellSeeder {
    pub fn new(key: &ForecastKey) -> Self {
        let mut key_digest = Sha256::new();
        for part in key.parts() {
            key_digest.update((part.len() as u64).to_le_bytes());
            key_digest.update(part.as_bytes());
        }
        key_digest.update([key.horizon_days()]);
        Self { key_digest }
    }

    /// 32-byte seed of one cell
    pub fn seed_for(&self, row: usize, col: usize) -> [u8; 32] {
        let mut digest = self.key_digest.clone();
        digest.update((row as u64).to_le_bytes());
        digest.update((col as u64).to_le_bytes());
        digest.finalize().into()
    }

    /// Fresh generator for one cell
    pub fn rng_for(&self, row: usize, col: usize) -> ChaCha8Rng {
        ChaCha8Rng::from_seed(self.seed_for(row, col))
    }
}
