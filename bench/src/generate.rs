//! Seeded test data.
//!
//! Everything here is reproducible from a seed so benchmark runs compare the
//! same grids and values.

use blocky::{BlockType, DenseGrid, GridConfig, Position, Result, SparseGrid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Grids
// =============================================================================

/// Row-major block types drawn uniformly from `0..config.block_types`.
pub fn random_types(config: &GridConfig, rng: &mut impl Rng) -> Vec<BlockType> {
    let upper = config.block_types.max(1);
    (0..config.cell_count())
        .map(|_| BlockType(rng.gen_range(0..upper)))
        .collect()
}

pub fn random_dense_grid(config: &GridConfig) -> Result<DenseGrid> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    DenseGrid::from_types(config.width, config.height, random_types(config, &mut rng))
}

/// Same blocks as [`random_dense_grid`] for the same config.
pub fn random_sparse_grid(config: &GridConfig) -> Result<SparseGrid> {
    random_dense_grid(config).map(|grid| grid.to_sparse())
}

/// Picks random in-bounds type changes to apply between frames.
pub struct ChangeGenerator {
    rng: ChaCha8Rng,
    width: u32,
    height: u32,
    block_types: i16,
}

impl ChangeGenerator {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            // Offset so changes don't replay the grid's own sequence.
            rng: ChaCha8Rng::seed_from_u64(config.seed ^ 0x5eed),
            width: config.width.max(1),
            height: config.height.max(1),
            block_types: config.block_types.max(1),
        }
    }

    pub fn next_change(&mut self) -> (Position, BlockType) {
        let position = Position::new(
            self.rng.gen_range(0..self.width) as i32,
            self.rng.gen_range(0..self.height) as i32,
        );
        (position, BlockType(self.rng.gen_range(0..self.block_types)))
    }
}

// =============================================================================
// Values
// =============================================================================

/// Values in `-100.0..100.0`.
pub fn random_values(count: usize, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(-100.0..100.0)).collect()
}
