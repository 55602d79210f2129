//! Configuration for grid generation and parallel work.

/// Shape and content of a generated grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    /// Block types are drawn from `0..block_types`.
    pub block_types: i16,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            block_types: 5,
            seed: 12345,
        }
    }
}

impl GridConfig {
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// How data-parallel loops are split up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Worker threads in the pool.
    pub threads: usize,
    /// Elements handled by one task.
    pub chunk_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            threads: 4,
            chunk_size: 128,
        }
    }
}
