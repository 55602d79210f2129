use rustc_hash::FxHashMap;

use super::{BlockType, Position, TypeLookup};

/// Hash map backed grid.
///
/// Positions may be anywhere in `i32` space and the grid may contain holes.
/// Insertion order is remembered so labeling visits positions
/// deterministically.
#[derive(Clone, Debug, Default)]
pub struct SparseGrid {
    types: FxHashMap<Position, BlockType>,
    order: Vec<Position>,
}

impl SparseGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            types: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace a block, returning the previous type.
    pub fn insert(&mut self, position: Position, block_type: BlockType) -> Option<BlockType> {
        let previous = self.types.insert(position, block_type);
        if previous.is_none() {
            self.order.push(position);
        }
        previous
    }

    /// Remove a block, leaving a hole.
    pub fn remove(&mut self, position: Position) -> Option<BlockType> {
        let removed = self.types.remove(&position);
        if removed.is_some() {
            self.order.retain(|p| *p != position);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Positions in insertion order.
    pub fn positions(&self) -> &[Position] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, BlockType)> + '_ {
        self.order.iter().map(|p| (*p, self.types[p]))
    }
}

impl TypeLookup for SparseGrid {
    #[inline]
    fn block_type_at(&self, position: Position) -> Option<BlockType> {
        self.types.get(&position).copied()
    }
}

impl FromIterator<(Position, BlockType)> for SparseGrid {
    fn from_iter<I: IntoIterator<Item = (Position, BlockType)>>(iter: I) -> Self {
        let mut grid = SparseGrid::new();
        for (position, block_type) in iter {
            grid.insert(position, block_type);
        }
        grid
    }
}
