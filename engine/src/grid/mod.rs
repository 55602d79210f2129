//! Block grids and the positions that address them.
//!
//! - [`DenseGrid`]: fixed `width x height` row-major array of [`Block`]s.
//! - [`SparseGrid`]: hash map from [`Position`] to [`BlockType`], may have holes.
//!
//! Both answer the same [`TypeLookup`] query, which is all a labeler needs to
//! decide adjacency.

mod block;
mod dense;
mod position;
mod sparse;

pub use block::{Block, BlockType, Epoch, GroupId};
pub use dense::DenseGrid;
pub use position::Position;
pub use sparse::SparseGrid;

/// Pure, side-effect free block type query.
///
/// Returns `None` when no block exists at `position` (out of bounds for dense
/// grids, a hole for sparse grids). Callers treat `None` as "no such
/// neighbor".
pub trait TypeLookup {
    fn block_type_at(&self, position: Position) -> Option<BlockType>;

    /// Whether the blocks at `a` and `b` both exist and share a type.
    fn same_type(&self, a: Position, b: Position) -> bool {
        match (self.block_type_at(a), self.block_type_at(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
