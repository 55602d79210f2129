//! Connected-block labeling for tile grids.
//!
//! The crate groups the cells of a 2D block grid into 4-connected regions of
//! equal block type. Two labelers are provided:
//!
//! - [`EpochLabeler`]: dense row-major grid, epoch stamps instead of clearing
//!   visited state, incremental relabeling of only the regions touched by a
//!   type change.
//! - [`SparseLabeler`]: hash map backed grid that may contain holes; clears
//!   its visited state every pass.
//!
//! Alongside the labelers live the two value storage layouts the labelers are
//! usually benchmarked against ([`storage`]) and a small worker pool with a
//! chunked parallel-for ([`tasks`]).
//!
//! ```
//! use blocky::{BlockType, DenseGrid, Epoch, EpochLabeler, Position};
//!
//! let grid = DenseGrid::new(3, 3, BlockType(1)).unwrap();
//! let mut labeler = EpochLabeler::new(grid);
//! labeler.label(Epoch(1)).unwrap();
//! assert_eq!(labeler.labeling().len(), 1);
//! assert_eq!(labeler.group_at(Position::new(2, 2)), labeler.group_at(Position::new(0, 0)));
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod label;
pub mod storage;
pub mod tasks;

pub use config::{GridConfig, ParallelConfig};
pub use error::{GridError, Result};
pub use grid::{Block, BlockType, DenseGrid, Epoch, GroupId, Position, SparseGrid, TypeLookup};
pub use label::{EpochLabeler, Group, Labeling, Partition, PassStats, SparseLabeler};
