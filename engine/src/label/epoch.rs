use fixedbitset::FixedBitSet;
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{GridError, Result};
use crate::grid::{BlockType, DenseGrid, Epoch, GroupId, Position};

use super::{Labeling, Partition, PassStats};

/// Dense grid labeler that avoids clearing visited state between passes.
///
/// Each block carries the epoch of the pass that last labeled it, so a pass
/// skips blocks already stamped with its own epoch. The per-block visited
/// marker is keyed by group id and group ids are never reused, which makes
/// stale markers from earlier passes harmless.
///
/// Type changes made through [`set_block_type`](Self::set_block_type) are
/// tracked; the next pass only re-floods the groups touching a changed block
/// and every other block keeps its group id.
pub struct EpochLabeler {
    grid: DenseGrid,
    visited: Vec<GroupId>,
    frontier: Vec<Position>,
    dirty: FixedBitSet,
    all_dirty: bool,
    last_group: GroupId,
    last_epoch: Epoch,
}

impl EpochLabeler {
    pub fn new(grid: DenseGrid) -> Self {
        let len = grid.len();
        Self {
            grid,
            visited: vec![GroupId::NONE; len],
            frontier: Vec::new(),
            dirty: FixedBitSet::with_capacity(len),
            all_dirty: true,
            last_group: GroupId::NONE,
            last_epoch: Epoch::NEVER,
        }
    }

    pub fn grid(&self) -> &DenseGrid {
        &self.grid
    }

    pub fn into_grid(self) -> DenseGrid {
        self.grid
    }

    pub fn last_epoch(&self) -> Epoch {
        self.last_epoch
    }

    /// Group of the block at `position` as of the last pass.
    pub fn group_at(&self, position: Position) -> Option<GroupId> {
        self.grid
            .get(position)
            .map(|block| block.group)
            .filter(|group| group.is_assigned())
    }

    /// Change a block's type, remembering it for the next pass.
    pub fn set_block_type(&mut self, position: Position, block_type: BlockType) -> Result<BlockType> {
        let previous = self.grid.set_block_type(position, block_type)?;
        if previous != block_type {
            if let Some(index) = self.grid.index_of(position) {
                self.dirty.insert(index);
            }
        }
        Ok(previous)
    }

    /// Force the next pass to relabel every block.
    pub fn invalidate(&mut self) {
        self.all_dirty = true;
    }

    /// Run a pass with the epoch following the last one.
    ///
    /// Fails with [`GridError::EpochExhausted`] once a pass has run at
    /// `u64::MAX`.
    pub fn label_next(&mut self) -> Result<PassStats> {
        let epoch = self
            .last_epoch
            .next()
            .ok_or(GridError::EpochExhausted {
                last: self.last_epoch,
            })?;
        self.label(epoch)
    }

    /// Assign group ids to every block.
    ///
    /// `epoch` must be newer than the previous pass's epoch; otherwise the grid
    /// is left untouched and [`GridError::StaleEpoch`] is returned.
    pub fn label(&mut self, epoch: Epoch) -> Result<PassStats> {
        if epoch <= self.last_epoch {
            return Err(GridError::StaleEpoch {
                given: epoch,
                last: self.last_epoch,
            });
        }

        let affected = if self.all_dirty {
            None
        } else {
            Some(self.affected_groups())
        };
        let mut stats = PassStats {
            epoch,
            incremental: affected.is_some(),
            ..PassStats::default()
        };
        let mut retained = FxHashSet::default();

        for index in 0..self.grid.len() {
            let block = self.grid.blocks()[index];
            if block.last_labeled >= epoch {
                continue; // Already grouped this pass.
            }
            if let Some(affected) = &affected {
                if !affected.contains(&block.group) {
                    self.grid.blocks_mut()[index].last_labeled = epoch;
                    retained.insert(block.group);
                    stats.cells_retained += 1;
                    continue;
                }
            }
            let (assigned, pops) = self.flood(index, epoch);
            stats.cells_flooded += assigned;
            stats.frontier_pops += pops;
            stats.groups_created += 1;
        }
        stats.groups_retained = retained.len();

        self.dirty.clear();
        self.all_dirty = false;
        self.last_epoch = epoch;

        debug!(
            "labeled {}x{} grid at epoch {}: {} new groups, {} kept, {} blocks flooded in {} pops, {} retained{}",
            self.grid.width(),
            self.grid.height(),
            epoch,
            stats.groups_created,
            stats.groups_retained,
            stats.cells_flooded,
            stats.frontier_pops,
            stats.cells_retained,
            if stats.incremental { " (incremental)" } else { "" },
        );
        Ok(stats)
    }

    /// Old groups of every changed block and of its neighbors. Only these can
    /// split or merge.
    fn affected_groups(&self) -> FxHashSet<GroupId> {
        let mut affected = FxHashSet::default();
        for index in self.dirty.ones() {
            let position = self.grid.position_of(index);
            affected.insert(self.grid.blocks()[index].group);
            for neighbor in position.neighbors() {
                if let Some(block) = self.grid.get(neighbor) {
                    affected.insert(block.group);
                }
            }
        }
        trace!(
            "{} changed blocks touch {} groups",
            self.dirty.count_ones(..),
            affected.len()
        );
        affected
    }

    /// Depth-first fill from `root` with a fresh group id. Returns the number
    /// of blocks assigned and of frontier pops.
    fn flood(&mut self, root: usize, epoch: Epoch) -> (usize, usize) {
        let group = self.last_group.next();
        self.last_group = group;

        let Self {
            grid,
            visited,
            frontier,
            ..
        } = self;

        visited[root] = group;
        frontier.push(grid.position_of(root));

        let mut assigned = 0;
        let mut pops = 0;
        while let Some(current) = frontier.pop() {
            pops += 1;
            let Some(index) = grid.index_of(current) else {
                continue;
            };
            let block = &mut grid.blocks_mut()[index];
            block.group = group;
            block.last_labeled = epoch;
            let block_type = block.block_type;
            assigned += 1;

            for neighbor in current.neighbors() {
                let Some(neighbor_index) = grid.index_of(neighbor) else {
                    continue;
                };
                let candidate = &grid.blocks()[neighbor_index];
                if candidate.last_labeled >= epoch || visited[neighbor_index] == group {
                    continue;
                }
                if candidate.block_type == block_type {
                    frontier.push(neighbor);
                }
                visited[neighbor_index] = group;
            }
        }
        (assigned, pops)
    }

    /// Groups as of the last pass, in row-major order of their first block.
    pub fn labeling(&self) -> Labeling {
        Labeling::from_assignments(
            self.grid
                .iter()
                .filter(|block| block.group.is_assigned())
                .map(|block| (block.position, block.block_type, block.group)),
        )
    }

    /// Members of every group as of the last pass, in row-major order.
    pub fn groups(&self) -> FxHashMap<GroupId, Vec<Position>> {
        let mut groups: FxHashMap<GroupId, Vec<Position>> = FxHashMap::default();
        for block in self.grid.iter().filter(|block| block.group.is_assigned()) {
            groups.entry(block.group).or_default().push(block.position);
        }
        groups
    }

    pub fn partition(&self) -> Partition {
        self.labeling().partition()
    }
}
