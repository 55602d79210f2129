//! Connected-block labeling.
//!
//! A labeling pass gives every block a [`GroupId`] such that 4-adjacent blocks
//! of equal type share a group. Only group *membership* is meaningful; the id
//! numbers themselves are an artifact of traversal order. Compare results
//! through [`Partition`].

mod epoch;
mod sparse;

pub use epoch::EpochLabeler;
pub use sparse::SparseLabeler;

use rustc_hash::FxHashMap;

use crate::grid::{BlockType, Epoch, GroupId, Position};

/// One connected region of equal-type blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub block_type: BlockType,
    /// Members in visit order.
    pub positions: Vec<Position>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Result of a labeling pass: the groups plus a position lookup.
#[derive(Clone, Debug, Default)]
pub struct Labeling {
    groups: Vec<Group>,
    index_by_group: FxHashMap<GroupId, usize>,
    group_by_position: FxHashMap<Position, GroupId>,
}

impl Labeling {
    pub(crate) fn with_capacity(cells: usize) -> Self {
        Self {
            groups: Vec::new(),
            index_by_group: FxHashMap::default(),
            group_by_position: FxHashMap::with_capacity_and_hasher(cells, Default::default()),
        }
    }

    pub(crate) fn push_group(&mut self, group: Group) {
        for position in &group.positions {
            self.group_by_position.insert(*position, group.id);
        }
        self.index_by_group.insert(group.id, self.groups.len());
        self.groups.push(group);
    }

    /// Build from per-block assignments. Groups appear in order of their first
    /// member.
    pub(crate) fn from_assignments<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (Position, BlockType, GroupId)>,
    {
        let mut labeling = Labeling::default();
        for (position, block_type, id) in assignments {
            let index = *labeling.index_by_group.entry(id).or_insert_with(|| {
                labeling.groups.push(Group {
                    id,
                    block_type,
                    positions: Vec::new(),
                });
                labeling.groups.len() - 1
            });
            labeling.groups[index].positions.push(position);
            labeling.group_by_position.insert(position, id);
        }
        labeling
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.index_by_group.get(&id).map(|index| &self.groups[*index])
    }

    pub fn group_at(&self, position: Position) -> Option<GroupId> {
        self.group_by_position.get(&position).copied()
    }

    /// Number of labeled positions.
    pub fn cell_count(&self) -> usize {
        self.group_by_position.len()
    }

    pub fn partition(&self) -> Partition {
        Partition::new(self.groups.iter().map(|group| group.positions.clone()))
    }
}

/// Canonical, id-free form of a labeling: every group as a sorted member list,
/// groups sorted by their first member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Partition {
    groups: Vec<Vec<Position>>,
}

impl Partition {
    pub fn new<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = Vec<Position>>,
    {
        let mut groups: Vec<Vec<Position>> = groups
            .into_iter()
            .filter(|group| !group.is_empty())
            .map(|mut group| {
                group.sort_unstable_by_key(|p| (p.y, p.x));
                group
            })
            .collect();
        groups.sort_unstable_by_key(|group| (group[0].y, group[0].x));
        Self { groups }
    }

    pub fn groups(&self) -> &[Vec<Position>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group sizes, largest first.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.groups.iter().map(Vec::len).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }
}

/// Summary of one [`EpochLabeler::label`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub epoch: Epoch,
    /// True when only regions touched by type changes were re-flooded.
    pub incremental: bool,
    pub groups_created: usize,
    /// Groups carried over unchanged, id included, from the previous pass.
    pub groups_retained: usize,
    /// Blocks visited by a flood fill this pass.
    pub cells_flooded: usize,
    /// Blocks that kept their group id from the previous pass.
    pub cells_retained: usize,
    /// Positions popped off the flood frontier.
    pub frontier_pops: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn partition_ignores_member_and_group_order() {
        let a = Partition::new(vec![vec![p(1, 0), p(0, 0)], vec![p(0, 1)]]);
        let b = Partition::new(vec![vec![p(0, 1)], vec![p(0, 0), p(1, 0)]]);
        assert_eq!(a, b);
        assert_eq!(a.sizes(), vec![2, 1]);
    }

    #[test]
    fn partition_distinguishes_membership() {
        let a = Partition::new(vec![vec![p(0, 0), p(1, 0)], vec![p(2, 0)]]);
        let b = Partition::new(vec![vec![p(0, 0)], vec![p(1, 0), p(2, 0)]]);
        assert_ne!(a, b);
    }

    #[test]
    fn labeling_from_assignments_groups_by_id() {
        let labeling = Labeling::from_assignments([
            (p(0, 0), BlockType(1), GroupId(7)),
            (p(1, 0), BlockType(2), GroupId(9)),
            (p(0, 1), BlockType(1), GroupId(7)),
        ]);

        assert_eq!(labeling.len(), 2);
        assert_eq!(labeling.cell_count(), 3);
        assert_eq!(labeling.groups()[0].id, GroupId(7));
        assert_eq!(labeling.group(GroupId(7)).map(Group::len), Some(2));
        assert_eq!(labeling.group_at(p(1, 0)), Some(GroupId(9)));
        assert_eq!(labeling.group_at(p(5, 5)), None);
    }
}
