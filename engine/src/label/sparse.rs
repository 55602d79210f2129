use log::debug;
use rustc_hash::FxHashSet;

use crate::grid::{GroupId, Position, SparseGrid, TypeLookup};

use super::{Group, Labeling};

/// Hash set based labeler.
///
/// Works over any [`TypeLookup`], including grids with holes and unbounded
/// coordinates. Nothing carries over between passes: the assigned set is
/// cleared every pass and the visited set for every root, and group ids
/// restart at 1.
#[derive(Default)]
pub struct SparseLabeler {
    visited: FxHashSet<Position>,
    assigned: FxHashSet<Position>,
    frontier: Vec<Position>,
}

impl SparseLabeler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label every block of `grid`, roots taken in insertion order.
    pub fn label(&mut self, grid: &SparseGrid) -> Labeling {
        self.label_with(grid.positions().iter().copied(), grid)
    }

    /// Label the blocks at `positions`, using `lookup` for types.
    ///
    /// Positions without a block are skipped. Groups may extend to positions
    /// not listed, as long as `lookup` reports a block there.
    pub fn label_with<I, L>(&mut self, positions: I, lookup: &L) -> Labeling
    where
        I: IntoIterator<Item = Position>,
        L: TypeLookup + ?Sized,
    {
        let positions = positions.into_iter();
        let mut labeling = Labeling::with_capacity(positions.size_hint().0);
        let mut last_group = GroupId::NONE;
        self.assigned.clear();

        for root in positions {
            if self.assigned.contains(&root) {
                continue;
            }
            let Some(block_type) = lookup.block_type_at(root) else {
                continue;
            };
            last_group = last_group.next();

            let mut members = Vec::new();
            self.visited.clear();
            self.visited.insert(root);
            self.frontier.push(root);

            while let Some(current) = self.frontier.pop() {
                members.push(current);
                self.assigned.insert(current);
                for neighbor in current.neighbors() {
                    if self.visited.insert(neighbor) && lookup.same_type(neighbor, current) {
                        self.frontier.push(neighbor);
                    }
                }
            }

            labeling.push_group(Group {
                id: last_group,
                block_type,
                positions: members,
            });
        }

        debug!(
            "sparse labeling found {} groups over {} blocks",
            labeling.len(),
            labeling.cell_count()
        );
        labeling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BlockType, DenseGrid};

    fn sparse(rows: &[&[i16]]) -> SparseGrid {
        DenseGrid::from_rows(rows).unwrap().to_sparse()
    }

    #[test]
    fn uniform_grid_is_one_group() {
        let labeling = SparseLabeler::new().label(&sparse(&[&[3, 3, 3], &[3, 3, 3], &[3, 3, 3]]));
        assert_eq!(labeling.len(), 1);
        assert_eq!(labeling.groups()[0].len(), 9);
        assert_eq!(labeling.groups()[0].block_type, BlockType(3));
    }

    #[test]
    fn checkerboard_is_all_singletons() {
        let labeling = SparseLabeler::new().label(&sparse(&[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]]));
        assert_eq!(labeling.len(), 9);
    }

    #[test]
    fn holes_split_groups() {
        let grid: SparseGrid = [(0, 0), (1, 0), (3, 0), (3, 1)]
            .into_iter()
            .map(|(x, y)| (Position::new(x, y), BlockType(1)))
            .collect();

        let labeling = SparseLabeler::new().label(&grid);
        assert_eq!(labeling.partition().sizes(), vec![2, 2]);
        assert_eq!(labeling.group_at(Position::new(2, 0)), None);
    }

    #[test]
    fn negative_coordinates_are_fine() {
        let grid: SparseGrid = [(-2, -2), (-2, -1), (-1, -1)]
            .into_iter()
            .map(|(x, y)| (Position::new(x, y), BlockType(5)))
            .collect();

        let labeling = SparseLabeler::new().label(&grid);
        assert_eq!(labeling.len(), 1);
        assert_eq!(labeling.cell_count(), 3);
    }

    #[test]
    fn every_block_appears_once() {
        let grid = sparse(&[&[1, 1, 2, 2], &[1, 2, 2, 1], &[1, 1, 1, 1]]);
        let labeling = SparseLabeler::new().label(&grid);

        let total: usize = labeling.groups().iter().map(Group::len).sum();
        assert_eq!(total, grid.len());
        assert_eq!(labeling.cell_count(), grid.len());
    }

    #[test]
    fn ids_restart_every_pass() {
        let grid = sparse(&[&[1, 2]]);
        let mut labeler = SparseLabeler::new();
        let first = labeler.label(&grid);
        let second = labeler.label(&grid);

        assert_eq!(first.groups(), second.groups());
        assert_eq!(first.groups()[0].id, GroupId(1));
    }

    #[test]
    fn label_with_reads_a_dense_grid() {
        let grid = DenseGrid::from_rows(&[&[1, 1], &[2, 1]]).unwrap();
        let labeling = SparseLabeler::new().label_with(grid.iter().map(|b| b.position), &grid);
        assert_eq!(labeling.partition().sizes(), vec![3, 1]);
    }

    #[test]
    fn opposite_coordinate_extremes_are_not_adjacent() {
        let grid: SparseGrid = [
            (i32::MAX, 0),
            (i32::MIN, 0),
            (0, i32::MAX),
            (0, i32::MIN),
        ]
        .into_iter()
        .map(|(x, y)| (Position::new(x, y), BlockType(1)))
        .collect();

        let labeling = SparseLabeler::new().label(&grid);
        assert_eq!(labeling.len(), 4);
        assert_eq!(labeling.partition().sizes(), vec![1, 1, 1, 1]);
    }
}
