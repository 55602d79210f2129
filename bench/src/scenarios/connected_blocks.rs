//! Connected blocks scenario.
//!
//! Relabels a random block grid every frame. Between frames a few random
//! blocks change type, the way blocks get placed and destroyed during play.
//!
//! This scenario tests:
//! - Dense epoch labeling against sparse hash set labeling on the same data
//! - How much incremental relabeling saves when most of the grid is unchanged

use blocky::{EpochLabeler, GridConfig, Labeling, PassStats, SparseGrid, SparseLabeler};
use log::error;

use crate::generate::{ChangeGenerator, random_dense_grid};
use crate::scenarios::Scenario;

/// Which grid representation and labeler to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridLayout {
    /// Dense grid, relabeled incrementally.
    Dense,
    /// Dense grid, every block relabeled every frame.
    DenseFull,
    /// Sparse grid, labeled from scratch every frame.
    Sparse,
}

impl GridLayout {
    pub const ALL: [GridLayout; 3] = [GridLayout::Dense, GridLayout::DenseFull, GridLayout::Sparse];

    pub fn name(self) -> &'static str {
        match self {
            GridLayout::Dense => "dense",
            GridLayout::DenseFull => "dense_full",
            GridLayout::Sparse => "sparse",
        }
    }
}

/// Configuration for the connected blocks benchmark.
#[derive(Clone, Debug)]
pub struct ConnectedBlocksConfig {
    pub grid: GridConfig,
    pub layout: GridLayout,
    /// Random type changes applied before each frame's pass.
    pub changes_per_frame: usize,
}

impl Default for ConnectedBlocksConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            layout: GridLayout::Dense,
            changes_per_frame: 1,
        }
    }
}

enum State {
    Empty,
    Dense(EpochLabeler),
    Sparse {
        grid: SparseGrid,
        labeler: SparseLabeler,
        last: Labeling,
    },
}

/// Connected blocks benchmark scenario.
pub struct ConnectedBlocksScenario {
    config: ConnectedBlocksConfig,
    changes: ChangeGenerator,
    state: State,
    last_pass: Option<PassStats>,
}

impl ConnectedBlocksScenario {
    pub fn new() -> Self {
        Self::with_config(ConnectedBlocksConfig::default())
    }

    pub fn with_config(config: ConnectedBlocksConfig) -> Self {
        Self {
            changes: ChangeGenerator::new(&config.grid),
            config,
            state: State::Empty,
            last_pass: None,
        }
    }

    pub fn config(&self) -> &ConnectedBlocksConfig {
        &self.config
    }

    /// Stats of the latest dense pass. `None` for the sparse layout or after a
    /// failed pass.
    pub fn last_pass(&self) -> Option<PassStats> {
        self.last_pass
    }

    /// Groups as of the latest frame.
    pub fn labeling(&self) -> Option<Labeling> {
        match &self.state {
            State::Empty => None,
            State::Dense(labeler) => Some(labeler.labeling()),
            State::Sparse { last, .. } => Some(last.clone()),
        }
    }

    /// Dense labeler, when running a dense layout.
    pub fn labeler(&self) -> Option<&EpochLabeler> {
        match &self.state {
            State::Dense(labeler) => Some(labeler),
            _ => None,
        }
    }

    fn apply_changes(&mut self) {
        for _ in 0..self.config.changes_per_frame {
            let (position, block_type) = self.changes.next_change();
            match &mut self.state {
                State::Empty => return,
                State::Dense(labeler) => {
                    if let Err(err) = labeler.set_block_type(position, block_type) {
                        error!("change at {position} rejected: {err}");
                    }
                }
                State::Sparse { grid, .. } => {
                    grid.insert(position, block_type);
                }
            }
        }
    }
}

fn run_pass(labeler: &mut EpochLabeler) -> Option<PassStats> {
    match labeler.label_next() {
        Ok(stats) => Some(stats),
        Err(err) => {
            error!("labeling pass failed: {err}");
            None
        }
    }
}

impl Default for ConnectedBlocksScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ConnectedBlocksScenario {
    fn name(&self) -> &'static str {
        "connected_blocks"
    }

    fn description(&self) -> &'static str {
        "Group 4-connected equal-type blocks every frame while a few blocks change"
    }

    fn work_size(&self) -> usize {
        self.config.grid.cell_count()
    }

    fn setup(&mut self) {
        self.changes = ChangeGenerator::new(&self.config.grid);
        let grid = match random_dense_grid(&self.config.grid) {
            Ok(grid) => grid,
            Err(err) => {
                error!("cannot build grid for {:?}: {err}", self.config.grid);
                self.state = State::Empty;
                return;
            }
        };

        self.state = match self.config.layout {
            GridLayout::Dense | GridLayout::DenseFull => {
                let mut labeler = EpochLabeler::new(grid);
                self.last_pass = run_pass(&mut labeler);
                State::Dense(labeler)
            }
            GridLayout::Sparse => {
                let grid = grid.to_sparse();
                let mut labeler = SparseLabeler::new();
                let last = labeler.label(&grid);
                State::Sparse {
                    grid,
                    labeler,
                    last,
                }
            }
        };
    }

    fn update(&mut self) {
        self.apply_changes();
        let full = self.config.layout == GridLayout::DenseFull;
        match &mut self.state {
            State::Empty => {}
            State::Dense(labeler) => {
                if full {
                    labeler.invalidate();
                }
                self.last_pass = run_pass(labeler);
            }
            State::Sparse {
                grid,
                labeler,
                last,
            } => {
                *last = labeler.label(grid);
            }
        }
    }

    fn teardown(&mut self) {
        self.state = State::Empty;
        self.last_pass = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(layout: GridLayout) -> ConnectedBlocksScenario {
        ConnectedBlocksScenario::with_config(ConnectedBlocksConfig {
            grid: GridConfig {
                width: 24,
                height: 16,
                block_types: 3,
                seed: 77,
            },
            layout,
            changes_per_frame: 2,
        })
    }

    #[test]
    fn setup_labels_every_block() {
        for layout in GridLayout::ALL {
            let mut scenario = small(layout);
            assert!(scenario.labeling().is_none());

            scenario.setup();
            let labeling = scenario.labeling().unwrap();
            assert_eq!(labeling.cell_count(), 24 * 16, "{layout:?}");

            scenario.teardown();
            assert!(scenario.labeling().is_none());
        }
    }

    #[test]
    fn layouts_agree_frame_by_frame() {
        let mut scenarios: Vec<_> = GridLayout::ALL.into_iter().map(small).collect();
        for scenario in &mut scenarios {
            scenario.setup();
        }

        for _ in 0..10 {
            for scenario in &mut scenarios {
                scenario.update();
            }
            let partitions: Vec<_> = scenarios
                .iter()
                .map(|s| s.labeling().unwrap().partition())
                .collect();
            assert_eq!(partitions[0], partitions[1]);
            assert_eq!(partitions[0], partitions[2]);
        }
    }

    #[test]
    fn dense_updates_are_incremental_unless_forced() {
        let mut dense = small(GridLayout::Dense);
        let mut full = small(GridLayout::DenseFull);
        dense.setup();
        full.setup();

        dense.update();
        full.update();

        let dense_pass = dense.last_pass().unwrap();
        let full_pass = full.last_pass().unwrap();
        assert!(dense_pass.incremental);
        assert!(!full_pass.incremental);
        assert_eq!(full_pass.cells_flooded, 24 * 16);
        assert!(dense_pass.cells_flooded < full_pass.cells_flooded);
    }
}
