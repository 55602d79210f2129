//! Increment scenario.
//!
//! Adds one to every value of a large collection each frame:
//! - packed struct array, single threaded tight loop
//! - boxed references in an address-hashed set
//! - packed struct array split into chunks on a worker pool

use blocky::ParallelConfig;
use blocky::storage::{BoxedHandle, BoxedStore, PackedStore, ValueStore};
use blocky::tasks::{Executor, for_each_chunked};
use log::error;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::generate::random_values;
use crate::scenarios::Scenario;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreLayout {
    Packed,
    Boxed,
    Parallel,
}

impl StoreLayout {
    pub const ALL: [StoreLayout; 3] = [StoreLayout::Packed, StoreLayout::Boxed, StoreLayout::Parallel];

    pub fn name(self) -> &'static str {
        match self {
            StoreLayout::Packed => "packed",
            StoreLayout::Boxed => "boxed",
            StoreLayout::Parallel => "parallel",
        }
    }
}

/// Configuration for the increment benchmark.
#[derive(Clone, Debug)]
pub struct IncrementConfig {
    pub elements: usize,
    pub layout: StoreLayout,
    pub parallel: ParallelConfig,
    /// Interleave throwaway allocations with the boxed values so they don't
    /// sit next to each other on the heap.
    pub scatter: bool,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for IncrementConfig {
    fn default() -> Self {
        Self {
            elements: 1_000_000,
            layout: StoreLayout::Packed,
            parallel: ParallelConfig::default(),
            scatter: true,
            seed: 12345,
        }
    }
}

/// Increment benchmark scenario.
pub struct IncrementScenario {
    config: IncrementConfig,
    packed: PackedStore,
    boxed: BoxedStore,
    decoys: Vec<BoxedHandle>,
    executor: Option<Executor>,
}

impl IncrementScenario {
    pub fn new() -> Self {
        Self::with_config(IncrementConfig::default())
    }

    pub fn with_config(config: IncrementConfig) -> Self {
        Self {
            config,
            packed: PackedStore::default(),
            boxed: BoxedStore::default(),
            decoys: Vec::new(),
            executor: None,
        }
    }

    /// Sum of all values in whichever store the layout uses.
    pub fn sum(&mut self) -> f64 {
        match self.config.layout {
            StoreLayout::Boxed => self.boxed.sum(),
            StoreLayout::Packed | StoreLayout::Parallel => self.packed.sum(),
        }
    }

    pub fn len(&self) -> usize {
        match self.config.layout {
            StoreLayout::Boxed => self.boxed.len(),
            StoreLayout::Packed | StoreLayout::Parallel => self.packed.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IncrementScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for IncrementScenario {
    fn name(&self) -> &'static str {
        "increment"
    }

    fn description(&self) -> &'static str {
        "Add one to every value: packed structs, boxed references or parallel chunks"
    }

    fn work_size(&self) -> usize {
        self.config.elements
    }

    fn setup(&mut self) {
        self.decoys.clear();
        let values = random_values(self.config.elements, self.config.seed);
        match self.config.layout {
            StoreLayout::Packed | StoreLayout::Parallel => {
                self.packed = values.into_iter().collect();
            }
            StoreLayout::Boxed => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
                self.boxed = BoxedStore::with_capacity(values.len());
                for value in values {
                    while self.config.scatter && rng.gen_bool(0.5) {
                        self.decoys.push(BoxedHandle::new(rng.r#gen()));
                    }
                    self.boxed.insert(value);
                }
            }
        }
        if self.config.layout == StoreLayout::Parallel {
            self.executor = Some(Executor::from_config(&self.config.parallel));
        }
    }

    fn update(&mut self) {
        match (self.config.layout, &self.executor) {
            (StoreLayout::Packed, _) => self.packed.increment_all(),
            (StoreLayout::Boxed, _) => self.boxed.increment_all(),
            (StoreLayout::Parallel, Some(executor)) => {
                let result = for_each_chunked(
                    executor,
                    self.packed.as_mut_slice(),
                    self.config.parallel.chunk_size,
                    |component| component.value += 1.0,
                );
                if let Err(err) = result {
                    error!("parallel increment failed: {err}");
                }
            }
            (StoreLayout::Parallel, None) => {}
        }
    }

    fn teardown(&mut self) {
        self.packed = PackedStore::default();
        self.boxed = BoxedStore::default();
        self.decoys.clear();
        self.executor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(layout: StoreLayout) -> IncrementScenario {
        IncrementScenario::with_config(IncrementConfig {
            elements: 1_000,
            layout,
            parallel: ParallelConfig {
                threads: 2,
                chunk_size: 64,
            },
            ..Default::default()
        })
    }

    #[test]
    fn every_layout_increments_every_value() {
        for layout in StoreLayout::ALL {
            let mut scenario = small(layout);
            scenario.setup();
            assert_eq!(scenario.len(), 1_000, "{layout:?}");

            let before = scenario.sum();
            for _ in 0..3 {
                scenario.update();
            }
            let after = scenario.sum();
            assert!((after - before - 3_000.0).abs() < 0.1, "{layout:?}: {before} -> {after}");

            scenario.teardown();
            assert!(scenario.is_empty());
        }
    }

    #[test]
    fn repeated_setup_does_not_pile_up_decoys() {
        let mut scenario = small(StoreLayout::Boxed);
        scenario.setup();
        let decoys = scenario.decoys.len();
        assert!(decoys > 0);

        scenario.setup();
        assert_eq!(scenario.decoys.len(), decoys);
        assert_eq!(scenario.len(), 1_000);
    }

    #[test]
    fn parallel_matches_packed() {
        let mut packed = small(StoreLayout::Packed);
        let mut parallel = small(StoreLayout::Parallel);
        packed.setup();
        parallel.setup();
        for _ in 0..5 {
            packed.update();
            parallel.update();
        }
        assert_eq!(packed.packed.as_slice(), parallel.packed.as_slice());
    }
}
