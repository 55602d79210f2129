//! Contains scenario.
//!
//! Each frame looks up a batch of values known to be stored. The packed store
//! finds them by scanning for the value; the boxed store hashes the reference
//! it was handed at insert time.

use blocky::storage::{BoxedHandle, BoxedStore, PackedStore, ValueStore};
use log::warn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::generate::random_values;
use crate::scenarios::{Scenario, StoreLayout};

/// Configuration for the contains benchmark.
#[derive(Clone, Debug)]
pub struct ContainsConfig {
    pub elements: usize,
    /// `Parallel` behaves like `Packed` here.
    pub layout: StoreLayout,
    pub lookups_per_frame: usize,
    pub seed: u64,
}

impl Default for ContainsConfig {
    fn default() -> Self {
        Self {
            elements: 1_000_000,
            layout: StoreLayout::Packed,
            lookups_per_frame: 1_000,
            seed: 12345,
        }
    }
}

/// Contains benchmark scenario.
pub struct ContainsScenario {
    config: ContainsConfig,
    rng: ChaCha8Rng,
    values: Vec<f32>,
    packed: PackedStore,
    boxed: BoxedStore,
    handles: Vec<BoxedHandle>,
    misses: usize,
}

impl ContainsScenario {
    pub fn new() -> Self {
        Self::with_config(ContainsConfig::default())
    }

    pub fn with_config(config: ContainsConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            values: Vec::new(),
            packed: PackedStore::default(),
            boxed: BoxedStore::default(),
            handles: Vec::new(),
            misses: 0,
        }
    }

    /// Lookups that failed to find a stored value. Always zero unless a store
    /// is broken.
    pub fn misses(&self) -> usize {
        self.misses
    }
}

impl Default for ContainsScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ContainsScenario {
    fn name(&self) -> &'static str {
        "contains"
    }

    fn description(&self) -> &'static str {
        "Find stored values: linear scan over packed structs vs hashed reference lookup"
    }

    fn work_size(&self) -> usize {
        self.config.lookups_per_frame
    }

    fn setup(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.values = random_values(self.config.elements, self.config.seed);
        self.misses = 0;
        match self.config.layout {
            StoreLayout::Packed | StoreLayout::Parallel => {
                self.packed = self.values.iter().copied().collect();
            }
            StoreLayout::Boxed => {
                self.boxed = BoxedStore::with_capacity(self.values.len());
                self.handles = self.values.iter().map(|v| self.boxed.insert(*v)).collect();
            }
        }
    }

    fn update(&mut self) {
        if self.values.is_empty() {
            return;
        }
        for _ in 0..self.config.lookups_per_frame {
            let index = self.rng.gen_range(0..self.values.len());
            let found = match self.config.layout {
                StoreLayout::Packed | StoreLayout::Parallel => {
                    self.packed.find(self.values[index]).is_some()
                }
                StoreLayout::Boxed => self.boxed.contains(&self.handles[index]),
            };
            if !found {
                self.misses += 1;
                warn!("stored value #{index} not found");
            }
        }
    }

    fn teardown(&mut self) {
        self.values.clear();
        self.packed = PackedStore::default();
        self.boxed = BoxedStore::default();
        self.handles.clear();
    }
}
