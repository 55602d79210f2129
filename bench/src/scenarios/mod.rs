//! Benchmark scenarios.
//!
//! Each scenario owns its data and runs one "frame" of work per `update`.
//!
//! # Scenarios
//!
//! - **Connected blocks**: relabel a block grid every frame, dense or sparse,
//!   with a configurable number of type changes per frame
//! - **Increment**: add one to every value of a store, packed, boxed or in
//!   parallel chunks
//! - **Contains**: look up random existing values, scanning packed structs or
//!   hashing boxed references

pub mod connected_blocks;
pub mod contains;
pub mod increment;

pub use connected_blocks::{ConnectedBlocksConfig, ConnectedBlocksScenario, GridLayout};
pub use contains::{ContainsConfig, ContainsScenario};
pub use increment::{IncrementConfig, IncrementScenario, StoreLayout};

/// Common trait for benchmark scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Brief description of what this scenario tests.
    fn description(&self) -> &'static str;

    /// Cells or values touched by one frame.
    fn work_size(&self) -> usize;

    /// Build the scenario's data.
    fn setup(&mut self);

    /// Run one frame.
    fn update(&mut self);

    /// Drop the scenario's data.
    fn teardown(&mut self);
}
