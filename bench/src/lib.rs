//! Benchmark harness for blocky.
//!
//! Compares data layouts for tile/block grids:
//!
//! - **Connected blocks**: epoch-stamped dense labeling vs hash set based
//!   sparse labeling, full and incremental
//! - **Increment**: packed struct array vs boxed references vs chunked
//!   parallel-for
//! - **Contains**: linear scan over packed structs vs hashed reference lookup
//! - **Memory tracking**: heap allocation profiling via dhat
//! - **Frame timing**: per-pass timing statistics
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p blocky_bench
//!
//! # Run specific benchmark group
//! cargo bench -p blocky_bench -- connected_blocks
//!
//! # Run with memory profiling (slower)
//! cargo bench -p blocky_bench --features memory_profiling
//!
//! # Watch the labeler work on a random grid
//! RUST_LOG=debug cargo run -p blocky_bench --bin label_demo -- 60 30 4 100
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports.

pub mod frame_timer;
pub mod generate;
pub mod memory;
pub mod render;
pub mod scenarios;
