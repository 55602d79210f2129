//! Value store benchmarks using Criterion.
//!
//! - Increment: packed structs vs boxed references vs parallel chunks
//! - Contains: linear scan vs hashed reference lookup
//! - Heap cost per element of each layout (with `memory_profiling`)

use blocky::ParallelConfig;
use blocky_bench::{
    memory::measure_memory,
    scenarios::{
        ContainsConfig, ContainsScenario, IncrementConfig, IncrementScenario, Scenario,
        StoreLayout,
    },
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

#[cfg(feature = "memory_profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

// =============================================================================
// Increment Benchmarks
// =============================================================================

fn bench_increment(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage/increment");

    for count in [10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(count as u64));

        for layout in StoreLayout::ALL {
            group.bench_with_input(BenchmarkId::new(layout.name(), count), &count, |b, &n| {
                let mut scenario = IncrementScenario::with_config(IncrementConfig {
                    elements: n,
                    layout,
                    ..Default::default()
                });
                scenario.setup();

                b.iter(|| {
                    scenario.update();
                });
            });
        }
    }

    group.finish();
}

fn bench_chunk_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage/chunk_size");
    let count = 1_000_000;
    group.throughput(Throughput::Elements(count as u64));

    for chunk_size in [128, 1_024, 16_384, 131_072] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk_size), &chunk_size, |b, &chunk| {
            let mut scenario = IncrementScenario::with_config(IncrementConfig {
                elements: count,
                layout: StoreLayout::Parallel,
                parallel: ParallelConfig {
                    chunk_size: chunk,
                    ..Default::default()
                },
                ..Default::default()
            });
            scenario.setup();

            b.iter(|| {
                scenario.update();
            });
        });
    }

    group.finish();
}

// =============================================================================
// Contains Benchmarks
// =============================================================================

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage/contains");
    group.sample_size(20); // Packed lookups scan the whole store

    for count in [1_000, 10_000, 100_000] {
        for layout in [StoreLayout::Packed, StoreLayout::Boxed] {
            let config = ContainsConfig {
                elements: count,
                layout,
                lookups_per_frame: 100,
                ..Default::default()
            };
            group.throughput(Throughput::Elements(config.lookups_per_frame as u64));

            group.bench_with_input(BenchmarkId::new(layout.name(), count), &config, |b, config| {
                let mut scenario = ContainsScenario::with_config(config.clone());
                scenario.setup();

                b.iter(|| {
                    scenario.update();
                });
            });
        }
    }

    group.finish();
}

// =============================================================================
// Memory Usage
// =============================================================================

fn report_memory(_c: &mut Criterion) {
    if !cfg!(feature = "memory_profiling") {
        return;
    }
    let count = 100_000;
    for layout in [StoreLayout::Packed, StoreLayout::Boxed] {
        let (_, stats) = measure_memory(|| {
            let mut scenario = IncrementScenario::with_config(IncrementConfig {
                elements: count,
                layout,
                scatter: false,
                ..Default::default()
            });
            scenario.setup();
            scenario.len()
        });
        println!(
            "{:<8} {stats} ({:.1} bytes/element, {:.2} allocations/element)",
            layout.name(),
            stats.bytes_per_cell(count),
            stats.allocations_per_cell(count)
        );
    }
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_increment,
    bench_chunk_size,
    bench_contains,
    report_memory,
);

criterion_main!(benches);
