//! Heap profiling via dhat.
//!
//! Used to compare what each layout costs per cell: the dense grid is one
//! allocation, the sparse grid and the boxed store allocate per entry.
//!
//! Profiling adds overhead and is off unless the `memory_profiling` feature
//! is enabled:
//!
//! ```bash
//! cargo bench -p blocky_bench --features memory_profiling
//! ```
//!
//! Load the generated `dhat-heap.json` in
//! <https://nnethercote.github.io/dh_view/dh_view.html>.

use std::fmt;

/// Heap usage captured around a closure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub bytes_allocated: u64,
    pub allocation_count: u64,
    pub peak_bytes: u64,
}

impl MemoryStats {
    pub fn bytes_per_cell(&self, cells: usize) -> f64 {
        per(self.bytes_allocated, cells)
    }

    pub fn allocations_per_cell(&self, cells: usize) -> f64 {
        per(self.allocation_count, cells)
    }
}

fn per(total: u64, cells: usize) -> f64 {
    if cells == 0 {
        0.0
    } else {
        total as f64 / cells as f64
    }
}

impl fmt::Display for MemoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes in {} allocations, peak {} bytes",
            self.bytes_allocated, self.allocation_count, self.peak_bytes
        )
    }
}

#[cfg(feature = "memory_profiling")]
mod profiler {
    use super::MemoryStats;

    /// Only one can be alive at a time; dhat enforces it.
    pub struct MemoryProfiler {
        _profiler: dhat::Profiler,
    }

    impl MemoryProfiler {
        pub fn start() -> Self {
            Self {
                _profiler: dhat::Profiler::new_heap(),
            }
        }

        /// Also writes `dhat-heap.json` when the profiler drops.
        pub fn finish(self) -> MemoryStats {
            let stats = dhat::HeapStats::get();
            MemoryStats {
                bytes_allocated: stats.total_bytes as u64,
                allocation_count: stats.total_blocks as u64,
                peak_bytes: stats.max_bytes as u64,
            }
        }
    }
}

#[cfg(not(feature = "memory_profiling"))]
mod profiler {
    use super::MemoryStats;

    /// No-op stand-in; reports zeroes.
    pub struct MemoryProfiler;

    impl MemoryProfiler {
        pub fn start() -> Self {
            Self
        }

        pub fn finish(self) -> MemoryStats {
            MemoryStats::default()
        }
    }
}

pub use profiler::MemoryProfiler;

/// Run `f` under the profiler. Zeroed stats without `memory_profiling`.
pub fn measure_memory<F, R>(f: F) -> (R, MemoryStats)
where
    F: FnOnce() -> R,
{
    let profiler = MemoryProfiler::start();
    let result = f();
    (result, profiler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_cell_ratios() {
        let stats = MemoryStats {
            bytes_allocated: 32_000,
            allocation_count: 2,
            peak_bytes: 32_000,
        };
        assert!((stats.bytes_per_cell(1_000) - 32.0).abs() < f64::EPSILON);
        assert!((stats.allocations_per_cell(1_000) - 0.002).abs() < 1e-12);
        assert_eq!(stats.bytes_per_cell(0), 0.0);
    }

    #[test]
    fn display_mentions_all_fields() {
        let text = MemoryStats {
            bytes_allocated: 1024,
            allocation_count: 10,
            peak_bytes: 512,
        }
        .to_string();
        assert!(text.contains("1024 bytes"));
        assert!(text.contains("10 allocations"));
        assert!(text.contains("peak 512"));
    }

    #[cfg(not(feature = "memory_profiling"))]
    #[test]
    fn measure_memory_returns_the_result() {
        let (sum, stats) = measure_memory(|| (1..=10).sum::<u32>());
        assert_eq!(sum, 55);
        assert_eq!(stats, MemoryStats::default());
    }
}
