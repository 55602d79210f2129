//! Labels a random grid with every layout, prints pass timings and draws the
//! final dense grid with one color per group.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p blocky_bench --bin label_demo -- [width] [height] [block_types] [frames]
//! ```

use std::error::Error;

use blocky::GridConfig;
use blocky_bench::frame_timer::{FrameStats, measure_frames};
use blocky_bench::memory::measure_memory;
use blocky_bench::render;
use blocky_bench::scenarios::{ConnectedBlocksConfig, ConnectedBlocksScenario, GridLayout, Scenario};
use log::info;

#[cfg(feature = "memory_profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

const DEFAULT_FRAMES: usize = 100;

fn arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> Result<T, String> {
    match args.get(index) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("argument {index} ({raw:?}) is not a valid number")),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let defaults = GridConfig::default();
    let grid = GridConfig {
        width: arg(&args, 0, defaults.width)?,
        height: arg(&args, 1, defaults.height)?,
        block_types: arg(&args, 2, defaults.block_types)?,
        seed: defaults.seed,
    };
    let frames = arg(&args, 3, DEFAULT_FRAMES)?;
    info!("labeling {}x{} grid with {} block types", grid.width, grid.height, grid.block_types);

    let mut baseline: Option<FrameStats> = None;
    let mut last_dense = None;
    for layout in GridLayout::ALL {
        let mut scenario = ConnectedBlocksScenario::with_config(ConnectedBlocksConfig {
            grid: grid.clone(),
            layout,
            ..Default::default()
        });
        let ((), memory) = measure_memory(|| scenario.setup());
        let stats = measure_frames(frames, |_| scenario.update());

        let groups = scenario.labeling().map(|l| l.len()).unwrap_or_default();
        println!("{:<11} {stats} | {groups} groups", layout.name());
        println!(
            "{:<11} {:.0} cells/s",
            "",
            stats.throughput(scenario.work_size())
        );
        if cfg!(feature = "memory_profiling") {
            println!(
                "{:<11} setup: {memory} ({:.1} bytes/cell)",
                "",
                memory.bytes_per_cell(scenario.work_size())
            );
        }
        if let Some(pass) = scenario.last_pass() {
            println!(
                "{:<11} last pass: {} flooded in {} pops, {} retained, {} groups created, {} kept",
                "",
                pass.cells_flooded,
                pass.frontier_pops,
                pass.cells_retained,
                pass.groups_created,
                pass.groups_retained
            );
        }
        match &baseline {
            Some(base) => println!("{:<11} {:.2}x vs dense", "", stats.relative_to(base)),
            None => baseline = Some(stats),
        }

        if layout == GridLayout::Dense {
            last_dense = Some(scenario);
        } else {
            scenario.teardown();
        }
    }

    if let Some(labeler) = last_dense.as_ref().and_then(|s| s.labeler()) {
        println!();
        render::render_grid(&mut std::io::stdout().lock(), labeler.grid())?;
    }
    Ok(())
}
