//! Per-frame timing for repeated labeling passes and store updates.
//!
//! A "frame" here is one unit of scenario work: a relabel pass, one sweep over
//! a value store, one batch of lookups.

use std::fmt;
use std::time::{Duration, Instant};

/// Timing summary over a run of frames.
#[derive(Debug, Clone)]
pub struct FrameStats {
    pub frame_count: usize,
    pub total: Duration,
    pub min: Duration,
    pub max: Duration,
    /// Frame times, ascending.
    sorted: Vec<Duration>,
}

impl FrameStats {
    pub fn from_times(mut times: Vec<Duration>) -> Self {
        times.sort_unstable();
        Self {
            frame_count: times.len(),
            total: times.iter().sum(),
            min: times.first().copied().unwrap_or_default(),
            max: times.last().copied().unwrap_or_default(),
            sorted: times,
        }
    }

    pub fn average(&self) -> Duration {
        match self.frame_count {
            0 => Duration::ZERO,
            n => self.total / n as u32,
        }
    }

    /// Nearest-rank percentile, `p` clamped to `0..=100`.
    pub fn percentile(&self, p: usize) -> Duration {
        let Some(last) = self.sorted.len().checked_sub(1) else {
            return Duration::ZERO;
        };
        let rank = (self.sorted.len() * p.min(100) / 100).min(last);
        self.sorted[rank]
    }

    pub fn median(&self) -> Duration {
        self.percentile(50)
    }

    pub fn p99(&self) -> Duration {
        self.percentile(99)
    }

    /// Work items processed per second, given `items_per_frame`.
    pub fn throughput(&self, items_per_frame: usize) -> f64 {
        let seconds = self.total.as_secs_f64();
        if seconds == 0.0 {
            0.0
        } else {
            (items_per_frame * self.frame_count) as f64 / seconds
        }
    }

    /// Ratio of this run's average to `baseline`'s. Below 1.0 means faster.
    pub fn relative_to(&self, baseline: &FrameStats) -> f64 {
        let base = baseline.average().as_secs_f64();
        if base == 0.0 {
            0.0
        } else {
            self.average().as_secs_f64() / base
        }
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        write!(
            f,
            "{} frames, avg {:.3}ms, median {:.3}ms, p99 {:.3}ms, min {:.3}ms, max {:.3}ms",
            self.frame_count,
            ms(self.average()),
            ms(self.median()),
            ms(self.p99()),
            ms(self.min),
            ms(self.max),
        )
    }
}

/// Records how long each timed closure takes.
#[derive(Debug, Default)]
pub struct FrameTimer {
    times: Vec<Duration>,
}

impl FrameTimer {
    pub fn with_capacity(frames: usize) -> Self {
        Self {
            times: Vec::with_capacity(frames),
        }
    }

    /// Run `frame` and record its duration.
    pub fn time<R>(&mut self, frame: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = frame();
        self.times.push(start.elapsed());
        result
    }

    pub fn frame_count(&self) -> usize {
        self.times.len()
    }

    pub fn finish(self) -> FrameStats {
        FrameStats::from_times(self.times)
    }
}

/// Run `frame_fn` `frame_count` times (receiving the frame number) and time
/// each call.
pub fn measure_frames<F>(frame_count: usize, mut frame_fn: F) -> FrameStats
where
    F: FnMut(usize),
{
    let mut timer = FrameTimer::with_capacity(frame_count);
    for frame in 0..frame_count {
        timer.time(|| frame_fn(frame));
    }
    timer.finish()
}
