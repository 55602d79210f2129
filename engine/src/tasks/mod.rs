//! Worker pool and data-parallel loops.

mod executor;
mod parallel;

pub use executor::{Executor, ExecutorHandle, Scope, TaskFuture};
pub use parallel::{for_each_chunked, for_each_indexed};

