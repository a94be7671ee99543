//! Synthetic mutation workloads for exercising trackers.
//!
//! A workload is a deterministic (per seed) stream of set / clear / clear-all
//! operations. Base-range indices follow a geometric distribution so the low
//! fields, which real objects touch most, dominate; a configurable share of
//! operations targets the overflow range.

mod config;
mod operation;
mod runner;
mod stats;

pub use config::*;
pub use operation::*;
pub use runner::*;
pub use stats::*;
