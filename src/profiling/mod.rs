//! Profiling utilities.
//!
//! - `draw_stats`: render duration sampling with a periodic `Draw: <avg>us (n=<count>)` summary

mod draw_stats;

pub use draw_stats::{DrawStats, PerfMonitor};
