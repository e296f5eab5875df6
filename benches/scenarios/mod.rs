//! Real-world scenario benchmarks.
//!
//! Full engine blocks with the kind of input a player produces.

mod performance;

pub use performance::bench_performance;
