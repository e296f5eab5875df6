//! Benchmarks for chord construction and ownership tracking.

mod ledger;
mod voicing;

pub use ledger::bench_ledger;
pub use voicing::bench_voicing;
