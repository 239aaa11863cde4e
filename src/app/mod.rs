//! Run coordination: partitioning, worker fan-out, join, and reporting.
mod runner;
mod summary;

#[cfg(test)]
mod tests;

pub use runner::{RunReport, partition_calls, run_load_test};
pub use summary::{compute_summary, summary_lines};
