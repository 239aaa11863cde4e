//! Per-call outcomes, the shared response-time aggregate, and run summaries.
mod aggregator;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregator::Aggregator;
pub use types::{CallOutcome, CallResult, RunSummary, duration_millis};
