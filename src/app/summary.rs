use std::time::Duration;

use crate::metrics::RunSummary;

pub(crate) const COMPLETION_MARKER: &str = "All threads have finished.";

/// Reduces the collected samples into the run's statistics.
///
/// An empty sample set reports an average of `0.0` instead of dividing by
/// zero, and a zero elapsed time reports `0.0` requests per second.
#[expect(
    clippy::float_arithmetic,
    reason = "Mean latency and throughput are fractional"
)]
#[must_use]
pub fn compute_summary(response_times: &[f64], total_calls: u64, total_time: Duration) -> RunSummary {
    let sample_count = response_times.len();
    let average_response_time_ms = if sample_count == 0 {
        0.0
    } else {
        response_times.iter().sum::<f64>() / sample_count as f64
    };

    let total_secs = total_time.as_secs_f64();
    let requests_per_second = if total_secs > 0.0 {
        total_calls as f64 / total_secs
    } else {
        0.0
    };

    RunSummary {
        total_time,
        sample_count,
        average_response_time_ms,
        requests_per_second,
    }
}

#[must_use]
pub fn summary_lines(summary: &RunSummary) -> [String; 3] {
    [
        format!("Total test time: {:.2} s", summary.total_time.as_secs_f64()),
        format!(
            "Average response time: {:.2} ms",
            summary.average_response_time_ms
        ),
        format!(
            "Average requests per second: {:.2}",
            summary.requests_per_second
        ),
    ]
}
