use std::time::Duration;

/// Result of one attempted call as it is reported on its result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult {
    /// A response head arrived; carries the status line, e.g. `200 OK`.
    Success { status: String },
    /// Network error, timeout, or body read failure.
    Failed { error: String },
}

/// One measured call. Failed calls are timed and aggregated like successes.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutcome {
    pub worker_id: usize,
    pub call_index: u64,
    pub response_time_ms: f64,
    pub result: CallResult,
}

impl CallOutcome {
    #[must_use]
    pub fn log_line(&self) -> String {
        match &self.result {
            CallResult::Success { status } => format!(
                "Thread {:2}.{:<6} - Success: {} - Response time: {:.2} ms",
                self.worker_id, self.call_index, status, self.response_time_ms
            ),
            CallResult::Failed { error } => format!(
                "Thread {:2}.{:<6} - Request failed: {} - Response time: {:.2} ms",
                self.worker_id, self.call_index, error, self.response_time_ms
            ),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.result, CallResult::Success { .. })
    }
}

/// Final statistics of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Wall-clock time from first worker launch to the join.
    pub total_time: Duration,
    pub sample_count: usize,
    /// Arithmetic mean in milliseconds; `0.0` when nothing was measured.
    pub average_response_time_ms: f64,
    pub requests_per_second: f64,
}

#[expect(
    clippy::float_arithmetic,
    reason = "Latencies are reported as fractional milliseconds"
)]
#[must_use]
pub fn duration_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
