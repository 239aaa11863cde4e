use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::types::CallOutcome;

struct AggregateState {
    response_times: Vec<f64>,
    sink: Box<dyn Write + Send>,
}

/// Response times of a run plus the sink its result lines go to.
///
/// Both sit behind one lock so that a result line and its sample are always
/// committed together and lines from different workers never interleave.
pub struct Aggregator {
    state: Mutex<AggregateState>,
}

impl Aggregator {
    pub fn new<W>(sink: W, capacity: usize) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            state: Mutex::new(AggregateState {
                response_times: Vec::with_capacity(capacity),
                sink: Box::new(sink),
            }),
        }
    }

    /// Writes the outcome's result line and appends its response time.
    pub fn record(&self, outcome: &CallOutcome) {
        let line = outcome.log_line();
        let mut state = self.lock();
        write_to_sink(&mut state, &line);
        state.response_times.push(outcome.response_time_ms);
    }

    /// Writes a line without recording a sample.
    pub fn write_line(&self, line: &str) {
        let mut state = self.lock();
        write_to_sink(&mut state, line);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().response_times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves the collected samples out, leaving the aggregate empty.
    #[must_use]
    pub fn take_response_times(&self) -> Vec<f64> {
        std::mem::take(&mut self.lock().response_times)
    }

    pub fn flush(&self) {
        if let Err(err) = self.lock().sink.flush() {
            warn!("Failed to flush result output: {}", err);
        }
    }

    fn lock(&self) -> MutexGuard<'_, AggregateState> {
        // A worker that panicked mid-write leaves at most one partial line.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write_to_sink(state: &mut AggregateState, line: &str) {
    if let Err(err) = writeln!(state.sink, "{}", line) {
        warn!("Failed to write result line: {}", err);
    }
}
