use std::io::Write;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::{
    domain::{RunConfig, RunPhase, WorkAssignment},
    error::AppResult,
    http::{Transport, WorkerContext, WorkerReport, run_worker},
    metrics::{Aggregator, RunSummary},
};

use super::summary::{COMPLETION_MARKER, compute_summary, summary_lines};

/// Upper bound on samples reserved up front; larger runs grow on demand.
const MAX_PREALLOCATED_SAMPLES: usize = 1_000_000;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub assignments: Vec<WorkAssignment>,
    pub workers: Vec<WorkerReport>,
    pub response_times: Vec<f64>,
    pub summary: RunSummary,
}

/// Splits `total_calls` across `workers`: the first `total_calls % workers`
/// workers get one extra call so the counts always add up.
#[must_use]
pub fn partition_calls(total_calls: u64, workers: usize) -> Vec<WorkAssignment> {
    let divisor = u64::try_from(workers).unwrap_or(u64::MAX);
    let base = total_calls.checked_div(divisor).unwrap_or(0);
    let remainder = total_calls.checked_rem(divisor).unwrap_or(0);

    (0..workers)
        .map(|worker_id| {
            let extra = u64::from(u64::try_from(worker_id).is_ok_and(|id| id < remainder));
            WorkAssignment {
                worker_id,
                call_count: base.saturating_add(extra),
            }
        })
        .collect()
}

/// Runs the configured calls and writes result lines and the summary to
/// `sink`.
///
/// Workers run as independent tasks; a failed call never stops its worker
/// and a failed worker never stops the others.
///
/// # Errors
///
/// Returns an error when the shared HTTP client cannot be built. Nothing
/// after that point fails the run.
pub async fn run_load_test<W>(config: &RunConfig, sink: W) -> AppResult<RunReport>
where
    W: Write + Send + 'static,
{
    let mut phase = RunPhase::Configured;
    let transport = Transport::build(config)?;
    let assignments = partition_calls(config.total_calls, config.num_threads.get());
    let aggregator = Arc::new(Aggregator::new(
        sink,
        usize::try_from(config.total_calls)
            .unwrap_or(MAX_PREALLOCATED_SAMPLES)
            .min(MAX_PREALLOCATED_SAMPLES),
    ));
    let url: Arc<str> = Arc::from(config.url.as_str());

    info!(
        "Dispatching {} calls to {} across {} workers",
        config.total_calls,
        config.url,
        assignments.len()
    );

    advance(&mut phase, RunPhase::Dispatching);
    let started = Instant::now();
    let mut handles = Vec::with_capacity(assignments.len());
    for assignment in &assignments {
        let context = WorkerContext {
            assignment: *assignment,
            transport: transport.clone(),
            url: Arc::clone(&url),
            sleep_time: config.sleep_time,
            connection: config.connection_policy(),
            body: config.body_policy(),
            aggregator: Arc::clone(&aggregator),
        };
        handles.push(tokio::spawn(run_worker(context)));
    }

    advance(&mut phase, RunPhase::Awaiting);
    let mut workers = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(report) => workers.push(report),
            Err(err) => error!("Worker task failed: {}", err),
        }
    }
    let total_time = started.elapsed();

    advance(&mut phase, RunPhase::Aggregating);
    transport.close_idle_connections();
    let response_times = aggregator.take_response_times();
    let summary = compute_summary(&response_times, config.total_calls, total_time);

    advance(&mut phase, RunPhase::Reporting);
    for line in summary_lines(&summary) {
        aggregator.write_line(&line);
    }
    aggregator.write_line(COMPLETION_MARKER);
    aggregator.flush();

    advance(&mut phase, RunPhase::Done);
    Ok(RunReport {
        assignments,
        workers,
        response_times,
        summary,
    })
}

fn advance(phase: &mut RunPhase, next: RunPhase) {
    debug!("Run phase {} -> {}", phase.as_str(), next.as_str());
    *phase = next;
}
