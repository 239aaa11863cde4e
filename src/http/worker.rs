use std::sync::Arc;
use std::time::Duration;

use reqwest::Response;
use tokio::time::sleep;
use tracing::{debug, error};

use crate::{
    domain::{BodyPolicy, ConnectionPolicy, WorkAssignment},
    error::HttpError,
    metrics::{Aggregator, CallOutcome, CallResult, duration_millis},
};

use super::execution::{describe_error, drain_response_body, send_timed};
use super::transport::Transport;

/// Everything a worker needs to perform its slice of the run.
pub struct WorkerContext {
    pub assignment: WorkAssignment,
    pub transport: Transport,
    pub url: Arc<str>,
    pub sleep_time: Duration,
    pub connection: ConnectionPolicy,
    pub body: BodyPolicy,
    pub aggregator: Arc<Aggregator>,
}

/// What a worker did before it exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub assigned: u64,
    pub attempted: u64,
    pub succeeded: u64,
    /// The request template could not be built, so no call was made.
    pub setup_failed: bool,
}

/// Performs the worker's calls one after another.
///
/// Each call is attempted exactly once; failures are reported and the loop
/// moves on. Nothing here can abort the run.
pub async fn run_worker(context: WorkerContext) -> WorkerReport {
    let WorkerContext {
        assignment,
        transport,
        url,
        sleep_time,
        connection,
        body,
        aggregator,
    } = context;
    let worker_id = assignment.worker_id;
    let mut report = WorkerReport {
        worker_id,
        assigned: assignment.call_count,
        attempted: 0,
        succeeded: 0,
        setup_failed: false,
    };

    let template = match transport.request_template(&url, connection) {
        Ok(request) => request,
        Err(err) => {
            error!("Request creation failed for worker {}: {}", worker_id, err);
            aggregator.write_line(&format!(
                "Error:  Request creation failed for thread {:2}: {}",
                worker_id,
                describe_error(&err)
            ));
            report.setup_failed = true;
            return report;
        }
    };
    debug!(
        "Worker {} starting {} calls",
        worker_id, assignment.call_count
    );

    // Responses kept unread in hold mode; dropped when the worker exits.
    let mut held: Vec<Response> = Vec::new();

    for call_index in 0..assignment.call_count {
        let outcome = match template.try_clone() {
            Some(request) => {
                let (elapsed, result) = send_timed(transport.client(), request).await;
                let result = match result {
                    Ok(response) => handle_response(response, body, &mut held).await,
                    Err(err) => CallResult::Failed {
                        error: describe_error(&err),
                    },
                };
                CallOutcome {
                    worker_id,
                    call_index,
                    response_time_ms: duration_millis(elapsed),
                    result,
                }
            }
            None => CallOutcome {
                worker_id,
                call_index,
                response_time_ms: 0.0,
                result: CallResult::Failed {
                    error: HttpError::CloneRequestFailed.to_string(),
                },
            },
        };

        aggregator.record(&outcome);
        report.attempted = report.attempted.saturating_add(1);
        if outcome.is_success() {
            report.succeeded = report.succeeded.saturating_add(1);
        }

        if !sleep_time.is_zero() {
            sleep(sleep_time).await;
        }
    }

    debug!(
        "Worker {} finished {} calls, {} succeeded ({} responses held)",
        worker_id,
        report.attempted,
        report.succeeded,
        held.len()
    );
    drop(held);
    report
}

async fn handle_response(
    response: Response,
    body: BodyPolicy,
    held: &mut Vec<Response>,
) -> CallResult {
    let status = response.status().to_string();
    match body {
        BodyPolicy::Drain => match drain_response_body(response).await {
            Ok(_) => CallResult::Success { status },
            Err(err) => CallResult::Failed {
                error: describe_error(&err),
            },
        },
        BodyPolicy::Hold => {
            held.push(response);
            CallResult::Success { status }
        }
    }
}
