use std::future::Future;
use std::num::NonZeroUsize;
use std::time::Duration;

use super::summary::COMPLETION_MARKER;
use super::*;
use crate::domain::RunConfig;
use crate::metrics::test_support::SharedBuffer;

fn config(url: &str, total_calls: u64, threads: usize) -> Result<RunConfig, String> {
    Ok(RunConfig {
        url: url.to_owned(),
        total_calls,
        num_threads: NonZeroUsize::new(threads).ok_or("threads must be > 0")?,
        sleep_time: Duration::ZERO,
        request_timeout: Duration::from_secs(2),
        connect_timeout: Duration::from_secs(6),
        reuse_connections: false,
        keep_connections_open: false,
    })
}

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

#[test]
fn partition_spreads_remainder_over_leading_workers() -> Result<(), String> {
    let counts: Vec<u64> = partition_calls(10, 3)
        .iter()
        .map(|assignment| assignment.call_count)
        .collect();
    if counts != [4, 3, 3] {
        return Err(format!("Unexpected partition: {:?}", counts));
    }
    Ok(())
}

#[test]
fn partition_preserves_totals_and_balance() -> Result<(), String> {
    for total in [0_u64, 1, 2, 7, 12, 100, 10_000, 10_007] {
        for workers in 1..=13_usize {
            let assignments = partition_calls(total, workers);
            if assignments.len() != workers {
                return Err(format!("{} workers produced {} slices", workers, assignments.len()));
            }
            let sum: u64 = assignments.iter().map(|a| a.call_count).sum();
            if sum != total {
                return Err(format!("{}/{} summed to {}", total, workers, sum));
            }
            let max = assignments.iter().map(|a| a.call_count).max().unwrap_or(0);
            let min = assignments.iter().map(|a| a.call_count).min().unwrap_or(0);
            if max.saturating_sub(min) > 1 {
                return Err(format!("{}/{} unbalanced: {}..{}", total, workers, min, max));
            }
            if assignments
                .iter()
                .zip(assignments.iter().skip(1))
                .any(|(left, right)| left.call_count < right.call_count)
            {
                return Err(format!("{}/{} extra calls not at the front", total, workers));
            }
            if assignments
                .iter()
                .enumerate()
                .any(|(index, a)| a.worker_id != index)
            {
                return Err(format!("{}/{} worker ids out of order", total, workers));
            }
        }
    }
    Ok(())
}

#[test]
fn partition_with_no_calls_assigns_nothing() -> Result<(), String> {
    let assignments = partition_calls(0, 4);
    if assignments.iter().any(|a| a.call_count != 0) {
        return Err(format!("Expected all zero, got {:?}", assignments));
    }
    Ok(())
}

#[test]
fn summary_uses_sample_mean_and_total_calls() -> Result<(), String> {
    let summary = compute_summary(&[10.0, 20.0, 30.0], 6, Duration::from_secs(2));
    if summary.sample_count != 3 {
        return Err(format!("Unexpected sample count {}", summary.sample_count));
    }
    if format!("{:.3}", summary.average_response_time_ms) != "20.000" {
        return Err(format!("Unexpected mean {}", summary.average_response_time_ms));
    }
    if format!("{:.3}", summary.requests_per_second) != "3.000" {
        return Err(format!("Unexpected rps {}", summary.requests_per_second));
    }
    let lines = summary_lines(&summary);
    let expected = [
        "Total test time: 2.00 s",
        "Average response time: 20.00 ms",
        "Average requests per second: 3.00",
    ];
    if lines != expected {
        return Err(format!("Unexpected summary lines: {:?}", lines));
    }
    Ok(())
}

#[test]
fn summary_of_empty_run_reports_zeroes() -> Result<(), String> {
    let summary = compute_summary(&[], 0, Duration::ZERO);
    let lines = summary_lines(&summary);
    let expected = [
        "Total test time: 0.00 s",
        "Average response time: 0.00 ms",
        "Average requests per second: 0.00",
    ];
    if lines != expected {
        return Err(format!("Expected zeroes, got {:?}", lines));
    }
    Ok(())
}

#[test]
fn zero_call_run_still_reports() -> Result<(), String> {
    run_async_test(async {
        let buffer = SharedBuffer::default();
        let report = run_load_test(&config("http://127.0.0.1:1", 0, 3)?, buffer.clone())
            .await
            .map_err(|err| err.to_string())?;

        if !report.response_times.is_empty() {
            return Err("Expected no samples".to_owned());
        }
        if report.workers.len() != 3 {
            return Err(format!("Expected 3 worker reports, got {}", report.workers.len()));
        }
        let lines = buffer.lines();
        if lines.len() != 4 {
            return Err(format!("Expected summary only, got {:?}", lines));
        }
        if !lines
            .first()
            .is_some_and(|line| line.starts_with("Total test time: "))
        {
            return Err(format!("Unexpected first line in {:?}", lines));
        }
        if lines.get(1).map(String::as_str) != Some("Average response time: 0.00 ms") {
            return Err(format!("Unexpected mean line in {:?}", lines));
        }
        if lines.last().map(String::as_str) != Some(COMPLETION_MARKER) {
            return Err("Expected completion marker last".to_owned());
        }
        Ok(())
    })
}

#[test]
fn unreachable_target_records_every_failure() -> Result<(), String> {
    run_async_test(async {
        let buffer = SharedBuffer::default();
        let report = run_load_test(&config("http://127.0.0.1:1", 10, 2)?, buffer.clone())
            .await
            .map_err(|err| err.to_string())?;

        if report.response_times.len() != 10 {
            return Err(format!(
                "Expected 10 samples, got {}",
                report.response_times.len()
            ));
        }
        let lines = buffer.lines();
        let failures = lines
            .iter()
            .filter(|line| line.starts_with("Thread ") && line.contains(" - Request failed: "))
            .count();
        if failures != 10 {
            return Err(format!("Expected 10 failure lines, got {:?}", lines));
        }
        let attempted: u64 = report.workers.iter().map(|w| w.attempted).sum();
        if attempted != 10 {
            return Err(format!("Expected 10 attempts, got {}", attempted));
        }
        if report.workers.iter().any(|w| w.succeeded != 0) {
            return Err(format!("Unexpected successes: {:?}", report.workers));
        }
        if lines.last().map(String::as_str) != Some(COMPLETION_MARKER) {
            return Err("Expected completion marker last".to_owned());
        }
        Ok(())
    })
}

#[test]
fn template_failure_is_reported_once_per_worker() -> Result<(), String> {
    run_async_test(async {
        let buffer = SharedBuffer::default();
        let report = run_load_test(&config("httpnotaurl", 6, 3)?, buffer.clone())
            .await
            .map_err(|err| err.to_string())?;

        if !report.response_times.is_empty() {
            return Err("Expected no samples".to_owned());
        }
        if report.workers.iter().any(|w| !w.setup_failed || w.attempted != 0) {
            return Err(format!("Unexpected worker reports: {:?}", report.workers));
        }
        let lines = buffer.lines();
        let setup_errors: Vec<&String> = lines
            .iter()
            .filter(|line| line.starts_with("Error:  Request creation failed for thread "))
            .collect();
        if setup_errors.len() != 3 {
            return Err(format!("Expected 3 setup errors, got {:?}", lines));
        }
        if !setup_errors
            .iter()
            .any(|line| line.starts_with("Error:  Request creation failed for thread  0: "))
        {
            return Err("Expected padded worker id".to_owned());
        }
        Ok(())
    })
}
