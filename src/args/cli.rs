use clap::Parser;
use std::time::Duration;

use crate::domain::RunConfig;
use crate::error::AppResult;

use super::defaults::{
    DEFAULT_NUM_THREADS, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_SLEEP_MS, DEFAULT_TOTAL_CALLS,
    default_connect_timeout,
};
use super::parsers::{
    parse_call_count, parse_millis, parse_positive_millis, parse_positive_usize, parse_target_url,
};
use super::types::PositiveUsize;

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "api-tester",
    version,
    about = "Fixed-count HTTP GET load tester: splits a call budget across concurrent workers and reports mean latency and throughput.",
    override_usage = "api-tester <URL> [OPTIONS]"
)]
pub struct TesterArgs {
    /// Server URL (must start with "http")
    #[arg(value_name = "URL", value_parser = parse_target_url)]
    pub url: String,

    /// Total number of calls across all threads
    #[arg(
        long = "totalCalls",
        value_name = "value",
        default_value = DEFAULT_TOTAL_CALLS,
        value_parser = parse_call_count
    )]
    pub total_calls: u64,

    /// Number of threads
    #[arg(
        long = "numThreads",
        value_name = "value",
        default_value = DEFAULT_NUM_THREADS,
        value_parser = parse_positive_usize
    )]
    pub num_threads: PositiveUsize,

    /// Sleep time in milliseconds between calls within a thread
    #[arg(
        long = "sleepTime",
        value_name = "value",
        default_value = DEFAULT_SLEEP_MS,
        value_parser = parse_millis
    )]
    pub sleep_time: Duration,

    /// HTTP request timeout in milliseconds
    #[arg(
        long = "requestTimeOut",
        value_name = "value",
        default_value = DEFAULT_REQUEST_TIMEOUT_MS,
        value_parser = parse_positive_millis
    )]
    pub request_timeout: Duration,

    /// Idle connection lifetime in milliseconds (defaults to 3x the request timeout)
    #[arg(long = "connectTimeOut", value_name = "value", value_parser = parse_positive_millis)]
    pub connect_timeout: Option<Duration>,

    /// Add the request 'Connection: keep-alive' header and reuse connections
    #[arg(long = "reuseConnects")]
    pub reuse_connects: bool,

    /// Leave response bodies unread so every call holds its connection (not advised)
    #[arg(long = "keepConnectsOpen")]
    pub keep_connects_open: bool,

    /// Enable debug diagnostics on stderr
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable ANSI colors in diagnostics
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl TesterArgs {
    /// Resolves the parsed flags into the immutable run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the derived connect timeout overflows.
    pub fn to_run_config(&self) -> AppResult<RunConfig> {
        let connect_timeout = match self.connect_timeout {
            Some(timeout) => timeout,
            None => default_connect_timeout(self.request_timeout)?,
        };
        Ok(RunConfig {
            url: self.url.clone(),
            total_calls: self.total_calls,
            num_threads: self.num_threads.as_non_zero(),
            sleep_time: self.sleep_time,
            request_timeout: self.request_timeout,
            connect_timeout,
            reuse_connections: self.reuse_connects,
            keep_connections_open: self.keep_connects_open,
        })
    }
}
