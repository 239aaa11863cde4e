use std::time::Duration;

use crate::error::ValidationError;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("api-tester/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_TOTAL_CALLS: &str = "10000";
pub(crate) const DEFAULT_NUM_THREADS: &str = "12";
pub(crate) const DEFAULT_SLEEP_MS: &str = "0";
pub(crate) const DEFAULT_REQUEST_TIMEOUT_MS: &str = "10000";

/// Connect timeout multiple applied when `-connectTimeOut` is not given.
const CONNECT_TIMEOUT_FACTOR: u32 = 3;

/// Derives the idle-connection lifetime from the resolved request timeout.
pub(crate) fn default_connect_timeout(
    request_timeout: Duration,
) -> Result<Duration, ValidationError> {
    request_timeout
        .checked_mul(CONNECT_TIMEOUT_FACTOR)
        .ok_or(ValidationError::TimeoutOverflow)
}
