use std::num::NonZeroUsize;
use std::time::Duration;

/// Idle-connection capacity reserved per worker.
const IDLE_CONNECTIONS_PER_WORKER: usize = 10;

/// Fully resolved parameters of a single run. Never mutated once the engine
/// starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub url: String,
    pub total_calls: u64,
    pub num_threads: NonZeroUsize,
    pub sleep_time: Duration,
    pub request_timeout: Duration,
    /// Lifetime of an idle pooled connection.
    pub connect_timeout: Duration,
    pub reuse_connections: bool,
    pub keep_connections_open: bool,
}

impl RunConfig {
    #[must_use]
    pub const fn connection_policy(&self) -> ConnectionPolicy {
        if self.reuse_connections {
            ConnectionPolicy::KeepAlive
        } else {
            ConnectionPolicy::Close
        }
    }

    #[must_use]
    pub const fn body_policy(&self) -> BodyPolicy {
        if self.keep_connections_open {
            BodyPolicy::Hold
        } else {
            BodyPolicy::Drain
        }
    }

    #[must_use]
    pub const fn max_idle_connections(&self) -> usize {
        self.num_threads
            .get()
            .saturating_mul(IDLE_CONNECTIONS_PER_WORKER)
    }

    #[must_use]
    pub fn is_https(&self) -> bool {
        self.url
            .get(..5)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https"))
    }
}

/// Value of the `Connection` header sent with every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPolicy {
    KeepAlive,
    Close,
}

impl ConnectionPolicy {
    #[must_use]
    pub const fn header_value(self) -> &'static str {
        match self {
            ConnectionPolicy::KeepAlive => "keep-alive",
            ConnectionPolicy::Close => "close",
        }
    }
}

/// What a worker does with a response body once the head has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// Read the body to the end and release the connection.
    Drain,
    /// Keep the response unread until the worker exits, pinning its
    /// connection. Used to exhaust pool capacity on purpose.
    Hold,
}

/// Slice of the total call budget owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkAssignment {
    pub worker_id: usize,
    pub call_count: u64,
}

/// Lifecycle of a run. A run moves through every phase exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Configured,
    Dispatching,
    Awaiting,
    Aggregating,
    Reporting,
    Done,
}

impl RunPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RunPhase::Configured => "configured",
            RunPhase::Dispatching => "dispatching",
            RunPhase::Awaiting => "awaiting",
            RunPhase::Aggregating => "aggregating",
            RunPhase::Reporting => "reporting",
            RunPhase::Done => "done",
        }
    }
}
