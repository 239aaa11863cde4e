//! Shared HTTP transport and the worker call loop.
mod execution;
mod tls;
mod transport;
mod worker;


pub use transport::Transport;
pub use worker::{WorkerContext, WorkerReport, run_worker};
