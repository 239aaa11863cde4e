//! Core library for the `api-tester` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, the resolved run configuration, the shared HTTP transport, the
//! worker call loop, latency aggregation, and the run coordinator that ties
//! them together. The primary user-facing interface is the `api-tester`
//! command-line application.
pub mod app;
pub mod args;
pub mod domain;
pub mod entry;
pub mod error;
pub mod http;
pub mod metrics;
mod system;
