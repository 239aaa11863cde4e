//! Run configuration and the value types shared by the engine.
mod run;

pub use run::{BodyPolicy, ConnectionPolicy, RunConfig, RunPhase, WorkAssignment};
