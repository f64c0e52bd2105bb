//! Observability
//!
//! Structured logging through `tracing`. Subsystems log under their own
//! targets:
//!
//! - `cereal::query`: query compilation and execution
//! - `cereal::mutation`: batch commits and rejections
//! - `cereal::store`: seed loading
//! - `cereal::http`: server lifecycle and per-request spans

mod logger;

pub use logger::{build_filter, init_logging};
