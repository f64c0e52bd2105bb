//! cereal-api - Generic search, sort and batched partial mutations over
//! catalog records
//!
//! A client-supplied, schema-agnostic filter and sort request is compiled
//! against a static field registry into typed predicates and comparators;
//! partial records are merged field by field so unspecified fields are
//! never clobbered.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod mutation;
pub mod observability;
pub mod query;
pub mod records;
pub mod registry;
pub mod store;
pub mod wire;
