//! Mutation subsystem
//!
//! Batched create, partial update and delete over a [`RecordStore`],
//! generic over the record type.
//!
//! # Semantics
//!
//! - Create ignores supplied identifiers
//! - Update merges present fields only; absent fields keep their value
//! - Delete ignores nil, duplicate and unknown identifiers
//! - One commit per operation; a failed commit changes nothing
//! - `success` is `affectedRows > 0`
//!
//! [`RecordStore`]: crate::store::RecordStore

mod batch;
mod engine;
mod errors;
mod outcome;

pub use batch::{IdBatch, LegacyBatch, PatchBatch};
pub use engine::MutationEngine;
pub use errors::{MutationError, MutationResult};
pub use outcome::{BatchOutcome, MutationOutcome};
