//! Record storage
//!
//! Tables are in-memory and process-local. Readers see committed state
//! only; writers go through a [`UnitOfWork`] that stages changes and
//! publishes them in one step.
//!
//! # Guarantees
//!
//! - A failed commit has no partial effect
//! - Storage order is insertion order
//! - Identifiers are assigned by the store and unique per table
//!
//! There is no row versioning: concurrent updates of the same record are
//! last-writer-wins.

mod catalog;
mod errors;
mod memory;
mod traits;

pub use catalog::{Catalog, SeedData};
pub use errors::{StoreError, StoreResult};
pub use memory::{MemorySession, MemoryTable};
pub use traits::{RecordStore, UnitOfWork};
