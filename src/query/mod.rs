//! Query subsystem
//!
//! Compiles a schema-agnostic request context (filters and sort keys) into
//! typed predicates and comparators for one record type, then runs it
//! against a table.
//!
//! # Semantics
//!
//! - Filters compose with AND and are order-independent
//! - A null field value never matches a filter
//! - Sort keys apply lexicographically; the sort is stable
//! - Null sorts before any value
//! - Text compares ordinally and `contains` is case-sensitive

mod errors;
mod executor;
mod filter;
mod request;
mod sort;

pub use errors::{CompileError, CompileResult, QueryError, QueryResult};
pub use executor::{CompiledQuery, QueryExecutor};
pub use filter::{matches_all, FilterCompiler, Operator, Predicate};
pub use request::{Filter, RequestContext, SortDirection, SortKey};
pub use sort::{Comparator, SortCompiler};
