//! Query executor
//!
//! Execution flow (strict order):
//! 1. Point lookup short-circuits when an identifier is given
//! 2. Compile every filter and the sort; any error aborts before the store
//!    is touched
//! 3. Scan the table in storage order
//! 4. Keep records matching all predicates
//! 5. Apply the comparator

use std::marker::PhantomData;

use tracing::debug;
use uuid::Uuid;

use crate::records::Record;
use crate::store::RecordStore;

use super::errors::QueryResult;
use super::filter::{matches_all, FilterCompiler, Predicate};
use super::request::RequestContext;
use super::sort::{Comparator, SortCompiler};

/// A request context bound to record type `R`
pub struct CompiledQuery<R: 'static> {
    predicates: Vec<Predicate<R>>,
    comparator: Comparator<R>,
}

impl<R: Record> CompiledQuery<R> {
    /// Compiles filters and sort keys against `R`'s registry
    pub fn compile(ctx: &RequestContext) -> QueryResult<Self> {
        let predicates = FilterCompiler::new(R::registry()).compile_all(&ctx.filters)?;
        let comparator = SortCompiler::new(R::registry()).compile(&ctx.sort_orders)?;
        Ok(Self {
            predicates,
            comparator,
        })
    }

    /// Filters and orders a record set
    pub fn run(&self, records: Vec<R>) -> Vec<R> {
        let mut matched: Vec<R> = records
            .into_iter()
            .filter(|record| matches_all(record, &self.predicates))
            .collect();
        self.comparator.sort(&mut matched);
        matched
    }
}

/// Read-only query execution over one table
pub struct QueryExecutor<'a, R, S> {
    store: &'a S,
    _record: PhantomData<R>,
}

impl<'a, R: Record, S: RecordStore<R>> QueryExecutor<'a, R, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Runs a query.
    ///
    /// With `id` present the result is the zero-or-one record carrying it and
    /// `ctx` is ignored.
    pub fn query(&self, ctx: &RequestContext, id: Option<Uuid>) -> QueryResult<Vec<R>> {
        if let Some(id) = id {
            let found = self.store.get(id)?;
            debug!(target: "cereal::query", kind = %R::KIND, %id, found = found.is_some(), "Point lookup");
            return Ok(found.into_iter().collect());
        }

        let compiled = CompiledQuery::<R>::compile(ctx)?;
        let scanned = self.store.scan()?;
        let scanned_count = scanned.len();
        let results = compiled.run(scanned);

        debug!(
            target: "cereal::query",
            kind = %R::KIND,
            filters = ctx.filters.len(),
            sort_keys = ctx.sort_orders.len(),
            scanned = scanned_count,
            returned = results.len(),
            "Query executed"
        );
        Ok(results)
    }

    /// Every record in storage order
    pub fn all(&self) -> QueryResult<Vec<R>> {
        Ok(self.store.scan()?)
    }
}
