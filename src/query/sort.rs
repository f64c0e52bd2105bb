//! Sort compilation
//!
//! Sort keys compile into one lexicographic comparator: the first key
//! decides, later keys only break ties. Sorting is stable, so records equal
//! on every key keep storage order.

use std::cmp::Ordering;

use crate::registry::{FieldDescriptor, FieldRegistry};

use super::errors::{CompileError, CompileResult};
use super::request::{SortDirection, SortKey};

struct CompiledKey<R: 'static> {
    field: &'static FieldDescriptor<R>,
    direction: SortDirection,
}

/// A compiled composite ordering over records of type `R`
pub struct Comparator<R: 'static> {
    keys: Vec<CompiledKey<R>>,
}

impl<R: 'static> Comparator<R> {
    /// Number of sort keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Compares two records key by key
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        for key in &self.keys {
            let ordering = key.field.compare(a, b);
            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Sorts records in place. A comparator without keys leaves them untouched.
    pub fn sort(&self, records: &mut [R]) {
        if self.keys.is_empty() {
            return;
        }
        records.sort_by(|a, b| self.compare(a, b));
    }
}

/// Compiles sort keys against one record type's registry
pub struct SortCompiler<R: 'static> {
    registry: &'static FieldRegistry<R>,
}

impl<R: 'static> SortCompiler<R> {
    pub fn new(registry: &'static FieldRegistry<R>) -> Self {
        Self { registry }
    }

    pub fn compile(&self, keys: &[SortKey]) -> CompileResult<Comparator<R>> {
        let keys = keys
            .iter()
            .map(|key| {
                let field = self.registry.resolve(&key.field).ok_or_else(|| {
                    CompileError::FieldNotFound {
                        kind: self.registry.kind(),
                        field: key.field.clone(),
                    }
                })?;
                Ok(CompiledKey {
                    field,
                    direction: key.direction,
                })
            })
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(Comparator { keys })
    }
}
