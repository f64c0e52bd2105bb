//! Field Registry
//!
//! Maps field names to typed accessors per record type. Each record type
//! registers its closed field set once, on first use, and the registry is
//! read-only afterwards, so lookups are pure and safe to share across
//! threads.
//!
//! Field names resolve ignoring ASCII case: `Sodium`, `sodium` and `SODIUM`
//! name the same field.

mod descriptor;
mod errors;
mod value;

pub use descriptor::{Accessor, Assignment, FieldDescriptor, FieldInfo, FieldRegistry};
pub use errors::{RegistryError, RegistryResult};
pub use value::{FieldType, Value, ValueRef};

use crate::records::{Cereal, Product, ProductImage, Record, RecordKind};

/// Resolves a field of the given record kind without naming the record type
pub fn resolve(kind: RecordKind, name: &str) -> Option<FieldInfo> {
    match kind {
        RecordKind::Product => Product::registry().resolve(name).map(FieldDescriptor::info),
        RecordKind::Cereal => Cereal::registry().resolve(name).map(FieldDescriptor::info),
        RecordKind::Image => ProductImage::registry()
            .resolve(name)
            .map(FieldDescriptor::info),
    }
}

/// Describes every field of the given record kind
pub fn describe(kind: RecordKind) -> Vec<FieldInfo> {
    match kind {
        RecordKind::Product => Product::registry().describe(),
        RecordKind::Cereal => Cereal::registry().describe(),
        RecordKind::Image => ProductImage::registry().describe(),
    }
}
