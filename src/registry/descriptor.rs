//! Field descriptors and per-record registries
//!
//! A descriptor binds a field name to a typed accessor. The accessor variant
//! fixes the field's value type, so reads, writes and comparisons dispatch
//! exhaustively over the supported types without any runtime reflection.

use std::cmp::Ordering;

use serde::Serialize;
use uuid::Uuid;

use super::errors::{RegistryError, RegistryResult};
use super::value::{FieldType, Value, ValueRef};
use crate::records::RecordKind;

/// Typed read/write access to one field of `R`
pub enum Accessor<R> {
    /// The record identifier. Read-only: only the store assigns it.
    Identifier(fn(&R) -> Option<Uuid>),
    /// Non-nullable text
    Text {
        get: fn(&R) -> &str,
        set: fn(&mut R, String),
    },
    /// Non-nullable 32-bit integer
    Int {
        get: fn(&R) -> i32,
        set: fn(&mut R, i32),
    },
    /// Non-nullable float
    Float {
        get: fn(&R) -> f64,
        set: fn(&mut R, f64),
    },
    /// Nullable uuid reference to another record
    Reference {
        get: fn(&R) -> Option<Uuid>,
        set: fn(&mut R, Option<Uuid>),
    },
}

/// A registered field of record type `R`
pub struct FieldDescriptor<R> {
    name: &'static str,
    accessor: Accessor<R>,
}

impl<R> FieldDescriptor<R> {
    /// Creates a descriptor
    pub fn new(name: &'static str, accessor: Accessor<R>) -> Self {
        Self { name, accessor }
    }

    /// Identifier field descriptor
    pub fn identifier(name: &'static str, get: fn(&R) -> Option<Uuid>) -> Self {
        Self::new(name, Accessor::Identifier(get))
    }

    /// Text field descriptor
    pub fn text(name: &'static str, get: fn(&R) -> &str, set: fn(&mut R, String)) -> Self {
        Self::new(name, Accessor::Text { get, set })
    }

    /// Integer field descriptor
    pub fn int(name: &'static str, get: fn(&R) -> i32, set: fn(&mut R, i32)) -> Self {
        Self::new(name, Accessor::Int { get, set })
    }

    /// Float field descriptor
    pub fn float(name: &'static str, get: fn(&R) -> f64, set: fn(&mut R, f64)) -> Self {
        Self::new(name, Accessor::Float { get, set })
    }

    /// Nullable reference field descriptor
    pub fn reference(
        name: &'static str,
        get: fn(&R) -> Option<Uuid>,
        set: fn(&mut R, Option<Uuid>),
    ) -> Self {
        Self::new(name, Accessor::Reference { get, set })
    }

    /// Canonical field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Underlying value type
    pub fn field_type(&self) -> FieldType {
        match self.accessor {
            Accessor::Text { .. } => FieldType::Text,
            Accessor::Int { .. } => FieldType::Int,
            Accessor::Float { .. } => FieldType::Float,
            Accessor::Identifier(_) | Accessor::Reference { .. } => FieldType::Uuid,
        }
    }

    /// Whether the field can hold null
    pub fn is_nullable(&self) -> bool {
        matches!(
            self.accessor,
            Accessor::Identifier(_) | Accessor::Reference { .. }
        )
    }

    /// Whether assignments may target this field
    pub fn is_writable(&self) -> bool {
        !matches!(self.accessor, Accessor::Identifier(_))
    }

    /// Reads the field from a record
    pub fn read<'a>(&self, record: &'a R) -> ValueRef<'a> {
        match &self.accessor {
            Accessor::Identifier(get) | Accessor::Reference { get, .. } => {
                get(record).map_or(ValueRef::Null, ValueRef::Uuid)
            }
            Accessor::Text { get, .. } => ValueRef::Text(get(record)),
            Accessor::Int { get, .. } => ValueRef::Int(get(record)),
            Accessor::Float { get, .. } => ValueRef::Float(get(record)),
        }
    }

    /// Total ordering of two records by this field
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        self.read(a).total_compare(&self.read(b))
    }

    /// Writes a value into the field.
    ///
    /// The value must match the field type; null is accepted only by
    /// nullable writable fields.
    pub fn write(&self, record: &mut R, value: Value) -> RegistryResult<()> {
        match (&self.accessor, value) {
            (Accessor::Identifier(_), _) => Err(RegistryError::ReadOnly { field: self.name }),
            (Accessor::Text { set, .. }, Value::Text(v)) => {
                set(record, v);
                Ok(())
            }
            (Accessor::Int { set, .. }, Value::Int(v)) => {
                set(record, v);
                Ok(())
            }
            (Accessor::Float { set, .. }, Value::Float(v)) => {
                set(record, v);
                Ok(())
            }
            // Integer payloads are accepted for float fields
            (Accessor::Float { set, .. }, Value::Int(v)) => {
                set(record, f64::from(v));
                Ok(())
            }
            (Accessor::Reference { set, .. }, Value::Uuid(v)) => {
                set(record, Some(v));
                Ok(())
            }
            (Accessor::Reference { set, .. }, Value::Null) => {
                set(record, None);
                Ok(())
            }
            (_, other) => Err(RegistryError::TypeMismatch {
                field: self.name,
                expected: self.field_type().type_name(),
                found: other.type_name(),
            }),
        }
    }

    /// Serializable description of this field
    pub fn info(&self) -> FieldInfo {
        FieldInfo {
            name: self.name,
            field_type: self.field_type(),
            nullable: self.is_nullable(),
            writable: self.is_writable(),
        }
    }
}

/// Type-erased description of a registered field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub nullable: bool,
    pub writable: bool,
}

/// A field assignment produced by a partial record
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: &'static str,
    pub value: Value,
}

impl Assignment {
    pub fn new(field: &'static str, value: Value) -> Self {
        Self { field, value }
    }
}

/// The closed field set of one record type
pub struct FieldRegistry<R> {
    kind: RecordKind,
    fields: Vec<FieldDescriptor<R>>,
}

impl<R> FieldRegistry<R> {
    /// Creates a registry.
    ///
    /// Field names must be unique ignoring ASCII case.
    pub fn new(kind: RecordKind, fields: Vec<FieldDescriptor<R>>) -> Self {
        debug_assert!(
            fields.iter().enumerate().all(|(i, a)| fields[i + 1..]
                .iter()
                .all(|b| !a.name.eq_ignore_ascii_case(b.name))),
            "duplicate field name in {kind} registry"
        );
        Self { kind, fields }
    }

    /// Record kind this registry describes
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Resolves a field by name, ignoring ASCII case
    pub fn resolve(&self, name: &str) -> Option<&FieldDescriptor<R>> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    /// All fields in registration order
    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    /// Descriptions of all fields in registration order
    pub fn describe(&self) -> Vec<FieldInfo> {
        self.fields.iter().map(FieldDescriptor::info).collect()
    }

    /// Applies assignments to a record in order.
    ///
    /// Stops at the first failing assignment; the record may then be partly
    /// written, so callers apply to a copy.
    pub fn apply(&self, record: &mut R, assignments: Vec<Assignment>) -> RegistryResult<()> {
        for assignment in assignments {
            let field = self
                .resolve(assignment.field)
                .ok_or_else(|| RegistryError::UnknownField {
                    kind: self.kind,
                    field: assignment.field.to_string(),
                })?;
            field.write(record, assignment.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Row {
        id: Option<Uuid>,
        label: String,
        count: i32,
        score: f64,
        parent: Option<Uuid>,
    }

    fn registry() -> FieldRegistry<Row> {
        FieldRegistry::new(
            RecordKind::Product,
            vec![
                FieldDescriptor::<Row>::identifier("id", |r| r.id),
                FieldDescriptor::<Row>::text("label", |r| r.label.as_str(), |r, v| r.label = v),
                FieldDescriptor::<Row>::int("count", |r| r.count, |r, v| r.count = v),
                FieldDescriptor::<Row>::float("score", |r| r.score, |r, v| r.score = v),
                FieldDescriptor::<Row>::reference("parent", |r| r.parent, |r, v| r.parent = v),
            ],
        )
    }

    #[test]
    fn test_resolve_ignores_case() {
        let registry = registry();
        assert_eq!(registry.resolve("COUNT").unwrap().name(), "count");
        assert_eq!(registry.resolve("Label").unwrap().field_type(), FieldType::Text);
        assert!(registry.resolve("missing").is_none());
    }

    #[test]
    fn test_read_values() {
        let registry = registry();
        let row = Row {
            label: "x".to_string(),
            count: 4,
            ..Default::default()
        };
        assert_eq!(registry.resolve("label").unwrap().read(&row), ValueRef::Text("x"));
        assert_eq!(registry.resolve("count").unwrap().read(&row), ValueRef::Int(4));
        assert!(registry.resolve("parent").unwrap().read(&row).is_null());
        assert!(registry.resolve("id").unwrap().read(&row).is_null());
    }

    #[test]
    fn test_apply_assignments() {
        let registry = registry();
        let parent = Uuid::new_v4();
        let mut row = Row::default();
        registry
            .apply(
                &mut row,
                vec![
                    Assignment::new("label", Value::Text("new".to_string())),
                    Assignment::new("score", Value::Int(3)),
                    Assignment::new("parent", Value::Uuid(parent)),
                ],
            )
            .unwrap();
        assert_eq!(row.label, "new");
        assert_eq!(row.score, 3.0);
        assert_eq!(row.parent, Some(parent));

        registry
            .apply(&mut row, vec![Assignment::new("parent", Value::Null)])
            .unwrap();
        assert_eq!(row.parent, None);
    }

    #[test]
    fn test_identifier_is_read_only() {
        let registry = registry();
        let mut row = Row::default();
        let err = registry
            .apply(&mut row, vec![Assignment::new("id", Value::Uuid(Uuid::new_v4()))])
            .unwrap_err();
        assert!(matches!(err, RegistryError::ReadOnly { field: "id" }));
        assert_eq!(row.id, None);
    }

    #[test]
    fn test_write_type_mismatch() {
        let registry = registry();
        let mut row = Row::default();
        let err = registry
            .apply(&mut row, vec![Assignment::new("count", Value::Null)])
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::TypeMismatch {
                field: "count",
                expected: "int",
                found: "null"
            }
        ));
    }

    #[test]
    fn test_describe() {
        let info = registry().describe();
        assert_eq!(info.len(), 5);
        assert!(!info[0].writable);
        assert!(info[4].nullable);
    }

    #[test]
    fn test_compare_orders_null_first() {
        let registry = registry();
        let parent = registry.resolve("parent").unwrap();
        let with = Row {
            parent: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let without = Row::default();
        assert_eq!(parent.compare(&without, &with), Ordering::Less);
    }
}
