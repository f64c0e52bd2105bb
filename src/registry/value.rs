//! Field value types
//!
//! Supported field types:
//! - text: UTF-8 string
//! - int: 32-bit signed integer
//! - float: 64-bit floating point
//! - uuid: identifier or reference

use std::cmp::Ordering;

use serde::Serialize;
use uuid::Uuid;

/// Underlying value type of a registered field (optionality unwrapped)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Int,
    Float,
    Uuid,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Uuid => "uuid",
        }
    }

    /// Whether `gt`/`lt`/`gte`/`lte` are meaningful for this type
    pub fn is_ordered(&self) -> bool {
        !matches!(self, FieldType::Uuid)
    }

    /// Parses a textual literal into this type.
    ///
    /// Numeric and uuid literals tolerate surrounding whitespace; text is
    /// taken verbatim.
    pub fn parse_literal(&self, raw: &str) -> Option<Value> {
        match self {
            FieldType::Text => Some(Value::Text(raw.to_string())),
            FieldType::Int => raw.trim().parse().ok().map(Value::Int),
            FieldType::Float => raw.trim().parse().ok().map(Value::Float),
            FieldType::Uuid => Uuid::parse_str(raw.trim()).ok().map(Value::Uuid),
        }
    }
}

/// An owned field value: a parsed filter literal or an assignment payload
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Int(i32),
    Float(f64),
    Uuid(Uuid),
}

impl Value {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Uuid(_) => "uuid",
        }
    }

    /// Borrows this value
    pub fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            Value::Null => ValueRef::Null,
            Value::Text(s) => ValueRef::Text(s.as_str()),
            Value::Int(i) => ValueRef::Int(*i),
            Value::Float(f) => ValueRef::Float(*f),
            Value::Uuid(u) => ValueRef::Uuid(*u),
        }
    }
}

/// A borrowed view of a record's field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Null,
    Text(&'a str),
    Int(i32),
    Float(f64),
    Uuid(Uuid),
}

impl ValueRef<'_> {
    /// Returns true for a null value
    pub fn is_null(&self) -> bool {
        matches!(self, ValueRef::Null)
    }

    /// Natural comparison used by filters.
    ///
    /// Returns `None` when either side is null, the types differ, or a float
    /// comparison is undefined (NaN).
    pub fn partial_compare(&self, other: &ValueRef<'_>) -> Option<Ordering> {
        match (self, other) {
            (ValueRef::Text(a), ValueRef::Text(b)) => Some((*a).cmp(*b)),
            (ValueRef::Int(a), ValueRef::Int(b)) => Some(a.cmp(b)),
            (ValueRef::Float(a), ValueRef::Float(b)) => a.partial_cmp(b),
            (ValueRef::Uuid(a), ValueRef::Uuid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total comparison used by sorting.
    ///
    /// Ordering rules:
    /// - null < text < int < float < uuid (only reached on mixed types)
    /// - floats use IEEE total order
    /// - text is ordinal
    pub fn total_compare(&self, other: &ValueRef<'_>) -> Ordering {
        match (self, other) {
            (ValueRef::Float(a), ValueRef::Float(b)) => a.total_cmp(b),
            _ => self
                .partial_compare(other)
                .unwrap_or_else(|| self.rank().cmp(&other.rank())),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            ValueRef::Null => 0,
            ValueRef::Text(_) => 1,
            ValueRef::Int(_) => 2,
            ValueRef::Float(_) => 3,
            ValueRef::Uuid(_) => 4,
        }
    }
}
