//! Filter compilation
//!
//! Binds a textual `{field, operator, value}` triple to a record type.
//! Checks run in a fixed order: field lookup, operator tag, operator
//! capability, then literal parsing.

use std::cmp::Ordering;

use crate::registry::{FieldDescriptor, FieldRegistry, FieldType, Value, ValueRef};

use super::errors::{CompileError, CompileResult};
use super::request::Filter;

/// Supported comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
    Contains,
}

impl Operator {
    /// Normalises an operator tag, ignoring ASCII case
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "eq" | "=" | "==" => Some(Operator::Eq),
            "gt" | ">" => Some(Operator::Gt),
            "lt" | "<" => Some(Operator::Lt),
            "gte" | ">=" => Some(Operator::Gte),
            "lte" | "<=" => Some(Operator::Lte),
            "contains" => Some(Operator::Contains),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::Contains => "contains",
        }
    }

    /// Whether a field of this type can be compared with the operator
    pub fn supports(&self, field_type: FieldType) -> bool {
        match self {
            Operator::Eq => true,
            Operator::Contains => field_type == FieldType::Text,
            Operator::Gt | Operator::Lt | Operator::Gte | Operator::Lte => field_type.is_ordered(),
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Gte => ordering != Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
            Operator::Contains => false,
        }
    }
}

/// A compiled filter over records of type `R`
pub struct Predicate<R: 'static> {
    field: &'static FieldDescriptor<R>,
    operator: Operator,
    literal: Value,
}

impl<R: 'static> Predicate<R> {
    pub fn field(&self) -> &'static str {
        self.field.name()
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Evaluates the predicate. A null field value never matches.
    pub fn matches(&self, record: &R) -> bool {
        let actual = self.field.read(record);
        if actual.is_null() {
            return false;
        }

        match (self.operator, actual, &self.literal) {
            (Operator::Contains, ValueRef::Text(haystack), Value::Text(needle)) => {
                haystack.contains(needle.as_str())
            }
            (Operator::Contains, _, _) => false,
            (op, actual, literal) => actual
                .partial_compare(&literal.as_value_ref())
                .is_some_and(|ordering| op.accepts(ordering)),
        }
    }
}

/// Compiles filters against one record type's registry
pub struct FilterCompiler<R: 'static> {
    registry: &'static FieldRegistry<R>,
}

impl<R: 'static> FilterCompiler<R> {
    pub fn new(registry: &'static FieldRegistry<R>) -> Self {
        Self { registry }
    }

    /// Compiles one filter
    pub fn compile(&self, filter: &Filter) -> CompileResult<Predicate<R>> {
        let field = self
            .registry
            .resolve(&filter.field)
            .ok_or_else(|| CompileError::FieldNotFound {
                kind: self.registry.kind(),
                field: filter.field.clone(),
            })?;

        let unsupported = || CompileError::UnsupportedOperator {
            field: field.name().to_string(),
            operator: filter.operator.clone(),
        };
        let operator = Operator::parse(&filter.operator).ok_or_else(unsupported)?;
        if !operator.supports(field.field_type()) {
            return Err(unsupported());
        }

        let literal = field
            .field_type()
            .parse_literal(&filter.value)
            .ok_or_else(|| CompileError::TypeMismatch {
                field: field.name(),
                expected: field.field_type().type_name(),
                value: filter.value.clone(),
            })?;

        Ok(Predicate {
            field,
            operator,
            literal,
        })
    }

    /// Compiles every filter, failing on the first error
    pub fn compile_all(&self, filters: &[Filter]) -> CompileResult<Vec<Predicate<R>>> {
        filters.iter().map(|filter| self.compile(filter)).collect()
    }
}

/// Returns true when the record satisfies every predicate (AND semantics)
pub fn matches_all<R: 'static>(record: &R, predicates: &[Predicate<R>]) -> bool {
    predicates.iter().all(|predicate| predicate.matches(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Product, ProductImage, Record};
    use uuid::Uuid;

    fn product(name: &str, sodium: i32, rating: f64) -> Product {
        let mut product = Product::default();
        product.attributes.name = name.to_string();
        product.attributes.sodium = sodium;
        product.attributes.rating = rating;
        product
    }

    fn compile(field: &str, op: &str, value: &str) -> CompileResult<Predicate<Product>> {
        FilterCompiler::new(Product::registry()).compile(&Filter::new(field, op, value))
    }

    #[test]
    fn test_operator_aliases() {
        for tag in ["eq", "EQ", "=", "=="] {
            assert_eq!(Operator::parse(tag), Some(Operator::Eq));
        }
        assert_eq!(Operator::parse(">="), Some(Operator::Gte));
        assert_eq!(Operator::parse("Contains"), Some(Operator::Contains));
        assert_eq!(Operator::parse("startswith"), None);
    }

    #[test]
    fn test_int_comparisons() {
        let row = product("A", 200, 0.0);
        assert!(compile("sodium", ">", "150").unwrap().matches(&row));
        assert!(compile("Sodium", ">=", "200").unwrap().matches(&row));
        assert!(!compile("sodium", "<", "200").unwrap().matches(&row));
        assert!(compile("sodium", "<=", " 200 ").unwrap().matches(&row));
        assert!(compile("sodium", "==", "200").unwrap().matches(&row));
    }

    #[test]
    fn test_float_accepts_integer_literal() {
        let row = product("A", 0, 3.0);
        assert!(compile("rating", "eq", "3").unwrap().matches(&row));
        assert!(compile("rating", "gt", "2.5").unwrap().matches(&row));
    }

    #[test]
    fn test_text_contains_is_case_sensitive() {
        let row = product("Raisin Bran", 0, 0.0);
        assert!(compile("name", "contains", "Bran").unwrap().matches(&row));
        assert!(!compile("name", "contains", "bran").unwrap().matches(&row));
        assert!(compile("name", "<", "Rice").unwrap().matches(&row));
    }

    #[test]
    fn test_unknown_field() {
        let err = compile("colour", "eq", "x").err().unwrap();
        assert_eq!(err.code(), "CEREAL_FIELD_NOT_FOUND");
    }

    #[test]
    fn test_unknown_operator() {
        let err = compile("name", "startswith", "B").err().unwrap();
        assert!(matches!(err, CompileError::UnsupportedOperator { .. }));
    }

    #[test]
    fn test_contains_on_number_unsupported() {
        let err = compile("sodium", "contains", "1").err().unwrap();
        assert!(matches!(err, CompileError::UnsupportedOperator { .. }));
    }

    #[test]
    fn test_operator_checked_before_literal() {
        let err = compile("sodium", "contains", "not a number").err().unwrap();
        assert!(matches!(err, CompileError::UnsupportedOperator { .. }));
    }

    #[test]
    fn test_literal_type_mismatch() {
        let err = compile("sodium", ">", "lots").err().unwrap();
        assert_eq!(
            err,
            CompileError::TypeMismatch {
                field: "sodium",
                expected: "int",
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn test_uuid_fields_support_eq_only() {
        let compiler = FilterCompiler::new(ProductImage::registry());
        let target = Uuid::new_v4();

        let eq = compiler
            .compile(&Filter::new("productReference", "eq", target.to_string()))
            .unwrap();
        let attached = ProductImage {
            product_reference: Some(target),
            ..Default::default()
        };
        assert!(eq.matches(&attached));
        assert!(!eq.matches(&ProductImage::default()));

        let err = compiler
            .compile(&Filter::new("productReference", ">", target.to_string()))
            .err()
            .unwrap();
        assert!(matches!(err, CompileError::UnsupportedOperator { .. }));
    }

    #[test]
    fn test_null_never_matches() {
        let compiler = FilterCompiler::new(ProductImage::registry());
        let detached = ProductImage::default();
        let predicate = compiler
            .compile(&Filter::new("id", "eq", Uuid::nil().to_string()))
            .unwrap();
        assert!(!predicate.matches(&detached));
    }

    #[test]
    fn test_matches_all_is_conjunction() {
        let row = product("A", 200, 4.0);
        let predicates = FilterCompiler::new(Product::registry())
            .compile_all(&[
                Filter::new("sodium", ">", "150"),
                Filter::new("rating", "<", "3"),
            ])
            .unwrap();
        assert!(!matches_all(&row, &predicates));
        assert!(matches_all(&row, &predicates[..1]));
        assert!(matches_all(&row, &[]));
    }
}
