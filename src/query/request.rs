//! Client request context: filters and sort keys

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer, Error as _, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::wire::{self, KeyError};

/// One `{field, operator, value}` filter triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub field: String,
    pub operator: String,
    /// Literal as text; bound to the field type at compile time
    pub value: String,
}

impl Filter {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_object(object).map_err(D::Error::custom)
    }
}

impl Filter {
    fn from_object(object: Map<String, Value>) -> Result<Self, String> {
        let mut fields = wire::strict(object, FILTER_KEYS).map_err(|e| e.to_string())?;
        Ok(Self {
            field: take_text(&mut fields, "field")?,
            operator: take_text(&mut fields, "operator")?,
            value: literal_text(take(&mut fields, "value")?)?,
        })
    }
}

const FILTER_KEYS: &[&str] = &["field", "operator", "value"];
const SORT_KEYS: &[&str] = &["field", "direction"];
const CONTEXT_KEYS: &[&str] = &["filters", "sortOrders"];

fn take(fields: &mut Map<String, Value>, key: &str) -> Result<Value, String> {
    fields
        .remove(key)
        .ok_or_else(|| format!("missing field '{key}'"))
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Result<String, String> {
    match take(fields, key)? {
        Value::String(s) => Ok(s),
        other => Err(format!("'{key}' must be a string, got {other}")),
    }
}

/// An absent or null list decodes as empty
fn take_list<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    key: &str,
) -> Result<Vec<T>, String> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value).map_err(|e| e.to_string()),
    }
}

/// Accepts a JSON string, number or boolean and keeps its textual form
fn literal_text(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!(
            "filter value must be a string, number or boolean, got {other}"
        )),
    }
}

/// Sort direction, `asc` unless stated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl Serialize for SortDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DirectionVisitor;

        impl Visitor<'_> for DirectionVisitor {
            type Value = SortDirection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"asc\" or \"desc\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SortDirection, E> {
                if v.eq_ignore_ascii_case("asc") {
                    Ok(SortDirection::Asc)
                } else if v.eq_ignore_ascii_case("desc") {
                    Ok(SortDirection::Desc)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_str(DirectionVisitor)
    }
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_object(object).map_err(D::Error::custom)
    }
}

impl SortKey {
    fn from_object(object: Map<String, Value>) -> Result<Self, String> {
        let mut fields = wire::strict(object, SORT_KEYS).map_err(|e| e.to_string())?;
        let direction = match fields.remove("direction") {
            None | Some(Value::Null) => SortDirection::default(),
            Some(value) => SortDirection::deserialize(value).map_err(|e| e.to_string())?,
        };
        Ok(Self {
            field: take_text(&mut fields, "field")?,
            direction,
        })
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Filters (conjunctive) and sort keys (lexicographic priority)
///
/// Keys match ignoring ASCII case, `sort_orders` is accepted for
/// `sortOrders`, and any other key is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub filters: Vec<Filter>,
    pub sort_orders: Vec<SortKey>,
}

impl<'de> Deserialize<'de> for RequestContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_object(object).map_err(D::Error::custom)
    }
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_object(object: Map<String, Value>) -> Result<Self, String> {
        let keyed = wire::canonicalize(object, |key| {
            if key.eq_ignore_ascii_case("sort_orders") {
                Some("sortOrders")
            } else {
                wire::lookup(CONTEXT_KEYS, key)
            }
        })
        .map_err(|e| e.to_string())?;
        if let Some(key) = keyed.unknown.into_iter().next() {
            let err = KeyError::Unknown {
                key,
                expected: CONTEXT_KEYS.join(", "),
            };
            return Err(err.to_string());
        }

        let mut fields = keyed.fields;
        Ok(Self {
            filters: take_list(&mut fields, "filters")?,
            sort_orders: take_list(&mut fields, "sortOrders")?,
        })
    }

    /// Adds a filter
    pub fn filter(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.filters.push(Filter::new(field, operator, value));
        self
    }

    /// Adds a sort key with lower priority than the existing ones
    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort_orders.push(key);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_wire_shape() {
        let ctx: RequestContext = serde_json::from_value(json!({
            "filters": [{"field": "Sodium", "operator": ">", "value": "150"}],
            "sortOrders": [{"field": "name", "direction": "DESC"}, {"field": "calories"}]
        }))
        .unwrap();

        assert_eq!(ctx.filters, vec![Filter::new("Sodium", ">", "150")]);
        assert_eq!(ctx.sort_orders, vec![SortKey::desc("name"), SortKey::asc("calories")]);
    }

    #[test]
    fn test_context_defaults() {
        let ctx: RequestContext = serde_json::from_str("{}").unwrap();
        assert_eq!(ctx, RequestContext::new());
    }

    #[test]
    fn test_numeric_literal_kept_as_text() {
        let filter: Filter =
            serde_json::from_value(json!({"field": "fat", "operator": "eq", "value": 1})).unwrap();
        assert_eq!(filter.value, "1");
    }

    #[test]
    fn test_null_literal_rejected() {
        let result: Result<Filter, _> =
            serde_json::from_value(json!({"field": "fat", "operator": "eq", "value": null}));
        assert!(result.is_err());
    }

    #[test]
    fn test_keys_ignore_case() {
        let ctx: RequestContext = serde_json::from_value(json!({
            "Filters": [{"Field": "Sodium", "OPERATOR": ">", "Value": 150}],
            "SortOrders": [{"Field": "name", "Direction": "desc"}]
        }))
        .unwrap();
        assert_eq!(ctx.filters, vec![Filter::new("Sodium", ">", "150")]);
        assert_eq!(ctx.sort_orders, vec![SortKey::desc("name")]);

        let snake: RequestContext =
            serde_json::from_value(json!({"sort_orders": [{"field": "fat"}], "filters": null}))
                .unwrap();
        assert_eq!(snake, RequestContext::new().sort(SortKey::asc("fat")));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let context: Result<RequestContext, _> =
            serde_json::from_value(json!({"filter": [{"field": "fat", "operator": "eq", "value": 1}]}));
        assert!(context.is_err());

        let filter: Result<Filter, _> = serde_json::from_value(
            json!({"field": "fat", "op": "eq", "value": 1}),
        );
        assert!(filter.is_err());

        let duplicated: Result<RequestContext, _> =
            serde_json::from_value(json!({"filters": [], "Filters": []}));
        assert!(duplicated.is_err());
    }

    #[test]
    fn test_missing_filter_key_rejected() {
        let result: Result<Filter, _> =
            serde_json::from_value(json!({"field": "fat", "value": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_direction_rejected() {
        let result: Result<SortKey, _> =
            serde_json::from_value(json!({"field": "fat", "direction": "sideways"}));
        assert!(result.is_err());
    }
}
