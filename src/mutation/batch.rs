//! Mutation batch payloads

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::records::PartialRecord;
use crate::wire;

/// A batch of partial records. `null` entries are dropped while decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PatchBatch<P>(Vec<P>);

impl<P> PatchBatch<P> {
    pub fn new(entries: Vec<P>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[P] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<P> {
        self.0
    }
}

impl<P: PartialRecord> PatchBatch<P> {
    /// Splits a legacy mixed batch into its three groups.
    ///
    /// - delete: identifier present and `delete: true`
    /// - update: identifier present, no delete marker
    /// - create: no identifier
    pub fn split(self) -> LegacyBatch<P> {
        let mut groups = LegacyBatch {
            deletes: Vec::new(),
            updates: Vec::new(),
            creates: Vec::new(),
        };
        for entry in self.0 {
            match entry.id() {
                Some(id) if entry.marked_for_delete() => groups.deletes.push(id),
                Some(_) => groups.updates.push(entry),
                None => groups.creates.push(entry),
            }
        }
        groups
    }
}

impl<P> From<Vec<P>> for PatchBatch<P> {
    fn from(entries: Vec<P>) -> Self {
        Self(entries)
    }
}

/// Entry keys are matched ignoring ASCII case. Keys naming no field are
/// ignored; two keys folding onto one field reject the batch.
impl<'de, P: PartialRecord> Deserialize<'de> for PatchBatch<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Option<Map<String, Value>>>::deserialize(deserializer)?;
        let mut entries = Vec::with_capacity(raw.len());
        for object in raw.into_iter().flatten() {
            let keyed = wire::canonicalize(object, P::canonical_key).map_err(D::Error::custom)?;
            let entry = serde_json::from_value(Value::Object(keyed.fields))
                .map_err(D::Error::custom)?;
            entries.push(entry);
        }
        Ok(Self(entries))
    }
}

/// A legacy mixed batch split by intent, in execution order
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyBatch<P> {
    pub deletes: Vec<Uuid>,
    pub updates: Vec<P>,
    pub creates: Vec<P>,
}

/// Identifiers to delete.
///
/// Decodes from an array of uuid strings. `null`, empty strings and the nil
/// uuid are dropped; duplicates are kept here and collapsed on delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdBatch(Vec<Uuid>);

impl IdBatch {
    pub fn new(ids: Vec<Uuid>) -> Self {
        Self(ids)
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Uuid>> for IdBatch {
    fn from(ids: Vec<Uuid>) -> Self {
        Self(ids)
    }
}

impl<'de> Deserialize<'de> for IdBatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Option<String>>::deserialize(deserializer)?;
        let mut ids = Vec::with_capacity(raw.len());
        for entry in raw.into_iter().flatten() {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let id = Uuid::parse_str(entry)
                .map_err(|e| D::Error::custom(format!("invalid id '{entry}': {e}")))?;
            if !id.is_nil() {
                ids.push(id);
            }
        }
        Ok(Self(ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ProductPatch;
    use serde_json::json;

    #[test]
    fn test_null_entries_dropped() {
        let batch: PatchBatch<ProductPatch> =
            serde_json::from_value(json!([null, {"name": "A"}, null])).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.entries()[0].attributes.name.as_deref(), Some("A"));
    }

    #[test]
    fn test_legacy_split() {
        let keep = Uuid::new_v4();
        let gone = Uuid::new_v4();
        let batch: PatchBatch<ProductPatch> = serde_json::from_value(json!([
            {"id": keep, "name": "renamed"},
            {"id": gone, "delete": true},
            {"name": "new"},
            {"id": keep, "delete": false, "fat": 2},
            {"delete": true, "name": "no id"}
        ]))
        .unwrap();

        let groups = batch.split();
        assert_eq!(groups.deletes, vec![gone]);
        assert_eq!(groups.updates.len(), 2);
        assert_eq!(groups.creates.len(), 2);
    }

    #[test]
    fn test_entry_keys_ignore_case() {
        let id = Uuid::new_v4();
        let batch: PatchBatch<ProductPatch> = serde_json::from_value(json!([
            {"Id": id, "Name": "Rebranded", "SODIUM": 90, "Delete": false, "colour": "red"}
        ]))
        .unwrap();

        let entry = &batch.entries()[0];
        assert_eq!(entry.id, Some(id));
        assert_eq!(entry.attributes.name.as_deref(), Some("Rebranded"));
        assert_eq!(entry.attributes.sodium, Some(90));
        assert_eq!(entry.delete, Some(false));
    }

    #[test]
    fn test_entry_keys_folding_together_rejected() {
        let result: Result<PatchBatch<ProductPatch>, _> =
            serde_json::from_value(json!([{"name": "a", "NAME": "b"}]));
        assert!(result.is_err());
    }

    #[test]
    fn test_id_batch_filters_empty_and_nil() {
        let id = Uuid::new_v4();
        let batch: IdBatch =
            serde_json::from_value(json!([id, "", null, Uuid::nil(), " "])).unwrap();
        assert_eq!(batch.ids(), &[id]);
    }

    #[test]
    fn test_id_batch_rejects_garbage() {
        let result: Result<IdBatch, _> = serde_json::from_value(json!(["not-a-uuid"]));
        assert!(result.is_err());
    }
}
