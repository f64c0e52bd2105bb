//! Cereal records
//!
//! Same columns as products, stored in their own table. The cereal table
//! requires a name: a create that leaves it unset is rejected at commit.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attributes::{attribute_fields, Attributes, AttributesPatch, HasAttributes};
use super::{patch_key, PartialRecord, Record, RecordKind};
use crate::registry::{Assignment, FieldDescriptor, FieldRegistry};

static CEREAL_FIELDS: Lazy<FieldRegistry<Cereal>> = Lazy::new(|| {
    let mut fields = vec![FieldDescriptor::<Cereal>::identifier("id", |r| r.id)];
    fields.extend(attribute_fields());
    FieldRegistry::new(RecordKind::Cereal, fields)
});

/// A cereal row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cereal {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl HasAttributes for Cereal {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Record for Cereal {
    type Patch = CerealPatch;

    const KIND: RecordKind = RecordKind::Cereal;

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn registry() -> &'static FieldRegistry<Self> {
        &CEREAL_FIELDS
    }

    fn check_constraints(&self) -> Result<(), String> {
        if self.attributes.name.trim().is_empty() {
            return Err("cereal name is required".to_string());
        }
        Ok(())
    }
}

/// Create/update payload for cereals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CerealPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub attributes: AttributesPatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

impl PartialRecord for CerealPatch {
    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn marked_for_delete(&self) -> bool {
        self.delete == Some(true)
    }

    fn assignments(&self) -> Vec<Assignment> {
        let mut out = Vec::new();
        self.attributes.push_assignments(&mut out);
        out
    }

    fn canonical_key(key: &str) -> Option<&'static str> {
        patch_key::<Cereal>(key)
    }
}
