//! Product records

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attributes::{attribute_fields, Attributes, AttributesPatch, HasAttributes};
use super::{patch_key, PartialRecord, Record, RecordKind};
use crate::registry::{Assignment, FieldDescriptor, FieldRegistry};

static PRODUCT_FIELDS: Lazy<FieldRegistry<Product>> = Lazy::new(|| {
    let mut fields = vec![FieldDescriptor::<Product>::identifier("id", |r| r.id)];
    fields.extend(attribute_fields());
    FieldRegistry::new(RecordKind::Product, fields)
});

/// A product row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl HasAttributes for Product {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Record for Product {
    type Patch = ProductPatch;

    const KIND: RecordKind = RecordKind::Product;

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn registry() -> &'static FieldRegistry<Self> {
        &PRODUCT_FIELDS
    }
}

/// Create/update payload for products
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub attributes: AttributesPatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

impl PartialRecord for ProductPatch {
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
        patch_key::<Product>(key)
    }
}
