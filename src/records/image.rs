//! Product image records

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::patch::Patch;
use super::{patch_key, PartialRecord, Record, RecordKind};
use crate::registry::{Assignment, FieldDescriptor, FieldRegistry, Value};

static IMAGE_FIELDS: Lazy<FieldRegistry<ProductImage>> = Lazy::new(|| {
    FieldRegistry::new(
        RecordKind::Image,
        vec![
            FieldDescriptor::<ProductImage>::identifier("id", |r| r.id),
            FieldDescriptor::<ProductImage>::reference(
                "productReference",
                |r| r.product_reference,
                |r, v| r.product_reference = v,
            ),
            FieldDescriptor::<ProductImage>::text(
                "imagePath",
                |r| r.image_path.as_str(),
                |r, v| r.image_path = v,
            ),
        ],
    )
});

/// An image attached to a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Product this image belongs to, if any
    #[serde(default)]
    pub product_reference: Option<Uuid>,
    #[serde(default)]
    pub image_path: String,
}

impl Record for ProductImage {
    type Patch = ImagePatch;

    const KIND: RecordKind = RecordKind::Image;

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn registry() -> &'static FieldRegistry<Self> {
        &IMAGE_FIELDS
    }
}

/// Create/update payload for images
///
/// `productReference: null` detaches the image; omitting the key leaves the
/// reference unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub product_reference: Patch<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

impl PartialRecord for ImagePatch {
    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn marked_for_delete(&self) -> bool {
        self.delete == Some(true)
    }

    fn assignments(&self) -> Vec<Assignment> {
        let mut out = Vec::new();
        if let Some(reference) = self.product_reference.into_update() {
            let value = reference.map_or(Value::Null, Value::Uuid);
            out.push(Assignment::new("productReference", value));
        }
        if let Some(path) = &self.image_path {
            out.push(Assignment::new("imagePath", Value::Text(path.clone())));
        }
        out
    }

    fn canonical_key(key: &str) -> Option<&'static str> {
        patch_key::<ProductImage>(key)
    }
}
