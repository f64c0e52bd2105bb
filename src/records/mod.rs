//! Record model
//!
//! The three record variants exposed by the service, together with their
//! partial (patch) payloads.
//!
//! # Identity
//!
//! Every record carries an optional `id`. It is absent until the store
//! assigns one on insert and never changes afterwards. Patches may carry an
//! `id` to target an update; create ignores it.

mod attributes;
mod cereal;
mod image;
mod patch;
mod product;

pub use attributes::{Attributes, AttributesPatch, HasAttributes};
pub use cereal::{Cereal, CerealPatch};
pub use image::{ImagePatch, ProductImage};
pub use patch::Patch;
pub use product::{Product, ProductPatch};

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::registry::{Assignment, FieldRegistry};

/// Tag naming one of the record variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Product,
    Cereal,
    Image,
}

impl RecordKind {
    /// All record kinds in registration order
    pub const ALL: [RecordKind; 3] = [RecordKind::Product, RecordKind::Cereal, RecordKind::Image];

    /// Returns the lowercase tag used in routes and config
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Product => "product",
            RecordKind::Cereal => "cereal",
            RecordKind::Image => "image",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a record kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown record kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for RecordKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A stored record type with a closed, statically registered field set
pub trait Record:
    Clone + Default + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Partial payload used for create and update batches
    type Patch: PartialRecord;

    /// Tag of this record variant
    const KIND: RecordKind;

    /// Store-assigned identifier, if persisted
    fn id(&self) -> Option<Uuid>;

    /// Assigns the identifier. Only the store calls this, on insert.
    fn assign_id(&mut self, id: Uuid);

    /// Field registry for this record type
    fn registry() -> &'static FieldRegistry<Self>;

    /// Row-level constraints checked by the store at commit.
    fn check_constraints(&self) -> Result<(), String> {
        Ok(())
    }
}

/// A mutation payload in which every field is independently present or absent
pub trait PartialRecord: fmt::Debug + DeserializeOwned + Send + Sync {
    /// Target identifier (update/delete); ignored by create
    fn id(&self) -> Option<Uuid>;

    /// Legacy batch marker: identifier plus `delete: true` means delete
    fn marked_for_delete(&self) -> bool;

    /// Present fields as registry assignments. The identifier is never included.
    fn assignments(&self) -> Vec<Assignment>;

    /// Canonical spelling of a payload key, matched ignoring ASCII case
    fn canonical_key(key: &str) -> Option<&'static str>;
}

/// Payload keys of a patch over `R`: its registered fields plus the delete marker
pub(crate) fn patch_key<R: Record>(key: &str) -> Option<&'static str> {
    if key.eq_ignore_ascii_case("delete") {
        Some("delete")
    } else {
        R::registry().resolve(key).map(|field| field.name())
    }
}
