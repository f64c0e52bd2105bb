//! Tri-state field container for nullable fields
//!
//! A nullable field in a patch has three meanings that an `Option` cannot
//! carry: leave the stored value alone, clear it, or set it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Patch state of a single nullable field
///
/// Use with `#[serde(default)]` so that a missing key deserializes as
/// [`Patch::Absent`] and an explicit `null` as [`Patch::Null`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field omitted: keep the stored value
    #[default]
    Absent,
    /// Field explicitly null: clear the stored value
    Null,
    /// Field present with a value
    Set(T),
}

impl<T> Patch<T> {
    /// Returns true if the field was omitted
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Collapses to the new stored value, or `None` if the field is absent.
    ///
    /// `Some(None)` means "clear".
    pub fn into_update(self) -> Option<Option<T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Set(value) => Some(Some(value)),
        }
    }

    /// Borrowing form of [`Patch::into_update`]
    pub fn as_update(&self) -> Option<Option<&T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Set(value) => Some(Some(value)),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only reached when the key is present; absence comes from `default`.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Set(value),
            None => Patch::Null,
        })
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Absent | Patch::Null => serializer.serialize_none(),
            Patch::Set(value) => serializer.serialize_some(value),
        }
    }
}
