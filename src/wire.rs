//! JSON object keys matched ignoring ASCII case
//!
//! Clients may send `Filters`, `sortorders` or `Id`; every decoder that reads
//! a request object first renames its keys to their canonical spelling.
//! Two keys that fold onto the same name are an error.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("duplicate key '{0}'")]
    Duplicate(&'static str),

    #[error("unknown key '{key}', expected one of: {expected}")]
    Unknown { key: String, expected: String },
}

/// An object whose keys have been canonicalised
#[derive(Debug, Default)]
pub struct KeyedObject {
    /// Recognised entries under their canonical key
    pub fields: Map<String, Value>,
    /// Keys that matched no canonical name, in input order
    pub unknown: Vec<String>,
}

/// Finds `key` in `keys` ignoring ASCII case
pub fn lookup(keys: &[&'static str], key: &str) -> Option<&'static str> {
    keys.iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(key))
}

/// Renames every key `canonical` recognises. Unrecognised entries are
/// dropped and their keys reported in [`KeyedObject::unknown`].
pub fn canonicalize(
    object: Map<String, Value>,
    canonical: impl Fn(&str) -> Option<&'static str>,
) -> Result<KeyedObject, KeyError> {
    let mut keyed = KeyedObject::default();
    for (key, value) in object {
        match canonical(&key) {
            Some(name) => {
                if keyed.fields.insert(name.to_string(), value).is_some() {
                    return Err(KeyError::Duplicate(name));
                }
            }
            None => keyed.unknown.push(key),
        }
    }
    Ok(keyed)
}

/// Canonicalises against a fixed key list, rejecting any other key
pub fn strict(
    object: Map<String, Value>,
    keys: &[&'static str],
) -> Result<Map<String, Value>, KeyError> {
    let keyed = canonicalize(object, |key| lookup(keys, key))?;
    match keyed.unknown.into_iter().next() {
        Some(key) => Err(KeyError::Unknown {
            key,
            expected: keys.join(", "),
        }),
        None => Ok(keyed.fields),
    }
}
