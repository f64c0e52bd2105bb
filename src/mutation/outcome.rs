//! Mutation outcomes
//!
//! Every batch call reports exactly one outcome:
//! `{ "success": bool, "affectedRows": int, "message": string }`.

use serde::{Deserialize, Serialize};

/// Result of one mutation batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub success: bool,
    pub affected_rows: usize,
    pub message: String,
}

impl MutationOutcome {
    fn new(affected_rows: usize, done: &str, none: &str) -> Self {
        let success = affected_rows > 0;
        Self {
            success,
            affected_rows,
            message: if success { done } else { none }.to_string(),
        }
    }

    pub fn created(affected_rows: usize) -> Self {
        Self::new(affected_rows, "Created successfully", "No rows created")
    }

    pub fn updated(affected_rows: usize) -> Self {
        Self::new(affected_rows, "Updated successfully", "No rows updated")
    }

    pub fn deleted(affected_rows: usize) -> Self {
        Self::new(affected_rows, "Deleted successfully", "No rows deleted")
    }
}

/// Outcomes of a legacy mixed batch, one per executed group in execution
/// order (delete, update, create). Serialized as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchOutcome(pub Vec<MutationOutcome>);

impl BatchOutcome {
    pub fn outcomes(&self) -> &[MutationOutcome] {
        &self.0
    }

    /// Total rows affected across groups
    pub fn affected_rows(&self) -> usize {
        self.0.iter().map(|o| o.affected_rows).sum()
    }
}
