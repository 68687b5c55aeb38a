//! # Collection Item Identifiers
//!
//! Alignments, evidence, results, and identifier entries each carry an
//! [`ItemId`] so the editor can address them stably while the list is
//! reordered or edited. Item ids are never written into a credential.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one item in a template collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Positional identifier assigned when reading a credential back,
    /// e.g. `alignment_0`.
    pub fn indexed(prefix: &str, index: usize) -> Self {
        Self(format!("{prefix}_{index}"))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(ItemId::new(), ItemId::new());
    }

    #[test]
    fn indexed_ids_are_positional() {
        assert_eq!(ItemId::indexed("alignment", 0).as_str(), "alignment_0");
        assert_eq!(ItemId::indexed("evidence", 3).to_string(), "evidence_3");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ItemId::from("result_1");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("result_1"));
    }
}
