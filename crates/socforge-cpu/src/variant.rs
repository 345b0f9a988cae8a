//! CPU variant table: named configurations mapping to compiler flag sets.

use serde::{Deserialize, Serialize};

use crate::error::{CpuError, Result};

/// A named CPU configuration and the compiler flags it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantEntry {
    /// Variant identifier, unique within a table.
    pub id: String,
    /// Compiler flag tokens, in the order they are passed to the compiler.
    pub flags: Vec<String>,
}

impl VariantEntry {
    /// Create an entry from an id and flag tokens.
    pub fn new(id: impl Into<String>, flags: &[&str]) -> Self {
        VariantEntry {
            id: id.into(),
            flags: flags.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Static lookup table from variant id to flag set.
///
/// Lookup of an absent id is a configuration error, never a silent default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantTable {
    entries: Vec<VariantEntry>,
}

impl VariantTable {
    /// Create an empty table.
    pub fn new() -> Self {
        VariantTable::default()
    }

    /// Add an entry, replacing any previous entry with the same id.
    pub fn insert(&mut self, entry: VariantEntry) {
        self.entries.retain(|e| e.id != entry.id);
        self.entries.push(entry);
    }

    /// Look up a variant by id.
    pub fn lookup(&self, id: &str) -> Result<&VariantEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| CpuError::UnknownVariant { id: id.to_string() })
    }

    /// All known variant ids, in insertion order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}
