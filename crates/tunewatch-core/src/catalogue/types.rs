//! Parsed watch-list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::CatalogueError;

/// One watch-listed name with the identifier used to build its report URL.
///
/// The remote list carries more fields per entry; only these two are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub name: String,
    pub id: String,
}

/// Name → id mapping, built whole and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    entries: HashMap<String, String>,
}

impl Catalogue {
    /// Build from entries. A later entry with the same name replaces an earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogueEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.name, e.id)).collect(),
        }
    }

    /// Parse the remote JSON format: an array of `{ "name": ..., "id": ... }`.
    pub fn parse(body: &[u8]) -> Result<Self, CatalogueError> {
        let entries: Vec<CatalogueEntry> = serde_json::from_slice(body)?;
        Ok(Self::from_entries(entries))
    }

    /// Exact-match lookup by name.
    pub fn lookup(&self, name: &str) -> Option<CatalogueEntry> {
        self.entries.get_key_value(name).map(|(name, id)| CatalogueEntry {
            name: name.clone(),
            id: id.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
