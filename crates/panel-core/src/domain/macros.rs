//! The macro catalog: the set of backend-defined actions a user can bind.
//!
//! The catalog is fetched once per session from `/api/get/macros` as a JSON
//! object mapping an opaque macro key to its display record. The backend owns
//! macro creation and destruction; the panel only reads a snapshot and
//! assumes it is immutable for the session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display record for one macro, as served by the backend.
///
/// The macro's identifying key is the *map key* in the catalog JSON, not a
/// field of this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroEntry {
    pub name: String,
    pub description: String,
}

/// A macro together with its catalog key — the unit the panel drags, lists in
/// the context menu, and sends as an assignment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroInfo {
    /// Opaque backend identifier, sent verbatim as the `value=` parameter.
    pub key: String,
    pub name: String,
    pub description: String,
}

/// The fetched macro catalog.
///
/// Stored as a `BTreeMap` so iteration order is stable across rebuilds of the
/// context menu and the CLI listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacroCatalog {
    entries: BTreeMap<String, MacroEntry>,
}

impl MacroCatalog {
    /// An empty catalog, used when the fetch fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Looks a macro up by its catalog key.
    pub fn get(&self, key: &str) -> Option<MacroInfo> {
        self.entries.get(key).map(|e| MacroInfo {
            key: key.to_string(),
            name: e.name.clone(),
            description: e.description.clone(),
        })
    }

    /// Iterates all macros in stable key order.
    pub fn iter(&self) -> impl Iterator<Item = MacroInfo> + '_ {
        self.entries.iter().map(|(key, e)| MacroInfo {
            key: key.clone(),
            name: e.name.clone(),
            description: e.description.clone(),
        })
    }

    /// True if `key` names a macro in this catalog.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl FromIterator<(String, MacroEntry)> for MacroCatalog {
    fn from_iter<T: IntoIterator<Item = (String, MacroEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
