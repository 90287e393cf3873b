//! Category selection and candidate resolution
//!
//! Players choose which categories of a catalog to play with. An empty
//! selection means every category is in play. This module turns such a
//! selection into the flat candidate list prompts are drawn from.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Item};

/// The categories a player has picked
///
/// An empty selection stands for "all categories". Keys that are not part
/// of the catalog are tolerated and ignored when resolving candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Vec<String>);

impl Selection {
    /// The implicit "all categories" selection
    pub fn all() -> Self {
        Self::default()
    }

    /// A selection of exactly these keys
    pub fn of<K: Into<String>, I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self(keys.into_iter().map(Into::into).unique().collect())
    }

    /// Whether every category is implicitly selected
    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a category counts as selected
    pub fn includes(&self, key: &str) -> bool {
        self.is_all() || self.0.iter().any(|k| k == key)
    }

    /// Explicitly selected keys, empty when all are selected
    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// Toggles a category the way the category picker does
    ///
    /// * With everything implicitly selected, toggling a key selects every
    ///   other category of the catalog.
    /// * Toggling a selected key deselects it. Deselecting the last key falls
    ///   back to "all categories".
    /// * Toggling an unselected key adds it.
    pub fn toggle(&mut self, key: &str, catalog: &Catalog) {
        if self.is_all() {
            self.0 = catalog
                .keys()
                .filter(|k| *k != key)
                .map(str::to_owned)
                .collect();
        } else if let Some(position) = self.0.iter().position(|k| k == key) {
            self.0.remove(position);
        } else {
            self.0.push(key.to_owned());
        }
    }
}

/// Flattens the selected categories of a catalog into a candidate list
///
/// With an empty selection every category is flattened. Categories are
/// visited in catalog order and items keep their order within a category.
/// Selected keys missing from the catalog are skipped.
pub fn resolve_candidates(selection: &Selection, catalog: &Catalog) -> Vec<Item> {
    catalog
        .iter()
        .filter(|(key, _)| selection.includes(key))
        .flat_map(|(_, category)| category.items.iter().cloned())
        .collect_vec()
}

/// Keeps only the items whose text is at least `min_length` characters long
pub fn retain_min_length(items: &mut Vec<Item>, min_length: usize) {
    items.retain(|item| item.text_len() >= min_length);
}
