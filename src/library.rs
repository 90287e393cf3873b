//! Bundled word lists
//!
//! Every data-driven game reads one of a handful of word lists shipped
//! with the crate. Categorized lists group their items by category; flat
//! lists are loaded as a single category. The bundled lists are parsed
//! once on first use.

use enum_map::{Enum, EnumMap};
use once_cell_serde::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Catalog};

/// Identifies one of the word lists
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum DataKey {
    /// Taboo cards, by category
    #[display("taboo")]
    Taboo,
    /// Single words for Contact and Neanderthal
    #[display("contact")]
    Contact,
    /// Riddles with answers
    #[display("riddles")]
    Riddles,
    /// Lateral thinking puzzles with answers
    #[display("lateral")]
    Lateral,
    /// Icebreaker questions, by category
    #[display("icebreaker")]
    Icebreaker,
    /// Word chain categories
    #[display("categories")]
    Categories,
    /// Charades prompts, by category
    #[display("charades")]
    Charades,
    /// Pictionary words, by category
    #[display("pictionary")]
    Pictionary,
}

impl DataKey {
    /// Every word list
    pub const ALL: [DataKey; 8] = [
        Self::Taboo,
        Self::Contact,
        Self::Riddles,
        Self::Lateral,
        Self::Icebreaker,
        Self::Categories,
        Self::Charades,
        Self::Pictionary,
    ];

    /// Whether the list is grouped into categories players can pick from
    pub fn is_categorized(self) -> bool {
        matches!(
            self,
            Self::Taboo | Self::Icebreaker | Self::Charades | Self::Pictionary
        )
    }

    /// Name and emoji of the single category a flat list is loaded into
    fn flat_category(self) -> (&'static str, &'static str) {
        match self {
            Self::Contact => ("Words", "💬"),
            Self::Riddles => ("Riddles", "❓"),
            Self::Lateral => ("Lateral Thinking", "🧠"),
            Self::Categories => ("Categories", "📋"),
            Self::Taboo | Self::Icebreaker | Self::Charades | Self::Pictionary => ("", ""),
        }
    }

    fn bundled_source(self) -> &'static str {
        match self {
            Self::Taboo => include_str!("../data/taboo.json"),
            Self::Contact => include_str!("../data/contact.json"),
            Self::Riddles => include_str!("../data/riddles.json"),
            Self::Lateral => include_str!("../data/lateral.json"),
            Self::Icebreaker => include_str!("../data/icebreaker.json"),
            Self::Categories => include_str!("../data/word-chain.json"),
            Self::Charades => include_str!("../data/charades.json"),
            Self::Pictionary => include_str!("../data/pictionary.json"),
        }
    }
}

/// Catalogs for every word list
#[derive(Debug, Clone, Default)]
pub struct Library {
    sets: EnumMap<DataKey, Catalog>,
}

static BUNDLED: OnceCell<Library> = OnceCell::new();

impl Library {
    /// The word lists shipped with the crate
    ///
    /// # Errors
    ///
    /// Returns [`catalog::Error`] if a bundled list is malformed.
    pub fn bundled() -> Result<&'static Library, catalog::Error> {
        BUNDLED.get_or_try_init(|| Self::from_sources(DataKey::bundled_source))
    }

    /// Loads every word list from the JSON returned by `source`
    ///
    /// # Errors
    ///
    /// Returns [`catalog::Error`] for the first list that fails to parse.
    pub fn from_sources<'a, F: Fn(DataKey) -> &'a str>(source: F) -> Result<Self, catalog::Error> {
        let mut library = Self::default();
        for key in DataKey::ALL {
            library.load(key, source(key))?;
        }
        Ok(library)
    }

    /// Parses and stores a single word list, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns [`catalog::Error`] if the source does not match the list's shape.
    pub fn load(&mut self, key: DataKey, source: &str) -> Result<(), catalog::Error> {
        let catalog = if key.is_categorized() {
            Catalog::from_categorized_json(source)?
        } else {
            let (name, emoji) = key.flat_category();
            Catalog::from_flat_json(&key.to_string(), name, emoji, source)?
        };

        tracing::debug!(%key, categories = catalog.len(), items = catalog.item_count(), "loaded word list");
        self.sets[key] = catalog;
        Ok(())
    }

    /// Catalog of a word list
    pub fn get(&self, key: DataKey) -> &Catalog {
        &self.sets[key]
    }
}
