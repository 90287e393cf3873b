//! Word and prompt source
//!
//! This module defines the items players are shown during a game (plain
//! words, Taboo cards and puzzles with hidden answers) and the ordered,
//! read-only catalog of categories they are grouped into. Catalogs are
//! loaded once from static JSON and never mutated afterwards.

use std::fmt::{self, Display};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
};
use thiserror::Error;

/// Errors that can occur while loading catalog data
#[derive(Error, Debug)]
pub enum Error {
    /// The JSON source could not be parsed into the expected shape
    #[error("malformed word list: {0}")]
    Json(#[from] serde_json::Error),
}

/// A Taboo card: the word to get across and the words that may not be said
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabooCard {
    /// The word the team has to guess
    pub target: String,
    /// Words the describer is not allowed to say
    pub forbidden: Vec<String>,
}

/// A riddle or lateral thinking puzzle whose answer stays hidden until revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// The question read aloud
    #[serde(rename = "q")]
    pub question: String,
    /// The answer, revealed on demand
    #[serde(rename = "a")]
    pub answer: String,
}

/// A single prompt that can be drawn during a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(untagged)]
pub enum Item {
    /// A plain word or sentence
    Word(String),
    /// A Taboo card with forbidden words
    Card(TabooCard),
    /// A question with a hidden answer
    Puzzle(Puzzle),
}

impl Item {
    /// The primary text of the item
    ///
    /// This is the word itself, the target of a Taboo card, or the question
    /// of a puzzle. Length based filters measure this text.
    pub fn text(&self) -> &str {
        match self {
            Self::Word(word) => word,
            Self::Card(card) => &card.target,
            Self::Puzzle(puzzle) => &puzzle.question,
        }
    }

    /// Number of characters in [`Item::text`]
    pub fn text_len(&self) -> usize {
        self.text().chars().count()
    }

    /// The hidden answer, if this item has one
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Puzzle(puzzle) => Some(&puzzle.answer),
            Self::Word(_) | Self::Card(_) => None,
        }
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A named group of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name shown in the category picker
    pub name: String,
    /// Emoji shown next to the name
    #[serde(default)]
    pub emoji: String,
    /// Items of this category, in file order
    #[serde(alias = "cards", alias = "questions", alias = "prompts", alias = "words")]
    pub items: Vec<Item>,
}

/// An ordered, read-only mapping from category key to category
///
/// Iteration order is the order categories appear in the source document,
/// which is also the order used when flattening categories into a
/// candidate list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<(String, Category)>,
}

impl Catalog {
    /// Creates a catalog from `(key, category)` pairs
    ///
    /// A repeated key replaces the earlier category but keeps its position.
    pub fn new<K: Into<String>, I: IntoIterator<Item = (K, Category)>>(categories: I) -> Self {
        let mut catalog = Self::default();
        for (key, category) in categories {
            catalog.insert(key.into(), category);
        }
        catalog
    }

    /// Creates a catalog holding a single category
    pub fn single(key: &str, name: &str, emoji: &str, items: Vec<Item>) -> Self {
        Self::new([(
            key,
            Category {
                name: name.to_owned(),
                emoji: emoji.to_owned(),
                items,
            },
        )])
    }

    fn insert(&mut self, key: String, category: Category) {
        match self.categories.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = category,
            None => self.categories.push((key, category)),
        }
    }

    /// Parses a categorized word list
    ///
    /// The expected shape is `{ "categories": { "<key>": { "name", "emoji", "<items>" } } }`
    /// where the item list may be called `items`, `cards`, `questions`,
    /// `prompts` or `words`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the source does not have that shape.
    pub fn from_categorized_json(source: &str) -> Result<Self, Error> {
        #[derive(Deserialize)]
        struct CategorizedFile {
            categories: Catalog,
        }

        Ok(serde_json::from_str::<CategorizedFile>(source)?.categories)
    }

    /// Parses a flat JSON array of items into a single-category catalog
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the source is not an array of items.
    pub fn from_flat_json(key: &str, name: &str, emoji: &str, source: &str) -> Result<Self, Error> {
        let items: Vec<Item> = serde_json::from_str(source)?;
        Ok(Self::single(key, name, emoji, items))
    }

    /// Looks up a category by key
    pub fn get(&self, key: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find_map(|(k, category)| (k == key).then_some(category))
    }

    /// Whether a category with this key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Category keys in catalog order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(key, _)| key.as_str())
    }

    /// `(key, category)` pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories
            .iter()
            .map(|(key, category)| (key.as_str(), category))
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the catalog has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of items across all categories
    pub fn item_count(&self) -> usize {
        self.categories
            .iter()
            .map(|(_, category)| category.items.len())
            .sum()
    }
}

impl Serialize for Catalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.categories.iter().map(|(k, c)| (k, c)))
    }
}

impl<'de> Deserialize<'de> for Catalog {
    /// Deserializes a map while keeping the document order of its keys
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category keys to categories")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Catalog, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut catalog = Catalog::default();
                while let Some((key, category)) = map.next_entry::<String, Category>()? {
                    catalog.insert(key, category);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
