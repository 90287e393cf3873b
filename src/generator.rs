//! Single-prompt generator for untimed games
//!
//! Games like riddles, icebreakers or word chain have no teams and no
//! clock: players simply ask for the next prompt. Puzzles keep their
//! answer hidden until it is revealed.

use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    catalog::{Catalog, Item},
    constants::draw::MAX_REDRAW_ATTEMPTS,
    draw,
    filter::{self, Selection},
};

/// Messages sent to the presentation layer to render the generator
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub enum SyncMessage {
    /// Nothing has been drawn yet
    Empty {
        /// Number of prompts available
        candidates: usize,
    },
    /// A prompt is on screen
    Prompt {
        /// Text read aloud or acted out
        text: String,
        /// Forbidden words for Taboo cards
        forbidden: Option<Vec<String>>,
        /// Answer, present once revealed
        answer: Option<String>,
        /// Whether there is a hidden answer left to reveal
        can_reveal: bool,
    },
}

/// Draws prompts one at a time from a fixed pool
#[derive(Debug, Clone, Default)]
pub struct PromptGenerator {
    candidates: Vec<Item>,
    min_length: Option<usize>,
    current: Option<Item>,
    revealed: bool,
}

impl PromptGenerator {
    /// Creates a generator over the selected categories of a catalog
    pub fn new(catalog: &Catalog, selection: &Selection) -> Self {
        Self::from_candidates(filter::resolve_candidates(selection, catalog))
    }

    /// Creates a generator over a prepared candidate list
    pub fn from_candidates(candidates: Vec<Item>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    /// Prefers prompts at least `min_length` characters long
    ///
    /// Short prompts are redrawn a bounded number of times, then accepted.
    #[must_use]
    pub fn with_preferred_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Replaces the current prompt with a fresh draw and hides its answer
    ///
    /// Returns `None` when the pool is empty.
    pub fn next_prompt(&mut self) -> Option<&Item> {
        let drawn = match self.min_length {
            Some(min_length) => {
                draw::draw_prompt_with_min_length(&self.candidates, min_length, MAX_REDRAW_ATTEMPTS)
            }
            None => draw::draw_prompt(&self.candidates),
        };

        if drawn.is_none() {
            tracing::warn!("no prompts available to draw from");
        }
        self.current = drawn.cloned();
        self.revealed = false;
        self.current.as_ref()
    }

    /// Reveals the answer of the current prompt
    ///
    /// Returns the answer, or `None` if the prompt has none.
    pub fn reveal(&mut self) -> Option<&str> {
        let answer = self.current.as_ref()?.answer()?;
        self.revealed = true;
        Some(answer)
    }

    /// Prompt currently on screen
    pub fn current(&self) -> Option<&Item> {
        self.current.as_ref()
    }

    /// Whether the answer of the current prompt is shown
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Number of prompts in the pool
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Message describing the generator for rendering
    pub fn snapshot(&self) -> SyncMessage {
        match &self.current {
            None => SyncMessage::Empty {
                candidates: self.candidates.len(),
            },
            Some(item) => SyncMessage::Prompt {
                text: item.text().to_owned(),
                forbidden: match item {
                    Item::Card(card) => Some(card.forbidden.clone()),
                    Item::Word(_) | Item::Puzzle(_) => None,
                },
                answer: item
                    .answer()
                    .filter(|_| self.revealed)
                    .map(str::to_owned),
                can_reveal: item.answer().is_some() && !self.revealed,
            },
        }
    }
}
