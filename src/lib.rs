//! # Game Night Library
//!
//! This library provides the core logic behind a collection of party games.
//! It loads the bundled word lists, lets players pick the categories they
//! want, runs timed two-team games such as Taboo or Charades, and draws
//! single prompts for untimed games such as riddles or icebreakers.
//!
//! The library holds no clock of its own: timed turns ask the caller to
//! schedule [`AlarmMessage`]s and hand them back when they fire.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod constants;
pub mod draw;
pub mod engine;
pub mod filter;
pub mod games;
pub mod generator;
pub mod library;
pub mod scoreboard;
pub mod settings;
pub mod timer;

/// Messages describing the state of a game for rendering
///
/// A presentation layer receives one of these after every change and
/// redraws from it.
#[derive(Debug, Serialize, Clone, derive_more::From)]
pub enum SyncMessage {
    /// Timed team game state
    Turn(engine::SyncMessage),
    /// Prompt generator state
    Generator(generator::SyncMessage),
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Alarm messages for timed events
///
/// The caller schedules these when asked to and passes them back once the
/// requested duration has elapsed.
#[derive(Debug, Clone, derive_more::From, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Countdown alarms of a team turn
    Turn(engine::AlarmMessage),
}
