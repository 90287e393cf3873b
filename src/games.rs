//! Registry of the party games on offer
//!
//! Each game is either played with the timed team engine, drawn from a
//! prompt generator, or simply explained through a list of rules.

use serde::Serialize;

use crate::{
    constants::draw::NEANDERTHAL_MIN_LENGTH,
    engine::TurnEngine,
    filter::Selection,
    generator::PromptGenerator,
    library::{DataKey, Library},
    settings::Settings,
};

/// Flavours of the timed team game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum TeamVariant {
    /// Act the prompt out
    Charades,
    /// Draw the prompt
    Pictionary,
    /// Describe the word using only short words
    Neanderthal,
}

/// How a game is played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// Timed teams with forbidden words and a buzzer
    Taboo,
    /// Timed teams without a buzzer
    Team(TeamVariant),
    /// Untimed, one prompt at a time
    Generator,
    /// No content, only the rules
    Rules(&'static [&'static str]),
}

/// Description of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One line pitch
    pub description: &'static str,
    /// How the game is played
    pub mode: Mode,
    /// Word list the game draws from
    pub data: Option<DataKey>,
    /// Label of the button drawing the next prompt
    pub button_text: Option<&'static str>,
}

/// Every game, in menu order
pub static GAMES: [GameInfo; 15] = [
    GameInfo {
        id: "taboo",
        name: "Taboo",
        description: "Describe the word, but don't say the forbidden words!",
        mode: Mode::Taboo,
        data: Some(DataKey::Taboo),
        button_text: None,
    },
    GameInfo {
        id: "charades",
        name: "Charades",
        description: "Act it out, no talking allowed!",
        mode: Mode::Team(TeamVariant::Charades),
        data: Some(DataKey::Charades),
        button_text: Some("Next Prompt"),
    },
    GameInfo {
        id: "pictionary",
        name: "Pictionary",
        description: "Draw it out, no words or gestures!",
        mode: Mode::Team(TeamVariant::Pictionary),
        data: Some(DataKey::Pictionary),
        button_text: Some("Next Word"),
    },
    GameInfo {
        id: "riddles",
        name: "Riddles",
        description: "Classic brain teasers for the whole family",
        mode: Mode::Generator,
        data: Some(DataKey::Riddles),
        button_text: Some("Next Riddle"),
    },
    GameInfo {
        id: "lateral",
        name: "Lateral Thinking",
        description: "Strange scenarios that need creative solutions",
        mode: Mode::Generator,
        data: Some(DataKey::Lateral),
        button_text: Some("Next Puzzle"),
    },
    GameInfo {
        id: "ice-breaker",
        name: "Ice Breakers",
        description: "Fun questions to get everyone talking",
        mode: Mode::Generator,
        data: Some(DataKey::Icebreaker),
        button_text: Some("Next Question"),
    },
    GameInfo {
        id: "fortunately-unfortunately",
        name: "Fortunately / Unfortunately",
        description: "Take turns telling a wild story!",
        mode: Mode::Rules(&[
            "One player opens a story with a simple sentence.",
            "The next player continues with 'Fortunately...' and adds something good.",
            "The one after that continues with 'Unfortunately...' and adds something bad.",
            "Keep alternating until the story falls apart.",
        ]),
        data: None,
        button_text: None,
    },
    GameInfo {
        id: "only-questions",
        name: "Only Questions",
        description: "Everything you say must be a question!",
        mode: Mode::Rules(&[
            "Hold a conversation using nothing but questions.",
            "Making a statement or hesitating too long knocks you out.",
            "The last player still asking questions wins.",
        ]),
        data: None,
        button_text: None,
    },
    GameInfo {
        id: "convergence",
        name: "Convergence",
        description: "Keep guessing until you both say the same word!",
        mode: Mode::Rules(&[
            "Two players count to three and each say any word.",
            "Both think of a word that links the two words just said.",
            "Count to three again and say the linking word together.",
            "Repeat until you both say exactly the same word.",
        ]),
        data: None,
        button_text: None,
    },
    GameInfo {
        id: "this-beats-that",
        name: "This Beats That",
        description: "Rock, paper, scissors with anything at all!",
        mode: Mode::Rules(&[
            "One player names a thing.",
            "The next player names something that beats it.",
            "Keep beating the last answer until someone runs out of ideas.",
        ]),
        data: None,
        button_text: None,
    },
    GameInfo {
        id: "neanderthal",
        name: "Neanderthal",
        description: "Explain big words using only small words",
        mode: Mode::Team(TeamVariant::Neanderthal),
        data: Some(DataKey::Contact),
        button_text: Some("New Word"),
    },
    GameInfo {
        id: "contact",
        name: "Contact",
        description: "One player picks a secret word, the others guess!",
        mode: Mode::Generator,
        data: Some(DataKey::Contact),
        button_text: Some("New Secret Word"),
    },
    GameInfo {
        id: "word-chain",
        name: "Word Chain",
        description: "Name things in the category, no repeats!",
        mode: Mode::Generator,
        data: Some(DataKey::Categories),
        button_text: Some("New Category"),
    },
    GameInfo {
        id: "alphabet",
        name: "ABC Conversation",
        description: "Each sentence starts with the next letter",
        mode: Mode::Rules(&[
            "Hold a conversation with a single rule.",
            "The first sentence starts with A, the next with B, and so on.",
            "Keep going all the way to Z.",
            "Hesitating too long knocks you out.",
        ]),
        data: None,
        button_text: None,
    },
    GameInfo {
        id: "chain",
        name: "Last Word",
        description: "Start your sentence with their last word",
        mode: Mode::Rules(&[
            "One player says a sentence.",
            "The next sentence must start with the last word of the previous one.",
            "Keep the chain going for as long as you can.",
        ]),
        data: None,
        button_text: None,
    },
];

/// Looks a game up by its identifier
pub fn get_game(id: &str) -> Option<&'static GameInfo> {
    GAMES.iter().find(|game| game.id == id)
}

impl GameInfo {
    /// Rules text, for games that have no content of their own
    pub fn rules(&self) -> Option<&'static [&'static str]> {
        match self.mode {
            Mode::Rules(rules) => Some(rules),
            Mode::Taboo | Mode::Team(_) | Mode::Generator => None,
        }
    }

    /// Whether the game can be played with the timed team engine
    pub fn is_timed(&self) -> bool {
        matches!(self.mode, Mode::Taboo | Mode::Team(_))
    }

    /// Builds a timed team engine for this game
    ///
    /// Returns `None` for games that are not played in teams.
    pub fn engine(&self, library: &Library) -> Option<TurnEngine> {
        let catalog = library.get(self.data?).clone();
        match self.mode {
            Mode::Taboo => Some(TurnEngine::new(Settings::taboo(), catalog)),
            Mode::Team(TeamVariant::Neanderthal) => Some(
                TurnEngine::new(Settings::team(), catalog)
                    .with_min_prompt_length(NEANDERTHAL_MIN_LENGTH),
            ),
            Mode::Team(TeamVariant::Charades | TeamVariant::Pictionary) => {
                Some(TurnEngine::new(Settings::team(), catalog))
            }
            Mode::Generator | Mode::Rules(_) => None,
        }
    }

    /// Builds a prompt generator over every category of this game's word list
    ///
    /// Returns `None` for games without a word list.
    pub fn generator(&self, library: &Library) -> Option<PromptGenerator> {
        let generator = PromptGenerator::new(library.get(self.data?), &Selection::all());
        Some(match self.mode {
            Mode::Team(TeamVariant::Neanderthal) => {
                generator.with_preferred_min_length(NEANDERTHAL_MIN_LENGTH)
            }
            Mode::Taboo | Mode::Team(_) | Mode::Generator | Mode::Rules(_) => generator,
        })
    }
}
