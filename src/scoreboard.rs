//! Team scores and turn history
//!
//! This module tracks the points each team banked turn by turn, keeps the
//! running totals, and decides the winner once the game is over.

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

/// One of the two competing teams
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, derive_more::Display,
)]
pub enum Team {
    /// The team that plays first each round
    A,
    /// The team that closes each round
    B,
}

impl Team {
    /// The opposing team
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Points a team banked in a single turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Round the turn was played in
    pub round: u32,
    /// Team that played the turn
    pub team: Team,
    /// Net points of the turn, may be negative
    pub points: i64,
}

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// This team has strictly more points
    Winner(Team),
    /// Both teams have the same total
    Tie,
}

/// Serialization helper for Scoreboard struct
#[derive(Deserialize)]
struct ScoreboardSerde {
    turns: Vec<TurnRecord>,
}

/// Running team totals backed by the per-turn history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScoreboardSerde")]
pub struct Scoreboard {
    /// Every completed turn in play order
    turns: Vec<TurnRecord>,

    /// Total per team (cached)
    #[serde(skip)]
    totals: EnumMap<Team, i64>,
}

impl From<ScoreboardSerde> for Scoreboard {
    /// Rebuilds the cached totals from the turn history
    fn from(serde: ScoreboardSerde) -> Self {
        let mut totals = EnumMap::default();
        for record in &serde.turns {
            totals[record.team] += record.points;
        }

        Self {
            turns: serde.turns,
            totals,
        }
    }
}

impl Scoreboard {
    /// Banks the points of a finished turn for a team
    pub fn add_turn(&mut self, round: u32, team: Team, points: i64) {
        self.turns.push(TurnRecord {
            round,
            team,
            points,
        });
        self.totals[team] += points;
    }

    /// Total points of a team
    pub fn total(&self, team: Team) -> i64 {
        self.totals[team]
    }

    /// Totals of both teams
    pub fn totals(&self) -> EnumMap<Team, i64> {
        self.totals
    }

    /// Completed turns in play order
    pub fn history(&self) -> &[TurnRecord] {
        &self.turns
    }

    /// Points a team earned in each of its turns
    pub fn team_summary(&self, team: Team) -> Vec<i64> {
        self.turns
            .iter()
            .filter(|record| record.team == team)
            .map(|record| record.points)
            .collect()
    }

    /// The team in front, or a tie
    pub fn outcome(&self) -> Outcome {
        use std::cmp::Ordering;

        match self.totals[Team::A].cmp(&self.totals[Team::B]) {
            Ordering::Greater => Outcome::Winner(Team::A),
            Ordering::Less => Outcome::Winner(Team::B),
            Ordering::Equal => Outcome::Tie,
        }
    }

    /// Forgets every turn
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
