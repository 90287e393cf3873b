//! Game settings and their validation
//!
//! Settings are chosen before a game starts and stay frozen while it runs.
//! The same settings type drives both rule sets: Taboo games carry a
//! buzzer penalty, team games (charades, pictionary, neanderthal) don't.

use std::time::Duration;

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{penalty, rounds, skips, turn},
    filter::Selection,
};

/// Validation result type for custom validators
type ValidationResult = garde::Result;

/// Validates that a duration falls within specified bounds in whole seconds
///
/// # Errors
///
/// Returns a `garde::Error` if the duration is outside the specified bounds.
pub fn validate_duration<const MIN_SECONDS: u64, const MAX_SECONDS: u64>(
    val: &Duration,
    _ctx: &(),
) -> ValidationResult {
    if (MIN_SECONDS..=MAX_SECONDS).contains(&val.as_secs()) && val.subsec_nanos() == 0 {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "not a whole number of seconds within [{MIN_SECONDS},{MAX_SECONDS}]",
        )))
    }
}

/// Validates that a penalty is non-positive and not absurdly harsh
///
/// # Errors
///
/// Returns a `garde::Error` if the penalty is outside the configurable range.
pub fn validate_penalty(val: &i64, _ctx: &()) -> ValidationResult {
    if (penalty::MIN..=penalty::MAX).contains(val) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "penalty outside of bounds [{},{}]",
            penalty::MIN,
            penalty::MAX
        )))
    }
}

fn validate_optional_penalty(val: &Option<i64>, ctx: &()) -> ValidationResult {
    val.as_ref().map_or(Ok(()), |penalty| validate_penalty(penalty, ctx))
}

/// How many skips per turn are free of penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub enum SkipAllowance {
    /// This many free skips, penalties afterwards
    Limited(#[garde(range(max = skips::MAX_FREE))] u32),
    /// Skipping is always free
    Unlimited,
}

impl SkipAllowance {
    /// Whether a skip is free after `used` free skips this turn
    pub fn allows(&self, used: u32) -> bool {
        match self {
            Self::Limited(free) => used < *free,
            Self::Unlimited => true,
        }
    }

    /// Number of free skips, `None` when unlimited
    pub fn limit(&self) -> Option<u32> {
        match self {
            Self::Limited(free) => Some(*free),
            Self::Unlimited => None,
        }
    }
}

impl Default for SkipAllowance {
    fn default() -> Self {
        Self::Limited(skips::DEFAULT_FREE)
    }
}

impl From<u32> for SkipAllowance {
    /// Converts a numeric allowance, reading the legacy sentinel as unlimited
    fn from(value: u32) -> Self {
        if value == skips::LEGACY_UNLIMITED {
            Self::Unlimited
        } else {
            Self::Limited(value)
        }
    }
}

/// Settings for a timed, turn based team game
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Settings {
    /// Length of each turn
    #[garde(custom(validate_duration::<{ turn::MIN_LENGTH }, { turn::MAX_LENGTH }>))]
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub turn_length: Duration,
    /// Number of rounds, each team plays one turn per round
    #[garde(range(min = rounds::MIN_COUNT, max = rounds::MAX_COUNT))]
    pub total_rounds: u32,
    /// Skips per turn that cost nothing
    #[garde(dive)]
    #[serde(default)]
    pub free_skips: SkipAllowance,
    /// Added to the turn score for every skip beyond the free ones
    #[garde(custom(validate_penalty))]
    pub skip_penalty: i64,
    /// Added to the turn score when a forbidden word is said (Taboo rules only)
    #[garde(custom(validate_optional_penalty))]
    #[serde(default)]
    pub buzzer_penalty: Option<i64>,
    /// Categories to draw prompts from
    #[garde(skip)]
    #[serde(default)]
    pub selection: Selection,
}

impl Settings {
    /// Default settings for Taboo, including the buzzer
    pub fn taboo() -> Self {
        Self {
            buzzer_penalty: Some(penalty::DEFAULT_BUZZER),
            ..Self::team()
        }
    }

    /// Default settings for team games without a buzzer
    pub fn team() -> Self {
        Self {
            turn_length: Duration::from_secs(turn::DEFAULT_LENGTH),
            total_rounds: rounds::DEFAULT_COUNT,
            free_skips: SkipAllowance::default(),
            skip_penalty: penalty::DEFAULT_SKIP,
            buzzer_penalty: None,
            selection: Selection::all(),
        }
    }

    /// Turn length in whole seconds
    pub fn turn_seconds(&self) -> u32 {
        u32::try_from(self.turn_length.as_secs()).unwrap_or(u32::MAX)
    }

    /// Whether these settings use the Taboo buzzer
    pub fn has_buzzer(&self) -> bool {
        self.buzzer_penalty.is_some()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::team()
    }
}
