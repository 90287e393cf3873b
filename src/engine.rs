//! Turn engine for timed team games
//!
//! The engine drives a game between two teams that alternate timed turns.
//! During a turn the active team earns a point for every correct guess and
//! may lose points for skips beyond the free allowance or, under Taboo
//! rules, for saying a forbidden word. The turn score is banked when the
//! turn ends, either early on request or when the countdown runs out.
//!
//! A game moves through these phases:
//!
//! ```text
//! Configuring -> Idle -> Active -> Idle -> ... -> GameOver
//! ```
//!
//! The countdown is driven by alarms the caller schedules on the engine's
//! behalf, one per second while a turn runs. See
//! [`TurnEngine::start_turn`] and [`TurnEngine::receive_alarm`].

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::{
    catalog::{Catalog, Item},
    constants::turn::TICK_PERIOD,
    draw,
    filter::{self, Selection},
    scoreboard::{Outcome, Scoreboard, Team, TurnRecord},
    settings::{Settings, SkipAllowance},
    timer::{Step, TickTicket, TurnTimer},
};

/// Current phase of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// Settings can be changed, no game is running
    Configuring,
    /// A game is running and the next team is about to play
    Idle,
    /// A team is playing its turn and the clock is running
    Active,
    /// Every round has been played
    GameOver,
}

/// Calls that move the engine, used to report rejected transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Action {
    /// Changing settings or the category selection
    Configure,
    /// Starting a new game
    StartGame,
    /// Starting the next turn
    StartTurn,
    /// A countdown tick
    Tick,
    /// A correct guess
    Correct,
    /// Skipping the prompt
    Skip,
    /// Saying a forbidden word
    Buzz,
    /// Ending the turn
    EndTurn,
}

/// Errors returned for calls the current state does not allow
///
/// These indicate a caller bug (for example a button that should have been
/// disabled) rather than a condition to show to players.
#[derive(Error, Debug)]
pub enum Error {
    /// The call is not valid in the current phase
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        /// The rejected call
        action: Action,
        /// Phase the engine was in
        phase: Phase,
    },
    /// The buzzer was pressed in a game played without one
    #[error("this game is played without a buzzer")]
    BuzzerDisabled,
    /// The settings are out of bounds
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] garde::Report),
}

/// Alarm messages for the turn countdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// One second of the turn identified by the ticket has passed
    Tick {
        /// Countdown the tick was scheduled for
        ticket: TickTicket,
    },
}

/// What a finished turn contributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnSummary {
    /// Team that played the turn
    pub team: Team,
    /// Round the turn belonged to
    pub round: u32,
    /// Points banked by the turn
    pub points: i64,
    /// Whether this turn ended the game
    pub game_over: bool,
}

/// Result of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The turn continues with this many seconds left
    Running(u32),
    /// Time ran out and the turn was ended
    TurnEnded(TurnSummary),
}

/// Messages sent to the presentation layer to render the engine state
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub enum SyncMessage {
    /// Pre-game configuration screen
    Configuring {
        /// Current settings
        settings: Settings,
        /// Number of prompts the current selection yields
        candidates: usize,
    },
    /// Between turns, waiting for the next team to start
    Idle {
        /// Current round (1-indexing)
        round: u32,
        /// Total number of rounds
        total_rounds: u32,
        /// Team about to play
        active_team: Team,
        /// Points of team A
        score_a: i64,
        /// Points of team B
        score_b: i64,
    },
    /// A turn in progress
    Active {
        /// Current round (1-indexing)
        round: u32,
        /// Total number of rounds
        total_rounds: u32,
        /// Team playing
        active_team: Team,
        /// Points of team A
        score_a: i64,
        /// Points of team B
        score_b: i64,
        /// Seconds left in the turn
        remaining_seconds: u32,
        /// Net points of the turn so far
        turn_score: i64,
        /// Free skips spent this turn
        skips_used: u32,
        /// Free skips per turn, absent when unlimited
        free_skips: Option<u32>,
        /// Prompt to get across, absent when there is nothing to draw
        prompt: Option<Item>,
    },
    /// Final scores
    GameOver {
        /// Points of team A
        score_a: i64,
        /// Points of team B
        score_b: i64,
        /// Winner or tie
        outcome: Outcome,
    },
}

/// Scores and counters of the turn being played
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct TurnTally {
    score: i64,
    skips_used: u32,
}

/// The turn engine
///
/// One engine serves every timed team game. Taboo and the other team games
/// differ only in their [`Settings`] (whether a buzzer penalty exists) and
/// in an optional minimum prompt length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEngine {
    /// Settings, frozen while a game runs
    settings: Settings,
    /// Categories prompts come from
    catalog: Catalog,
    /// Prompts shorter than this are never drawn
    min_prompt_length: Option<usize>,
    /// Prompts resolved from the selection when the game started
    candidates: Vec<Item>,

    // Runtime State
    /// Current phase of the engine
    phase: Phase,
    /// Banked points of both teams
    scoreboard: Scoreboard,
    /// Current round (1-indexing)
    round: u32,
    /// Team playing or about to play
    active_team: Team,
    /// Counters of the current turn
    turn: TurnTally,
    /// Countdown of the current turn
    timer: TurnTimer,
    /// Prompt currently displayed
    prompt: Option<Item>,
}

impl TurnEngine {
    /// Creates an engine in the configuring phase
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gamenight::catalog::{Catalog, Item};
    /// use gamenight::engine::{Phase, TurnEngine};
    /// use gamenight::settings::Settings;
    ///
    /// let catalog = Catalog::single("words", "Words", "📝", vec![Item::from("Pizza".to_string())]);
    /// let mut engine = TurnEngine::new(Settings::team(), catalog);
    /// engine.start_game().unwrap();
    /// assert_eq!(engine.phase(), Phase::Idle);
    /// ```
    pub fn new(settings: Settings, catalog: Catalog) -> Self {
        Self {
            settings,
            catalog,
            min_prompt_length: None,
            candidates: Vec::new(),
            phase: Phase::Configuring,
            scoreboard: Scoreboard::default(),
            round: 1,
            active_team: Team::A,
            turn: TurnTally::default(),
            timer: TurnTimer::default(),
            prompt: None,
        }
    }

    /// Restricts prompts to those at least `min_length` characters long
    #[must_use]
    pub fn with_min_prompt_length(mut self, min_length: usize) -> Self {
        self.min_prompt_length = Some(min_length);
        self
    }

    fn expect_phase(&self, action: Action, allowed: &[Phase]) -> Result<(), Error> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }

    fn resolve_candidates(&self) -> Vec<Item> {
        let mut candidates = filter::resolve_candidates(&self.settings.selection, &self.catalog);
        if let Some(min_length) = self.min_prompt_length {
            filter::retain_min_length(&mut candidates, min_length);
        }
        candidates
    }

    fn draw_prompt(&mut self) {
        self.prompt = draw::draw_prompt(&self.candidates).cloned();
        if self.prompt.is_none() {
            tracing::warn!("no prompts available to draw from");
        }
    }

    // Configuration

    /// Replaces the settings
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidTransition`] unless the engine is configuring
    /// * [`Error::InvalidSettings`] if the settings are out of bounds
    pub fn configure(&mut self, settings: Settings) -> Result<(), Error> {
        self.expect_phase(Action::Configure, &[Phase::Configuring])?;
        garde::Validate::validate(&settings)?;
        self.settings = settings;
        Ok(())
    }

    /// Toggles a category in the selection
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless the engine is configuring.
    pub fn toggle_category(&mut self, key: &str) -> Result<(), Error> {
        self.expect_phase(Action::Configure, &[Phase::Configuring])?;
        self.settings.selection.toggle(key, &self.catalog);
        Ok(())
    }

    // Transitions

    /// Starts a new game
    ///
    /// Resolves the candidate prompts from the current selection, clears both
    /// scores and hands the first turn of round one to team A.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidTransition`] unless the engine is configuring or the
    ///   previous game is over
    /// * [`Error::InvalidSettings`] if the settings are out of bounds
    pub fn start_game(&mut self) -> Result<(), Error> {
        self.expect_phase(Action::StartGame, &[Phase::Configuring, Phase::GameOver])?;
        garde::Validate::validate(&self.settings)?;

        self.candidates = self.resolve_candidates();
        if self.candidates.is_empty() {
            tracing::warn!("starting a game without any prompts");
        }
        self.scoreboard.clear();
        self.round = 1;
        self.active_team = Team::A;
        self.turn = TurnTally::default();
        self.timer.reset();
        self.prompt = None;
        self.phase = Phase::Idle;

        tracing::debug!(
            candidates = self.candidates.len(),
            rounds = self.settings.total_rounds,
            "game started"
        );
        Ok(())
    }

    /// Starts the active team's turn and schedules its first tick
    ///
    /// The turn starts even when there are no prompts to draw from, in which
    /// case [`TurnEngine::prompt`] stays `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless the engine is idle.
    pub fn start_turn<S: FnMut(crate::AlarmMessage, web_time::Duration)>(
        &mut self,
        mut schedule_message: S,
    ) -> Result<(), Error> {
        self.expect_phase(Action::StartTurn, &[Phase::Idle])?;

        self.turn = TurnTally::default();
        let ticket = self.timer.arm(self.settings.turn_seconds());
        self.draw_prompt();
        self.phase = Phase::Active;

        tracing::debug!(
            team = %self.active_team,
            round = self.round,
            seconds = self.timer.remaining(),
            "turn started"
        );

        schedule_message(AlarmMessage::Tick { ticket }.into(), TICK_PERIOD);
        Ok(())
    }

    /// Takes one second off the clock, ending the turn when it runs out
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless a turn is active.
    pub fn tick(&mut self) -> Result<Tick, Error> {
        self.expect_phase(Action::Tick, &[Phase::Active])?;

        Ok(match self.timer.step() {
            Step::Running(remaining) => Tick::Running(remaining),
            Step::Expired => {
                tracing::debug!(team = %self.active_team, "time is up");
                Tick::TurnEnded(self.finish_turn())
            }
        })
    }

    /// Handles a scheduled countdown alarm
    ///
    /// Alarms for a turn that has already ended are ignored. Otherwise the
    /// clock ticks, and while the turn goes on the next tick is scheduled.
    ///
    /// # Returns
    ///
    /// The summary of the turn if this alarm ran its clock out
    pub fn receive_alarm<S: FnMut(crate::AlarmMessage, web_time::Duration)>(
        &mut self,
        message: AlarmMessage,
        mut schedule_message: S,
    ) -> Option<TurnSummary> {
        match message {
            AlarmMessage::Tick { ticket } => {
                if self.phase != Phase::Active || !self.timer.accepts(ticket) {
                    tracing::trace!(?ticket, "ignoring stale tick");
                    return None;
                }

                match self.tick() {
                    Ok(Tick::Running(_)) => {
                        schedule_message(AlarmMessage::Tick { ticket }.into(), TICK_PERIOD);
                        None
                    }
                    Ok(Tick::TurnEnded(summary)) => Some(summary),
                    Err(_) => None,
                }
            }
        }
    }

    /// Records a correct guess and draws the next prompt
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless a turn is active.
    pub fn record_correct(&mut self) -> Result<(), Error> {
        self.expect_phase(Action::Correct, &[Phase::Active])?;
        self.turn.score += 1;
        self.draw_prompt();
        Ok(())
    }

    /// Skips the prompt and draws the next one
    ///
    /// The skip is free while free skips remain, otherwise the skip penalty
    /// is applied to the turn score.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless a turn is active.
    pub fn record_skip(&mut self) -> Result<(), Error> {
        self.expect_phase(Action::Skip, &[Phase::Active])?;
        if self.settings.free_skips.allows(self.turn.skips_used) {
            self.turn.skips_used += 1;
        } else {
            self.turn.score += self.settings.skip_penalty;
        }
        self.draw_prompt();
        Ok(())
    }

    /// Applies the buzzer penalty for a forbidden word and draws the next prompt
    ///
    /// # Errors
    ///
    /// * [`Error::BuzzerDisabled`] if the game has no buzzer
    /// * [`Error::InvalidTransition`] unless a turn is active
    pub fn record_buzz(&mut self) -> Result<(), Error> {
        let penalty = self.settings.buzzer_penalty.ok_or(Error::BuzzerDisabled)?;
        self.expect_phase(Action::Buzz, &[Phase::Active])?;
        self.turn.score += penalty;
        self.draw_prompt();
        Ok(())
    }

    /// Ends the turn early, banking its score
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless a turn is active.
    pub fn end_turn(&mut self) -> Result<TurnSummary, Error> {
        self.expect_phase(Action::EndTurn, &[Phase::Active])?;
        Ok(self.finish_turn())
    }

    fn finish_turn(&mut self) -> TurnSummary {
        self.timer.disarm();

        let team = self.active_team;
        let round = self.round;
        let points = self.turn.score;
        self.scoreboard.add_turn(round, team, points);
        self.prompt = None;

        match team {
            Team::B if self.round >= self.settings.total_rounds => {
                self.phase = Phase::GameOver;
            }
            Team::B => {
                self.round += 1;
                self.active_team = Team::A;
                self.phase = Phase::Idle;
            }
            Team::A => {
                self.active_team = Team::B;
                self.phase = Phase::Idle;
            }
        }

        let game_over = self.phase == Phase::GameOver;
        tracing::debug!(%team, round, points, game_over, "turn ended");

        TurnSummary {
            team,
            round,
            points,
            game_over,
        }
    }

    /// Abandons any game and returns to configuration
    ///
    /// Valid in every phase. A pending tick is cancelled.
    pub fn reset_game(&mut self) {
        self.timer.reset();
        self.scoreboard.clear();
        self.round = 1;
        self.active_team = Team::A;
        self.turn = TurnTally::default();
        self.prompt = None;
        self.candidates.clear();
        self.phase = Phase::Configuring;

        tracing::debug!("game reset");
    }

    // Getters

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Category selection of the current settings
    pub fn selection(&self) -> &Selection {
        &self.settings.selection
    }

    /// Categories prompts are drawn from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of prompts in play
    ///
    /// While configuring this reflects the current selection, afterwards the
    /// pool resolved when the game started.
    pub fn candidate_count(&self) -> usize {
        match self.phase {
            Phase::Configuring => self.resolve_candidates().len(),
            Phase::Idle | Phase::Active | Phase::GameOver => self.candidates.len(),
        }
    }

    /// Whether there is anything to draw
    pub fn has_candidates(&self) -> bool {
        self.candidate_count() > 0
    }

    /// Banked points of a team
    pub fn team_score(&self, team: Team) -> i64 {
        self.scoreboard.total(team)
    }

    /// Banked turns of the game
    pub fn history(&self) -> &[TurnRecord] {
        self.scoreboard.history()
    }

    /// Current round (1-indexing)
    pub fn current_round(&self) -> u32 {
        self.round
    }

    /// Team playing or about to play
    pub fn active_team(&self) -> Team {
        self.active_team
    }

    /// Seconds left in the current turn
    pub fn remaining_seconds(&self) -> u32 {
        self.timer.remaining()
    }

    /// Whether a turn is running
    pub fn is_turn_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Free skips spent in the current turn
    pub fn skips_used(&self) -> u32 {
        self.turn.skips_used
    }

    /// Net points of the current turn
    pub fn turn_score(&self) -> i64 {
        self.turn.score
    }

    /// Whether every round has been played
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Prompt currently displayed
    pub fn prompt(&self) -> Option<&Item> {
        self.prompt.as_ref()
    }

    /// Whether the next skip costs points
    pub fn next_skip_is_penalized(&self) -> bool {
        !self.settings.free_skips.allows(self.turn.skips_used)
    }

    /// Winner or tie, once the game is over
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_game_over().then(|| self.scoreboard.outcome())
    }

    /// Message describing the whole state for rendering
    pub fn snapshot(&self) -> SyncMessage {
        let score_a = self.team_score(Team::A);
        let score_b = self.team_score(Team::B);

        match self.phase {
            Phase::Configuring => SyncMessage::Configuring {
                settings: self.settings.clone(),
                candidates: self.candidate_count(),
            },
            Phase::Idle => SyncMessage::Idle {
                round: self.round,
                total_rounds: self.settings.total_rounds,
                active_team: self.active_team,
                score_a,
                score_b,
            },
            Phase::Active => SyncMessage::Active {
                round: self.round,
                total_rounds: self.settings.total_rounds,
                active_team: self.active_team,
                score_a,
                score_b,
                remaining_seconds: self.timer.remaining(),
                turn_score: self.turn.score,
                skips_used: self.turn.skips_used,
                free_skips: match self.settings.free_skips {
                    SkipAllowance::Limited(free) => Some(free),
                    SkipAllowance::Unlimited => None,
                },
                prompt: self.prompt.clone(),
            },
            Phase::GameOver => SyncMessage::GameOver {
                score_a,
                score_b,
                outcome: self.scoreboard.outcome(),
            },
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::catalog::{Category, TabooCard};
    use std::time::Duration;

    fn create_test_catalog() -> Catalog {
        let category = |name: &str, items: &[&str]| Category {
            name: name.to_string(),
            emoji: String::new(),
            items: items.iter().map(|w| Item::Word((*w).to_string())).collect(),
        };
        Catalog::new([
            ("animals", category("Animals", &["Cat", "Elephant"])),
            ("food", category("Food", &["Pizza", "Spaghetti"])),
        ])
    }

    fn create_test_engine(settings: Settings) -> TurnEngine {
        TurnEngine::new(settings, create_test_catalog())
    }

    fn team_settings(total_rounds: u32, free_skips: SkipAllowance) -> Settings {
        Settings {
            total_rounds,
            free_skips,
            ..Settings::team()
        }
    }

    /// Scheduler that collects every scheduled alarm
    fn collect(alarms: &mut Vec<AlarmMessage>) -> impl FnMut(crate::AlarmMessage, Duration) + '_ {
        move |message, duration| {
            assert_eq!(duration, TICK_PERIOD);
            let crate::AlarmMessage::Turn(alarm) = message;
            alarms.push(alarm);
        }
    }

    fn ignore(_: crate::AlarmMessage, _: Duration) {}

    fn started(settings: Settings) -> TurnEngine {
        let mut engine = create_test_engine(settings);
        engine.start_game().unwrap();
        engine
    }

    fn play_turn(engine: &mut TurnEngine, correct: usize) -> TurnSummary {
        engine.start_turn(ignore).unwrap();
        for _ in 0..correct {
            engine.record_correct().unwrap();
        }
        engine.end_turn().unwrap()
    }

    #[test]
    fn test_new_engine_is_configuring() {
        let engine = create_test_engine(Settings::team());

        assert_eq!(engine.phase(), Phase::Configuring);
        assert_eq!(engine.current_round(), 1);
        assert_eq!(engine.active_team(), Team::A);
        assert!(!engine.is_turn_active());
        assert!(!engine.is_game_over());
        assert_eq!(engine.candidate_count(), 4);
        assert!(engine.prompt().is_none());
    }

    #[test]
    fn test_start_game_enters_idle() {
        let engine = started(Settings::team());

        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.team_score(Team::A), 0);
        assert_eq!(engine.team_score(Team::B), 0);
        assert_eq!(engine.candidate_count(), 4);
    }

    #[test]
    fn test_start_turn_resets_turn_state() {
        let mut engine = started(Settings::team());
        let mut alarms = Vec::new();
        engine.start_turn(collect(&mut alarms)).unwrap();

        assert_eq!(engine.phase(), Phase::Active);
        assert!(engine.is_turn_active());
        assert_eq!(engine.remaining_seconds(), 60);
        assert_eq!(engine.turn_score(), 0);
        assert_eq!(engine.skips_used(), 0);
        assert!(engine.prompt().is_some());
        assert_eq!(alarms.len(), 1);
    }

    #[test]
    fn test_example_scenario() {
        let settings = Settings {
            total_rounds: 2,
            skip_penalty: -1,
            free_skips: SkipAllowance::Limited(0),
            ..Settings::team()
        };
        let mut engine = started(settings);

        engine.start_turn(ignore).unwrap();
        for _ in 0..3 {
            engine.record_correct().unwrap();
        }
        assert_eq!(engine.turn_score(), 3);
        engine.end_turn().unwrap();
        assert_eq!(engine.team_score(Team::A), 3);
        assert_eq!(engine.active_team(), Team::B);
        assert_eq!(engine.current_round(), 1);

        engine.start_turn(ignore).unwrap();
        engine.record_skip().unwrap();
        assert_eq!(engine.turn_score(), -1);
        engine.end_turn().unwrap();
        assert_eq!(engine.team_score(Team::B), -1);
        assert_eq!(engine.current_round(), 2);
        assert_eq!(engine.active_team(), Team::A);

        play_turn(&mut engine, 0);
        assert!(!engine.is_game_over());
        let summary = play_turn(&mut engine, 0);

        assert!(summary.game_over);
        assert!(engine.is_game_over());
        assert_eq!(engine.outcome(), Some(Outcome::Winner(Team::A)));
    }

    #[test]
    fn test_free_skips_then_penalty() {
        let mut engine = started(team_settings(4, SkipAllowance::Limited(2)));
        engine.start_turn(ignore).unwrap();

        engine.record_skip().unwrap();
        assert_eq!((engine.turn_score(), engine.skips_used()), (0, 1));
        engine.record_skip().unwrap();
        assert_eq!((engine.turn_score(), engine.skips_used()), (0, 2));
        assert!(engine.next_skip_is_penalized());
        engine.record_skip().unwrap();
        assert_eq!((engine.turn_score(), engine.skips_used()), (-1, 2));
    }

    #[test]
    fn test_unlimited_skips_never_penalize() {
        let mut engine = started(team_settings(4, SkipAllowance::Unlimited));
        engine.start_turn(ignore).unwrap();

        for _ in 0..50 {
            engine.record_skip().unwrap();
        }
        assert_eq!(engine.turn_score(), 0);
        assert_eq!(engine.skips_used(), 50);
        assert!(!engine.next_skip_is_penalized());
    }

    #[test]
    fn test_skip_counter_resets_each_turn() {
        let mut engine = started(team_settings(4, SkipAllowance::Limited(1)));
        engine.start_turn(ignore).unwrap();
        engine.record_skip().unwrap();
        engine.record_skip().unwrap();
        engine.end_turn().unwrap();

        engine.start_turn(ignore).unwrap();
        assert_eq!(engine.skips_used(), 0);
        assert_eq!(engine.turn_score(), 0);
        engine.record_skip().unwrap();
        assert_eq!(engine.turn_score(), 0);
    }

    #[test]
    fn test_buzzer_applies_penalty() {
        let settings = Settings {
            buzzer_penalty: Some(-2),
            ..Settings::taboo()
        };
        let mut engine = started(settings);
        engine.start_turn(ignore).unwrap();

        engine.record_correct().unwrap();
        engine.record_buzz().unwrap();
        assert_eq!(engine.turn_score(), -1);
        assert_eq!(engine.skips_used(), 0);
    }

    #[test]
    fn test_buzzer_disabled_for_team_games() {
        let mut engine = started(Settings::team());
        engine.start_turn(ignore).unwrap();

        assert!(matches!(engine.record_buzz(), Err(Error::BuzzerDisabled)));
        assert_eq!(engine.turn_score(), 0);
    }

    #[test]
    fn test_scoring_rejected_while_idle() {
        let mut engine = started(Settings::taboo());

        assert!(matches!(
            engine.record_correct(),
            Err(Error::InvalidTransition {
                action: Action::Correct,
                phase: Phase::Idle
            })
        ));
        assert!(engine.record_skip().is_err());
        assert!(engine.record_buzz().is_err());
        assert!(engine.end_turn().is_err());
        assert!(engine.tick().is_err());
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_transitions_rejected_while_configuring() {
        let mut engine = create_test_engine(Settings::team());

        assert!(engine.start_turn(ignore).is_err());
        assert!(engine.record_correct().is_err());
        assert_eq!(engine.phase(), Phase::Configuring);
    }

    #[test]
    fn test_start_game_rejected_mid_game() {
        let mut engine = started(Settings::team());
        assert!(engine.start_game().is_err());

        engine.start_turn(ignore).unwrap();
        assert!(engine.start_game().is_err());
        assert!(engine.start_turn(ignore).is_err());
    }

    #[test]
    fn test_end_turn_only_touches_active_team() {
        let mut engine = started(Settings::team());
        play_turn(&mut engine, 2);
        assert_eq!(engine.team_score(Team::B), 0);

        let summary = play_turn(&mut engine, 5);
        assert_eq!(summary.team, Team::B);
        assert_eq!(summary.points, 5);
        assert_eq!(engine.team_score(Team::A), 2);
        assert_eq!(engine.team_score(Team::B), 5);
    }

    #[test]
    fn test_end_turn_clears_prompt() {
        let mut engine = started(Settings::team());
        engine.start_turn(ignore).unwrap();
        assert!(engine.prompt().is_some());

        engine.end_turn().unwrap();
        assert!(engine.prompt().is_none());
        assert!(!engine.is_turn_active());
    }

    #[test]
    fn test_game_over_after_all_rounds() {
        let mut engine = started(team_settings(3, SkipAllowance::default()));
        for _ in 0..3 {
            assert_eq!(engine.active_team(), Team::A);
            play_turn(&mut engine, 1);
            assert!(!engine.is_game_over());
            play_turn(&mut engine, 1);
        }

        assert!(engine.is_game_over());
        assert_eq!(engine.current_round(), 3);
        assert_eq!(engine.outcome(), Some(Outcome::Tie));
        assert!(matches!(
            engine.start_turn(ignore),
            Err(Error::InvalidTransition {
                action: Action::StartTurn,
                phase: Phase::GameOver
            })
        ));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut engine = started(team_settings(1, SkipAllowance::default()));
        play_turn(&mut engine, 4);
        play_turn(&mut engine, 1);
        assert!(engine.is_game_over());

        engine.start_game().unwrap();
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.team_score(Team::A), 0);
        assert_eq!(engine.current_round(), 1);
        assert_eq!(engine.active_team(), Team::A);
        assert!(engine.outcome().is_none());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_timer_ends_turn_exactly_once() {
        let mut engine = started(Settings::team());
        let mut alarms = Vec::new();
        engine.start_turn(collect(&mut alarms)).unwrap();

        let mut ended = Vec::new();
        while let Some(alarm) = alarms.pop() {
            if let Some(summary) = engine.receive_alarm(alarm, collect(&mut alarms)) {
                ended.push(summary);
            }
        }

        assert_eq!(ended.len(), 1);
        assert_eq!(ended[0].team, Team::A);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.active_team(), Team::B);
        assert_eq!(engine.remaining_seconds(), 0);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_sixty_ticks_end_the_turn() {
        let mut engine = started(Settings::team());
        engine.start_turn(ignore).unwrap();

        for expected in (1..60).rev() {
            assert_eq!(engine.tick().unwrap(), Tick::Running(expected));
        }
        assert!(matches!(engine.tick().unwrap(), Tick::TurnEnded(_)));
        assert!(engine.tick().is_err());
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_stale_tick_is_ignored_after_end_turn() {
        let mut engine = started(Settings::team());
        let mut alarms = Vec::new();
        engine.start_turn(collect(&mut alarms)).unwrap();
        let stale = alarms.pop().unwrap();
        engine.end_turn().unwrap();

        engine.start_turn(ignore).unwrap();
        assert_eq!(engine.receive_alarm(stale, ignore), None);
        assert_eq!(engine.remaining_seconds(), 60);
    }

    #[test]
    fn test_reset_cancels_pending_tick() {
        let mut engine = started(Settings::team());
        let mut alarms = Vec::new();
        engine.start_turn(collect(&mut alarms)).unwrap();
        engine.record_correct().unwrap();

        engine.reset_game();
        assert_eq!(engine.phase(), Phase::Configuring);
        assert_eq!(engine.turn_score(), 0);
        assert_eq!(engine.team_score(Team::A), 0);
        assert!(engine.prompt().is_none());

        let alarm = alarms.pop().unwrap();
        assert_eq!(engine.receive_alarm(alarm, ignore), None);
        assert_eq!(engine.phase(), Phase::Configuring);
    }

    #[test]
    fn test_reset_from_every_phase() {
        let mut engine = create_test_engine(Settings::team());
        engine.reset_game();
        assert_eq!(engine.phase(), Phase::Configuring);

        engine.start_game().unwrap();
        engine.reset_game();
        assert_eq!(engine.phase(), Phase::Configuring);

        let mut engine = started(team_settings(1, SkipAllowance::default()));
        play_turn(&mut engine, 1);
        play_turn(&mut engine, 0);
        engine.reset_game();
        assert_eq!(engine.phase(), Phase::Configuring);
        assert_eq!(engine.current_round(), 1);
    }

    #[test]
    fn test_configure_only_before_game() {
        let mut engine = create_test_engine(Settings::team());
        engine.configure(team_settings(2, SkipAllowance::Unlimited)).unwrap();
        assert_eq!(engine.settings().total_rounds, 2);

        engine.start_game().unwrap();
        assert!(matches!(
            engine.configure(Settings::team()),
            Err(Error::InvalidTransition {
                action: Action::Configure,
                ..
            })
        ));
        assert!(engine.toggle_category("food").is_err());
        assert_eq!(engine.settings().total_rounds, 2);
    }

    #[test]
    fn test_configure_rejects_invalid_settings() {
        let mut engine = create_test_engine(Settings::team());
        let settings = Settings {
            skip_penalty: 3,
            ..Settings::team()
        };

        assert!(matches!(
            engine.configure(settings),
            Err(Error::InvalidSettings(_))
        ));
        assert_eq!(engine.settings().skip_penalty, -1);
    }

    #[test]
    fn test_toggle_category_changes_pool() {
        let mut engine = create_test_engine(Settings::team());
        engine.toggle_category("animals").unwrap();

        assert_eq!(engine.selection().keys(), ["food"]);
        assert_eq!(engine.candidate_count(), 2);

        engine.start_game().unwrap();
        engine.start_turn(ignore).unwrap();
        let prompt = engine.prompt().unwrap().text();
        assert!(prompt == "Pizza" || prompt == "Spaghetti");
    }

    #[test]
    fn test_empty_pool_starts_turn_without_prompt() {
        let settings = Settings {
            selection: Selection::of(["space"]),
            ..Settings::team()
        };
        let mut engine = started(settings);
        assert!(!engine.has_candidates());

        engine.start_turn(ignore).unwrap();
        assert!(engine.is_turn_active());
        assert!(engine.prompt().is_none());

        engine.record_correct().unwrap();
        assert_eq!(engine.turn_score(), 1);
        assert!(engine.prompt().is_none());
    }

    #[test]
    fn test_min_prompt_length() {
        let mut engine =
            TurnEngine::new(Settings::team(), create_test_catalog()).with_min_prompt_length(6);
        assert_eq!(engine.candidate_count(), 2);

        engine.start_game().unwrap();
        engine.start_turn(ignore).unwrap();
        for _ in 0..20 {
            assert!(engine.prompt().unwrap().text_len() >= 6);
            engine.record_correct().unwrap();
        }
    }

    #[test]
    fn test_taboo_cards_are_drawn() {
        let card = TabooCard {
            target: "Tiger".to_string(),
            forbidden: vec!["stripes".to_string()],
        };
        let catalog = Catalog::single("zoo", "Zoo", "🦁", vec![Item::Card(card.clone())]);
        let mut engine = TurnEngine::new(Settings::taboo(), catalog);
        engine.start_game().unwrap();
        engine.start_turn(ignore).unwrap();

        assert_eq!(engine.prompt(), Some(&Item::Card(card)));
    }

    #[test]
    fn test_snapshot_follows_phase() {
        let mut engine = create_test_engine(Settings::team());
        assert!(matches!(
            engine.snapshot(),
            SyncMessage::Configuring { candidates: 4, .. }
        ));

        engine.start_game().unwrap();
        assert!(matches!(
            engine.snapshot(),
            SyncMessage::Idle {
                round: 1,
                active_team: Team::A,
                ..
            }
        ));

        engine.start_turn(ignore).unwrap();
        engine.record_correct().unwrap();
        match engine.snapshot() {
            SyncMessage::Active {
                remaining_seconds,
                turn_score,
                free_skips,
                prompt,
                ..
            } => {
                assert_eq!(remaining_seconds, 60);
                assert_eq!(turn_score, 1);
                assert_eq!(free_skips, Some(3));
                assert!(prompt.is_some());
            }
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_game_over_reports_tie() {
        let mut engine = started(team_settings(1, SkipAllowance::default()));
        play_turn(&mut engine, 2);
        play_turn(&mut engine, 2);

        assert!(matches!(
            engine.snapshot(),
            SyncMessage::GameOver {
                score_a: 2,
                score_b: 2,
                outcome: Outcome::Tie
            }
        ));
    }

    #[test]
    fn test_error_messages() {
        let error = Error::InvalidTransition {
            action: Action::StartTurn,
            phase: Phase::GameOver,
        };
        assert_eq!(error.to_string(), "cannot StartTurn while GameOver");
    }

    #[derive(Debug, Clone, Copy)]
    enum Scoring {
        Correct,
        Skip,
        Buzz,
    }

    fn scoring_strategy() -> impl proptest::strategy::Strategy<Value = Scoring> {
        use proptest::prelude::*;
        prop_oneof![
            Just(Scoring::Correct),
            Just(Scoring::Skip),
            Just(Scoring::Buzz)
        ]
    }

    proptest::proptest! {
        #[test]
        fn prop_turn_score_is_sum_of_deltas(
            actions in proptest::collection::vec(scoring_strategy(), 0..64),
            free in 0u32..5,
            skip_penalty in -3i64..=0,
            buzzer_penalty in -3i64..=0,
        ) {
            let settings = Settings {
                free_skips: SkipAllowance::Limited(free),
                skip_penalty,
                buzzer_penalty: Some(buzzer_penalty),
                ..Settings::taboo()
            };
            let mut engine = started(settings);
            engine.start_turn(ignore).unwrap();

            let mut expected = 0;
            let mut skips = 0;
            for action in actions {
                match action {
                    Scoring::Correct => {
                        engine.record_correct().unwrap();
                        expected += 1;
                    }
                    Scoring::Skip => {
                        engine.record_skip().unwrap();
                        if skips < free {
                            skips += 1;
                        } else {
                            expected += skip_penalty;
                        }
                    }
                    Scoring::Buzz => {
                        engine.record_buzz().unwrap();
                        expected += buzzer_penalty;
                    }
                }
            }

            proptest::prop_assert_eq!(engine.turn_score(), expected);
            let summary = engine.end_turn().unwrap();
            proptest::prop_assert_eq!(summary.points, expected);
            proptest::prop_assert_eq!(engine.team_score(Team::A), expected);
            proptest::prop_assert_eq!(engine.team_score(Team::B), 0);
        }
    }
}
