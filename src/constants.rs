//! Configuration constants for the game night core
//!
//! This module contains the configuration limits and defaults used
//! throughout the turn engine and prompt pools, grouped by the concern
//! they constrain.

/// Turn timer configuration constants
pub mod turn {
    use web_time::Duration;

    /// Minimum length of a single turn in seconds
    pub const MIN_LENGTH: u64 = 10;
    /// Maximum length of a single turn in seconds
    pub const MAX_LENGTH: u64 = 300;
    /// Default length of a single turn in seconds
    pub const DEFAULT_LENGTH: u64 = 60;
    /// Period of the countdown tick
    pub const TICK_PERIOD: Duration = Duration::from_secs(1);
}

/// Round configuration constants
pub mod rounds {
    /// Minimum number of rounds in a game
    pub const MIN_COUNT: u32 = 1;
    /// Maximum number of rounds in a game
    pub const MAX_COUNT: u32 = 20;
    /// Default number of rounds, each team plays once per round
    pub const DEFAULT_COUNT: u32 = 4;
}

/// Skip configuration constants
pub mod skips {
    /// Maximum finite number of free skips per turn
    pub const MAX_FREE: u32 = 20;
    /// Default number of free skips per turn
    pub const DEFAULT_FREE: u32 = 3;
    /// Numeric value older settings used to mean "unlimited free skips"
    pub const LEGACY_UNLIMITED: u32 = 99;
}

/// Penalty configuration constants
pub mod penalty {
    /// Harshest penalty that can be configured
    pub const MIN: i64 = -10;
    /// Mildest penalty that can be configured (no penalty)
    pub const MAX: i64 = 0;
    /// Default penalty for a skip beyond the free allowance
    pub const DEFAULT_SKIP: i64 = -1;
    /// Default penalty for saying a forbidden word
    pub const DEFAULT_BUZZER: i64 = -1;
}

/// Prompt draw configuration constants
pub mod draw {
    /// Minimum length of a Neanderthal word
    pub const NEANDERTHAL_MIN_LENGTH: usize = 6;
    /// Number of redraws attempted before accepting a short prompt
    pub const MAX_REDRAW_ATTEMPTS: usize = 20;
}
