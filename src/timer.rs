//! Turn countdown and its cancellable tick
//!
//! The countdown is advanced by alarms scheduled through the caller, one
//! per second. Every armed countdown gets a fresh [`TickTicket`]; alarms
//! carrying any other ticket belong to a turn that already ended and are
//! ignored, so a late tick can never eat into the next turn.

use serde::{Deserialize, Serialize};

/// Identifies the countdown a tick alarm was scheduled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickTicket(u64);

/// Result of a single countdown step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Time remains on the clock
    Running(u32),
    /// The countdown just reached zero
    Expired,
}

/// A per-turn countdown in whole seconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnTimer {
    remaining: u32,
    armed: Option<TickTicket>,
    issued: u64,
}

impl TurnTimer {
    /// Starts a new countdown and returns the ticket its alarms must carry
    ///
    /// Any previously armed ticket is invalidated.
    pub fn arm(&mut self, seconds: u32) -> TickTicket {
        self.issued += 1;
        let ticket = TickTicket(self.issued);
        self.remaining = seconds;
        self.armed = Some(ticket);
        ticket
    }

    /// Cancels the pending tick, if any
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Clears the countdown entirely
    pub fn reset(&mut self) {
        self.disarm();
        self.remaining = 0;
    }

    /// Whether an alarm with this ticket should still be honoured
    pub fn accepts(&self, ticket: TickTicket) -> bool {
        self.armed == Some(ticket)
    }

    /// Whether a countdown is currently armed
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// The ticket of the armed countdown
    pub fn ticket(&self) -> Option<TickTicket> {
        self.armed
    }

    /// Seconds left on the clock
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Takes one second off the clock
    ///
    /// Reaching zero disarms the timer.
    pub fn step(&mut self) -> Step {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.disarm();
            Step::Expired
        } else {
            Step::Running(self.remaining)
        }
    }
}
