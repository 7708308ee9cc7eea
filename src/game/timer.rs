//! Millisecond Countdown Timers
//!
//! Every cadence in the simulation (spawn waves, combo expiry, power-up
//! duration, power-up flash) is one of these. A `Countdown` is pure data
//! advanced by `tick(delta_ms)`; nothing fires asynchronously, so
//! cancelling at game-over is just `cancel()` and no callback can land
//! after the run has ended.

use serde::{Serialize, Deserialize};

/// A countdown timer advanced by elapsed milliseconds.
///
/// Fires at most once per `tick` call (frame deltas are clamped well below
/// any period in use, so a single frame can never owe two firings).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    period_ms: u32,
    remaining_ms: u32,
    running: bool,
    repeating: bool,
}

impl Countdown {
    /// Create a repeating timer that reloads its period on every fire.
    pub const fn repeating(period_ms: u32) -> Self {
        Self {
            period_ms,
            remaining_ms: period_ms,
            running: period_ms > 0,
            repeating: true,
        }
    }

    /// Create a one-shot timer that stops after firing once.
    pub const fn one_shot(period_ms: u32) -> Self {
        Self {
            period_ms,
            remaining_ms: period_ms,
            running: period_ms > 0,
            repeating: false,
        }
    }

    /// Create a stopped timer.
    pub const fn idle() -> Self {
        Self {
            period_ms: 0,
            remaining_ms: 0,
            running: false,
            repeating: false,
        }
    }

    /// Advance by `delta_ms`. Returns true if the timer fired.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if !self.running {
            return false;
        }

        if self.remaining_ms > delta_ms {
            self.remaining_ms -= delta_ms;
            return false;
        }

        // Fired. Carry the overshoot into the next period so cadence does
        // not drift with frame timing.
        let overshoot = delta_ms - self.remaining_ms;
        if self.repeating && self.period_ms > 0 {
            self.remaining_ms = self.period_ms - (overshoot % self.period_ms);
        } else {
            self.remaining_ms = 0;
            self.running = false;
        }
        true
    }

    /// Restart with a new period (running, full countdown).
    pub fn arm(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
        self.remaining_ms = period_ms;
        self.running = period_ms > 0;
    }

    /// Adjust the period while running.
    ///
    /// The current countdown is shortened if it exceeds the new period, so
    /// a tightening difficulty ramp takes effect immediately; it is never
    /// extended, so firings owed soon still happen on time.
    pub fn set_period(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
        if self.running {
            self.remaining_ms = self.remaining_ms.min(period_ms);
            if period_ms == 0 {
                self.running = false;
            }
        }
    }

    /// Stop the timer. A cancelled timer never fires until re-armed.
    pub fn cancel(&mut self) {
        self.running = false;
        self.remaining_ms = 0;
    }

    /// Milliseconds until the next fire (0 if stopped).
    pub fn remaining_ms(&self) -> u32 {
        if self.running { self.remaining_ms } else { 0 }
    }

    /// Current period.
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Whether the timer is counting down.
    pub fn is_running(&self) -> bool {
        self.running
    }
}
