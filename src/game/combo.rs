//! Combo & Scoring Engine
//!
//! Consecutive pickups inside a rolling time window build a combo; the
//! combo count maps to a multiplier tier that scales every award. The
//! engine also counts cumulative pickups toward the next power-up trigger,
//! independent of combo state.

use serde::{Serialize, Deserialize};

use crate::game::config::RunConfig;
use crate::game::timer::Countdown;

/// Combo and pickup-counter state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComboState {
    /// Consecutive pickups inside the combo window.
    pub count: u32,
    /// Current multiplier tier (1-4).
    pub multiplier: u32,
    /// Run-time of the previous pickup, if any.
    pub last_pickup_ms: Option<u32>,
    /// Rolling expiry; fires when the window passes without a pickup.
    pub expiry: Countdown,
    /// Total pickups this run.
    pub total_pickups: u32,
    /// Pickups accumulated toward the next power-up trigger.
    pub pickups_toward_powerup: u32,
}

/// Result of scoring one pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickupOutcome {
    /// Points awarded (base value x multiplier).
    pub points: u32,
    /// Combo count after this pickup.
    pub combo: u32,
    /// Multiplier tier applied.
    pub multiplier: u32,
    /// Enough pickups have accumulated to trigger a power-up. The caller
    /// decides whether the trigger succeeds; see [`ComboState::confirm_powerup`].
    pub powerup_due: bool,
}

impl ComboState {
    /// Fresh state: no combo, no pickups.
    pub fn new() -> Self {
        Self {
            count: 0,
            multiplier: 1,
            last_pickup_ms: None,
            expiry: Countdown::idle(),
            total_pickups: 0,
            pickups_toward_powerup: 0,
        }
    }

    /// Multiplier tier for a combo count: 1x below 3, 2x for 3-4,
    /// 3x for 5-7, 4x from 8 up.
    pub fn multiplier_for(count: u32) -> u32 {
        match count {
            0..=2 => 1,
            3..=4 => 2,
            5..=7 => 3,
            _ => 4,
        }
    }

    /// Score a pickup at run-time `now_ms`.
    ///
    /// A gap shorter than the combo window extends the combo; an equal or
    /// longer gap restarts it at 1. Every pickup re-arms the rolling
    /// expiry timer.
    pub fn on_pickup(&mut self, now_ms: u32, config: &RunConfig) -> PickupOutcome {
        let consecutive = match self.last_pickup_ms {
            Some(prev) => now_ms.wrapping_sub(prev) < config.combo_window_ms,
            None => false,
        };

        self.count = if consecutive { self.count + 1 } else { 1 };
        self.multiplier = Self::multiplier_for(self.count);
        self.last_pickup_ms = Some(now_ms);
        self.expiry.arm(config.combo_window_ms);

        self.total_pickups += 1;
        self.pickups_toward_powerup += 1;

        PickupOutcome {
            points: config.coin_base_value * self.multiplier,
            combo: self.count,
            multiplier: self.multiplier,
            powerup_due: self.pickups_toward_powerup >= config.pickups_per_powerup,
        }
    }

    /// Reset the pickup counter after a successful power-up trigger.
    ///
    /// Not called for an ignored trigger, so the accumulated count carries
    /// until a trigger actually succeeds.
    pub fn confirm_powerup(&mut self) {
        self.pickups_toward_powerup = 0;
    }

    /// Advance the expiry timer. Returns true when the combo lapsed this
    /// tick (count and display cleared).
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if self.expiry.tick(delta_ms) {
            self.count = 0;
            self.multiplier = 1;
            return true;
        }
        false
    }

    /// Multiplier to display, or `None` when no combo is alive.
    pub fn display_multiplier(&self) -> Option<u32> {
        (self.count > 0).then_some(self.multiplier)
    }

    /// Cancel the expiry timer (game-over).
    pub fn cancel_timers(&mut self) {
        self.expiry.cancel();
    }
}

impl Default for ComboState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RunConfig {
        RunConfig::default()
    }

    #[test]
    fn test_multiplier_tiers() {
        assert_eq!(ComboState::multiplier_for(0), 1);
        assert_eq!(ComboState::multiplier_for(1), 1);
        assert_eq!(ComboState::multiplier_for(2), 1);
        assert_eq!(ComboState::multiplier_for(3), 2);
        assert_eq!(ComboState::multiplier_for(4), 2);
        assert_eq!(ComboState::multiplier_for(5), 3);
        assert_eq!(ComboState::multiplier_for(7), 3);
        assert_eq!(ComboState::multiplier_for(8), 4);
        assert_eq!(ComboState::multiplier_for(100), 4);
    }

    #[test]
    fn test_scoring_scenario() {
        // Pickups at t=0, 200, 400, 2500 ms: the spec's reference sequence
        let config = config();
        let mut combo = ComboState::new();
        let mut score = 0;

        let out = combo.on_pickup(0, &config);
        score += out.points;
        assert_eq!((out.combo, out.multiplier, score), (1, 1, 10));

        let out = combo.on_pickup(200, &config);
        score += out.points;
        assert_eq!((out.combo, out.multiplier, score), (2, 1, 20));

        let out = combo.on_pickup(400, &config);
        score += out.points;
        assert_eq!((out.combo, out.multiplier, score), (3, 2, 40));

        // Gap of 2100 ms >= 1500 ms: combo restarts at 1
        let out = combo.on_pickup(2500, &config);
        score += out.points;
        assert_eq!((out.combo, out.multiplier, score), (1, 1, 50));
    }

    #[test]
    fn test_combo_boundary_gap() {
        let config = config();
        let mut combo = ComboState::new();

        combo.on_pickup(0, &config);
        // Exactly the window: does NOT count as consecutive
        let out = combo.on_pickup(config.combo_window_ms, &config);
        assert_eq!(out.combo, 1);

        // One millisecond inside the window: does
        let base = config.combo_window_ms;
        let out = combo.on_pickup(base + config.combo_window_ms - 1, &config);
        assert_eq!(out.combo, 2);
    }

    #[test]
    fn test_expiry_clears_combo() {
        let config = config();
        let mut combo = ComboState::new();

        combo.on_pickup(0, &config);
        combo.on_pickup(100, &config);
        assert_eq!(combo.count, 2);
        assert_eq!(combo.display_multiplier(), Some(1));

        // Window passes without a pickup
        assert!(!combo.tick(1000));
        assert!(combo.tick(600));
        assert_eq!(combo.count, 0);
        assert_eq!(combo.multiplier, 1);
        assert_eq!(combo.display_multiplier(), None);

        // Timer does not re-fire
        assert!(!combo.tick(5000));
    }

    #[test]
    fn test_pickup_rearms_expiry() {
        let config = config();
        let mut combo = ComboState::new();

        combo.on_pickup(0, &config);
        combo.tick(1400);
        // Second pickup just in time resets the rolling window
        combo.on_pickup(1400, &config);
        assert!(!combo.tick(1400));
        assert_eq!(combo.count, 2);
        assert!(combo.tick(100));
    }

    #[test]
    fn test_powerup_counter() {
        let config = config();
        let mut combo = ComboState::new();

        for i in 0..19 {
            let out = combo.on_pickup(i * 2000, &config);
            assert!(!out.powerup_due, "due too early at pickup {}", i + 1);
        }
        let out = combo.on_pickup(50_000, &config);
        assert!(out.powerup_due);

        combo.confirm_powerup();
        assert_eq!(combo.pickups_toward_powerup, 0);

        // Counter independent of combo resets
        let out = combo.on_pickup(100_000, &config);
        assert!(!out.powerup_due);
        assert_eq!(combo.pickups_toward_powerup, 1);
    }

    #[test]
    fn test_ignored_trigger_keeps_counter() {
        let config = config();
        let mut combo = ComboState::new();

        for i in 0..20 {
            combo.on_pickup(i * 100, &config);
        }
        assert_eq!(combo.pickups_toward_powerup, 20);

        // Caller could not activate (power-up already live): no confirm.
        // The next pickup is still due.
        let out = combo.on_pickup(3000, &config);
        assert!(out.powerup_due);
        assert_eq!(combo.pickups_toward_powerup, 21);
    }
}
