//! Run Configuration
//!
//! Every tuning knob of the simulation in one flat, serializable record.
//! Distances are integer pixels, speeds px/s, times integer milliseconds,
//! ratios integer percentages - tuning files never contain floats, so a
//! config round-trips exactly and cannot introduce nondeterminism.

use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::warn;

/// Errors from loading or validating a [`RunConfig`].
///
/// These surface to the embedder at startup only; nothing inside the tick
/// loop ever returns one.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parsed but violate a constraint.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete tuning for one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    // =========================================================================
    // Movement
    // =========================================================================
    /// Downward acceleration while airborne (px/s^2).
    pub gravity_px_s2: i32,
    /// Upward velocity of a ground (or coyote/buffered) jump (px/s).
    pub ground_jump_speed_px_s: i32,
    /// Upward velocity of the airborne double jump (px/s). Weaker than the
    /// ground jump.
    pub double_jump_speed_px_s: i32,
    /// Downward velocity applied on fast-fall (px/s).
    pub fast_fall_speed_px_s: i32,
    /// Grace window after leaving the ground during which a ground jump is
    /// still honored (ms).
    pub coyote_ms: u32,
    /// Validity window for a jump pressed shortly before landing (ms).
    pub jump_buffer_ms: u32,

    // =========================================================================
    // Character
    // =========================================================================
    /// Fixed horizontal position of the character's left edge (px).
    pub character_x_px: i32,
    /// Character hitbox width at 100% scale (px).
    pub character_width_px: i32,
    /// Character hitbox height at 100% scale (px).
    pub character_height_px: i32,

    // =========================================================================
    // Difficulty ramp
    // =========================================================================
    /// World scroll speed at run start (px/s).
    pub base_scroll_speed_px_s: i32,
    /// Scroll speed ceiling (px/s).
    pub max_scroll_speed_px_s: i32,
    /// Scroll speed gain per elapsed second (px/s per s).
    pub scroll_ramp_px_s_per_s: i32,
    /// Shared spawn delay at run start (ms).
    pub base_spawn_delay_ms: u32,
    /// Spawn delay floor (ms). The ramp never tightens below this.
    pub min_spawn_delay_ms: u32,
    /// Spawn delay reduction per elapsed second (ms per s).
    pub spawn_delay_ramp_ms_per_s: u32,

    // =========================================================================
    // Spawner
    // =========================================================================
    /// Coin cadence as a percentage of the shared spawn delay.
    pub coin_cadence_pct: u32,
    /// Pit cadence as a percentage of the shared spawn delay.
    pub pit_cadence_pct: u32,
    /// Pit cadence lower bound as a percentage of the spawn delay floor.
    /// Pits are deliberately rarer than other entities.
    pub pit_floor_pct: u32,
    /// Chance (0-100) that a hazard spawn is a ground hazard; the
    /// remainder are flying hazards.
    pub ground_hazard_pct: u32,
    /// How far past the world's trailing edge entities spawn (px).
    pub spawn_margin_px: i32,

    /// Coin pool capacity (bounded reuse, no spawn-time allocation).
    pub coin_pool: usize,
    /// Ground hazard pool capacity.
    pub ground_hazard_pool: usize,
    /// Flying hazard pool capacity.
    pub flying_hazard_pool: usize,
    /// Pit pool capacity.
    pub pit_pool: usize,

    /// Coin hitbox width (px).
    pub coin_width_px: i32,
    /// Coin hitbox height (px).
    pub coin_height_px: i32,
    /// Coin spawn height above the ground line (px).
    pub coin_base_y_px: i32,
    /// Coin bob amplitude around its spawn height (px).
    pub coin_bob_amplitude_px: i32,
    /// Coin bob cycle length (ms).
    pub coin_bob_period_ms: u32,

    /// Ground hazard hitbox width (px).
    pub ground_hazard_width_px: i32,
    /// Ground hazard hitbox height (px).
    pub ground_hazard_height_px: i32,

    /// Flying hazard hitbox width (px).
    pub flying_hazard_width_px: i32,
    /// Flying hazard hitbox height (px).
    pub flying_hazard_height_px: i32,
    /// Flying hazard hover height above the ground line (px).
    pub flying_hazard_base_y_px: i32,
    /// Flying hazard hover amplitude (px).
    pub hover_amplitude_px: i32,
    /// Flying hazard hover cycle length (ms).
    pub hover_period_ms: u32,

    /// Pit gap width (px).
    pub pit_width_px: i32,
    /// How far the pit sensor extends below the ground line (px).
    pub pit_depth_px: i32,
    /// How far the pit sensor pokes above the ground line (px), so a
    /// grounded character overlaps it while an airborne one clears it.
    pub pit_lip_px: i32,

    // =========================================================================
    // Scoring
    // =========================================================================
    /// Maximum gap between pickups for them to count as consecutive (ms).
    pub combo_window_ms: u32,
    /// Points per coin before the combo multiplier.
    pub coin_base_value: u32,
    /// Cumulative pickups needed to trigger a power-up.
    pub pickups_per_powerup: u32,

    // =========================================================================
    // Power-ups
    // =========================================================================
    /// Active duration of either power-up (ms).
    pub powerup_duration_ms: u32,
    /// Scroll multiplier while the speed power-up is active (percent).
    pub speed_boost_pct: u32,
    /// Window before expiry during which the power-up flashes (ms).
    pub flash_window_ms: u32,
    /// Flash toggle period (ms).
    pub flash_period_ms: u32,

    // =========================================================================
    // Clock
    // =========================================================================
    /// Frame deltas are clamped to this so a hitch cannot tunnel entities
    /// through the character (ms).
    pub max_delta_ms: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gravity_px_s2: 1500,
            ground_jump_speed_px_s: 620,
            double_jump_speed_px_s: 480,
            fast_fall_speed_px_s: 900,
            coyote_ms: 100,
            jump_buffer_ms: 100,

            character_x_px: 160,
            character_width_px: 48,
            character_height_px: 64,

            base_scroll_speed_px_s: 240,
            max_scroll_speed_px_s: 520,
            scroll_ramp_px_s_per_s: 10,
            base_spawn_delay_ms: 1400,
            min_spawn_delay_ms: 600,
            spawn_delay_ramp_ms_per_s: 40,

            coin_cadence_pct: 110,
            pit_cadence_pct: 200,
            pit_floor_pct: 250,
            ground_hazard_pct: 70,
            spawn_margin_px: 32,

            coin_pool: 16,
            ground_hazard_pool: 8,
            flying_hazard_pool: 8,
            pit_pool: 4,

            coin_width_px: 24,
            coin_height_px: 24,
            coin_base_y_px: 72,
            coin_bob_amplitude_px: 10,
            coin_bob_period_ms: 800,

            ground_hazard_width_px: 36,
            ground_hazard_height_px: 48,

            flying_hazard_width_px: 40,
            flying_hazard_height_px: 28,
            flying_hazard_base_y_px: 96,
            hover_amplitude_px: 16,
            hover_period_ms: 1200,

            pit_width_px: 96,
            pit_depth_px: 12,
            pit_lip_px: 4,

            combo_window_ms: 1500,
            coin_base_value: 10,
            pickups_per_powerup: 20,

            powerup_duration_ms: 10_000,
            speed_boost_pct: 160,
            flash_window_ms: 2000,
            flash_period_ms: 150,

            max_delta_ms: 100,
        }
    }
}

impl RunConfig {
    /// Load a config from a JSON file, falling back to defaults when the
    /// file does not exist.
    ///
    /// A missing tuning file is a configuration-missing condition: recovered
    /// locally with defaults and a warning, never fatal. A file that exists
    /// but fails to read, parse, or validate is an embedder error and is
    /// returned.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_spawn_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "min_spawn_delay_ms must be positive".into(),
            ));
        }
        if self.base_spawn_delay_ms < self.min_spawn_delay_ms {
            return Err(ConfigError::Invalid(format!(
                "base_spawn_delay_ms ({}) below min_spawn_delay_ms ({})",
                self.base_spawn_delay_ms, self.min_spawn_delay_ms
            )));
        }
        if self.max_scroll_speed_px_s < self.base_scroll_speed_px_s {
            return Err(ConfigError::Invalid(format!(
                "max_scroll_speed_px_s ({}) below base_scroll_speed_px_s ({})",
                self.max_scroll_speed_px_s, self.base_scroll_speed_px_s
            )));
        }
        if self.ground_hazard_pct > 100 {
            return Err(ConfigError::Invalid(format!(
                "ground_hazard_pct ({}) exceeds 100",
                self.ground_hazard_pct
            )));
        }
        if self.speed_boost_pct < 100 {
            return Err(ConfigError::Invalid(format!(
                "speed_boost_pct ({}) must be at least 100",
                self.speed_boost_pct
            )));
        }
        if self.combo_window_ms == 0 {
            return Err(ConfigError::Invalid("combo_window_ms must be positive".into()));
        }
        if self.powerup_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "powerup_duration_ms must be positive".into(),
            ));
        }
        if self.pickups_per_powerup == 0 {
            return Err(ConfigError::Invalid(
                "pickups_per_powerup must be positive".into(),
            ));
        }
        if self.coin_pool == 0
            || self.ground_hazard_pool == 0
            || self.flying_hazard_pool == 0
            || self.pit_pool == 0
        {
            return Err(ConfigError::Invalid("pool capacities must be positive".into()));
        }
        if self.max_delta_ms == 0 {
            return Err(ConfigError::Invalid("max_delta_ms must be positive".into()));
        }
        if self.ground_jump_speed_px_s <= self.double_jump_speed_px_s {
            return Err(ConfigError::Invalid(format!(
                "ground jump ({}) must be stronger than double jump ({})",
                self.ground_jump_speed_px_s, self.double_jump_speed_px_s
            )));
        }
        Ok(())
    }
}
