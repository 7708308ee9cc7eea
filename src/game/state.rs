//! Run State Definitions
//!
//! The character and the per-run world state. Both are plain data records:
//! they are mutated only by the update functions in `movement`, `spawn`,
//! and `tick`, never by the embedder.

use serde::{Serialize, Deserialize};

use crate::core::fixed::{Fixed, GROUND_Y, fixed_pct, px};
use crate::core::rng::DeterministicRng;
use crate::game::combo::ComboState;
use crate::game::config::RunConfig;
use crate::game::entity::{EntityKind, Pool};
use crate::game::events::GameEvent;
use crate::game::powerup::PowerUpState;
use crate::game::spawn::{coin_cadence_ms, hazard_cadence_ms, pit_cadence_ms};
use crate::game::timer::Countdown;

// =============================================================================
// CHARACTER
// =============================================================================

/// Visual/animation state of the character. Derived from movement, never
/// authoritative - collision and scoring ignore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimState {
    /// On the ground, running.
    #[default]
    Running,
    /// Ascending or falling from a ground jump.
    Jumping,
    /// Used the airborne jump.
    DoubleJumping,
    /// Fast-fall engaged.
    FastFalling,
}

/// The controllable character. Exactly one per run.
///
/// `x` is the left edge and never changes during a run; `y` is the bottom
/// (feet) edge, `GROUND_Y` when standing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Character {
    /// Left edge of the hitbox (constant per run).
    pub x: Fixed,
    /// Bottom edge of the hitbox.
    pub y: Fixed,
    /// Vertical velocity, positive = up.
    pub vy: Fixed,
    /// Standing on the ground.
    pub grounded: bool,
    /// Double jump spent for this airborne period.
    pub air_jump_used: bool,
    /// Fast-fall engaged this airborne period (animation only).
    pub fast_falling: bool,
    /// Remaining coyote grace (ms).
    pub coyote_ms_left: u32,
    /// Remaining buffered-jump validity (ms).
    pub buffer_ms_left: u32,
    /// Current animation state.
    pub anim: AnimState,
    /// Hitbox width, already scaled.
    pub width: Fixed,
    /// Hitbox height, already scaled.
    pub height: Fixed,
}

impl Character {
    /// Create a character at its run-start defaults.
    ///
    /// `scale_pct` is the session's visual scale (100 = native size); it
    /// scales the hitbox and survives restarts.
    pub fn new(config: &RunConfig, scale_pct: u32) -> Self {
        Self {
            x: px(config.character_x_px),
            y: GROUND_Y,
            vy: 0,
            grounded: true,
            air_jump_used: false,
            fast_falling: false,
            coyote_ms_left: 0,
            buffer_ms_left: 0,
            anim: AnimState::Running,
            width: fixed_pct(px(config.character_width_px), scale_pct),
            height: fixed_pct(px(config.character_height_px), scale_pct),
        }
    }
}

// =============================================================================
// RUN STATE
// =============================================================================

/// Phase of the run. The transition to `GameOver` is one-way; the only way
/// back to `Running` is a full restart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Simulation advancing.
    #[default]
    Running,
    /// Frozen; waiting for a restart request.
    GameOver,
}

/// Why the run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Character dropped below the kill plane.
    FellOffWorld,
    /// Unshielded hazard collision.
    HazardHit,
    /// Stood on a pit gap.
    PitFall,
}

/// Complete state of one run. Replaced wholesale on restart; only the
/// session-level high score and character scale outlive it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunState {
    /// Milliseconds simulated since run start.
    pub elapsed_ms: u32,

    /// Current phase.
    pub phase: RunPhase,

    /// Set when the run ends.
    pub end_cause: Option<EndCause>,

    /// Current world scroll speed (px/s, fixed-point). Monotonically
    /// non-decreasing, capped by config.
    pub scroll_speed: Fixed,

    /// Current shared spawn delay (ms). Monotonically non-increasing,
    /// floored by config.
    pub spawn_delay_ms: u32,

    /// Run score.
    pub score: u32,

    /// Combo and pickup-counter state.
    pub combo: ComboState,

    /// Power-up modifier state.
    pub powerup: PowerUpState,

    /// Coin pool.
    pub coins: Pool,

    /// Ground hazard pool.
    pub ground_hazards: Pool,

    /// Flying hazard pool.
    pub flying_hazards: Pool,

    /// Pit pool.
    pub pits: Pool,

    /// Coin spawn cadence.
    pub coin_timer: Countdown,

    /// Hazard spawn cadence (category chosen per fire).
    pub hazard_timer: Countdown,

    /// Pit spawn cadence.
    pub pit_timer: Countdown,

    /// Deterministic RNG; all run randomness flows through here.
    pub rng: DeterministicRng,

    /// Events generated this tick (drained each tick).
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl RunState {
    /// Create run state at its start-of-run defaults.
    pub fn new(config: &RunConfig, seed: u64) -> Self {
        let delay = config.base_spawn_delay_ms;
        Self {
            elapsed_ms: 0,
            phase: RunPhase::Running,
            end_cause: None,
            scroll_speed: px(config.base_scroll_speed_px_s),
            spawn_delay_ms: delay,
            score: 0,
            combo: ComboState::new(),
            powerup: PowerUpState::inactive(),
            coins: Pool::new(EntityKind::Coin, config.coin_pool),
            ground_hazards: Pool::new(EntityKind::GroundHazard, config.ground_hazard_pool),
            flying_hazards: Pool::new(EntityKind::FlyingHazard, config.flying_hazard_pool),
            pits: Pool::new(EntityKind::Pit, config.pit_pool),
            coin_timer: Countdown::repeating(coin_cadence_ms(delay, config)),
            hazard_timer: Countdown::repeating(hazard_cadence_ms(delay, config)),
            pit_timer: Countdown::repeating(pit_cadence_ms(delay, config)),
            rng: DeterministicRng::new(seed),
            pending_events: Vec::new(),
        }
    }

    /// Whether the run has ended.
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, RunPhase::GameOver)
    }

    /// Cancel every pending timer. Called on game-over so nothing fires
    /// between the end of a run and the next restart.
    pub fn cancel_all_timers(&mut self) {
        self.coin_timer.cancel();
        self.hazard_timer.cancel();
        self.pit_timer.cancel();
        self.combo.cancel_timers();
        self.powerup.clear();
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
