//! Tick Orchestration
//!
//! One entry point advances the whole simulation by one frame, in a fixed
//! order so every subsystem sees a consistent world:
//!
//!   movement -> collisions -> power-up/combo timers -> difficulty ramp
//!   -> entity motion -> despawn sweep -> spawn timers
//!
//! A terminal outcome (hazard hit, pit fall, kill plane) short-circuits
//! the rest of the tick: the world freezes exactly as it was at the
//! moment of death.
//!
//! [`Session`] wraps the per-run state with what outlives a run: the high
//! score, the character scale, and the seed schedule for restarts.

use tracing::{debug, info};

use crate::core::rng::derive_run_seed;
use crate::core::vec2::FixedVec2;
use crate::game::collision;
use crate::game::config::RunConfig;
use crate::game::events::GameEvent;
use crate::game::input::InputFrame;
use crate::game::movement::update_movement;
use crate::game::spawn;
use crate::game::state::{Character, EndCause, RunPhase, RunState};

/// What one tick produced.
#[derive(Clone, Debug, Default)]
pub struct TickResult {
    /// Events generated this tick, in occurrence order.
    pub events: Vec<GameEvent>,
    /// The run ended during this tick.
    pub run_ended: bool,
}

/// Advance the simulation by one frame.
///
/// `delta_ms` is wall-clock time since the previous tick; it is clamped
/// to the configured maximum so a frame hitch cannot tunnel the character
/// through a hazard or skip a grace window.
///
/// After game-over this is a no-op until the embedder restarts the run.
pub fn tick(
    run: &mut RunState,
    ch: &mut Character,
    input: InputFrame,
    delta_ms: u32,
    config: &RunConfig,
) -> TickResult {
    if run.is_game_over() {
        return TickResult::default();
    }

    let delta_ms = delta_ms.min(config.max_delta_ms);
    run.elapsed_ms += delta_ms;

    // The ground plane is solid everywhere; pits are sensors resolved by
    // collision, not holes in the physics floor.
    let moved = update_movement(ch, input, true, delta_ms, config);
    if moved.landed {
        run.push_event(GameEvent::Landed { pos: feet(ch) });
    }
    if let Some(kind) = moved.jumped {
        run.push_event(GameEvent::Jumped { kind, pos: feet(ch) });
    }
    if moved.fast_fell {
        run.push_event(GameEvent::FastFallStarted);
    }
    if moved.fell_off_world {
        return end_run(run, EndCause::FellOffWorld);
    }

    let contacts = collision::detect(run, ch);

    for slot in contacts.coins {
        run.coins.despawn(slot);
        let pickup = run.combo.on_pickup(run.elapsed_ms, config);
        run.score += pickup.points;
        run.push_event(GameEvent::CoinCollected {
            slot,
            points: pickup.points,
            combo: pickup.combo,
            multiplier: pickup.multiplier,
            score: run.score,
        });

        if pickup.powerup_due {
            if let Some(kind) = run.powerup.try_activate(&mut run.rng, config) {
                run.combo.confirm_powerup();
                run.push_event(GameEvent::PowerUpActivated { kind });
            } else {
                debug!("power-up trigger ignored, one already active");
            }
        }
    }

    if let Some(contact) = contacts.hazard {
        if run.powerup.absorb_hit() {
            match contact.kind {
                crate::game::entity::EntityKind::GroundHazard => {
                    run.ground_hazards.despawn(contact.slot)
                }
                _ => run.flying_hazards.despawn(contact.slot),
            }
            run.push_event(GameEvent::ShieldAbsorbed);
        } else {
            return end_run(run, EndCause::HazardHit);
        }
    }

    if contacts.pit_fall {
        return end_run(run, EndCause::PitFall);
    }

    if let Some(kind) = run.powerup.tick(delta_ms, config) {
        run.push_event(GameEvent::PowerUpExpired { kind });
    }
    if run.combo.tick(delta_ms) {
        run.push_event(GameEvent::ComboExpired);
    }

    spawn::update_difficulty(run, config);
    let scroll_multiplier = run.powerup.scroll_multiplier(config);
    spawn::advance_entities(run, scroll_multiplier, delta_ms, config);
    spawn::despawn_passed(run);
    spawn::run_spawn_timers(run, delta_ms, config);

    TickResult {
        events: run.take_events(),
        run_ended: false,
    }
}

/// Freeze the run: record the cause, cancel every timer, drain events.
fn end_run(run: &mut RunState, cause: EndCause) -> TickResult {
    run.phase = RunPhase::GameOver;
    run.end_cause = Some(cause);
    run.cancel_all_timers();
    info!(?cause, score = run.score, elapsed_ms = run.elapsed_ms, "run ended");

    TickResult {
        events: run.take_events(),
        run_ended: true,
    }
}

#[inline]
fn feet(ch: &Character) -> FixedVec2 {
    FixedVec2::new(ch.x, ch.y)
}

// =============================================================================
// SESSION
// =============================================================================

/// A sequence of runs sharing a high score and a seed schedule.
///
/// Each run gets its own seed derived from the session seed and the run
/// index, so restarting produces a fresh but still reproducible layout.
pub struct Session {
    config: RunConfig,
    base_seed: u64,
    run_index: u32,
    high_score: u32,
    character_scale_pct: u32,
    /// Live run state.
    pub run: RunState,
    /// Live character.
    pub character: Character,
}

impl Session {
    /// Start a session with run 0 live.
    pub fn new(config: RunConfig, base_seed: u64) -> Self {
        let run = RunState::new(&config, derive_run_seed(base_seed, 0));
        let character = Character::new(&config, 100);
        Self {
            config,
            base_seed,
            run_index: 0,
            high_score: 0,
            character_scale_pct: 100,
            run,
            character,
        }
    }

    /// Advance the session by one frame.
    ///
    /// During a run this is [`tick`] plus high-score upkeep. After
    /// game-over, a jump press restarts; anything else is ignored, so the
    /// frozen final frame stays available to render.
    pub fn update(&mut self, input: InputFrame, delta_ms: u32) -> Vec<GameEvent> {
        if self.run.is_game_over() {
            if input.jump_pressed() {
                self.restart();
                return vec![GameEvent::RunRestarted { run_index: self.run_index }];
            }
            return Vec::new();
        }

        let result = tick(&mut self.run, &mut self.character, input, delta_ms, &self.config);
        let mut events = result.events;

        if result.run_ended {
            let new_record = self.run.score > self.high_score;
            if new_record {
                self.high_score = self.run.score;
            }
            events.push(GameEvent::RunEnded {
                cause: self.run.end_cause.unwrap_or(EndCause::HazardHit),
                score: self.run.score,
                high_score: self.high_score,
                new_record,
            });
        }

        events
    }

    /// Throw away the current run and start the next one.
    pub fn restart(&mut self) {
        self.run_index += 1;
        let seed = derive_run_seed(self.base_seed, self.run_index);
        self.run = RunState::new(&self.config, seed);
        self.character = Character::new(&self.config, self.character_scale_pct);
        info!(run_index = self.run_index, "run restarted");
    }

    /// Set the character's visual scale (100 = native). Rescales the
    /// hitbox immediately and persists across restarts.
    pub fn set_character_scale_pct(&mut self, scale_pct: u32) {
        self.character_scale_pct = scale_pct;
        let fresh = Character::new(&self.config, scale_pct);
        self.character.width = fresh.width;
        self.character.height = fresh.height;
    }

    /// Best score across every run this session.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Zero-based index of the live run.
    pub fn run_index(&self) -> u32 {
        self.run_index
    }

    /// Tuning in effect for this session.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }
}

/// Re-simulate a run from a seed and an input script.
///
/// Every frame is `(input, delta_ms)`. Two replays of the same script
/// against the same config and seed produce bit-identical final state -
/// the determinism contract the whole crate is built around.
pub fn replay_run(
    config: &RunConfig,
    seed: u64,
    script: &[(InputFrame, u32)],
) -> (RunState, Character) {
    let mut run = RunState::new(config, seed);
    let mut ch = Character::new(config, 100);
    for &(input, delta_ms) in script {
        tick(&mut run, &mut ch, input, delta_ms, config);
    }
    (run, ch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::px;
    use crate::game::entity::EntityKind;
    use crate::game::powerup::PowerUpKind;

    fn setup() -> (RunState, Character, RunConfig) {
        let config = RunConfig::default();
        let run = RunState::new(&config, 42);
        let ch = Character::new(&config, 100);
        (run, ch, config)
    }

    fn place_coin(run: &mut RunState, ch: &Character, config: &RunConfig) -> usize {
        run.coins
            .spawn(
                FixedVec2::new(ch.x, px(10)),
                px(config.coin_width_px),
                px(config.coin_height_px),
            )
            .expect("coin pool full")
    }

    fn place_ground_hazard(run: &mut RunState, ch: &Character, config: &RunConfig) {
        run.ground_hazards
            .spawn(
                FixedVec2::new(ch.x, 0),
                px(config.ground_hazard_width_px),
                px(config.ground_hazard_height_px),
            )
            .expect("hazard pool full");
    }

    #[test]
    fn test_clock_advances_and_clamps() {
        let (mut run, mut ch, config) = setup();

        tick(&mut run, &mut ch, InputFrame::new(), 16, &config);
        assert_eq!(run.elapsed_ms, 16);

        // A 500 ms hitch only advances by the clamp
        tick(&mut run, &mut ch, InputFrame::new(), 500, &config);
        assert_eq!(run.elapsed_ms, 16 + config.max_delta_ms);
    }

    #[test]
    fn test_coin_pickup_awards_and_despawns() {
        let (mut run, mut ch, config) = setup();
        let slot = place_coin(&mut run, &ch, &config);

        let result = tick(&mut run, &mut ch, InputFrame::new(), 16, &config);
        assert_eq!(run.score, config.coin_base_value);
        assert_eq!(run.coins.active_count(), 0);
        assert!(result.events.iter().any(|e| matches!(
            e,
            GameEvent::CoinCollected { slot: s, points, .. }
                if *s == slot && *points == config.coin_base_value
        )));
    }

    #[test]
    fn test_hazard_hit_ends_run_once() {
        let (mut run, mut ch, config) = setup();
        place_ground_hazard(&mut run, &ch, &config);

        let result = tick(&mut run, &mut ch, InputFrame::new(), 16, &config);
        assert!(result.run_ended);
        assert_eq!(run.end_cause, Some(EndCause::HazardHit));
        assert!(run.is_game_over());
        assert!(!run.coin_timer.is_running());

        // Frozen: further ticks are no-ops
        let elapsed = run.elapsed_ms;
        let result = tick(&mut run, &mut ch, InputFrame::jump(), 16, &config);
        assert!(!result.run_ended);
        assert!(result.events.is_empty());
        assert_eq!(run.elapsed_ms, elapsed);
    }

    #[test]
    fn test_pit_fall_ends_run() {
        let (mut run, mut ch, config) = setup();
        run.pits
            .spawn(
                FixedVec2::new(ch.x, -px(config.pit_depth_px)),
                px(config.pit_width_px),
                px(config.pit_depth_px + config.pit_lip_px),
            )
            .unwrap();

        let result = tick(&mut run, &mut ch, InputFrame::new(), 16, &config);
        assert!(result.run_ended);
        assert_eq!(run.end_cause, Some(EndCause::PitFall));
    }

    #[test]
    fn test_jump_clears_pit() {
        let (mut run, mut ch, config) = setup();
        run.pits
            .spawn(
                FixedVec2::new(ch.x, -px(config.pit_depth_px)),
                px(config.pit_width_px),
                px(config.pit_depth_px + config.pit_lip_px),
            )
            .unwrap();

        // Jumping on the same tick the pit arrives underfoot: the jump
        // resolves first, so the overlap is airborne and harmless
        let result = tick(&mut run, &mut ch, InputFrame::jump(), 16, &config);
        assert!(!result.run_ended);
        assert!(!ch.grounded);
    }

    #[test]
    fn test_shield_absorbs_hazard() {
        let (mut run, mut ch, config) = setup();

        // Force a shield
        loop {
            run.powerup.clear();
            if run.powerup.try_activate(&mut run.rng, &config) == Some(PowerUpKind::Shield) {
                break;
            }
        }
        place_ground_hazard(&mut run, &ch, &config);

        let result = tick(&mut run, &mut ch, InputFrame::new(), 16, &config);
        assert!(!result.run_ended);
        assert!(!run.powerup.is_active());
        assert_eq!(run.ground_hazards.active_count(), 0);
        assert!(result.events.iter().any(|e| matches!(e, GameEvent::ShieldAbsorbed)));

        // Next hit lands
        place_ground_hazard(&mut run, &ch, &config);
        let result = tick(&mut run, &mut ch, InputFrame::new(), 16, &config);
        assert!(result.run_ended);
    }

    #[test]
    fn test_powerup_triggers_on_threshold_pickup() {
        let (mut run, mut ch, config) = setup();

        let mut activated = false;
        for _ in 0..config.pickups_per_powerup {
            place_coin(&mut run, &ch, &config);
            let result = tick(&mut run, &mut ch, InputFrame::new(), 10, &config);
            activated |= result
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::PowerUpActivated { .. }));
        }

        assert!(activated);
        assert!(run.powerup.is_active());
        // Counter reset on the successful trigger
        assert_eq!(run.combo.pickups_toward_powerup, 0);
    }

    #[test]
    fn test_spawned_entities_eventually_despawn() {
        let (mut run, mut ch, config) = setup();
        ch.x = px(-500); // out of everything's way

        let mut saw_spawn = false;
        for _ in 0..4000 {
            let result = tick(&mut run, &mut ch, InputFrame::new(), 16, &config);
            saw_spawn |= result
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EntitySpawned { kind: EntityKind::Coin, .. }));
        }

        assert!(saw_spawn);
        // Pools are bounded and recycled, never wedged full
        assert!(run.coins.active_count() < run.coins.capacity());
    }

    #[test]
    fn test_session_restart_on_jump() {
        let config = RunConfig::default();
        let mut session = Session::new(config.clone(), 99);

        place_ground_hazard(&mut session.run, &session.character, &config);
        let events = session.update(InputFrame::new(), 16);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::RunEnded { cause: EndCause::HazardHit, .. }
        )));

        // Non-jump input while frozen: nothing happens
        assert!(session.update(InputFrame::fast_fall(), 16).is_empty());
        assert!(session.run.is_game_over());

        // Jump restarts
        let events = session.update(InputFrame::jump(), 16);
        assert!(matches!(events[..], [GameEvent::RunRestarted { run_index: 1 }]));
        assert!(!session.run.is_game_over());
        assert_eq!(session.run.score, 0);
        assert_eq!(session.run.elapsed_ms, 0);
    }

    #[test]
    fn test_session_high_score_persists() {
        let config = RunConfig::default();
        let mut session = Session::new(config.clone(), 7);

        // Score once, then die
        place_coin(&mut session.run, &session.character, &config);
        session.update(InputFrame::new(), 16);
        let score = session.run.score;
        assert!(score > 0);

        place_ground_hazard(&mut session.run, &session.character, &config);
        let events = session.update(InputFrame::new(), 16);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::RunEnded { new_record: true, high_score, .. } if *high_score == score
        )));

        session.update(InputFrame::jump(), 16);
        assert_eq!(session.high_score(), score);

        // A worse second run is not a record
        place_ground_hazard(&mut session.run, &session.character, &config);
        let events = session.update(InputFrame::new(), 16);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::RunEnded { new_record: false, high_score, .. } if *high_score == score
        )));
    }

    #[test]
    fn test_session_runs_get_distinct_seeds() {
        let config = RunConfig::default();
        let mut session = Session::new(config.clone(), 1234);
        let first_state = session.run.rng.state();

        place_ground_hazard(&mut session.run, &session.character, &config);
        session.update(InputFrame::new(), 16);
        session.update(InputFrame::jump(), 16);

        assert_ne!(session.run.rng.state(), first_state);
    }

    #[test]
    fn test_character_scale_survives_restart() {
        let config = RunConfig::default();
        let mut session = Session::new(config.clone(), 5);

        session.set_character_scale_pct(150);
        let scaled_width = session.character.width;
        assert!(scaled_width > px(config.character_width_px));

        place_ground_hazard(&mut session.run, &session.character, &config);
        session.update(InputFrame::new(), 16);
        session.update(InputFrame::jump(), 16);

        assert_eq!(session.character.width, scaled_width);
    }

    #[test]
    fn test_replay_is_bit_identical() {
        let config = RunConfig::default();

        // A script with enough variety to touch most subsystems
        let mut script = Vec::new();
        for frame in 0u32..2000 {
            let input = match frame % 97 {
                0 => InputFrame::jump(),
                13 => InputFrame::fast_fall(),
                _ => InputFrame::new(),
            };
            script.push((input, 16 + (frame % 3)));
        }

        let (run_a, ch_a) = replay_run(&config, 0xDEAD_BEEF, &script);
        let (run_b, ch_b) = replay_run(&config, 0xDEAD_BEEF, &script);

        let a = serde_json::to_string(&(&run_a, &ch_a)).unwrap();
        let b = serde_json::to_string(&(&run_b, &ch_b)).unwrap();
        assert_eq!(a, b);

        // A different seed diverges
        let (run_c, _) = replay_run(&config, 0xDEAD_BEF0, &script);
        assert_ne!(run_c.rng.state(), run_a.rng.state());
    }
}
