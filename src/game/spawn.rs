//! Spawner & Difficulty Ramp
//!
//! Procedurally creates coins, hazards, and pit gaps on independent timers
//! whose cadence tightens as the run goes on, and owns world-entity motion:
//! leftward scroll, bob/hover offsets, and the despawn sweep at the
//! camera edge.
//!
//! All cadences derive from a single shared spawn delay that shrinks
//! linearly toward a floor; scroll speed grows linearly toward a ceiling.
//! Both are recomputed from elapsed run time each tick, so they are
//! monotone by construction no matter how frame deltas arrive.

use crate::core::fixed::{
    Fixed, GROUND_Y, WORLD_WIDTH,
    dt_from_ms, fixed_mul, px, triangle_wave,
};
use crate::core::vec2::FixedVec2;
use crate::game::config::RunConfig;
use crate::game::entity::EntityKind;
use crate::game::events::GameEvent;
use crate::game::state::RunState;

/// Coin cadence: a touch slower than the shared delay.
pub fn coin_cadence_ms(spawn_delay_ms: u32, config: &RunConfig) -> u32 {
    spawn_delay_ms * config.coin_cadence_pct / 100
}

/// Hazard cadence: the shared delay itself.
pub fn hazard_cadence_ms(spawn_delay_ms: u32, _config: &RunConfig) -> u32 {
    spawn_delay_ms
}

/// Pit cadence: twice the shared delay, but never tighter than 2.5x the
/// delay floor. Pits stay deliberately rare even at full ramp.
pub fn pit_cadence_ms(spawn_delay_ms: u32, config: &RunConfig) -> u32 {
    let scaled = spawn_delay_ms * config.pit_cadence_pct / 100;
    let floor = config.min_spawn_delay_ms * config.pit_floor_pct / 100;
    scaled.max(floor)
}

/// Recompute scroll speed and the shared spawn delay from elapsed run
/// time, then retune the spawn timers.
///
/// Linear in `elapsed_ms`, clamped at the configured ceiling/floor - never
/// decreasing speed, never increasing delay.
pub fn update_difficulty(run: &mut RunState, config: &RunConfig) {
    let elapsed = run.elapsed_ms as i64;

    let base = px(config.base_scroll_speed_px_s) as i64;
    let max = px(config.max_scroll_speed_px_s) as i64;
    let gain = px(config.scroll_ramp_px_s_per_s) as i64 * elapsed / 1000;
    run.scroll_speed = base.saturating_add(gain).min(max) as Fixed;

    let shed = config.spawn_delay_ramp_ms_per_s as u64 * run.elapsed_ms as u64 / 1000;
    run.spawn_delay_ms = (config.base_spawn_delay_ms as u64)
        .saturating_sub(shed)
        .max(config.min_spawn_delay_ms as u64) as u32;

    run.coin_timer.set_period(coin_cadence_ms(run.spawn_delay_ms, config));
    run.hazard_timer.set_period(hazard_cadence_ms(run.spawn_delay_ms, config));
    run.pit_timer.set_period(pit_cadence_ms(run.spawn_delay_ms, config));
}

/// Translate every live entity leftward and advance bob/hover phases.
///
/// `scroll_multiplier` is 1.0 normally and the boost factor while the
/// speed power-up is live.
pub fn advance_entities(run: &mut RunState, scroll_multiplier: Fixed, delta_ms: u32, config: &RunConfig) {
    let dt = dt_from_ms(delta_ms);
    let dx = fixed_mul(fixed_mul(run.scroll_speed, scroll_multiplier), dt);

    for (_, coin) in run.coins.iter_active_mut() {
        coin.pos.x -= dx;
        coin.wave_ms = coin.wave_ms.wrapping_add(delta_ms);
        let offset = fixed_mul(
            px(config.coin_bob_amplitude_px),
            triangle_wave(coin.wave_ms, config.coin_bob_period_ms),
        );
        coin.pos.y = coin.base_y + offset;
    }

    for (_, hazard) in run.ground_hazards.iter_active_mut() {
        hazard.pos.x -= dx;
    }

    for (_, hazard) in run.flying_hazards.iter_active_mut() {
        hazard.pos.x -= dx;
        hazard.wave_ms = hazard.wave_ms.wrapping_add(delta_ms);
        let offset = fixed_mul(
            px(config.hover_amplitude_px),
            triangle_wave(hazard.wave_ms, config.hover_period_ms),
        );
        hazard.pos.y = hazard.base_y + offset;
    }

    for (_, pit) in run.pits.iter_active_mut() {
        pit.pos.x -= dx;
    }
}

/// Return every entity whose trailing edge has crossed the camera edge
/// (world x = 0) to its pool.
pub fn despawn_passed(run: &mut RunState) {
    for pool in [
        &mut run.coins,
        &mut run.ground_hazards,
        &mut run.flying_hazards,
        &mut run.pits,
    ] {
        let passed: Vec<usize> = pool
            .iter_active()
            .filter(|(_, e)| e.trailing_edge() < 0)
            .map(|(slot, _)| slot)
            .collect();
        for slot in passed {
            pool.despawn(slot);
        }
    }
}

/// Advance the three spawn timers and spawn whatever came due.
pub fn run_spawn_timers(run: &mut RunState, delta_ms: u32, config: &RunConfig) {
    if run.coin_timer.tick(delta_ms) {
        spawn_coin(run, config);
    }
    if run.hazard_timer.tick(delta_ms) {
        spawn_hazard(run, config);
    }
    if run.pit_timer.tick(delta_ms) {
        spawn_pit(run, config);
    }
}

/// X coordinate where entities enter the world.
fn spawn_x(config: &RunConfig) -> Fixed {
    WORLD_WIDTH + px(config.spawn_margin_px)
}

fn spawn_coin(run: &mut RunState, config: &RunConfig) {
    let pos = FixedVec2::new(spawn_x(config), px(config.coin_base_y_px));
    if let Some(slot) = run.coins.spawn(pos, px(config.coin_width_px), px(config.coin_height_px)) {
        run.push_event(GameEvent::EntitySpawned { kind: EntityKind::Coin, slot });
    }
}

/// Spawn a hazard, picking the category by configured weight.
fn spawn_hazard(run: &mut RunState, config: &RunConfig) {
    if run.rng.roll_pct(config.ground_hazard_pct) {
        let pos = FixedVec2::new(spawn_x(config), GROUND_Y);
        if let Some(slot) = run.ground_hazards.spawn(
            pos,
            px(config.ground_hazard_width_px),
            px(config.ground_hazard_height_px),
        ) {
            run.push_event(GameEvent::EntitySpawned { kind: EntityKind::GroundHazard, slot });
        }
    } else {
        let pos = FixedVec2::new(spawn_x(config), px(config.flying_hazard_base_y_px));
        if let Some(slot) = run.flying_hazards.spawn(
            pos,
            px(config.flying_hazard_width_px),
            px(config.flying_hazard_height_px),
        ) {
            run.push_event(GameEvent::EntitySpawned { kind: EntityKind::FlyingHazard, slot });
        }
    }
}

/// Spawn a pit gap. The sensor reaches `pit_lip_px` above the ground line
/// so a grounded character overlaps it while an airborne one clears it.
fn spawn_pit(run: &mut RunState, config: &RunConfig) {
    let pos = FixedVec2::new(spawn_x(config), GROUND_Y - px(config.pit_depth_px));
    if let Some(slot) = run.pits.spawn(
        pos,
        px(config.pit_width_px),
        px(config.pit_depth_px + config.pit_lip_px),
    ) {
        run.push_event(GameEvent::EntitySpawned { kind: EntityKind::Pit, slot });
    }
}
