//! Movement Controller
//!
//! Resolves the character's vertical state each tick from buffered input
//! and ground contact. Owns every vertical velocity decision: ground jump,
//! double jump, fast-fall, gravity integration, and the coyote/jump-buffer
//! grace windows.
//!
//! Coyote time and jump buffering absorb input/frame timing jitter: a jump
//! pressed a few milliseconds after leaving the ground, or a few before
//! landing, still executes instead of being silently dropped.

use serde::{Serialize, Deserialize};

use crate::core::fixed::{GROUND_Y, WORLD_BOTTOM, WORLD_HEIGHT, dt_from_ms, fixed_mul, px};
use crate::game::config::RunConfig;
use crate::game::input::InputFrame;
use crate::game::state::{AnimState, Character};

/// Which jump was executed this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    /// Full-strength jump from the ground (or via coyote/buffer grace).
    Ground,
    /// Weaker airborne jump, once per airborne period.
    Double,
}

/// What the movement controller did this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementOutcome {
    /// Airborne-to-grounded transition happened.
    pub landed: bool,
    /// A jump executed (at most one per tick).
    pub jumped: Option<JumpKind>,
    /// Fast-fall engaged this tick.
    pub fast_fell: bool,
    /// Character dropped below the kill plane - terminal.
    pub fell_off_world: bool,
}

/// Advance the character's vertical state by one tick.
///
/// `ground_contact` is the physics capability's ground-contact boolean: it
/// reports whether there is ground under the feet right now. Losing it
/// without jumping arms the coyote window; landing requires it.
///
/// Rule priority (deliberate, affects feel):
/// 1. Landing consumes a pending buffered jump immediately.
/// 2. Jump pressed: ground/coyote jump, else double jump, else arm buffer.
/// 3. Windows decay by delta and expire silently.
/// 4. Fast-fall only when no jump input this tick and no buffer pending.
/// 5. Soft ceiling clamp; the kill plane below is terminal.
pub fn update_movement(
    ch: &mut Character,
    input: InputFrame,
    ground_contact: bool,
    delta_ms: u32,
    config: &RunConfig,
) -> MovementOutcome {
    let mut out = MovementOutcome::default();
    let dt = dt_from_ms(delta_ms);

    // Grace windows decay first; expiry just forfeits the grace.
    ch.coyote_ms_left = ch.coyote_ms_left.saturating_sub(delta_ms);
    ch.buffer_ms_left = ch.buffer_ms_left.saturating_sub(delta_ms);

    // Ground dropped away without a jump: start falling, arm coyote.
    if ch.grounded && !ground_contact {
        ch.grounded = false;
        ch.coyote_ms_left = config.coyote_ms;
    }

    if !ch.grounded {
        // Gravity integration.
        ch.vy -= fixed_mul(px(config.gravity_px_s2), dt);
        ch.y += fixed_mul(ch.vy, dt);

        // Soft ceiling: clamp and kill upward velocity.
        let top_limit = WORLD_HEIGHT - ch.height;
        if ch.y > top_limit {
            ch.y = top_limit;
            ch.vy = 0;
        }

        if ch.vy <= 0 && ch.y <= GROUND_Y && ground_contact {
            // Landing transition.
            ch.y = GROUND_Y;
            ch.vy = 0;
            ch.grounded = true;
            ch.air_jump_used = false;
            ch.fast_falling = false;
            ch.anim = AnimState::Running;
            out.landed = true;

            // A jump buffered just before landing executes now, exactly once.
            if ch.buffer_ms_left > 0 {
                ground_jump(ch, config);
                out.jumped = Some(JumpKind::Ground);
            }
        } else if ch.y <= WORLD_BOTTOM {
            out.fell_off_world = true;
            return out;
        }
    }

    if input.jump_pressed() {
        if ch.grounded || ch.coyote_ms_left > 0 {
            ground_jump(ch, config);
            out.jumped = Some(JumpKind::Ground);
        } else if !ch.air_jump_used {
            double_jump(ch, config);
            out.jumped = Some(JumpKind::Double);
        } else {
            // Out of jumps: remember the press so it lands with us.
            ch.buffer_ms_left = config.jump_buffer_ms;
        }
    } else if ch.buffer_ms_left == 0 && input.fast_fall_pressed() && !ch.grounded {
        // Jump input has unconditional priority while a buffer is pending.
        ch.vy = -px(config.fast_fall_speed_px_s);
        ch.fast_falling = true;
        ch.anim = AnimState::FastFalling;
        out.fast_fell = true;
    }

    out
}

/// Execute a full-strength ground jump, consuming all grace state.
fn ground_jump(ch: &mut Character, config: &RunConfig) {
    ch.vy = px(config.ground_jump_speed_px_s);
    ch.grounded = false;
    ch.fast_falling = false;
    ch.coyote_ms_left = 0;
    ch.buffer_ms_left = 0;
    ch.anim = AnimState::Jumping;
}

/// Execute the weaker airborne jump and mark it spent.
fn double_jump(ch: &mut Character, config: &RunConfig) {
    ch.vy = px(config.double_jump_speed_px_s);
    ch.air_jump_used = true;
    ch.fast_falling = false;
    ch.anim = AnimState::DoubleJumping;
}
