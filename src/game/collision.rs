//! Collision Detection
//!
//! Axis-aligned box tests between the character and every live world
//! entity, run once per tick after movement. Detection only reports what
//! overlaps; `tick` decides what the overlaps mean (award, absorb, end
//! the run).

use crate::core::fixed::{Fixed, GROUND_Y};
use crate::game::entity::EntityKind;
use crate::game::state::{Character, RunState};

/// Everything the character touched this tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Slots of coins overlapped this tick, in slot order.
    pub coins: Vec<usize>,
    /// First hazard overlapped, if any.
    pub hazard: Option<HazardContact>,
    /// The character is standing on a pit gap.
    pub pit_fall: bool,
}

/// One hazard contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HazardContact {
    /// Hazard category.
    pub kind: EntityKind,
    /// Pool slot of the hazard.
    pub slot: usize,
}

/// Strict AABB overlap: boxes that merely share an edge do not collide.
#[inline]
pub fn aabb_overlap(
    ax: Fixed, ay: Fixed, aw: Fixed, ah: Fixed,
    bx: Fixed, by: Fixed, bw: Fixed, bh: Fixed,
) -> bool {
    ax < bx.wrapping_add(bw)
        && bx < ax.wrapping_add(aw)
        && ay < by.wrapping_add(bh)
        && by < ay.wrapping_add(ah)
}

/// Test the character against every live entity.
///
/// Hazards are scanned ground-first, lowest slot first; only the first
/// contact is reported since one hit ends the run (or eats the shield)
/// regardless of how many boxes overlap.
///
/// A pit only registers for a character standing at ground level inside
/// the gap. The pit sensor pokes a few pixels above the ground line, so a
/// grounded character overlaps it while any airborne crossing - even a
/// low one - passes clean over.
pub fn detect(run: &RunState, ch: &Character) -> CollisionReport {
    let mut report = CollisionReport::default();

    for (slot, coin) in run.coins.iter_active() {
        if overlaps_character(ch, coin.pos.x, coin.pos.y, coin.width, coin.height) {
            report.coins.push(slot);
        }
    }

    for pool in [&run.ground_hazards, &run.flying_hazards] {
        if report.hazard.is_some() {
            break;
        }
        for (slot, hazard) in pool.iter_active() {
            if overlaps_character(ch, hazard.pos.x, hazard.pos.y, hazard.width, hazard.height) {
                report.hazard = Some(HazardContact { kind: pool.kind(), slot });
                break;
            }
        }
    }

    if ch.grounded && ch.y <= GROUND_Y {
        for (_, pit) in run.pits.iter_active() {
            if overlaps_character(ch, pit.pos.x, pit.pos.y, pit.width, pit.height) {
                report.pit_fall = true;
                break;
            }
        }
    }

    report
}

#[inline]
fn overlaps_character(ch: &Character, x: Fixed, y: Fixed, w: Fixed, h: Fixed) -> bool {
    aabb_overlap(ch.x, ch.y, ch.width, ch.height, x, y, w, h)
}
