//! World Entities and Pools
//!
//! Coins, hazards, and pits live in fixed-capacity pools, one per category:
//! an arena indexed by slot with an active flag, so a long run never
//! allocates per spawn. Spawning finds an inactive slot; despawning flips
//! the flag and the slot is reused.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::fixed::Fixed;
use crate::core::vec2::FixedVec2;

/// Category of a world entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EntityKind {
    /// Collectible, feeds the combo engine.
    Coin = 0,
    /// Hazard at ground level, jumped over.
    GroundHazard = 1,
    /// Hazard hovering above ground, ducked under or jumped past.
    FlyingHazard = 2,
    /// Gap in the ground; fatal only to a grounded character.
    Pit = 3,
}

/// One pooled world entity.
///
/// `pos` is the bottom-left corner of the hitbox. `base_y` is the spawn
/// height the bob/hover offset oscillates around; for categories that do
/// not oscillate it simply equals the spawn `y`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Entity {
    /// Bottom-left corner of the hitbox.
    pub pos: FixedVec2,
    /// Hitbox width.
    pub width: Fixed,
    /// Hitbox height.
    pub height: Fixed,
    /// Whether this slot is live in the world.
    pub active: bool,
    /// Vertical center of the bob/hover oscillation.
    pub base_y: Fixed,
    /// Oscillation phase in elapsed milliseconds.
    pub wave_ms: u32,
}

impl Entity {
    const INACTIVE: Self = Self {
        pos: FixedVec2::ZERO,
        width: 0,
        height: 0,
        active: false,
        base_y: 0,
        wave_ms: 0,
    };

    /// Right edge of the hitbox - the trailing edge of a left-moving entity.
    #[inline]
    pub fn trailing_edge(&self) -> Fixed {
        self.pos.x.wrapping_add(self.width)
    }
}

/// Fixed-capacity entity pool for one category.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pool {
    kind: EntityKind,
    slots: Vec<Entity>,
}

impl Pool {
    /// Create an empty pool. Capacity is allocated once, up front.
    pub fn new(kind: EntityKind, capacity: usize) -> Self {
        Self {
            kind,
            slots: vec![Entity::INACTIVE; capacity],
        }
    }

    /// Category this pool holds.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Activate an inactive slot with the given geometry.
    ///
    /// Returns the slot index, or `None` when every slot is live - the
    /// spawn is skipped rather than growing the pool (bounded reuse).
    pub fn spawn(&mut self, pos: FixedVec2, width: Fixed, height: Fixed) -> Option<usize> {
        let slot = self.slots.iter().position(|e| !e.active);
        match slot {
            Some(i) => {
                self.slots[i] = Entity {
                    pos,
                    width,
                    height,
                    active: true,
                    base_y: pos.y,
                    wave_ms: 0,
                };
                Some(i)
            }
            None => {
                debug!(kind = ?self.kind, "entity pool exhausted, skipping spawn");
                None
            }
        }
    }

    /// Return a slot to the pool. A stale index or already-inactive slot
    /// is a no-op.
    pub fn despawn(&mut self, slot: usize) {
        if let Some(entity) = self.slots.get_mut(slot) {
            entity.active = false;
        }
    }

    /// Deactivate every slot (run reset).
    pub fn clear(&mut self) {
        for entity in &mut self.slots {
            entity.active = false;
        }
    }

    /// Get an entity by slot, active or not.
    pub fn get(&self, slot: usize) -> Option<&Entity> {
        self.slots.get(slot)
    }

    /// Get an entity mutably by slot.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Entity> {
        self.slots.get_mut(slot)
    }

    /// Iterate live entities with their slot indices.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.slots.iter().enumerate().filter(|(_, e)| e.active)
    }

    /// Iterate live entities mutably.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut Entity)> {
        self.slots.iter_mut().enumerate().filter(|(_, e)| e.active)
    }

    /// Number of live entities.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|e| e.active).count()
    }

    /// Total slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::px;

    fn pool() -> Pool {
        Pool::new(EntityKind::Coin, 3)
    }

    #[test]
    fn test_spawn_fills_slots() {
        let mut pool = pool();

        let a = pool.spawn(FixedVec2::new(px(100), px(50)), px(24), px(24));
        let b = pool.spawn(FixedVec2::new(px(200), px(50)), px(24), px(24));
        assert_eq!(a, Some(0));
        assert_eq!(b, Some(1));
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_exhausted_pool_skips() {
        let mut pool = pool();
        for i in 0..3 {
            assert!(pool.spawn(FixedVec2::new(px(i), 0), px(24), px(24)).is_some());
        }
        assert_eq!(pool.spawn(FixedVec2::ZERO, px(24), px(24)), None);
        assert_eq!(pool.capacity(), 3);
    }

    #[test]
    fn test_despawn_allows_reuse() {
        let mut pool = pool();
        for i in 0..3 {
            pool.spawn(FixedVec2::new(px(i), 0), px(24), px(24));
        }

        pool.despawn(1);
        assert_eq!(pool.active_count(), 2);

        // Freed slot is reused
        assert_eq!(pool.spawn(FixedVec2::new(px(9), 0), px(24), px(24)), Some(1));
    }

    #[test]
    fn test_stale_despawn_is_noop() {
        let mut pool = pool();
        pool.spawn(FixedVec2::ZERO, px(24), px(24));

        pool.despawn(0);
        pool.despawn(0); // already inactive
        pool.despawn(99); // out of range
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_trailing_edge() {
        let entity = Entity {
            pos: FixedVec2::new(px(-30), 0),
            width: px(24),
            height: px(24),
            active: true,
            base_y: 0,
            wave_ms: 0,
        };
        assert_eq!(entity.trailing_edge(), px(-6));
    }

    #[test]
    fn test_clear() {
        let mut pool = pool();
        pool.spawn(FixedVec2::ZERO, px(24), px(24));
        pool.spawn(FixedVec2::ZERO, px(24), px(24));

        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert!(pool.iter_active().next().is_none());
    }
}
