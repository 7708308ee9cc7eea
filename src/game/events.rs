//! Game Events
//!
//! Fire-and-forget notifications for the effects layer (sound, particles,
//! screen flash, UI). They never feed back into simulation state: the
//! embedder may drain them, render some, and drop the rest.

use serde::{Serialize, Deserialize};

use crate::core::vec2::FixedVec2;
use crate::game::entity::EntityKind;
use crate::game::movement::JumpKind;
use crate::game::powerup::PowerUpKind;
use crate::game::state::EndCause;

/// One simulation event, tagged with the run-time it occurred at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump executed (play sound, emit dust at the character's feet).
    Jumped {
        /// Ground or double jump.
        kind: JumpKind,
        /// Character feet position at takeoff.
        pos: FixedVec2,
    },

    /// Fast-fall engaged.
    FastFallStarted,

    /// Airborne-to-grounded transition (landing dust).
    Landed {
        /// Character feet position at touchdown.
        pos: FixedVec2,
    },

    /// A coin was collected.
    CoinCollected {
        /// Pool slot the coin occupied.
        slot: usize,
        /// Points awarded after the multiplier.
        points: u32,
        /// Combo count after this pickup.
        combo: u32,
        /// Multiplier tier applied.
        multiplier: u32,
        /// Run score after the award.
        score: u32,
    },

    /// The combo window lapsed; the multiplier display should clear.
    ComboExpired,

    /// A power-up activated.
    PowerUpActivated {
        /// Which modifier.
        kind: PowerUpKind,
    },

    /// A power-up's duration ran out.
    PowerUpExpired {
        /// Which modifier.
        kind: PowerUpKind,
    },

    /// The shield swallowed a hazard hit.
    ShieldAbsorbed,

    /// An entity entered the world at the trailing edge.
    EntitySpawned {
        /// Entity category.
        kind: EntityKind,
        /// Pool slot it occupies.
        slot: usize,
    },

    /// The run ended.
    RunEnded {
        /// What killed the run.
        cause: EndCause,
        /// Final score.
        score: u32,
        /// Session high score after this run.
        high_score: u32,
        /// This run set a new record.
        new_record: bool,
    },

    /// A restart request was accepted; a fresh run is live.
    RunRestarted {
        /// Zero-based index of the new run within the session.
        run_index: u32,
    },
}
