//! # Ember Dash
//!
//! Deterministic simulation core for a side-scrolling endless runner.
//! The character holds a fixed horizontal position while the world
//! scrolls past; the player controls only the vertical axis - jump,
//! double jump, fast-fall - and survives coins, hazards, and pit gaps
//! for as long as the ramping difficulty allows.
//!
//! The crate is the complete game logic with no rendering, audio, or
//! input backend: an embedder feeds [`game::InputFrame`]s and frame
//! deltas into a [`game::Session`] and draws whatever state and
//! [`game::GameEvent`]s come back.
//!
//! ## Architecture
//!
//! ```text
//!  +-----------------------------------------------------------+
//!  |                        Session                            |
//!  |   high score, seed schedule, restart handling             |
//!  +------------------------------+----------------------------+
//!                                 |
//!                            tick(run, ..)
//!                                 |
//!  +------------+  +-----------+  +---------+  +--------------+
//!  |  movement  |  | collision |  |  combo  |  |   power-up   |
//!  | jump/grace |  |   AABB    |  | scoring |  | speed/shield |
//!  +------------+  +-----------+  +---------+  +--------------+
//!  +-----------------------------------------------------------+
//!  |          spawn: difficulty ramp, pools, despawn           |
//!  +-----------------------------------------------------------+
//!  +-----------------------------------------------------------+
//!  |   core: Q16.16 fixed point, xorshift128+ RNG, vectors     |
//!  +-----------------------------------------------------------+
//! ```
//!
//! ## Determinism
//!
//! Every quantity is integer or Q16.16 fixed point, every random draw
//! flows through one seeded RNG, and entity pools iterate in slot order.
//! Replaying an input script against the same seed and config reproduces
//! a run bit for bit ([`game::replay_run`]); per-run seeds derive from
//! the session seed by hashing, so restarts are fresh but reproducible.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

pub use crate::core::{DeterministicRng, FIXED_ONE, Fixed, FixedVec2};
pub use crate::game::{
    Character, EndCause, GameEvent, InputFrame, RunConfig, RunState, Session,
    replay_run, tick,
};

/// Crate version, for log banners and state-snapshot provenance.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
