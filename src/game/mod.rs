//! Gameplay Simulation
//!
//! Everything that changes from tick to tick: the character, the world
//! entities, scoring, power-ups, and the orchestration that ties them
//! together. [`tick::tick`] is the single entry point; the types here are
//! the state it advances.

pub mod collision;
pub mod combo;
pub mod config;
pub mod entity;
pub mod events;
pub mod input;
pub mod movement;
pub mod powerup;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use combo::ComboState;
pub use config::{ConfigError, RunConfig};
pub use entity::{Entity, EntityKind, Pool};
pub use events::GameEvent;
pub use input::InputFrame;
pub use movement::JumpKind;
pub use powerup::{PowerUpKind, PowerUpState};
pub use state::{AnimState, Character, EndCause, RunPhase, RunState};
pub use tick::{Session, TickResult, replay_run, tick};
pub use timer::Countdown;
