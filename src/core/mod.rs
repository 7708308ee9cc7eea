//! Deterministic Core Primitives
//!
//! Platform-independent building blocks for the simulation:
//! - Fixed-point arithmetic (Q16.16)
//! - 2D vectors
//! - Deterministic RNG (Xorshift128+) and run-seed derivation

pub mod fixed;
pub mod vec2;
pub mod rng;

pub use fixed::{Fixed, FIXED_ONE, FIXED_HALF};
pub use vec2::FixedVec2;
pub use rng::DeterministicRng;
