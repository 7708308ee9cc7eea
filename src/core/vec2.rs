//! Fixed-Point 2D Vector
//!
//! Deterministic 2D positions and offsets for world entities.
//! All operations use fixed-point arithmetic.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::fixed::{Fixed, fixed_mul, to_float};

/// 2D vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec2 {
    /// X component (Q16.16 fixed-point)
    pub x: Fixed,
    /// Y component (Q16.16 fixed-point)
    pub y: Fixed,
}

impl FixedVec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Add another vector.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_add(other.x),
            y: self.y.wrapping_add(other.y),
        }
    }

    /// Subtract another vector.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            y: self.y.wrapping_sub(other.y),
        }
    }

    /// Scale by a fixed-point scalar.
    #[inline]
    pub fn scale(self, scalar: Fixed) -> Self {
        Self {
            x: fixed_mul(self.x, scalar),
            y: fixed_mul(self.y, scalar),
        }
    }

    /// Convert to float components for display/logging only.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (to_float(self.x), to_float(self.y))
    }
}

impl fmt::Debug for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.to_floats();
        write!(f, "({x:.3}, {y:.3})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;

    #[test]
    fn test_add_sub() {
        let a = FixedVec2::new(to_fixed(1.0), to_fixed(2.0));
        let b = FixedVec2::new(to_fixed(3.0), to_fixed(-1.0));

        assert_eq!(a.add(b), FixedVec2::new(to_fixed(4.0), to_fixed(1.0)));
        assert_eq!(a.sub(b), FixedVec2::new(to_fixed(-2.0), to_fixed(3.0)));
    }

    #[test]
    fn test_scale() {
        let v = FixedVec2::new(to_fixed(2.0), to_fixed(-4.0));
        let scaled = v.scale(to_fixed(0.5));
        assert_eq!(scaled, FixedVec2::new(to_fixed(1.0), to_fixed(-2.0)));
    }

    #[test]
    fn test_zero() {
        let v = FixedVec2::new(to_fixed(7.0), to_fixed(9.0));
        assert_eq!(v.add(FixedVec2::ZERO), v);
        assert_eq!(v.scale(0), FixedVec2::ZERO);
    }
}
