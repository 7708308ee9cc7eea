//! Input Capture
//!
//! Per-tick input for the runner. Only edge-triggered events matter to the
//! simulation: "jump pressed this tick" and "fast-fall pressed this tick".
//! Held keys are the embedder's concern; the simulation never sees them.

use serde::{Serialize, Deserialize};

/// Raw input state for a single frame.
///
/// Packed flag byte so recorded input streams stay one byte per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct InputFrame {
    /// Action flags (packed bits):
    /// - Bit 0: Jump pressed this frame
    /// - Bit 1: Fast-fall pressed this frame
    /// - Bit 2-7: Reserved
    pub flags: u8,
}

impl InputFrame {
    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x01;

    /// Fast-fall flag bit
    pub const FLAG_FAST_FALL: u8 = 0x02;

    /// Create a new empty input frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame with jump pressed.
    pub const fn jump() -> Self {
        Self { flags: Self::FLAG_JUMP }
    }

    /// Create a frame with fast-fall pressed.
    pub const fn fast_fall() -> Self {
        Self { flags: Self::FLAG_FAST_FALL }
    }

    /// Check if jump was pressed this frame.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Check if fast-fall was pressed this frame.
    #[inline]
    pub fn fast_fall_pressed(&self) -> bool {
        self.flags & Self::FLAG_FAST_FALL != 0
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    /// Set jump flag.
    #[inline]
    pub fn set_jump(&mut self, pressed: bool) {
        if pressed {
            self.flags |= Self::FLAG_JUMP;
        } else {
            self.flags &= !Self::FLAG_JUMP;
        }
    }

    /// Set fast-fall flag.
    #[inline]
    pub fn set_fast_fall(&mut self, pressed: bool) {
        if pressed {
            self.flags |= Self::FLAG_FAST_FALL;
        } else {
            self.flags &= !Self::FLAG_FAST_FALL;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut input = InputFrame::new();
        assert!(input.is_idle());

        input.set_jump(true);
        assert!(input.jump_pressed());
        assert!(!input.fast_fall_pressed());

        input.set_fast_fall(true);
        assert!(input.jump_pressed());
        assert!(input.fast_fall_pressed());

        input.set_jump(false);
        assert!(!input.jump_pressed());
        assert!(input.fast_fall_pressed());
    }

    #[test]
    fn test_constructors() {
        assert!(InputFrame::jump().jump_pressed());
        assert!(InputFrame::fast_fall().fast_fall_pressed());
        assert!(InputFrame::new().is_idle());
    }
}
