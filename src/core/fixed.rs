//! Q16.16 Fixed-Point Arithmetic
//!
//! Deterministic fixed-point math for the runner simulation.
//! All gameplay math uses integer arithmetic only - no floats in the tick loop.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 units                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Units: world coordinates are pixels, velocities are pixels/second,
//! and wall-clock quantities are integer milliseconds (converted to
//! fixed-point seconds via [`dt_from_ms`] at the integration boundary).

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE; // 65536

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1; // 32768

// =============================================================================
// WORLD GEOMETRY (fixed, not tunable - everything else lives in RunConfig)
// =============================================================================

/// World width: 960 px = 960 * 65536
pub const WORLD_WIDTH: Fixed = 62914560;

/// World height: 540 px = 540 * 65536
pub const WORLD_HEIGHT: Fixed = 35389440;

/// Ground surface height. Character `y` is the feet/bottom edge, so a
/// grounded character sits exactly at this value.
pub const GROUND_Y: Fixed = 0;

/// Kill plane below the ground line: -120 px = -120 * 65536.
/// Reachable only by falling through a pit gap.
pub const WORLD_BOTTOM: Fixed = -7864320;

// =============================================================================
// CORE OPERATIONS (all deterministic, wrapping semantics)
// =============================================================================

/// Convert a compile-time float to fixed-point.
///
/// # Warning
/// Only use at compile-time or initialization. NEVER in the tick loop.
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert fixed-point to float for display/logging.
///
/// # Warning
/// Only use for visual output. NEVER feed the result back into game logic.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Convert an integer pixel count to fixed-point.
#[inline]
pub const fn px(value: i32) -> Fixed {
    value << FIXED_SCALE
}

/// Multiply two fixed-point numbers.
///
/// Uses i64 intermediate to prevent overflow, then truncates.
#[inline]
pub fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    let wide = (a as i64) * (b as i64);
    (wide >> FIXED_SCALE) as Fixed
}

/// Divide two fixed-point numbers.
///
/// Pre-shifts numerator to maintain precision.
/// Returns 0 on divide-by-zero (deterministic, never panics).
#[inline]
pub fn fixed_div(a: Fixed, b: Fixed) -> Fixed {
    if b == 0 {
        return 0;
    }
    let wide = (a as i64) << FIXED_SCALE;
    (wide / b as i64) as Fixed
}

/// Clamp a fixed-point value into `[min, max]`.
#[inline]
pub fn fixed_clamp(value: Fixed, min: Fixed, max: Fixed) -> Fixed {
    value.max(min).min(max)
}

/// Convert an integer millisecond delta to fixed-point seconds.
///
/// `1000 ms -> FIXED_ONE`. The i64 intermediate keeps the full range of
/// u32 deltas exact before truncation.
#[inline]
pub fn dt_from_ms(delta_ms: u32) -> Fixed {
    ((delta_ms as i64 * FIXED_ONE as i64) / 1000) as Fixed
}

/// Scale a fixed-point value by an integer percentage.
///
/// Used for config knobs expressed in percent (boost factors, cadence
/// factors) so tuning files stay integer-only.
#[inline]
pub fn fixed_pct(value: Fixed, pct: u32) -> Fixed {
    ((value as i64 * pct as i64) / 100) as Fixed
}

/// Deterministic triangle wave in `[-FIXED_ONE, FIXED_ONE]`.
///
/// `phase_ms` advances linearly; one full cycle takes `period_ms`.
/// Starts at -1.0, peaks at +1.0 mid-cycle. Used for coin bob and flying
/// hazard hover offsets - piecewise linear instead of a sine table so the
/// result is exact on every platform.
#[inline]
pub fn triangle_wave(phase_ms: u32, period_ms: u32) -> Fixed {
    if period_ms == 0 {
        return 0;
    }
    let p = (phase_ms % period_ms) as i64;
    let half = (period_ms / 2).max(1) as i64;
    let one = FIXED_ONE as i64;
    let v = if p < half {
        // Rising edge: -1.0 -> +1.0
        -one + (2 * one * p) / half
    } else {
        // Falling edge: +1.0 -> -1.0
        one - (2 * one * (p - half)) / half
    };
    v as Fixed
}

// =============================================================================
// TESTS
// =============================================================================
