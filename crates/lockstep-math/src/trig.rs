// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! LUT-backed `sin`/`cos`/`tan` for [`Fixed64`] radians.
//!
//! Strategy:
//! - reduce the angle into `[0, 2π)` by a cascade of remainders against
//!   `2^k · π` (k = 29 down to 1), which keeps every step exact in `i64`
//! - fold into a quarter wave, recording the two symmetries of sine
//! - index the quarter-wave table and (for the accurate variants) linearly
//!   interpolate toward the neighbour on the side of the rounding error
//!
//! `sin` carries about nine significant decimal digits. `fast_sin` skips the
//! interpolation for roughly four to five digits at a fraction of the cost.

use crate::fixed64::Fixed64;
use crate::lut::{self, LUT_INTERVAL, LUT_SIZE};

/// `2^29 · π` in Q31.32; right shifts of it give `2^k · π` for smaller `k`.
const LARGE_PI: i64 = 7_244_019_458_077_122_842;
const REDUCTION_STEPS: u32 = 29;

const PI: i64 = Fixed64::PI.raw();
const PI_OVER_2: i64 = Fixed64::PI_OVER_2.raw();
const PI_TIMES_2: i64 = Fixed64::PI_TIMES_2.raw();
const LAST_INDEX: i64 = LUT_SIZE as i64 - 1;

/// Result of folding an angle onto the first quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantFold {
    /// The folded angle, in `[0, π/2)`.
    pub angle: Fixed64,
    /// Read the table backwards (`sin(π - x) = sin(x)`).
    pub mirror: bool,
    /// Negate the table value (`sin(x + π) = -sin(x)`).
    pub negate: bool,
}

impl Fixed64 {
    /// Folds an arbitrary angle onto the first quadrant of sine.
    ///
    /// `sin(self)` equals the table value at `angle` (read backwards when
    /// `mirror` is set), negated when `negate` is set.
    pub fn clamp_sin_value(self) -> QuadrantFold {
        let mut clamped_2pi = self.raw();
        for i in 0..REDUCTION_STEPS {
            clamped_2pi %= LARGE_PI >> i;
        }
        if self.raw() < 0 {
            clamped_2pi += PI_TIMES_2;
        }

        let negate = clamped_2pi >= PI;
        let mut clamped_pi = clamped_2pi;
        while clamped_pi >= PI {
            clamped_pi -= PI;
        }

        let mirror = clamped_pi >= PI_OVER_2;
        let mut clamped = clamped_pi;
        if mirror {
            clamped -= PI_OVER_2;
        }

        QuadrantFold {
            angle: Self::from_raw(clamped),
            mirror,
            negate,
        }
    }

    /// Sine with linear interpolation between table samples.
    #[must_use]
    pub fn sin(self) -> Self {
        let fold = self.clamp_sin_value();
        let value = interpolate(lut::sin_table(), fold.angle, fold.mirror);
        Self::from_raw(if fold.negate { -value } else { value })
    }

    /// Sine from the nearest lower table sample, no interpolation.
    #[must_use]
    pub fn fast_sin(self) -> Self {
        let fold = self.clamp_sin_value();
        let index = (fold.angle.raw() >> 15).min(LAST_INDEX);
        let index = if fold.mirror { LAST_INDEX - index } else { index };
        let value = lut::sin_table()[index as usize];
        Self::from_raw(if fold.negate { -value } else { value })
    }

    /// Cosine as a phase-shifted [`Fixed64::sin`].
    #[must_use]
    pub fn cos(self) -> Self {
        Self::from_raw(cos_phase(self.raw())).sin()
    }

    /// Cosine as a phase-shifted [`Fixed64::fast_sin`].
    #[must_use]
    pub fn fast_cos(self) -> Self {
        Self::from_raw(cos_phase(self.raw())).fast_sin()
    }

    /// `(sin, cos)` pair.
    pub fn sin_cos(self) -> (Self, Self) {
        (self.sin(), self.cos())
    }

    /// Tangent from its own quarter-wave table.
    ///
    /// Less rigorously validated than [`Fixed64::sin`]: accuracy degrades
    /// near `±π/2`, where the table saturates to `MAX_VALUE`.
    #[must_use]
    pub fn tan(self) -> Self {
        let mut clamped_pi = self.raw() % PI;
        let mut flip = false;
        if clamped_pi < 0 {
            clamped_pi = -clamped_pi;
            flip = true;
        }
        if clamped_pi > PI_OVER_2 {
            flip = !flip;
            clamped_pi = PI_OVER_2 - (clamped_pi - PI_OVER_2);
        }

        let value = interpolate(lut::tan_table(), Self::from_raw(clamped_pi), false);
        Self::from_raw(if flip { -value } else { value })
    }
}

/// `cos(x) = sin(x + π/2)`; positive inputs shift by `-3π/2` instead so the
/// sum cannot overflow.
fn cos_phase(raw: i64) -> i64 {
    if raw > 0 {
        raw - PI - PI_OVER_2
    } else {
        raw + PI_OVER_2
    }
}

/// Reads `table` at the fractional index of `angle`, interpolating toward
/// the neighbour on the side of the rounding error.
fn interpolate(table: &[i64], angle: Fixed64, mirror: bool) -> i64 {
    let raw_index = angle * LUT_INTERVAL;
    let rounded = raw_index.round();
    let error = raw_index - rounded;

    let nearest_index = i64::from(rounded.to_int()).clamp(0, LAST_INDEX);
    let second_index = (nearest_index + i64::from(error.signum())).clamp(0, LAST_INDEX);
    let (nearest_index, second_index) = if mirror {
        (LAST_INDEX - nearest_index, LAST_INDEX - second_index)
    } else {
        (nearest_index, second_index)
    };

    let nearest = Fixed64::from_raw(table[nearest_index as usize]);
    let second = Fixed64::from_raw(table[second_index as usize]);
    let delta = (error * (nearest - second).fast_abs()).raw();
    nearest.raw() + if mirror { -delta } else { delta }
}
