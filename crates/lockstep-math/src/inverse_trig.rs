// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Inverse trigonometry on [`Fixed64`].
//!
//! `atan` is accurate to a few ulps via Euler's series; `atan2` trades
//! accuracy (about 0.005 rad) for speed with a rational approximation.
//! `acos`/`asin` build on `atan` and `sqrt`. All intermediate arithmetic
//! saturates, so extreme arguments degrade to the nearest limit instead of
//! wrapping.

use crate::error::MathError;
use crate::fixed64::Fixed64;

/// Tuning constant of the rational `atan2` approximation, `0.28` truncated
/// to 32 fractional bits.
const ATAN2_K: Fixed64 = Fixed64::from_raw(1_202_590_842);

const ATAN_MAX_TERMS: usize = 30;

impl Fixed64 {
    /// Arc tangent in `(-π/2, π/2)`.
    ///
    /// Euler's series `atan z = z/(1+z²) · Σ ∏ 2k z² / ((2k+1)(1+z²))`,
    /// folded through `atan(-z) = -atan(z)` and `atan(z) = π/2 - atan(1/z)`
    /// so the series always sees `0 < z ≤ 1`.
    #[must_use]
    pub fn atan(self) -> Self {
        if self == Self::ZERO {
            return Self::ZERO;
        }

        let negative = self.raw() < 0;
        let mut z = self.abs();
        let invert = z > Self::ONE;
        if invert {
            z = Self::ONE / z;
        }

        let z_sq = z.saturating_mul(z);
        let z_sq_2 = z_sq.saturating_mul(Self::TWO);
        let z_sq_plus_one = z_sq.saturating_add(Self::ONE);
        let z_sq_12 = z_sq_plus_one.saturating_mul(Self::TWO);

        let mut result = Self::ONE;
        let mut term = Self::ONE;
        let mut dividend = z_sq_2;
        let mut divisor = z_sq_plus_one.saturating_mul(Self::from_int(3));

        for _ in 2..ATAN_MAX_TERMS {
            term = term.saturating_mul(dividend / divisor);
            result = result.saturating_add(term);
            dividend = dividend.saturating_add(z_sq_2);
            divisor = divisor.saturating_add(z_sq_12);
            if term == Self::ZERO {
                break;
            }
        }

        result = result.saturating_mul(z) / z_sq_plus_one;
        if invert {
            result = Self::PI_OVER_2.saturating_sub(result);
        }
        if negative {
            -result
        } else {
            result
        }
    }

    /// Angle of the point `(x, y)` in `(-π, π]`, with `self` as `y`.
    ///
    /// Uses `z / (1 + 0.28 z²)` below `|z| = 1` and
    /// `π/2 - z / (z² + 0.28)` above it, where `z = y / x`. `x = 0` returns
    /// `±π/2` (or `0` at the origin).
    #[must_use]
    pub fn atan2(self, x: Self) -> Self {
        let y = self;
        if x == Self::ZERO {
            return match y.raw() {
                r if r > 0 => Self::PI_OVER_2,
                0 => Self::ZERO,
                _ => -Self::PI_OVER_2,
            };
        }

        let z = y / x;
        let z_sq_k = ATAN2_K.saturating_mul(z).saturating_mul(z);
        let denominator = Self::ONE.saturating_add(z_sq_k);
        if denominator == Self::MAX_VALUE {
            return if y < Self::ZERO {
                -Self::PI_OVER_2
            } else {
                Self::PI_OVER_2
            };
        }

        if z.abs() < Self::ONE {
            let atan = z / denominator;
            if x < Self::ZERO {
                return if y < Self::ZERO {
                    atan.saturating_sub(Self::PI)
                } else {
                    atan.saturating_add(Self::PI)
                };
            }
            atan
        } else {
            let atan = Self::PI_OVER_2
                .saturating_sub(z / z.saturating_mul(z).saturating_add(ATAN2_K));
            if y < Self::ZERO {
                atan.saturating_sub(Self::PI)
            } else {
                atan
            }
        }
    }

    /// Arc cosine in `[0, π]`.
    ///
    /// # Panics
    ///
    /// Panics outside `[-1, 1]`; see [`Fixed64::try_acos`].
    #[must_use]
    pub fn acos(self) -> Self {
        assert!(
            self >= Self::NEG_ONE && self <= Self::ONE,
            "acos argument {self} is outside [-1, 1]"
        );
        acos_unchecked(self)
    }

    /// Arc cosine, or [`MathError::OutOfDomain`] outside `[-1, 1]`.
    pub fn try_acos(self) -> Result<Self, MathError> {
        check_unit_domain("acos", self)?;
        Ok(acos_unchecked(self))
    }

    /// Arc sine in `[-π/2, π/2]`, as `π/2 - acos(self)`.
    ///
    /// # Panics
    ///
    /// Panics outside `[-1, 1]`; see [`Fixed64::try_asin`].
    #[must_use]
    pub fn asin(self) -> Self {
        assert!(
            self >= Self::NEG_ONE && self <= Self::ONE,
            "asin argument {self} is outside [-1, 1]"
        );
        Self::PI_OVER_2 - acos_unchecked(self)
    }

    /// Arc sine, or [`MathError::OutOfDomain`] outside `[-1, 1]`.
    pub fn try_asin(self) -> Result<Self, MathError> {
        check_unit_domain("asin", self)?;
        Ok(Self::PI_OVER_2 - acos_unchecked(self))
    }
}

fn check_unit_domain(function: &'static str, value: Fixed64) -> Result<(), MathError> {
    if value < Fixed64::NEG_ONE || value > Fixed64::ONE {
        return Err(MathError::OutOfDomain { function, value });
    }
    Ok(())
}

/// `atan(√(1 - x²) / x)`, shifted by π for negative `x`.
fn acos_unchecked(x: Fixed64) -> Fixed64 {
    if x == Fixed64::ZERO {
        return Fixed64::PI_OVER_2;
    }
    let root = Fixed64::from_raw(crate::arith::sqrt((Fixed64::ONE - x * x).raw()));
    let result = (root / x).atan();
    if x.raw() < 0 {
        result + Fixed64::PI
    } else {
        result
    }
}
