// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Base-2 exponential and logarithms.

use crate::arith::{FRAC_BITS, FRAC_MASK, ONE_RAW};
use crate::error::MathError;
use crate::fixed64::Fixed64;

/// `2^x` overflows the integer part from here on.
const LOG2_MAX: Fixed64 = Fixed64::from_raw(0x1F_0000_0000);
/// `2^x` underflows to zero from here on.
const LOG2_MIN: Fixed64 = Fixed64::from_raw(-0x20_0000_0000);

const POW2_MAX_TERMS: i32 = 64;

impl Fixed64 {
    /// `2^self`.
    ///
    /// The integer part becomes a shift; the fractional part goes through the
    /// power series of `exp(f · ln 2)`, stopping once a term rounds to zero.
    /// Negative exponents use `2^-x = 1 / 2^x`. Saturates to `MAX_VALUE` at
    /// `x ≥ 31`.
    #[must_use]
    pub fn pow2(self) -> Self {
        if self == Self::ZERO {
            return Self::ONE;
        }

        let negative = self.raw() < 0;
        let x = if negative { -self } else { self };
        if x == Self::ONE {
            return if negative { Self::HALF } else { Self::TWO };
        }
        if x >= LOG2_MAX {
            return if negative {
                Self::ONE / Self::MAX_VALUE
            } else {
                Self::MAX_VALUE
            };
        }
        if x <= LOG2_MIN {
            return if negative { Self::MAX_VALUE } else { Self::ZERO };
        }

        let integer_part = x.raw() >> FRAC_BITS;
        let fraction = Self::from_raw(x.raw() & FRAC_MASK);

        let mut result = Self::ONE;
        let mut term = Self::ONE;
        let mut i = 1;
        while term != Self::ZERO && i <= POW2_MAX_TERMS {
            term = fraction * term * Self::LN2 / Self::from_int(i);
            result += term;
            i += 1;
        }

        let result = Self::from_raw(result.raw() << integer_part);
        if negative {
            Self::ONE / result
        } else {
            result
        }
    }

    /// Base-2 logarithm.
    ///
    /// # Panics
    ///
    /// Panics for `self <= 0`; see [`Fixed64::try_log2`].
    #[must_use]
    pub fn log2(self) -> Self {
        assert!(self.raw() > 0, "log2 of non-positive value {self}");
        log2_unchecked(self)
    }

    /// Base-2 logarithm, or [`MathError::NonPositiveLog`] for `self <= 0`.
    pub fn try_log2(self) -> Result<Self, MathError> {
        if self.raw() <= 0 {
            return Err(MathError::NonPositiveLog(self));
        }
        Ok(log2_unchecked(self))
    }

    /// Natural logarithm, `log2(self) · ln 2`.
    ///
    /// # Panics
    ///
    /// Panics for `self <= 0`; see [`Fixed64::try_ln`].
    #[must_use]
    pub fn ln(self) -> Self {
        self.log2() * Self::LN2
    }

    /// Natural logarithm, or [`MathError::NonPositiveLog`] for `self <= 0`.
    pub fn try_ln(self) -> Result<Self, MathError> {
        self.try_log2().map(|l| l * Self::LN2)
    }

    /// `self^exponent` as `2^(exponent · log2 self)`.
    ///
    /// `1^e` and `b^0` are exactly one; `0^e` is zero for positive `e`.
    ///
    /// # Panics
    ///
    /// Panics for a negative base or for `0^e` with `e < 0`; see
    /// [`Fixed64::try_pow`].
    #[must_use]
    pub fn pow(self, exponent: Self) -> Self {
        let result = self.try_pow(exponent);
        assert!(result.is_ok(), "pow({self}, {exponent}) is undefined");
        result.unwrap_or(Self::ZERO)
    }

    /// `self^exponent`, or an error for a negative base or `0^e` with `e < 0`.
    pub fn try_pow(self, exponent: Self) -> Result<Self, MathError> {
        if self == Self::ONE || exponent == Self::ZERO {
            return Ok(Self::ONE);
        }
        if self == Self::ZERO {
            if exponent.raw() < 0 {
                return Err(MathError::ZeroToNegativePower(exponent));
            }
            return Ok(Self::ZERO);
        }
        let log2 = self.try_log2()?;
        Ok((exponent * log2).pow2())
    }
}

/// Turner's binary logarithm: normalise into `[1, 2)` for the integer
/// part, then square repeatedly and read one fraction bit per step.
fn log2_unchecked(x: Fixed64) -> Fixed64 {
    let mut b: i64 = 1 << (FRAC_BITS - 1);
    let mut y: i64 = 0;
    let mut raw = x.raw();

    while raw < ONE_RAW {
        raw <<= 1;
        y -= ONE_RAW;
    }
    while raw >= ONE_RAW << 1 {
        raw >>= 1;
        y += ONE_RAW;
    }

    let mut z = Fixed64::from_raw(raw);
    for _ in 0..FRAC_BITS {
        z = z * z;
        if z.raw() >= ONE_RAW << 1 {
            z = Fixed64::from_raw(z.raw() >> 1);
            y += b;
        }
        b >>= 1;
    }
    Fixed64::from_raw(y)
}
