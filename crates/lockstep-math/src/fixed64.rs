// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};
use core::str::FromStr;

use crate::arith::{self, FRAC_BITS, FRAC_MASK, ONE_RAW};
use crate::convert;
use crate::error::{MathError, ParseFixedError};

/// Deterministic Q31.32 fixed-point scalar stored in an `i64`.
///
/// ```text
/// real_value = raw / 2^32
/// ```
///
/// # Determinism contract
///
/// - All arithmetic is performed in integer space; no operation touches the
///   FPU, so results are bit-identical on every platform.
/// - The operators `+ - *` wrap on overflow. `saturating_*` methods clamp
///   to [`Fixed64::MAX_VALUE`]/[`Fixed64::MIN_VALUE`] instead. `/` saturates
///   when the quotient does not fit.
/// - Division by zero never faults: it yields `MAX_VALUE` for a non-negative
///   dividend and `MIN_VALUE` for a negative one.
/// - Five raw values are reserved: `MAX_VALUE` and `MIN_VALUE` bound the
///   finite range; `POSITIVE_INFINITY`, `NEGATIVE_INFINITY` and `NAN` are
///   sentinels. Sentinels are ordinary values to the arithmetic core and keep
///   propagating through it; nothing is "poisoned".
///
/// Equality, ordering and hashing are by raw value.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Fixed64 {
    raw: i64,
}

impl Fixed64 {
    /// `0`.
    pub const ZERO: Self = Self::from_raw(0);
    /// `1`.
    pub const ONE: Self = Self::from_raw(ONE_RAW);
    /// `0.5`.
    pub const HALF: Self = Self::from_raw(ONE_RAW >> 1);
    /// `2`.
    pub const TWO: Self = Self::from_raw(ONE_RAW << 1);
    /// `-1`.
    pub const NEG_ONE: Self = Self::from_raw(-ONE_RAW);
    /// π, truncated to 32 fractional bits.
    pub const PI: Self = Self::from_raw(0x3_243F_6A88);
    /// 2π.
    pub const PI_TIMES_2: Self = Self::from_raw(0x6_487E_D511);
    /// π/2.
    pub const PI_OVER_2: Self = Self::from_raw(0x1_921F_B544);
    /// ln(2).
    pub const LN2: Self = Self::from_raw(0xB172_17F7);
    /// π/180: multiply degrees by this to get radians.
    pub const DEG2RAD: Self = Self::from_raw(74_961_321);
    /// 180/π: multiply radians by this to get degrees.
    pub const RAD2DEG: Self = Self::from_raw(246_083_499_208);
    /// `0.001`, the zero-length threshold for normalization.
    pub const EPSILON: Self = Self::from_raw(4_294_967);
    /// Smallest positive value, `2^-32`.
    pub const PRECISION: Self = Self::from_raw(1);
    /// Largest finite value (`i64::MAX - 1` raw).
    pub const MAX_VALUE: Self = Self::from_raw(arith::MAX_RAW);
    /// Smallest finite value (`i64::MIN + 2` raw).
    pub const MIN_VALUE: Self = Self::from_raw(arith::MIN_RAW);
    /// `+∞` sentinel (`i64::MAX` raw).
    pub const POSITIVE_INFINITY: Self = Self::from_raw(arith::POS_INF_RAW);
    /// `-∞` sentinel (`i64::MIN + 1` raw).
    pub const NEGATIVE_INFINITY: Self = Self::from_raw(arith::NEG_INF_RAW);
    /// Not-a-number sentinel (`i64::MIN` raw).
    pub const NAN: Self = Self::from_raw(arith::NAN_RAW);

    /// Constructs a value from its raw Q31.32 integer.
    ///
    /// Exact: `raw` is interpreted as `raw / 2^32` with no scaling or rounding.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self { raw }
    }

    /// Returns the underlying raw Q31.32 integer.
    pub const fn raw(self) -> i64 {
        self.raw
    }

    /// Exact conversion from a 32-bit integer.
    #[must_use]
    pub const fn from_int(n: i32) -> Self {
        Self::from_raw((n as i64) << FRAC_BITS)
    }

    /// Conversion from a 64-bit integer, saturating to `MAX_VALUE`/`MIN_VALUE`
    /// outside the 32-bit integer range.
    #[must_use]
    pub const fn from_i64(n: i64) -> Self {
        if n > i32::MAX as i64 {
            Self::MAX_VALUE
        } else if n < i32::MIN as i64 {
            Self::MIN_VALUE
        } else {
            Self::from_raw(n << FRAC_BITS)
        }
    }

    /// `numerator / denominator`, rounded like [`Div`].
    #[must_use]
    pub fn from_ratio(numerator: i32, denominator: i32) -> Self {
        Self::from_int(numerator) / Self::from_int(denominator)
    }

    /// Integer part, rounded toward negative infinity.
    pub const fn to_int(self) -> i32 {
        (self.raw >> FRAC_BITS) as i32
    }

    /// Integer part, rounded toward zero.
    pub const fn to_int_truncated(self) -> i32 {
        if self.raw < 0 {
            ((self.raw.wrapping_neg() >> FRAC_BITS) as i32).wrapping_neg()
        } else {
            (self.raw >> FRAC_BITS) as i32
        }
    }

    /// Converts an `f32` bit-exactly, rounding ties to even.
    ///
    /// `NaN` and `±∞` map to their sentinels; finite out-of-range values
    /// saturate to `MAX_VALUE`/`MIN_VALUE`.
    #[must_use]
    pub fn from_f32(value: f32) -> Self {
        Self::from_raw(convert::from_f32(value))
    }

    /// Converts an `f64` bit-exactly; same rules as [`Fixed64::from_f32`].
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self::from_raw(convert::from_f64(value))
    }

    /// Nearest `f32`, ties to even. Sentinels map to `NaN`/`±∞`.
    pub fn to_f32(self) -> f32 {
        convert::to_f32(self.raw)
    }

    /// Nearest `f64`, ties to even. Exact for `|raw| < 2^53`.
    pub fn to_f64(self) -> f64 {
        convert::to_f64(self.raw)
    }

    /// `true` for the `NAN` sentinel.
    pub const fn is_nan(self) -> bool {
        self.raw == arith::NAN_RAW
    }

    /// `true` for either infinity sentinel.
    pub const fn is_infinite(self) -> bool {
        self.raw == arith::POS_INF_RAW || self.raw == arith::NEG_INF_RAW
    }

    /// `true` for every value in `[MIN_VALUE, MAX_VALUE]`.
    pub const fn is_finite(self) -> bool {
        self.raw >= arith::MIN_RAW && self.raw <= arith::MAX_RAW
    }

    /// Addition clamped to `[MIN_VALUE, MAX_VALUE]` on overflow.
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self::from_raw(arith::add_saturating(self.raw, rhs.raw))
    }

    /// Subtraction clamped to `[MIN_VALUE, MAX_VALUE]` on overflow.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self::from_raw(arith::sub_saturating(self.raw, rhs.raw))
    }

    /// Multiplication clamped to `[MIN_VALUE, MAX_VALUE]` on overflow.
    #[must_use]
    pub fn saturating_mul(self, rhs: Self) -> Self {
        Self::from_raw(arith::mul_saturating(self.raw, rhs.raw))
    }

    /// Largest integer value not above `self`.
    #[must_use]
    pub const fn floor(self) -> Self {
        Self::from_raw(arith::floor(self.raw))
    }

    /// Smallest integer value not below `self`.
    #[must_use]
    pub const fn ceil(self) -> Self {
        Self::from_raw(arith::ceil(self.raw))
    }

    /// Nearest integer value; exact halves go to the even neighbour.
    #[must_use]
    pub const fn round(self) -> Self {
        Self::from_raw(arith::round(self.raw))
    }

    /// `self - floor(self)`, always in `[0, 1)`.
    #[must_use]
    pub const fn fract(self) -> Self {
        Self::from_raw(self.raw & FRAC_MASK)
    }

    /// Absolute value. The `NAN` sentinel (whose magnitude is not
    /// representable) maps to `MAX_VALUE`.
    #[must_use]
    pub const fn abs(self) -> Self {
        if self.raw == arith::NAN_RAW {
            Self::MAX_VALUE
        } else {
            Self::from_raw(self.raw.abs())
        }
    }

    /// Branchless absolute value; `NAN` wraps onto itself.
    #[must_use]
    pub const fn fast_abs(self) -> Self {
        let mask = self.raw >> 63;
        Self::from_raw(self.raw.wrapping_add(mask) ^ mask)
    }

    /// `-1`, `0` or `1`.
    pub const fn signum(self) -> i32 {
        self.raw.signum() as i32
    }

    /// Clamps to `[0, 1]`.
    #[must_use]
    pub fn clamp01(self) -> Self {
        self.clamp(Self::ZERO, Self::ONE)
    }

    /// `self + (to - self) * t`, without clamping `t`.
    #[must_use]
    pub fn lerp(self, to: Self, t: Self) -> Self {
        self + (to - self) * t
    }

    /// Degrees to radians.
    #[must_use]
    pub fn to_radians(self) -> Self {
        self * Self::DEG2RAD
    }

    /// Radians to degrees.
    #[must_use]
    pub fn to_degrees(self) -> Self {
        self * Self::RAD2DEG
    }

    /// Square root.
    ///
    /// # Panics
    ///
    /// Panics on negative input; use [`Fixed64::try_sqrt`] to get an error
    /// instead.
    #[must_use]
    pub fn sqrt(self) -> Self {
        assert!(self.raw >= 0, "sqrt of negative value {self}");
        Self::from_raw(arith::sqrt(self.raw))
    }

    /// Square root, or [`MathError::NegativeSqrt`] for negative input.
    pub fn try_sqrt(self) -> Result<Self, MathError> {
        if self.raw < 0 {
            return Err(MathError::NegativeSqrt(self));
        }
        Ok(Self::from_raw(arith::sqrt(self.raw)))
    }
}

impl Add for Fixed64 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_add(rhs.raw))
    }
}

impl Sub for Fixed64 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_sub(rhs.raw))
    }
}

impl Mul for Fixed64 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(arith::mul_wrapping(self.raw, rhs.raw))
    }
}

impl Div for Fixed64 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::from_raw(arith::div(self.raw, rhs.raw))
    }
}

impl Rem for Fixed64 {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        Self::from_raw(arith::rem(self.raw, rhs.raw))
    }
}

impl Neg for Fixed64 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_raw(self.raw.wrapping_neg())
    }
}

macro_rules! forward_assign_op {
    ($($trait:ident :: $method:ident => $op:tt),* $(,)?) => {
        $(
            impl $trait for Fixed64 {
                fn $method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

forward_assign_op! {
    AddAssign::add_assign => +,
    SubAssign::sub_assign => -,
    MulAssign::mul_assign => *,
    DivAssign::div_assign => /,
    RemAssign::rem_assign => %,
}

impl From<i32> for Fixed64 {
    fn from(n: i32) -> Self {
        Self::from_int(n)
    }
}

impl fmt::Debug for Fixed64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed64({self} raw={:#x})", self.raw)
    }
}

/// Formats through the nearest `f64`; sentinels print as `NaN`, `inf` and
/// `-inf`. Honours precision flags (`{:.3}`).
impl fmt::Display for Fixed64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

/// Parses decimal text (`-12.375`, `.5`, `NaN`, `inf`) with round-half-even
/// at the 2^-32 boundary.
impl FromStr for Fixed64 {
    type Err = ParseFixedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        convert::parse_decimal(s).map(Self::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_reference_rationals() {
        assert_eq!(Fixed64::PI.raw(), 13_493_037_704);
        assert_eq!(Fixed64::PI_TIMES_2.raw(), 26_986_075_409);
        assert_eq!(Fixed64::PI_OVER_2.raw(), 6_746_518_852);
        assert_eq!(Fixed64::LN2.raw(), 2_977_044_471);
        assert_eq!(Fixed64::HALF + Fixed64::HALF, Fixed64::ONE);
    }

    #[test]
    fn from_i64_saturates() {
        assert_eq!(Fixed64::from_i64(1 << 40), Fixed64::MAX_VALUE);
        assert_eq!(Fixed64::from_i64(-(1 << 40)), Fixed64::MIN_VALUE);
        assert_eq!(Fixed64::from_i64(-7), Fixed64::from_int(-7));
    }

    #[test]
    fn to_int_floors() {
        assert_eq!(Fixed64::from_raw(-1).to_int(), -1);
        assert_eq!(Fixed64::from_ratio(7, 2).to_int(), 3);
        assert_eq!(Fixed64::from_ratio(-7, 2).to_int(), -4);
        assert_eq!(Fixed64::from_ratio(-7, 2).to_int_truncated(), -3);
        assert_eq!(Fixed64::from_raw(-1).to_int_truncated(), 0);
        assert_eq!(Fixed64::from_ratio(7, 2).to_int_truncated(), 3);
    }

    #[test]
    fn abs_of_sentinels() {
        assert_eq!(Fixed64::NAN.abs(), Fixed64::MAX_VALUE);
        assert_eq!(Fixed64::NEGATIVE_INFINITY.abs(), Fixed64::POSITIVE_INFINITY);
        assert_eq!(Fixed64::from_int(-3).fast_abs(), Fixed64::from_int(3));
    }

    #[test]
    fn sentinel_classification() {
        assert!(Fixed64::NAN.is_nan());
        assert!(!Fixed64::NAN.is_finite());
        assert!(Fixed64::POSITIVE_INFINITY.is_infinite());
        assert!(Fixed64::MAX_VALUE.is_finite());
        assert!(Fixed64::MIN_VALUE.is_finite());
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(Fixed64::from_ratio(-5, 4).to_string(), "-1.25");
        assert_eq!(format!("{:.2}", Fixed64::PI), "3.14");
        assert_eq!(Fixed64::NAN.to_string(), "NaN");
        assert_eq!(Fixed64::POSITIVE_INFINITY.to_string(), "inf");
        assert_eq!("2.5".parse::<Fixed64>(), Ok(Fixed64::from_ratio(5, 2)));
    }

    #[test]
    fn try_sqrt_rejects_negative() {
        assert_eq!(
            Fixed64::NEG_ONE.try_sqrt(),
            Err(MathError::NegativeSqrt(Fixed64::NEG_ONE))
        );
        assert_eq!(Fixed64::from_int(9).try_sqrt(), Ok(Fixed64::from_int(3)));
    }

    #[test]
    #[should_panic(expected = "sqrt of negative value")]
    fn sqrt_panics_on_negative() {
        let _ = Fixed64::NEG_ONE.sqrt();
    }
}
