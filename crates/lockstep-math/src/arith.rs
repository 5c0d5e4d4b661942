// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Raw Q31.32 arithmetic kernels.
//!
//! Everything here operates on the `i64` raw encoding (`real = raw / 2^32`)
//! and never widens past 64 bits. [`crate::Fixed64`] wraps these kernels in
//! its operator impls; the split keeps the bit-twiddling in one place.

pub(crate) const FRAC_BITS: u32 = 32;
pub(crate) const ONE_RAW: i64 = 1 << FRAC_BITS;
pub(crate) const FRAC_MASK: i64 = 0x0000_0000_FFFF_FFFF;

/// Largest finite value; `i64::MAX` is reserved for `+∞`.
pub(crate) const MAX_RAW: i64 = i64::MAX - 1;
/// Smallest finite value; `i64::MIN` and `i64::MIN + 1` are reserved.
pub(crate) const MIN_RAW: i64 = i64::MIN + 2;
pub(crate) const POS_INF_RAW: i64 = i64::MAX;
pub(crate) const NEG_INF_RAW: i64 = i64::MIN + 1;
pub(crate) const NAN_RAW: i64 = i64::MIN;

const NUM_BITS: i32 = 64;

#[inline]
fn saturate_by_sign(a: i64, b: i64) -> i64 {
    if (a ^ b) >= 0 {
        MAX_RAW
    } else {
        MIN_RAW
    }
}

/// `a + b`, clamping to `MAX_RAW`/`MIN_RAW` when the operands share a sign
/// and the sum does not.
#[inline]
pub(crate) fn add_saturating(a: i64, b: i64) -> i64 {
    let sum = a.wrapping_add(b);
    if (!(a ^ b) & (a ^ sum)) < 0 {
        if a > 0 {
            MAX_RAW
        } else {
            MIN_RAW
        }
    } else {
        sum
    }
}

/// `a - b`, clamping when the operands differ in sign and the difference's
/// sign differs from `a`.
#[inline]
pub(crate) fn sub_saturating(a: i64, b: i64) -> i64 {
    let diff = a.wrapping_sub(b);
    if ((a ^ b) & (a ^ diff)) < 0 {
        if a < 0 {
            MIN_RAW
        } else {
            MAX_RAW
        }
    } else {
        diff
    }
}

/// The four partial products of `a * b` split at the binary point.
struct Partials {
    lo: i64,
    lohi: i64,
    hilo: i64,
    hihi: i64,
}

#[inline]
fn partials(a: i64, b: i64) -> Partials {
    let alo = (a & FRAC_MASK) as u64;
    let ahi = a >> FRAC_BITS;
    let blo = (b & FRAC_MASK) as u64;
    let bhi = b >> FRAC_BITS;

    // 32x32 unsigned products fit in u64; mixed products fit in i64 because
    // the unsigned half is < 2^32 and the signed half is in [-2^31, 2^31).
    let lolo = alo * blo;
    let lohi = (alo as i64) * bhi;
    let hilo = ahi * (blo as i64);
    let hihi = ahi * bhi;

    Partials {
        lo: (lolo >> FRAC_BITS) as i64,
        lohi,
        hilo,
        hihi,
    }
}

/// Unchecked product. Bits above the 64-bit window are discarded.
#[inline]
pub(crate) fn mul_wrapping(a: i64, b: i64) -> i64 {
    let p = partials(a, b);
    p.lo.wrapping_add(p.lohi)
        .wrapping_add(p.hilo)
        .wrapping_add(p.hihi.wrapping_shl(FRAC_BITS))
}

#[inline]
fn add_tracking_carry(x: i64, y: i64, overflow: &mut bool) -> i64 {
    let sum = x.wrapping_add(y);
    *overflow |= (x ^ y ^ sum) < 0;
    sum
}

/// Product that saturates to `MAX_RAW`/`MIN_RAW` on overflow.
pub(crate) fn mul_saturating(a: i64, b: i64) -> i64 {
    let p = partials(a, b);

    let mut overflow = false;
    let mut sum = add_tracking_carry(p.lo, p.lohi, &mut overflow);
    sum = add_tracking_carry(sum, p.hilo, &mut overflow);
    sum = add_tracking_carry(sum, p.hihi.wrapping_shl(FRAC_BITS), &mut overflow);

    let op_signs_equal = (a ^ b) >= 0;

    // Same-sign operands must give a non-negative product; the carry flag is
    // only meaningful when every partial product is non-negative.
    if op_signs_equal {
        if sum < 0 || (overflow && a > 0) {
            return MAX_RAW;
        }
    } else if sum > 0 {
        return MIN_RAW;
    }

    // The top 32 bits of hihi never reach the result; anything but a sign
    // extension there means the true product left the window.
    let top_carry = p.hihi >> FRAC_BITS;
    if top_carry != 0 && top_carry != -1 {
        return if op_signs_equal { MAX_RAW } else { MIN_RAW };
    }

    // Mixed signs with both magnitudes above one: a result above the
    // negative operand can only come from wrap-around.
    if !op_signs_equal {
        let (pos_op, neg_op) = if a > b { (a, b) } else { (b, a) };
        if sum > neg_op && neg_op < -ONE_RAW && pos_op > ONE_RAW {
            return MIN_RAW;
        }
    }

    sum
}

/// Shift-based long division with half-up rounding.
///
/// - `b == 0` saturates: `MAX_RAW` for `a >= 0`, `MIN_RAW` for `a < 0`.
/// - Operates on magnitudes; the sign is restored at the end.
/// - Each step shifts the remainder left by its leading-zero count (bounded
///   by the remaining quotient bits), so no 128-bit intermediate is needed.
pub(crate) fn div(a: i64, b: i64) -> i64 {
    if b == 0 {
        return if a >= 0 { MAX_RAW } else { MIN_RAW };
    }

    let mut remainder = a.unsigned_abs();
    let mut divider = b.unsigned_abs();
    let mut quotient: u64 = 0;
    // One guard bit below the binary point for rounding.
    let mut bit_pos: i32 = NUM_BITS / 2 + 1;

    // Cheap fast path: divisors that are multiples of 16 need fewer steps.
    while divider & 0xF == 0 && bit_pos >= 4 {
        divider >>= 4;
        bit_pos -= 4;
    }

    while remainder != 0 && bit_pos >= 0 {
        let shift = (remainder.leading_zeros() as i32).min(bit_pos);
        remainder <<= shift;
        bit_pos -= shift;

        let step = remainder / divider;
        remainder %= divider;
        quotient = quotient.wrapping_add(step << bit_pos);

        if step & !(u64::MAX >> bit_pos) != 0 {
            return saturate_by_sign(a, b);
        }

        remainder <<= 1;
        bit_pos -= 1;
    }

    // Round half-up on the guard bit.
    quotient = quotient.wrapping_add(1);
    let result = (quotient >> 1) as i64;
    if (a ^ b) < 0 {
        result.wrapping_neg()
    } else {
        result
    }
}

/// Remainder with the sign of the dividend.
///
/// `i64::MIN % -1` is defined as `0` and a zero divisor yields `0`.
#[inline]
pub(crate) fn rem(a: i64, b: i64) -> i64 {
    if b == 0 {
        0
    } else {
        a.wrapping_rem(b)
    }
}

/// Digit-by-digit square root of a non-negative raw value.
///
/// Runs the classic non-restoring loop twice: the first pass resolves the
/// high half of the root, the second shifts the remainder up by 32 bits and
/// resolves the fraction. The final step rounds up when the next bit would
/// have been set. Callers guarantee `raw >= 0`.
pub(crate) fn sqrt(raw: i64) -> i64 {
    debug_assert!(raw >= 0, "sqrt kernel called with negative raw {raw}");
    let mut num = raw as u64;
    let mut result: u64 = 0;

    // Second-to-top bit.
    let mut bit: u64 = 1 << (NUM_BITS - 2);
    while bit > num {
        bit >>= 2;
    }

    for pass in 0..2 {
        while bit != 0 {
            if num >= result + bit {
                num -= result + bit;
                result = (result >> 1) + bit;
            } else {
                result >>= 1;
            }
            bit >>= 2;
        }

        if pass == 0 {
            if num > (1_u64 << (NUM_BITS / 2)) - 1 {
                // The remainder is too wide to shift by 32. Fold in half an
                // ulp by hand: num - (result + 0.5)^2 + result^2 = num - result - 0.5.
                num -= result;
                num = (num << (NUM_BITS / 2)).wrapping_sub(0x8000_0000);
                result = (result << (NUM_BITS / 2)) + 0x8000_0000;
            } else {
                num <<= NUM_BITS / 2;
                result <<= NUM_BITS / 2;
            }
            bit = 1 << (NUM_BITS / 2 - 2);
        }
    }

    if num > result {
        result += 1;
    }
    result as i64
}

/// Euclidean norm of raw components, rounded to nearest.
///
/// The squares are summed exactly as `u128` (Q.64), so the result never
/// saturates early the way `sqrt(length_squared)` does once the squared
/// length leaves the Q31.32 range. Saturates to `MAX_RAW` only when the norm
/// itself does not fit.
pub(crate) fn hypot(components: &[i64]) -> i64 {
    let sum = components.iter().fold(0_u128, |acc, &c| {
        let m = u128::from(c.unsigned_abs());
        acc.saturating_add(m * m)
    });
    let root = sum.isqrt();
    // (root + 1/2)^2 = root^2 + root + 1/4
    let root = if sum - root * root > root { root + 1 } else { root };
    i64::try_from(root).map_or(MAX_RAW, |r| r.min(MAX_RAW))
}

#[inline]
pub(crate) const fn floor(raw: i64) -> i64 {
    raw & !FRAC_MASK
}

#[inline]
pub(crate) const fn ceil(raw: i64) -> i64 {
    if raw & FRAC_MASK != 0 {
        floor(raw).wrapping_add(ONE_RAW)
    } else {
        raw
    }
}

/// Round to nearest; an exact half goes to the even neighbour.
#[inline]
pub(crate) const fn round(raw: i64) -> i64 {
    let fractional = raw & FRAC_MASK;
    let integral = floor(raw);
    let half = 0x8000_0000;
    if fractional < half {
        integral
    } else if fractional > half || (integral & ONE_RAW) != 0 {
        integral.wrapping_add(ONE_RAW)
    } else {
        integral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: i64 = ONE_RAW / 2;

    #[test]
    fn saturating_add_clamps_both_directions() {
        assert_eq!(add_saturating(MAX_RAW, ONE_RAW), MAX_RAW);
        assert_eq!(add_saturating(MIN_RAW, -ONE_RAW), MIN_RAW);
        assert_eq!(add_saturating(ONE_RAW, -ONE_RAW), 0);
        assert_eq!(add_saturating(i64::MAX - 10, 5), i64::MAX - 5);
    }

    #[test]
    fn saturating_sub_clamps_both_directions() {
        assert_eq!(sub_saturating(MIN_RAW, ONE_RAW), MIN_RAW);
        assert_eq!(sub_saturating(MAX_RAW, -ONE_RAW), MAX_RAW);
        assert_eq!(sub_saturating(0, ONE_RAW), -ONE_RAW);
    }

    #[test]
    fn wrapping_mul_matches_exact_products_in_range() {
        assert_eq!(mul_wrapping(3 * ONE_RAW, 4 * ONE_RAW), 12 * ONE_RAW);
        assert_eq!(mul_wrapping(-3 * ONE_RAW, 4 * ONE_RAW), -12 * ONE_RAW);
        assert_eq!(mul_wrapping(HALF, HALF), ONE_RAW / 4);
        assert_eq!(mul_wrapping(-HALF, -HALF), ONE_RAW / 4);
        assert_eq!(mul_wrapping(-HALF, HALF), -ONE_RAW / 4);
    }

    #[test]
    fn saturating_mul_detects_overflow() {
        let big = 100_000 * ONE_RAW;
        assert_eq!(mul_saturating(big, big), MAX_RAW);
        assert_eq!(mul_saturating(-big, -big), MAX_RAW);
        assert_eq!(mul_saturating(big, -big), MIN_RAW);
        assert_eq!(mul_saturating(-big, big), MIN_RAW);
        assert_eq!(mul_saturating(-HALF, -HALF), ONE_RAW / 4);
        assert_eq!(mul_saturating(7 * ONE_RAW, -ONE_RAW), -7 * ONE_RAW);
    }

    #[test]
    fn div_by_zero_saturates_by_dividend_sign() {
        assert_eq!(div(ONE_RAW, 0), MAX_RAW);
        assert_eq!(div(0, 0), MAX_RAW);
        assert_eq!(div(-ONE_RAW, 0), MIN_RAW);
    }

    #[test]
    fn div_exact_and_rounded_quotients() {
        assert_eq!(div(6 * ONE_RAW, 3 * ONE_RAW), 2 * ONE_RAW);
        assert_eq!(div(ONE_RAW, 2 * ONE_RAW), HALF);
        assert_eq!(div(-ONE_RAW, 4 * ONE_RAW), -ONE_RAW / 4);
        // 1/3 = 0x5555_5555.55.. rounds down.
        assert_eq!(div(ONE_RAW, 3 * ONE_RAW), 0x5555_5555);
        // 2/3 = 0xAAAA_AAAA.AA.. rounds up.
        assert_eq!(div(2 * ONE_RAW, 3 * ONE_RAW), 0xAAAA_AAAB);
    }

    #[test]
    fn div_overflow_saturates() {
        assert_eq!(div(MAX_RAW, 1), MAX_RAW);
        assert_eq!(div(MAX_RAW, -1), MIN_RAW);
        assert_eq!(div(1 << 40, 1), MAX_RAW);
    }

    #[test]
    fn rem_handles_min_over_minus_one() {
        assert_eq!(rem(i64::MIN, -1), 0);
        assert_eq!(rem(7 * ONE_RAW, 2 * ONE_RAW), ONE_RAW);
        assert_eq!(rem(-7 * ONE_RAW, 2 * ONE_RAW), -ONE_RAW);
        assert_eq!(rem(5, 0), 0);
    }

    #[test]
    fn sqrt_of_perfect_squares_is_exact() {
        assert_eq!(sqrt(0), 0);
        assert_eq!(sqrt(ONE_RAW), ONE_RAW);
        assert_eq!(sqrt(4 * ONE_RAW), 2 * ONE_RAW);
        assert_eq!(sqrt(ONE_RAW / 4), HALF);
        assert_eq!(sqrt(144 * ONE_RAW), 12 * ONE_RAW);
    }

    #[test]
    fn hypot_is_exact_past_the_squared_range() {
        let one = ONE_RAW;
        assert_eq!(hypot(&[3 * one, 4 * one]), 5 * one);
        assert_eq!(hypot(&[30_000 * one, 40_000 * one, 0]), 50_000 * one);
        assert_eq!(hypot(&[-600_000 * one, 0, 800_000 * one]), 1_000_000 * one);
        assert_eq!(hypot(&[0, 0, 0]), 0);
        assert_eq!(hypot(&[MAX_RAW, MAX_RAW]), MAX_RAW);
    }

    #[test]
    fn round_ties_to_even() {
        assert_eq!(round(HALF), 0);
        assert_eq!(round(ONE_RAW + HALF), 2 * ONE_RAW);
        assert_eq!(round(2 * ONE_RAW + HALF), 2 * ONE_RAW);
        assert_eq!(round(-HALF), 0);
        assert_eq!(round(-ONE_RAW - HALF), -2 * ONE_RAW);
        assert_eq!(round(HALF + 1), ONE_RAW);
    }

    #[test]
    fn floor_and_ceil() {
        assert_eq!(floor(ONE_RAW + 1), ONE_RAW);
        assert_eq!(floor(-1), -ONE_RAW);
        assert_eq!(ceil(ONE_RAW + 1), 2 * ONE_RAW);
        assert_eq!(ceil(-ONE_RAW - 1), -ONE_RAW);
        assert_eq!(ceil(3 * ONE_RAW), 3 * ONE_RAW);
    }
}
