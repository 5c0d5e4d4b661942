// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic conversions between the Q31.32 raw encoding and IEEE floats
//! or decimal text.
//!
//! None of these helpers perform floating-point arithmetic. Floats are taken
//! apart and rebuilt at the bit level so the result depends only on the input
//! bits, never on the host FPU, rounding mode or optimizer.
//!
//! Rounding is always to nearest with ties-to-even at the destination
//! boundary.

use crate::arith::{FRAC_BITS, MAX_RAW, MIN_RAW, NAN_RAW, NEG_INF_RAW, POS_INF_RAW};
use crate::error::ParseFixedError;

/// Field widths of an IEEE-754 binary format.
#[derive(Clone, Copy)]
struct FloatLayout {
    mant_bits: u32,
    exp_bits: u32,
}

const BINARY32: FloatLayout = FloatLayout {
    mant_bits: 23,
    exp_bits: 8,
};

const BINARY64: FloatLayout = FloatLayout {
    mant_bits: 52,
    exp_bits: 11,
};

impl FloatLayout {
    const fn exp_mask(self) -> u64 {
        (1_u64 << self.exp_bits) - 1
    }

    const fn bias(self) -> i32 {
        (self.exp_mask() >> 1) as i32
    }

    const fn sign_shift(self) -> u32 {
        self.mant_bits + self.exp_bits
    }
}

fn round_shift_right(value: u64, shift: u32) -> u64 {
    if shift == 0 {
        return value;
    }
    if shift >= 64 {
        return 0;
    }

    let q = value >> shift;
    let mask = (1_u64 << shift) - 1;
    let r = value & mask;
    let half = 1_u64 << (shift - 1);

    if r > half || (r == half && (q & 1) == 1) {
        q + 1
    } else {
        q
    }
}

fn saturate_to_finite(value: i128) -> i64 {
    if value > i128::from(MAX_RAW) {
        MAX_RAW
    } else if value < i128::from(MIN_RAW) {
        MIN_RAW
    } else {
        value as i64
    }
}

/// Rebuilds a raw value from float bits.
///
/// - `NaN` maps to the `NAN` sentinel, `±∞` to the infinity sentinels.
/// - Finite values outside the representable range saturate to
///   `MAX_VALUE`/`MIN_VALUE`.
/// - Subnormals and anything below half an ulp round to zero.
fn raw_from_float_bits(bits: u64, layout: FloatLayout) -> i64 {
    let sign = (bits >> layout.sign_shift()) & 1 == 1;
    let exp = (bits >> layout.mant_bits) & layout.exp_mask();
    let mant = bits & ((1_u64 << layout.mant_bits) - 1);

    if exp == layout.exp_mask() {
        if mant != 0 {
            return NAN_RAW;
        }
        return if sign { NEG_INF_RAW } else { POS_INF_RAW };
    }
    if exp == 0 && mant == 0 {
        return 0;
    }

    let mantissa = if exp == 0 {
        mant
    } else {
        (1_u64 << layout.mant_bits) | mant
    };
    let unbiased = if exp == 0 {
        1 - layout.bias()
    } else {
        exp as i32 - layout.bias()
    };
    // value = mantissa * 2^(unbiased - mant_bits); scale by 2^FRAC_BITS.
    let shift = unbiased + FRAC_BITS as i32 - layout.mant_bits as i32;

    let abs_raw: i128 = if shift >= 0 {
        // mantissa has at most 53 bits; anything shifted past bit 126 is
        // already far outside the i64 window.
        if shift > 73 {
            i128::MAX
        } else {
            i128::from(mantissa) << shift
        }
    } else {
        i128::from(round_shift_right(mantissa, shift.unsigned_abs()))
    };

    saturate_to_finite(if sign { -abs_raw } else { abs_raw })
}

/// Builds float bits from a raw value, rounding the significand to the
/// layout's width.
fn float_bits_from_raw(raw: i64, layout: FloatLayout) -> u64 {
    let sign_bit = 1_u64 << layout.sign_shift();
    let inf_bits = layout.exp_mask() << layout.mant_bits;
    match raw {
        NAN_RAW => return inf_bits | (1_u64 << (layout.mant_bits - 1)),
        POS_INF_RAW => return inf_bits,
        NEG_INF_RAW => return sign_bit | inf_bits,
        0 => return 0,
        _ => {}
    }

    let abs = raw.unsigned_abs();
    // abs ∈ [2^k, 2^(k+1)) so the value has binary exponent k - FRAC_BITS.
    let k = 63 - abs.leading_zeros();
    let mut exp = k as i32 - FRAC_BITS as i32;

    let mut sig = if k > layout.mant_bits {
        round_shift_right(abs, k - layout.mant_bits)
    } else {
        abs << (layout.mant_bits - k)
    };
    // 1.111.. rounding up to 10.000..
    if sig >= 1_u64 << (layout.mant_bits + 1) {
        sig >>= 1;
        exp += 1;
    }

    let exp_field = (exp + layout.bias()) as u64;
    let mantissa = sig & ((1_u64 << layout.mant_bits) - 1);
    let sign = if raw < 0 { sign_bit } else { 0 };
    sign | (exp_field << layout.mant_bits) | mantissa
}

pub(crate) fn from_f32(value: f32) -> i64 {
    raw_from_float_bits(u64::from(value.to_bits()), BINARY32)
}

pub(crate) fn from_f64(value: f64) -> i64 {
    raw_from_float_bits(value.to_bits(), BINARY64)
}

pub(crate) fn to_f32(raw: i64) -> f32 {
    f32::from_bits(float_bits_from_raw(raw, BINARY32) as u32)
}

pub(crate) fn to_f64(raw: i64) -> f64 {
    f64::from_bits(float_bits_from_raw(raw, BINARY64))
}

/// Decimal digits after the point that can influence rounding.
///
/// Every rounding boundary (an odd multiple of 2^-33) has an exact decimal
/// expansion of 33 digits, so digits past this limit only act as a sticky
/// bit.
const FRAC_DIGIT_LIMIT: usize = 40;

/// Parses `[+-]digits[.digits]`, `NaN`, `inf`/`infinity` (optionally signed).
pub(crate) fn parse_decimal(text: &str) -> Result<i64, ParseFixedError> {
    let (negative, body, offset) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..], 1),
        Some(b'+') => (false, &text[1..], 1),
        _ => (false, text, 0),
    };

    if body.eq_ignore_ascii_case("nan") && offset == 0 {
        return Ok(NAN_RAW);
    }
    if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
        return Ok(if negative { NEG_INF_RAW } else { POS_INF_RAW });
    }

    let mut int_part: u64 = 0;
    let mut frac_digits = [0_u8; FRAC_DIGIT_LIMIT];
    let mut frac_len = 0;
    let mut sticky = false;
    let mut seen_point = false;
    let mut seen_digit = false;

    for (i, ch) in body.char_indices() {
        match ch {
            '.' if !seen_point => seen_point = true,
            '0'..='9' => {
                seen_digit = true;
                let digit = ch as u8 - b'0';
                if seen_point {
                    if frac_len < FRAC_DIGIT_LIMIT {
                        frac_digits[frac_len] = digit;
                        frac_len += 1;
                    } else if digit != 0 {
                        sticky = true;
                    }
                } else {
                    int_part = int_part
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(u64::from(digit)))
                        .filter(|v| *v <= 1 << 31)
                        .ok_or(ParseFixedError::OutOfRange)?;
                }
            }
            found => {
                return Err(ParseFixedError::InvalidDigit {
                    index: i + offset,
                    found,
                })
            }
        }
    }
    if !seen_digit {
        return Err(ParseFixedError::Empty);
    }

    let frac = decimal_fraction_to_raw(&mut frac_digits[..frac_len], sticky);
    let magnitude = (i128::from(int_part) << FRAC_BITS) + i128::from(frac);
    let signed = if negative { -magnitude } else { magnitude };
    if signed > i128::from(MAX_RAW) || signed < i128::from(MIN_RAW) {
        return Err(ParseFixedError::OutOfRange);
    }
    Ok(signed as i64)
}

/// Converts `0.d1d2d3..` into a rounded count of 2^-32 units (may be 2^32
/// when the fraction rounds up to one).
///
/// Extracts one binary digit per pass by doubling the decimal digit string
/// and taking the carry out of the leading digit.
fn decimal_fraction_to_raw(digits: &mut [u8], sticky_tail: bool) -> u64 {
    let mut next_bit = || {
        let mut carry = 0;
        for d in digits.iter_mut().rev() {
            let doubled = *d * 2 + carry;
            *d = doubled % 10;
            carry = doubled / 10;
        }
        u64::from(carry)
    };

    let mut q: u64 = 0;
    for _ in 0..FRAC_BITS {
        q = (q << 1) | next_bit();
    }
    let guard = next_bit() == 1;
    let sticky = sticky_tail || digits.iter().any(|d| *d != 0);

    if guard && (sticky || q & 1 == 1) {
        q + 1
    } else {
        q
    }
}
