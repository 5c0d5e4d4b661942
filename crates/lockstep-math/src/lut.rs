// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Quarter-wave sine and tangent lookup tables.
//!
//! Both tables sample `[0, π/2]` at `LUT_SIZE` evenly spaced points
//! (`i · (π/2) / (LUT_SIZE - 1)`). They are generated in-process from integer
//! Taylor series in Q2.62, so the bits are fixed by this source file alone and
//! no float ever participates.
//!
//! Tables are built lazily behind `once_cell::sync::Lazy`, which guarantees a
//! single construction that happens-before every reader. Call
//! [`init_tables`] at startup to move the one-off cost out of the first
//! simulation tick.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::arith::{FRAC_BITS, MAX_RAW, ONE_RAW};
use crate::fixed64::Fixed64;

/// Number of samples in each table: `raw(π/2) >> 15`.
pub const LUT_SIZE: usize = (Fixed64::PI_OVER_2.raw() >> 15) as usize;

/// Table samples per radian: `(LUT_SIZE - 1) / (π/2)`.
pub(crate) const LUT_INTERVAL: Fixed64 = Fixed64::from_raw(562_946_081_331_096);

const Q62: u32 = 62;
const Q62_ONE: i128 = 1 << Q62;
/// π/2 in Q2.62 (equivalently π · 2^61).
const PI_OVER_2_Q62: i128 = 7_244_019_458_077_122_842;
const SERIES_TERMS: usize = 26;

/// `round(2^62 / n!)` for `n` in `0..SERIES_TERMS`.
const INV_FACTORIALS: [i128; SERIES_TERMS] = inverse_factorials();

const fn inverse_factorials() -> [i128; SERIES_TERMS] {
    let mut out = [0_i128; SERIES_TERMS];
    let mut factorial: i128 = 1;
    let mut n = 0;
    while n < SERIES_TERMS {
        if n > 0 {
            factorial *= n as i128;
        }
        out[n] = (Q62_ONE + factorial / 2) / factorial;
        n += 1;
    }
    out
}

/// Alternating Horner evaluation of `Σ (-1)^k x^(2k+offset) / (2k+offset)!`
/// with `x2 = x²` in Q2.62. Returns the polynomial in `x²` only; the caller
/// multiplies by `x` for the odd series.
fn alternating_series(x2: i128, offset: usize) -> i128 {
    let mut n = SERIES_TERMS - 1;
    if n % 2 != offset % 2 {
        n -= 1;
    }
    let mut acc = INV_FACTORIALS[n];
    while n >= offset + 2 {
        n -= 2;
        acc = INV_FACTORIALS[n] - ((x2 * acc) >> Q62);
    }
    acc
}

/// Sample angle `i · (π/2) / (LUT_SIZE - 1)` in Q2.62, rounded.
fn sample_angle_q62(index: usize) -> i128 {
    let steps = (LUT_SIZE - 1) as i128;
    (PI_OVER_2_Q62 * index as i128 + steps / 2) / steps
}

fn sin_cos_q62(index: usize) -> (i128, i128) {
    let x = sample_angle_q62(index);
    let x2 = (x * x) >> Q62;
    let sin = (x * alternating_series(x2, 1)) >> Q62;
    let cos = alternating_series(x2, 0);
    (sin, cos)
}

fn q62_to_raw(value: i128) -> i64 {
    let shift = Q62 - FRAC_BITS;
    ((value + (1 << (shift - 1))) >> shift) as i64
}

fn sin_sample(index: usize) -> i64 {
    let (sin, _) = sin_cos_q62(index);
    q62_to_raw(sin).clamp(0, ONE_RAW)
}

/// `tan = sin / cos`, rounded; the `π/2` endpoint saturates to `MAX_VALUE`.
fn tan_sample(index: usize) -> i64 {
    if index == LUT_SIZE - 1 {
        return MAX_RAW;
    }
    let (sin, cos) = sin_cos_q62(index);
    if cos <= 0 {
        return MAX_RAW;
    }
    let quotient = ((sin << FRAC_BITS) + cos / 2) / cos;
    i64::try_from(quotient).map_or(MAX_RAW, |q| q.min(MAX_RAW))
}

fn build(name: &'static str, sample: fn(usize) -> i64) -> Box<[i64]> {
    let table: Box<[i64]> = (0..LUT_SIZE).map(sample).collect();
    debug!(table = name, samples = table.len(), "lookup table built");
    table
}

static SIN_LUT: Lazy<Box<[i64]>> = Lazy::new(|| build("sin", sin_sample));
static TAN_LUT: Lazy<Box<[i64]>> = Lazy::new(|| build("tan", tan_sample));

/// Forces construction of both lookup tables.
///
/// Optional: every trig function initializes the tables on first use. Calling
/// this once at startup keeps the build cost off the simulation path.
pub fn init_tables() {
    Lazy::force(&SIN_LUT);
    Lazy::force(&TAN_LUT);
}

pub(crate) fn sin_table() -> &'static [i64] {
    &SIN_LUT
}

pub(crate) fn tan_table() -> &'static [i64] {
    &TAN_LUT
}
