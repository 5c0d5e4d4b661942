// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]

use lockstep_math::{Fixed64, MathError};
use proptest::prelude::*;

fn raw(r: i64) -> Fixed64 {
    Fixed64::from_raw(r)
}

#[test]
fn sentinel_raw_values() {
    assert_eq!(Fixed64::MAX_VALUE.raw(), i64::MAX - 1);
    assert_eq!(Fixed64::MIN_VALUE.raw(), i64::MIN + 2);
    assert_eq!(Fixed64::POSITIVE_INFINITY.raw(), i64::MAX);
    assert_eq!(Fixed64::NEGATIVE_INFINITY.raw(), i64::MIN + 1);
    assert_eq!(Fixed64::NAN.raw(), i64::MIN);
    assert_eq!(Fixed64::ONE.raw(), 1_i64 << 32);
    assert_eq!(Fixed64::HALF.raw(), 1_i64 << 31);
}

#[test]
fn division_by_zero_saturates_by_dividend_sign() {
    assert_eq!(Fixed64::ONE / Fixed64::ZERO, Fixed64::MAX_VALUE);
    assert_eq!(Fixed64::ZERO / Fixed64::ZERO, Fixed64::MAX_VALUE);
    assert_eq!(Fixed64::NEG_ONE / Fixed64::ZERO, Fixed64::MIN_VALUE);
    assert_eq!(
        Fixed64::from_int(-123) / Fixed64::ZERO,
        Fixed64::MIN_VALUE
    );
}

#[test]
fn remainder_by_zero_is_zero() {
    assert_eq!(Fixed64::from_int(7) % Fixed64::ZERO, Fixed64::ZERO);
    assert_eq!(
        Fixed64::from_int(7) % Fixed64::from_int(3),
        Fixed64::ONE
    );
    assert_eq!(
        Fixed64::from_int(-7) % Fixed64::from_int(3),
        Fixed64::NEG_ONE
    );
}

#[test]
fn operators_wrap_and_saturating_forms_clamp() {
    let wrapped = Fixed64::MAX_VALUE + Fixed64::ONE;
    assert_eq!(wrapped.raw(), (i64::MAX - 1).wrapping_add(1 << 32));
    assert!(wrapped < Fixed64::ZERO);

    assert_eq!(
        Fixed64::MAX_VALUE.saturating_add(Fixed64::ONE),
        Fixed64::MAX_VALUE
    );
    assert_eq!(
        Fixed64::MIN_VALUE.saturating_sub(Fixed64::ONE),
        Fixed64::MIN_VALUE
    );

    let big = Fixed64::from_int(100_000);
    assert_eq!(big.saturating_mul(big), Fixed64::MAX_VALUE);
    assert_eq!(big.saturating_mul(-big), Fixed64::MIN_VALUE);
    assert_eq!(
        Fixed64::from_int(3).saturating_mul(Fixed64::from_int(-4)),
        Fixed64::from_int(-12)
    );
}

#[test]
fn sentinels_keep_propagating_as_values() {
    // MaxValue carries no poison: it participates in further arithmetic.
    let after = Fixed64::MAX_VALUE.saturating_sub(Fixed64::ONE);
    assert_eq!(after.raw(), i64::MAX - 1 - (1 << 32));
    assert_eq!(
        (Fixed64::ONE / Fixed64::ZERO).saturating_add(Fixed64::ONE),
        Fixed64::MAX_VALUE
    );
}

#[test]
fn one_third_rounds_to_nearest() {
    let third = Fixed64::ONE / Fixed64::from_int(3);
    assert_eq!(third.raw(), 1_431_655_765);
    assert_eq!((third * Fixed64::from_int(3)).raw(), (1_i64 << 32) - 1);
}

#[test]
fn small_integer_products_and_quotients_are_exact() {
    for a in -50..50 {
        for b in -50..50 {
            let fa = Fixed64::from_int(a);
            let fb = Fixed64::from_int(b);
            assert_eq!(fa * fb, Fixed64::from_int(a * b), "{a} * {b}");
            if b != 0 {
                assert_eq!(Fixed64::from_int(a * b) / fb, fa, "{} / {b}", a * b);
            }
        }
    }
}

#[test]
fn sqrt_of_perfect_squares_is_exact() {
    for n in (0..2000).chain([12_345, 40_000, 46_340]) {
        let square = Fixed64::from_i64(i64::from(n) * i64::from(n));
        assert_eq!(square.sqrt(), Fixed64::from_int(n), "sqrt({n}²)");
    }
}

#[test]
fn sqrt_domain() {
    assert_eq!(Fixed64::ZERO.sqrt(), Fixed64::ZERO);
    assert_eq!(
        Fixed64::NEG_ONE.try_sqrt(),
        Err(MathError::NegativeSqrt(Fixed64::NEG_ONE))
    );
}

#[test]
fn rounding_family() {
    let v = Fixed64::from_ratio(5, 2);
    assert_eq!(v.floor(), Fixed64::from_int(2));
    assert_eq!(v.ceil(), Fixed64::from_int(3));
    assert_eq!(v.round(), Fixed64::from_int(2));
    assert_eq!(Fixed64::from_ratio(7, 2).round(), Fixed64::from_int(4));
    assert_eq!((-v).floor(), Fixed64::from_int(-3));
    assert_eq!((-v).ceil(), Fixed64::from_int(-2));
    assert_eq!(v.fract(), Fixed64::HALF);
}

#[test]
fn decimal_parse_round_trips_through_display_for_simple_values() {
    for text in ["0", "1", "-1", "2.5", "-0.25", "1000000"] {
        let parsed: Fixed64 = text.parse().unwrap_or(Fixed64::NAN);
        assert!(!parsed.is_nan(), "failed to parse {text}");
        assert_eq!(parsed.to_string(), text);
    }
}

proptest! {
    #[test]
    fn int_round_trip(n in any::<i32>()) {
        prop_assert_eq!(Fixed64::from_int(n).to_int(), n);
    }

    #[test]
    fn add_is_commutative_and_sub_inverts(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(raw(a) + raw(b), raw(b) + raw(a));
        prop_assert_eq!(raw(a) + raw(b) - raw(b), raw(a));
        prop_assert_eq!(raw(a) - raw(a), Fixed64::ZERO);
    }

    #[test]
    fn mul_identities(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(raw(a) * raw(b), raw(b) * raw(a));
        prop_assert_eq!(raw(a) * Fixed64::ONE, raw(a));
        prop_assert_eq!(raw(a) * Fixed64::ZERO, Fixed64::ZERO);
    }

    #[test]
    fn negation_through_mul(a in -(1_i64 << 62)..(1_i64 << 62)) {
        prop_assert_eq!(raw(a) * Fixed64::NEG_ONE, -raw(a));
    }

    #[test]
    fn div_identities(a in -(1_i64 << 62)..(1_i64 << 62)) {
        prop_assert_eq!(raw(a) / Fixed64::ONE, raw(a));
        if a != 0 {
            prop_assert_eq!(raw(a) / raw(a), Fixed64::ONE);
        }
    }

    #[test]
    fn sqrt_brackets_the_exact_root(r in 0_i64..i64::MAX - 1) {
        let root = i128::from(Fixed64::from_raw(r).sqrt().raw());
        let target = i128::from(r) << 32;
        prop_assert!((root - 1) * (root - 1) <= target);
        prop_assert!(target <= (root + 1) * (root + 1));
    }

    #[test]
    fn saturating_add_never_wraps(a in any::<i64>(), b in any::<i64>()) {
        let exact = i128::from(a) + i128::from(b);
        let got = raw(a).saturating_add(raw(b));
        if exact > i128::from(i64::MAX) {
            prop_assert_eq!(got, Fixed64::MAX_VALUE);
        } else if exact < i128::from(i64::MIN) {
            prop_assert_eq!(got, Fixed64::MIN_VALUE);
        } else {
            prop_assert_eq!(i128::from(got.raw()), exact);
        }
    }
}
