// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]

use lockstep_math::{Fixed64, Matrix3x3, Quaternion, Vector2};

#[test]
fn scalar_serializes_as_raw_integer() {
    let json = serde_json::to_string(&Fixed64::HALF).unwrap_or_default();
    assert_eq!(json, "2147483648");
    let back: Result<Fixed64, _> = serde_json::from_str("-4294967296");
    assert_eq!(back.ok(), Some(Fixed64::NEG_ONE));
}

#[test]
fn sentinels_survive_json() {
    for value in [Fixed64::NAN, Fixed64::POSITIVE_INFINITY, Fixed64::MIN_VALUE] {
        let json = serde_json::to_string(&value).unwrap_or_default();
        let back: Result<Fixed64, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(value));
    }
}

#[test]
fn composites_are_raw_arrays() {
    let v = Vector2::from_ints(1, -1);
    assert_eq!(
        serde_json::to_string(&v).unwrap_or_default(),
        "[4294967296,-4294967296]"
    );

    let q = Quaternion::IDENTITY;
    assert_eq!(
        serde_json::to_string(&q).unwrap_or_default(),
        "[0,0,0,4294967296]"
    );

    let m = Matrix3x3::IDENTITY;
    let json = serde_json::to_string(&m).unwrap_or_default();
    let back: Result<Matrix3x3, _> = serde_json::from_str(&json);
    assert_eq!(back.ok(), Some(m));
}

#[test]
fn wrong_arity_is_rejected() {
    let back: Result<Vector2, _> = serde_json::from_str("[1,2,3]");
    assert!(back.is_err());
}
