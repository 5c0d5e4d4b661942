// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]

use lockstep_math::{Fixed64, Matrix3x3, Quaternion, Vector3};
use proptest::prelude::*;

const ONE_RAW: i64 = 1 << 32;
const TOL_RAW: i64 = 16;

fn f(v: f64) -> Fixed64 {
    Fixed64::from_f64(v)
}

fn assert_raw_close<const N: usize>(got: [i64; N], want: [i64; N], what: &str) {
    for (i, (g, w)) in got.iter().zip(want.iter()).enumerate() {
        assert!(
            (g - w).abs() <= TOL_RAW,
            "{what}[{i}]: got {g}, want {w} (diff {})",
            g - w
        );
    }
}

#[test]
fn euler_matches_matrix_euler() {
    let (yaw, pitch, roll) = (f(0.3), f(0.5), f(0.7));
    let q = Quaternion::from_euler(yaw, pitch, roll);
    let m = Matrix3x3::rotation_from_euler(yaw, pitch, roll);
    assert_raw_close(q.to_matrix3().to_raw(), m.to_raw(), "to_matrix3");
    assert_raw_close(Quaternion::from_matrix3(&m).to_raw(), q.to_raw(), "from_matrix3");
}

#[test]
fn rotate_vector_matches_matrix_transform() {
    let q = Quaternion::from_euler(f(0.3), f(0.5), f(0.7));
    let v = Vector3::new(f(1.0), f(2.0), f(3.0));
    assert_raw_close(q.rotate_vector(v).to_raw(), (q.to_matrix3() * v).to_raw(), "rotate");
    assert_eq!(q * v, q.rotate_vector(v));
}

#[test]
fn product_composes_like_matrices() {
    let a = Quaternion::from_axis_angle(Vector3::from_ints(1, 1, 0), f(0.8));
    let b = Quaternion::from_axis_angle(Vector3::from_ints(0, 1, 1), f(-1.3));
    assert_raw_close(
        (a * b).to_matrix3().to_raw(),
        (a.to_matrix3() * b.to_matrix3()).to_raw(),
        "a·b",
    );
}

#[test]
fn conjugate_and_inverse_undo_rotation() {
    let q = Quaternion::from_axis_angle(Vector3::UNIT_Z, f(1.2));
    assert_raw_close((q * q.conjugate()).to_raw(), Quaternion::IDENTITY.to_raw(), "q·q*");
    assert_raw_close((q * q.inverse()).to_raw(), Quaternion::IDENTITY.to_raw(), "q·q⁻¹");
    assert_eq!(
        Quaternion::new(Fixed64::ZERO, Fixed64::ZERO, Fixed64::ZERO, Fixed64::ZERO).inverse(),
        Quaternion::IDENTITY
    );
}

#[test]
fn slerp_endpoints() {
    let a = Quaternion::IDENTITY;
    let b = Quaternion::from_axis_angle(Vector3::UNIT_Z, Fixed64::PI_OVER_2);
    assert_eq!(a.slerp(b, Fixed64::ZERO), a);
    assert_raw_close(a.slerp(b, Fixed64::ONE).to_raw(), b.to_raw(), "t=1");
    assert_eq!(a.slerp(b, Fixed64::from_int(-3)), a);

    let half = a.slerp(b, Fixed64::HALF);
    let expected = Quaternion::from_axis_angle(Vector3::UNIT_Z, Fixed64::PI / Fixed64::from_int(4));
    assert_raw_close(half.to_raw(), expected.to_raw(), "t=1/2");
}

#[test]
fn slerp_of_nearly_equal_inputs_falls_back_to_lerp() {
    let a = Quaternion::from_axis_angle(Vector3::UNIT_Y, f(0.5));
    let b = Quaternion::from_axis_angle(Vector3::UNIT_Y, f(0.5) + Fixed64::from_raw(8));
    let mid = a.slerp(b, Fixed64::HALF);
    assert_eq!(mid, a.lerp(b, Fixed64::HALF));
    assert!((mid.length().raw() - ONE_RAW).abs() <= 4);
}

#[test]
fn slerp_takes_the_short_way() {
    let a = Quaternion::from_axis_angle(Vector3::UNIT_X, f(0.2));
    let b = -Quaternion::from_axis_angle(Vector3::UNIT_X, f(0.6));
    let mid = a.slerp(b, Fixed64::HALF);
    let expected = Quaternion::from_axis_angle(Vector3::UNIT_X, f(0.4));
    assert_raw_close(mid.to_raw(), expected.to_raw(), "short arc");
}

#[test]
fn look_and_from_to_rotations() {
    let forward = Vector3::from_ints(1, 0, 1);
    let q = Quaternion::look_rotation(forward, Vector3::UP);
    assert_raw_close(
        q.rotate_vector(Vector3::FORWARD).to_raw(),
        forward.normalized().to_raw(),
        "look",
    );

    let r = Quaternion::from_to_rotation(Vector3::UNIT_X, Vector3::UNIT_Y);
    assert_raw_close(r.rotate_vector(Vector3::UNIT_X).to_raw(), Vector3::UNIT_Y.to_raw(), "from-to");

    let flip = Quaternion::from_to_rotation(Vector3::UNIT_X, -Vector3::UNIT_X);
    assert_raw_close(flip.rotate_vector(Vector3::UNIT_X).to_raw(), (-Vector3::UNIT_X).to_raw(), "anti");

    assert_eq!(
        Quaternion::from_to_rotation(Vector3::ZERO, Vector3::UNIT_X),
        Quaternion::IDENTITY
    );
}

fn unit_quaternion() -> impl Strategy<Value = Quaternion> {
    (-3000_i32..3000, -3000_i32..3000, -3000_i32..3000, -3141_i32..3141).prop_map(
        |(x, y, z, milli)| {
            Quaternion::from_axis_angle(
                Vector3::from_ints(x, y, z),
                Fixed64::from_ratio(milli, 1000),
            )
        },
    )
}

proptest! {
    #[test]
    fn slerp_output_is_unit(a in unit_quaternion(), b in unit_quaternion(), t in 0_i64..=ONE_RAW) {
        let s = a.slerp(b, Fixed64::from_raw(t));
        prop_assert!((s.length().raw() - ONE_RAW).abs() <= 8);
    }

    #[test]
    fn matrix_round_trip_preserves_rotation(q in unit_quaternion()) {
        let back = Quaternion::from_matrix3(&q.to_matrix3());
        // q and -q are the same rotation.
        let back = if back.dot(q) < Fixed64::ZERO { -back } else { back };
        for (g, w) in back.to_raw().iter().zip(q.to_raw().iter()) {
            prop_assert!((g - w).abs() <= 64, "got {g}, want {w}");
        }
    }
}
