// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]

use lockstep_math::{Fixed64, Matrix3x3, Matrix4x4, Quaternion, Vector3, Vector4};

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

fn sample_rotation() -> Matrix3x3 {
    Matrix3x3::rotation_from_euler(f(0.3), f(0.5), f(0.7))
}

#[test]
fn rotation_inverse_is_its_transpose() {
    let m = sample_rotation();
    assert_raw_close(m.inverse().to_raw(), m.transpose().to_raw(), "inverse");
    assert_raw_close((m * m.inverse()).to_raw(), Matrix3x3::IDENTITY.to_raw(), "m·m⁻¹");
}

#[test]
fn affine_inverse_round_trips() {
    let m = Matrix4x4::translation(Vector3::new(f(1.5), f(-2.0), f(3.0)))
        * Matrix4x4::from_matrix3(&sample_rotation());
    assert_raw_close((m * m.inverse()).to_raw(), Matrix4x4::IDENTITY.to_raw(), "m·m⁻¹");
}

#[test]
fn centered_rotation_keeps_center_fixed() {
    let center = Vector3::new(f(3.0), f(-1.0), f(2.0));
    for m in [
        Matrix4x4::rotation_x_around(f(1.1), center),
        Matrix4x4::rotation_y_around(f(-0.4), center),
        Matrix4x4::rotation_z_around(f(2.5), center),
    ] {
        assert_raw_close(m.transform_point(center).to_raw(), center.to_raw(), "center");
    }
}

#[test]
fn centered_rotation_moves_other_points_around_center() {
    let center = Vector3::from_ints(1, 0, 0);
    let m = Matrix4x4::rotation_z_around(Fixed64::PI_OVER_2, center);
    // (2, 0, 0) sits one unit along +X from the center; a quarter turn about Z
    // carries it to one unit along +Y.
    let moved = m.transform_point(Vector3::from_ints(2, 0, 0));
    assert_raw_close(moved.to_raw(), Vector3::from_ints(1, 1, 0).to_raw(), "moved");
}

#[test]
fn axis_rotations_follow_right_hand_rule() {
    let quarter = Fixed64::PI_OVER_2;
    let cases = [
        (Matrix3x3::rotation_x(quarter), Vector3::UNIT_Y, Vector3::UNIT_Z),
        (Matrix3x3::rotation_y(quarter), Vector3::UNIT_Z, Vector3::UNIT_X),
        (Matrix3x3::rotation_z(quarter), Vector3::UNIT_X, Vector3::UNIT_Y),
    ];
    for (m, from, to) in cases {
        assert_raw_close((m * from).to_raw(), to.to_raw(), "axis rotation");
    }
}

#[test]
fn axis_angle_matches_quaternion_matrix() {
    let axis = Vector3::from_ints(1, 1, 0);
    let angle = f(0.8);
    assert_raw_close(
        Matrix3x3::rotation_axis_angle(axis, angle).to_raw(),
        Matrix3x3::from_quaternion(Quaternion::from_axis_angle(axis, angle)).to_raw(),
        "axis-angle",
    );
    assert_eq!(
        Matrix3x3::rotation_axis_angle(Vector3::ZERO, angle),
        Matrix3x3::IDENTITY
    );
}

#[test]
fn trs_composes_in_order() {
    let m = Matrix4x4::trs(
        Vector3::from_ints(10, 0, 0),
        Quaternion::IDENTITY,
        Vector3::from_ints(2, 3, 4),
    );
    assert_eq!(
        m.transform_point(Vector3::ONE),
        Vector3::from_ints(12, 3, 4)
    );
    assert_eq!(m.translation_part(), Vector3::from_ints(10, 0, 0));
    assert_eq!(m.to_matrix3(), Matrix3x3::scale(Vector3::from_ints(2, 3, 4)));
}

#[test]
fn look_at_places_and_orients() {
    let eye = Vector3::from_ints(0, 0, -5);
    let m = Matrix4x4::look_at(eye, Vector3::ZERO, Vector3::UP);
    assert_eq!(m.translation_part(), eye);
    assert_eq!(m.transform_direction(Vector3::FORWARD), Vector3::FORWARD);
    assert_eq!(m.transform_point(Vector3::ZERO), eye);

    // Degenerate: forward parallel to up keeps the identity basis.
    let degenerate = Matrix3x3::look_at(Vector3::UP, Vector3::UP);
    assert_eq!(degenerate, Matrix3x3::IDENTITY);
}

#[test]
fn homogeneous_transform_uses_w() {
    let t = Matrix4x4::translation(Vector3::from_ints(1, 2, 3));
    let p = Vector4::from_ints(1, 1, 1, 1);
    let d = Vector4::from_ints(1, 1, 1, 0);
    assert_eq!(t * p, Vector4::from_ints(2, 3, 4, 1));
    assert_eq!(t * d, d);
}

#[test]
fn raw_layout_is_row_major() {
    let m = Matrix4x4::translation(Vector3::from_ints(7, 8, 9));
    let raw = m.to_raw();
    assert_eq!(raw[3], 7_i64 << 32);
    assert_eq!(raw[7], 8_i64 << 32);
    assert_eq!(raw[11], 9_i64 << 32);
    assert_eq!(Matrix4x4::from_raw(raw), m);
    assert_eq!(m.get(0, 3), Fixed64::from_int(7));
}
