// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::arith;
use crate::fixed64::Fixed64;
use crate::matrix::Matrix3x3;
use crate::vector::Vector3;

/// Rotation quaternion `(x, y, z, w)` with `w` as the scalar part.
///
/// * All angles are in radians.
/// * Unit length is never enforced automatically; constructors that build a
///   rotation return unit quaternions, arithmetic on them does not renormalize.
/// * `a * b` is the Hamilton product. Rotating by it applies `b` first, then
///   `a`, matching `Matrix3x3::from_quaternion(a) * Matrix3x3::from_quaternion(b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quaternion {
    /// X component of the vector part.
    pub x: Fixed64,
    /// Y component of the vector part.
    pub y: Fixed64,
    /// Z component of the vector part.
    pub z: Fixed64,
    /// Scalar part.
    pub w: Fixed64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(Fixed64::ZERO, Fixed64::ZERO, Fixed64::ZERO, Fixed64::ONE);

    /// Creates a quaternion from components.
    pub const fn new(x: Fixed64, y: Fixed64, z: Fixed64, w: Fixed64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion from raw Q31.32 components `[x, y, z, w]`.
    pub const fn from_raw(raw: [i64; 4]) -> Self {
        Self::new(
            Fixed64::from_raw(raw[0]),
            Fixed64::from_raw(raw[1]),
            Fixed64::from_raw(raw[2]),
            Fixed64::from_raw(raw[3]),
        )
    }

    /// Returns the raw Q31.32 components `[x, y, z, w]`.
    pub const fn to_raw(self) -> [i64; 4] {
        [self.x.raw(), self.y.raw(), self.z.raw(), self.w.raw()]
    }

    /// Vector part.
    pub const fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// Returns the identity when the axis normalizes to zero.
    pub fn from_axis_angle(axis: Vector3, angle: Fixed64) -> Self {
        let axis = axis.normalized();
        if axis == Vector3::ZERO {
            return Self::IDENTITY;
        }
        let (sin_half, cos_half) = (angle * Fixed64::HALF).sin_cos();
        let v = axis * sin_half;
        Self::new(v.x, v.y, v.z, cos_half)
    }

    /// Euler rotation `q_y(yaw) · q_x(pitch) · q_z(roll)`, the same order as
    /// [`Matrix3x3::rotation_from_euler`].
    pub fn from_euler(yaw: Fixed64, pitch: Fixed64, roll: Fixed64) -> Self {
        Self::from_axis_angle(Vector3::UNIT_Y, yaw)
            * Self::from_axis_angle(Vector3::UNIT_X, pitch)
            * Self::from_axis_angle(Vector3::UNIT_Z, roll)
    }

    /// Rotation taking +Z to `forward` with +Y toward `up`.
    pub fn look_rotation(forward: Vector3, up: Vector3) -> Self {
        Self::from_matrix3(&Matrix3x3::look_at(forward, up))
    }

    /// Shortest rotation taking direction `from` onto direction `to`.
    ///
    /// Degenerate inputs give the identity. Opposite directions rotate by π
    /// about an axis orthogonal to `from`.
    pub fn from_to_rotation(from: Vector3, to: Vector3) -> Self {
        let a = from.normalized();
        let b = to.normalized();
        if a == Vector3::ZERO || b == Vector3::ZERO {
            return Self::IDENTITY;
        }
        let d = a.dot(b);
        if d >= Fixed64::ONE - Fixed64::EPSILON {
            return Self::IDENTITY;
        }
        if d <= Fixed64::EPSILON - Fixed64::ONE {
            let mut axis = Vector3::UNIT_X.cross(a);
            if axis.length_squared() <= Fixed64::EPSILON {
                axis = Vector3::UNIT_Y.cross(a);
            }
            return Self::from_axis_angle(axis, Fixed64::PI);
        }
        let axis = a.cross(b);
        Self::new(axis.x, axis.y, axis.z, Fixed64::ONE + d).normalized()
    }

    /// Quaternion of a rotation matrix.
    ///
    /// Uses the trace when it is positive, otherwise the branch of the
    /// largest diagonal element, so the divisor never approaches zero.
    pub fn from_matrix3(m: &Matrix3x3) -> Self {
        let (m00, m01, m02) = (m.get(0, 0), m.get(0, 1), m.get(0, 2));
        let (m10, m11, m12) = (m.get(1, 0), m.get(1, 1), m.get(1, 2));
        let (m20, m21, m22) = (m.get(2, 0), m.get(2, 1), m.get(2, 2));
        let one = Fixed64::ONE;
        let two = Fixed64::TWO;
        let quarter = Fixed64::from_ratio(1, 4);

        let trace = m00 + m11 + m22;
        let q = if trace > Fixed64::ZERO {
            let s = (trace + one).sqrt() * two;
            Self::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, quarter * s)
        } else if m00 > m11 && m00 > m22 {
            let s = (one + m00 - m11 - m22).max(Fixed64::ZERO).sqrt() * two;
            Self::new(quarter * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = (one + m11 - m00 - m22).max(Fixed64::ZERO).sqrt() * two;
            Self::new((m01 + m10) / s, quarter * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = (one + m22 - m00 - m11).max(Fixed64::ZERO).sqrt() * two;
            Self::new((m02 + m20) / s, (m12 + m21) / s, quarter * s, (m10 - m01) / s)
        };
        q.normalized()
    }

    /// Rotation matrix (the quaternion is normalized first).
    pub fn to_matrix3(self) -> Matrix3x3 {
        let q = self.normalized();
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let one = Fixed64::ONE;
        let two = Fixed64::TWO;

        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Matrix3x3::new([
            one - two * (yy + zz),
            two * (xy - wz),
            two * (xz + wy),
            two * (xy + wz),
            one - two * (xx + zz),
            two * (yz - wx),
            two * (xz - wy),
            two * (yz + wx),
            one - two * (xx + yy),
        ])
    }

    /// Four-component dot product.
    pub fn dot(self, rhs: Self) -> Fixed64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Squared norm; saturating, so never negative.
    pub fn length_squared(self) -> Fixed64 {
        self.x
            .saturating_mul(self.x)
            .saturating_add(self.y.saturating_mul(self.y))
            .saturating_add(self.z.saturating_mul(self.z))
            .saturating_add(self.w.saturating_mul(self.w))
    }

    /// Norm.
    pub fn length(self) -> Fixed64 {
        Fixed64::from_raw(arith::hypot(&self.to_raw()))
    }

    /// Unit quaternion in the same direction; the identity when the norm is
    /// at most `Fixed64::EPSILON`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= Fixed64::EPSILON {
            return Self::IDENTITY;
        }
        Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    /// In-place [`Quaternion::normalized`].
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// `(-x, -y, -z, w)`.
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse, `conjugate / |q|²`; the identity for a zero
    /// quaternion.
    #[must_use]
    pub fn inverse(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq == Fixed64::ZERO {
            return Self::IDENTITY;
        }
        let c = self.conjugate();
        Self::new(c.x / len_sq, c.y / len_sq, c.z / len_sq, c.w / len_sq)
    }

    /// Rotates `v` by this (unit) quaternion.
    pub fn rotate_vector(self, v: Vector3) -> Vector3 {
        // v' = v + 2w(q × v) + 2 q × (q × v)
        let q = self.xyz();
        let t = q.cross(v) * Fixed64::TWO;
        v + t * self.w + q.cross(t)
    }

    /// Angle in `[0, π]` of the rotation taking `self` to `other`.
    pub fn angle_between(self, other: Self) -> Fixed64 {
        let d = self.dot(other).abs().min(Fixed64::ONE);
        d.acos() * Fixed64::TWO
    }

    /// Componentwise interpolation along the shorter arc, renormalized.
    /// `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, to: Self, t: Fixed64) -> Self {
        let t = t.clamp01();
        let to = if self.dot(to) < Fixed64::ZERO { -to } else { to };
        self.lerp_components(to, t).normalized()
    }

    fn lerp_components(self, to: Self, t: Fixed64) -> Self {
        Self::new(
            self.x.lerp(to.x, t),
            self.y.lerp(to.y, t),
            self.z.lerp(to.z, t),
            self.w.lerp(to.w, t),
        )
    }

    /// Spherical interpolation along the shorter arc. `t` is clamped to
    /// `[0, 1]` and the result is always renormalized.
    ///
    /// When the inputs are nearly parallel (`|dot| > 1 - EPSILON`) the sine
    /// weights would divide by a vanishing `sin θ`; that case falls back to
    /// [`Quaternion::lerp`].
    #[must_use]
    pub fn slerp(self, to: Self, t: Fixed64) -> Self {
        let t = t.clamp01();
        let mut dot = self.dot(to);
        let mut to = to;
        if dot < Fixed64::ZERO {
            to = -to;
            dot = -dot;
        }
        if dot > Fixed64::ONE - Fixed64::EPSILON {
            return self.lerp_components(to, t).normalized();
        }

        let theta = dot.min(Fixed64::ONE).acos();
        let sin_theta = theta.sin();
        let weight_from = ((Fixed64::ONE - t) * theta).sin() / sin_theta;
        let weight_to = (t * theta).sin() / sin_theta;
        Self::new(
            self.x * weight_from + to.x * weight_to,
            self.y * weight_from + to.y * weight_to,
            self.z * weight_from + to.z * weight_to,
            self.w * weight_from + to.w * weight_to,
        )
        .normalized()
    }
}

impl core::ops::Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let (bx, by, bz, bw) = (rhs.x, rhs.y, rhs.z, rhs.w);
        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }
}

impl core::ops::Mul<Vector3> for Quaternion {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.rotate_vector(rhs)
    }
}

impl core::ops::Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

/// Converts `[x, y, z, w]` verbatim; normalization is not enforced.
impl From<[Fixed64; 4]> for Quaternion {
    fn from(value: [Fixed64; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_neutral() {
        let q = Quaternion::from_axis_angle(Vector3::UNIT_Y, Fixed64::ONE);
        assert_eq!(q * Quaternion::IDENTITY, q);
        assert_eq!(Quaternion::IDENTITY * q, q);
    }

    #[test]
    fn zero_axis_gives_identity() {
        assert_eq!(
            Quaternion::from_axis_angle(Vector3::ZERO, Fixed64::ONE),
            Quaternion::IDENTITY
        );
    }

    #[test]
    fn normalize_of_zero_is_identity() {
        let mut q = Quaternion::new(Fixed64::ZERO, Fixed64::ZERO, Fixed64::ZERO, Fixed64::ZERO);
        q.normalize();
        assert_eq!(q, Quaternion::IDENTITY);
    }

    #[test]
    fn identity_matrix_round_trip() {
        assert_eq!(Quaternion::IDENTITY.to_matrix3(), Matrix3x3::IDENTITY);
        assert_eq!(
            Quaternion::from_matrix3(&Matrix3x3::IDENTITY),
            Quaternion::IDENTITY
        );
    }
}
