// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::fixed64::Fixed64;
use crate::matrix::Matrix3x3;
use crate::quaternion::Quaternion;
use crate::vector::{Vector3, Vector4};

const O: Fixed64 = Fixed64::ONE;
const Z: Fixed64 = Fixed64::ZERO;

/// Row-major 4×4 affine transform.
///
/// - Element `(row, col)` lives at `row * 4 + col`; translation occupies the
///   last column (`m03`, `m13`, `m23`).
/// - Vectors are columns: `v' = M · v`. A composed transform reads right to
///   left, so [`Matrix4x4::trs`] is `T · R · S` (scale first).
///
/// # Examples
/// ```
/// use lockstep_math::{Matrix4x4, Vector3};
/// let t = Matrix4x4::translation(Vector3::from_ints(5, -3, 2));
/// let p = Vector3::from_ints(2, 4, -1);
/// assert_eq!(t.transform_point(p), Vector3::from_ints(7, 1, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix4x4 {
    data: [Fixed64; 16],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4x4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new([
        O, Z, Z, Z, //
        Z, O, Z, Z, //
        Z, Z, O, Z, //
        Z, Z, Z, O, //
    ]);

    /// The zero matrix.
    pub const ZERO: Self = Self::new([Z; 16]);

    /// Creates a matrix from row-major elements.
    pub const fn new(data: [Fixed64; 16]) -> Self {
        Self { data }
    }

    /// Creates a matrix whose rows are the given vectors.
    pub const fn from_rows(r0: Vector4, r1: Vector4, r2: Vector4, r3: Vector4) -> Self {
        Self::new([
            r0.x, r0.y, r0.z, r0.w, //
            r1.x, r1.y, r1.z, r1.w, //
            r2.x, r2.y, r2.z, r2.w, //
            r3.x, r3.y, r3.z, r3.w, //
        ])
    }

    /// Creates a matrix from raw row-major Q31.32 elements.
    pub fn from_raw(raw: [i64; 16]) -> Self {
        Self::new(raw.map(Fixed64::from_raw))
    }

    /// Returns the raw row-major Q31.32 elements.
    pub fn to_raw(self) -> [i64; 16] {
        self.data.map(Fixed64::raw)
    }

    /// Returns the row-major elements.
    pub const fn to_array(self) -> [Fixed64; 16] {
        self.data
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below 4.
    pub fn get(&self, row: usize, col: usize) -> Fixed64 {
        assert!(row < 4 && col < 4, "matrix index ({row}, {col}) out of range");
        self.data[row * 4 + col]
    }

    fn at(&self, row: usize, col: usize) -> Fixed64 {
        self.data[row * 4 + col]
    }

    /// Embeds a 3×3 rotation/scale with zero translation.
    pub fn from_matrix3(m: &Matrix3x3) -> Self {
        let mut out = Self::IDENTITY.data;
        for row in 0..3 {
            for col in 0..3 {
                out[row * 4 + col] = m.get(row, col);
            }
        }
        Self::new(out)
    }

    /// Upper-left 3×3 block (rotation and scale).
    pub fn to_matrix3(&self) -> Matrix3x3 {
        Matrix3x3::new([
            self.at(0, 0),
            self.at(0, 1),
            self.at(0, 2),
            self.at(1, 0),
            self.at(1, 1),
            self.at(1, 2),
            self.at(2, 0),
            self.at(2, 1),
            self.at(2, 2),
        ])
    }

    /// Translation column.
    pub fn translation_part(&self) -> Vector3 {
        Vector3::new(self.at(0, 3), self.at(1, 3), self.at(2, 3))
    }

    /// Pure translation.
    pub const fn translation(offset: Vector3) -> Self {
        Self::new([
            O, Z, Z, offset.x, //
            Z, O, Z, offset.y, //
            Z, Z, O, offset.z, //
            Z, Z, Z, O, //
        ])
    }

    /// Non-uniform scale.
    pub const fn scale(scale: Vector3) -> Self {
        Self::new([
            scale.x, Z, Z, Z, //
            Z, scale.y, Z, Z, //
            Z, Z, scale.z, Z, //
            Z, Z, Z, O, //
        ])
    }

    /// Rotation about +X by `angle` radians.
    pub fn rotation_x(angle: Fixed64) -> Self {
        Self::from_matrix3(&Matrix3x3::rotation_x(angle))
    }

    /// Rotation about +Y by `angle` radians.
    pub fn rotation_y(angle: Fixed64) -> Self {
        Self::from_matrix3(&Matrix3x3::rotation_y(angle))
    }

    /// Rotation about +Z by `angle` radians.
    pub fn rotation_z(angle: Fixed64) -> Self {
        Self::from_matrix3(&Matrix3x3::rotation_z(angle))
    }

    /// Rotation by `angle` radians about `axis`; identity for a degenerate axis.
    pub fn rotation_axis_angle(axis: Vector3, angle: Fixed64) -> Self {
        Self::from_matrix3(&Matrix3x3::rotation_axis_angle(axis, angle))
    }

    /// Euler rotation `R_y(yaw) · R_x(pitch) · R_z(roll)`.
    pub fn rotation_from_euler(yaw: Fixed64, pitch: Fixed64, roll: Fixed64) -> Self {
        Self::from_matrix3(&Matrix3x3::rotation_from_euler(yaw, pitch, roll))
    }

    /// Rotation matrix of a quaternion (normalized first).
    pub fn from_quaternion(q: Quaternion) -> Self {
        Self::from_matrix3(&q.to_matrix3())
    }

    /// Applies `rotation` about `center` instead of the origin:
    /// `T(center) · R · T(-center)`. Points at `center` stay fixed.
    pub fn rotation_around(center: Vector3, rotation: &Matrix3x3) -> Self {
        Self::translation(center)
            .multiply(&Self::from_matrix3(rotation))
            .multiply(&Self::translation(-center))
    }

    /// Rotation about an X-parallel axis through `center`.
    pub fn rotation_x_around(angle: Fixed64, center: Vector3) -> Self {
        Self::rotation_around(center, &Matrix3x3::rotation_x(angle))
    }

    /// Rotation about a Y-parallel axis through `center`.
    pub fn rotation_y_around(angle: Fixed64, center: Vector3) -> Self {
        Self::rotation_around(center, &Matrix3x3::rotation_y(angle))
    }

    /// Rotation about a Z-parallel axis through `center`.
    pub fn rotation_z_around(angle: Fixed64, center: Vector3) -> Self {
        Self::rotation_around(center, &Matrix3x3::rotation_z(angle))
    }

    /// Scale about `center`: `T(center) · S · T(-center)`.
    pub fn scale_around(scale: Vector3, center: Vector3) -> Self {
        Self::translation(center)
            .multiply(&Self::scale(scale))
            .multiply(&Self::translation(-center))
    }

    /// Translate · Rotate · Scale.
    pub fn trs(translation: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self::translation(translation)
            .multiply(&Self::from_quaternion(rotation))
            .multiply(&Self::scale(scale))
    }

    /// Object-to-world transform placed at `position` with +Z facing
    /// `target`; see [`Matrix3x3::look_at`] for the basis and degenerate cases.
    pub fn look_at(position: Vector3, target: Vector3, up: Vector3) -> Self {
        let mut out = Self::from_matrix3(&Matrix3x3::look_at(target - position, up));
        out.data[3] = position.x;
        out.data[7] = position.y;
        out.data[11] = position.z;
        out
    }

    /// Matrix product `self · rhs`.
    #[must_use]
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = [Z; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = Z;
                for k in 0..4 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                out[row * 4 + col] = sum;
            }
        }
        Self::new(out)
    }

    /// Transforms a point (`w = 1`, no perspective divide).
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.transform(Vector4::from_vector3(point, O)).xyz()
    }

    /// Transforms a direction (`w = 0`); translation has no effect.
    pub fn transform_direction(&self, direction: Vector3) -> Vector3 {
        self.transform(Vector4::from_vector3(direction, Z)).xyz()
    }

    /// `M · v` for a homogeneous vector.
    pub fn transform(&self, v: Vector4) -> Vector4 {
        let row = |r: usize| {
            self.at(r, 0) * v.x + self.at(r, 1) * v.y + self.at(r, 2) * v.z + self.at(r, 3) * v.w
        };
        Vector4::new(row(0), row(1), row(2), row(3))
    }

    /// Transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = [Z; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[col * 4 + row] = self.at(row, col);
            }
        }
        Self::new(out)
    }

    /// Signed cofactor `(-1)^(row+col) · det(minor(row, col))`.
    fn cofactor(&self, row: usize, col: usize) -> Fixed64 {
        let mut minor = [Z; 9];
        let mut i = 0;
        for r in (0..4).filter(|r| *r != row) {
            for c in (0..4).filter(|c| *c != col) {
                minor[i] = self.at(r, c);
                i += 1;
            }
        }
        let det = Matrix3x3::new(minor).determinant();
        if (row + col) % 2 == 0 {
            det
        } else {
            -det
        }
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> Fixed64 {
        (0..4).fold(Z, |acc, col| acc + self.at(0, col) * self.cofactor(0, col))
    }

    /// Inverse by full cofactor expansion.
    ///
    /// A singular matrix (determinant exactly zero) yields a matrix filled
    /// with [`Fixed64::POSITIVE_INFINITY`].
    #[must_use]
    pub fn inverse(&self) -> Self {
        let cofactors: [Fixed64; 16] = core::array::from_fn(|i| self.cofactor(i / 4, i % 4));
        let det = (0..4).fold(Z, |acc, col| acc + self.at(0, col) * cofactors[col]);
        if det == Z {
            return Self::new([Fixed64::POSITIVE_INFINITY; 16]);
        }
        // adjugate is the transposed cofactor matrix
        Self::new(core::array::from_fn(|i| cofactors[(i % 4) * 4 + i / 4] / det))
    }
}

impl core::ops::Mul for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl core::ops::Mul<Vector4> for Matrix4x4 {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        self.transform(rhs)
    }
}

impl From<[Fixed64; 16]> for Matrix4x4 {
    fn from(value: [Fixed64; 16]) -> Self {
        Self::new(value)
    }
}
