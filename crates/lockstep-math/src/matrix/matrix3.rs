// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::fixed64::Fixed64;
use crate::quaternion::Quaternion;
use crate::vector::Vector3;

const O: Fixed64 = Fixed64::ONE;
const Z: Fixed64 = Fixed64::ZERO;

/// Row-major 3×3 matrix for rotation and scale.
///
/// - Element `(row, col)` lives at `row * 3 + col`.
/// - Vectors are columns: `v' = M · v`, so `A · B` applies `B` first.
/// - No translation; see [`crate::Matrix4x4`] for affine transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix3x3 {
    data: [Fixed64; 9],
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3x3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new([
        O, Z, Z, //
        Z, O, Z, //
        Z, Z, O, //
    ]);

    /// The zero matrix.
    pub const ZERO: Self = Self::new([Z; 9]);

    /// Creates a matrix from row-major elements.
    pub const fn new(data: [Fixed64; 9]) -> Self {
        Self { data }
    }

    /// Creates a matrix whose rows are the given vectors.
    pub const fn from_rows(r0: Vector3, r1: Vector3, r2: Vector3) -> Self {
        Self::new([r0.x, r0.y, r0.z, r1.x, r1.y, r1.z, r2.x, r2.y, r2.z])
    }

    /// Creates a matrix whose columns are the given vectors.
    pub const fn from_columns(c0: Vector3, c1: Vector3, c2: Vector3) -> Self {
        Self::new([c0.x, c1.x, c2.x, c0.y, c1.y, c2.y, c0.z, c1.z, c2.z])
    }

    /// Creates a matrix from raw row-major Q31.32 elements.
    pub fn from_raw(raw: [i64; 9]) -> Self {
        Self::new(raw.map(Fixed64::from_raw))
    }

    /// Returns the raw row-major Q31.32 elements.
    pub fn to_raw(self) -> [i64; 9] {
        self.data.map(Fixed64::raw)
    }

    /// Returns the row-major elements.
    pub const fn to_array(self) -> [Fixed64; 9] {
        self.data
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below 3.
    pub fn get(&self, row: usize, col: usize) -> Fixed64 {
        assert!(row < 3 && col < 3, "matrix index ({row}, {col}) out of range");
        self.data[row * 3 + col]
    }

    fn at(&self, row: usize, col: usize) -> Fixed64 {
        self.data[row * 3 + col]
    }

    /// Row `i` as a vector.
    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::new(self.get(i, 0), self.get(i, 1), self.get(i, 2))
    }

    /// Column `i` as a vector.
    pub fn column(&self, i: usize) -> Vector3 {
        Vector3::new(self.get(0, i), self.get(1, i), self.get(2, i))
    }

    /// Non-uniform scale.
    pub const fn scale(scale: Vector3) -> Self {
        Self::new([
            scale.x, Z, Z, //
            Z, scale.y, Z, //
            Z, Z, scale.z, //
        ])
    }

    /// Rotation about +X by `angle` radians.
    pub fn rotation_x(angle: Fixed64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            O, Z, Z, //
            Z, c, -s, //
            Z, s, c, //
        ])
    }

    /// Rotation about +Y by `angle` radians.
    pub fn rotation_y(angle: Fixed64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c, Z, s, //
            Z, O, Z, //
            -s, Z, c, //
        ])
    }

    /// Rotation about +Z by `angle` radians.
    pub fn rotation_z(angle: Fixed64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c, -s, Z, //
            s, c, Z, //
            Z, Z, O, //
        ])
    }

    /// Rotation by `angle` radians about `axis` (Rodrigues' formula).
    ///
    /// The axis is normalized internally; a degenerate axis yields the
    /// identity.
    pub fn rotation_axis_angle(axis: Vector3, angle: Fixed64) -> Self {
        let u = axis.normalized();
        if u == Vector3::ZERO {
            return Self::IDENTITY;
        }
        let (s, c) = angle.sin_cos();
        let t = O - c;
        let (x, y, z) = (u.x, u.y, u.z);
        Self::new([
            t * x * x + c,
            t * x * y - s * z,
            t * x * z + s * y,
            t * x * y + s * z,
            t * y * y + c,
            t * y * z - s * x,
            t * x * z - s * y,
            t * y * z + s * x,
            t * z * z + c,
        ])
    }

    /// Euler rotation `R_y(yaw) · R_x(pitch) · R_z(roll)`.
    pub fn rotation_from_euler(yaw: Fixed64, pitch: Fixed64, roll: Fixed64) -> Self {
        Self::rotation_y(yaw)
            .multiply(&Self::rotation_x(pitch))
            .multiply(&Self::rotation_z(roll))
    }

    /// Rotation taking +Z to `forward`, with +Y as close to `up` as possible.
    ///
    /// Builds the basis `z = normalize(forward)`, `x = normalize(up × z)`,
    /// `y = z × x` and places it in the columns. Returns the identity when
    /// `forward` is degenerate or parallel to `up`.
    pub fn look_at(forward: Vector3, up: Vector3) -> Self {
        let z = forward.normalized();
        if z == Vector3::ZERO {
            return Self::IDENTITY;
        }
        let x = up.cross(z).normalized();
        if x == Vector3::ZERO {
            return Self::IDENTITY;
        }
        let y = z.cross(x);
        Self::from_columns(x, y, z)
    }

    /// Rotation matrix of a quaternion; see [`Quaternion::to_matrix3`].
    pub fn from_quaternion(q: Quaternion) -> Self {
        q.to_matrix3()
    }

    /// Matrix product `self · rhs`.
    #[must_use]
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = [Z; 9];
        for row in 0..3 {
            for col in 0..3 {
                let mut sum = Z;
                for k in 0..3 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                out[row * 3 + col] = sum;
            }
        }
        Self::new(out)
    }

    /// `M · v`.
    pub fn transform(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.at(0, 0) * v.x + self.at(0, 1) * v.y + self.at(0, 2) * v.z,
            self.at(1, 0) * v.x + self.at(1, 1) * v.y + self.at(1, 2) * v.z,
            self.at(2, 0) * v.x + self.at(2, 1) * v.y + self.at(2, 2) * v.z,
        )
    }

    /// Transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_columns(self.row(0), self.row(1), self.row(2))
    }

    fn cofactor(&self, row: usize, col: usize) -> Fixed64 {
        let (r0, r1) = match row {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };
        let (c0, c1) = match col {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };
        let minor = self.at(r0, c0) * self.at(r1, c1) - self.at(r0, c1) * self.at(r1, c0);
        if (row + col) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    /// Determinant by expansion along the first row.
    pub fn determinant(&self) -> Fixed64 {
        (0..3).fold(Z, |acc, col| acc + self.at(0, col) * self.cofactor(0, col))
    }

    /// Inverse as `adjugate / determinant`.
    ///
    /// A singular matrix (determinant exactly zero) yields a matrix filled
    /// with [`Fixed64::POSITIVE_INFINITY`].
    #[must_use]
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det == Z {
            return Self::new([Fixed64::POSITIVE_INFINITY; 9]);
        }
        let mut out = [Z; 9];
        for row in 0..3 {
            for col in 0..3 {
                // adjugate is the transposed cofactor matrix
                out[row * 3 + col] = self.cofactor(col, row) / det;
            }
        }
        Self::new(out)
    }
}

impl core::ops::Mul for Matrix3x3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl core::ops::Mul<Vector3> for Matrix3x3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform(rhs)
    }
}

impl From<[Fixed64; 9]> for Matrix3x3 {
    fn from(value: [Fixed64; 9]) -> Self {
        Self::new(value)
    }
}
