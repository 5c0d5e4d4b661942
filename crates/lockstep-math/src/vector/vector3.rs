// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use super::impl_vector;
use crate::fixed64::Fixed64;

/// 3D vector in Q31.32 fixed point.
///
/// * Components may represent either points or directions depending on the
///   calling context.
/// * Use [`crate::Matrix4x4::transform_point`] for points (homogeneous
///   `w = 1`) and [`crate::Matrix4x4::transform_direction`] for directions
///   (homogeneous `w = 0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vector3 {
    /// X component.
    pub x: Fixed64,
    /// Y component.
    pub y: Fixed64,
    /// Z component.
    pub z: Fixed64,
}

impl_vector!(Vector3, 3, [x, y, z]);

impl Vector3 {
    /// Unit vector along +X.
    pub const UNIT_X: Self = Self::new(Fixed64::ONE, Fixed64::ZERO, Fixed64::ZERO);
    /// Unit vector along +Y.
    pub const UNIT_Y: Self = Self::new(Fixed64::ZERO, Fixed64::ONE, Fixed64::ZERO);
    /// Unit vector along +Z.
    pub const UNIT_Z: Self = Self::new(Fixed64::ZERO, Fixed64::ZERO, Fixed64::ONE);
    /// `+Y`, the default up direction for look-at constructions.
    pub const UP: Self = Self::UNIT_Y;
    /// `+Z`, the default forward direction for look-at constructions.
    pub const FORWARD: Self = Self::UNIT_Z;

    /// Creates a vector from integer components.
    pub const fn from_ints(x: i32, y: i32, z: i32) -> Self {
        Self::new(Fixed64::from_int(x), Fixed64::from_int(y), Fixed64::from_int(z))
    }

    /// Cross product (right-handed).
    #[must_use]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }
}
