// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use super::impl_vector;
use crate::fixed64::Fixed64;
use crate::vector::Vector3;

/// 4D vector in Q31.32 fixed point; also the homogeneous form of a
/// [`Vector3`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vector4 {
    /// X component.
    pub x: Fixed64,
    /// Y component.
    pub y: Fixed64,
    /// Z component.
    pub z: Fixed64,
    /// W component.
    pub w: Fixed64,
}

impl_vector!(Vector4, 4, [x, y, z, w]);

impl Vector4 {
    /// Creates a vector from integer components.
    pub const fn from_ints(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self::new(
            Fixed64::from_int(x),
            Fixed64::from_int(y),
            Fixed64::from_int(z),
            Fixed64::from_int(w),
        )
    }

    /// Extends a 3D vector with the given `w`.
    pub const fn from_vector3(v: Vector3, w: Fixed64) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Drops `w`.
    pub const fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}
