// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use super::impl_vector;
use crate::fixed64::Fixed64;

/// 2D vector in Q31.32 fixed point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vector2 {
    /// X component.
    pub x: Fixed64,
    /// Y component.
    pub y: Fixed64,
}

impl_vector!(Vector2, 2, [x, y]);

impl Vector2 {
    /// `(1, 0)`.
    pub const UNIT_X: Self = Self::new(Fixed64::ONE, Fixed64::ZERO);
    /// `(0, 1)`.
    pub const UNIT_Y: Self = Self::new(Fixed64::ZERO, Fixed64::ONE);

    /// Creates a vector from integer components.
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self::new(Fixed64::from_int(x), Fixed64::from_int(y))
    }

    /// Z component of the 3D cross product of `(self, 0)` and `(rhs, 0)`.
    pub fn cross(self, rhs: Self) -> Fixed64 {
        self.x * rhs.y - self.y * rhs.x
    }

    /// Counter-clockwise perpendicular, `(-y, x)`.
    #[must_use]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotates counter-clockwise by `angle` radians.
    #[must_use]
    pub fn rotate(self, angle: Fixed64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}
