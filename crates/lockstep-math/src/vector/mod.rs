// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-point vectors.
//!
//! Every vector type is a plain `Copy` value with public components. Shared
//! behaviour (operators, dot, length, normalize, lerp) is generated by
//! `impl_vector!` so the three dimensions cannot drift apart.
//!
//! Normalization policy: a vector whose length is at most
//! [`Fixed64::EPSILON`](crate::Fixed64::EPSILON) normalizes to the zero
//! vector. It never faults and never divides by a near-zero length.

/// Generates constructors, raw conversion, operators and the shared
/// geometric methods for a vector struct with the given component fields.
macro_rules! impl_vector {
    ($name:ident, $n:literal, [$($field:ident),+]) => {
        impl $name {
            /// All components zero.
            pub const ZERO: Self = Self { $($field: $crate::Fixed64::ZERO),+ };
            /// All components one.
            pub const ONE: Self = Self { $($field: $crate::Fixed64::ONE),+ };

            /// Creates a vector from components.
            pub const fn new($($field: $crate::Fixed64),+) -> Self {
                Self { $($field),+ }
            }

            /// Creates a vector from raw Q31.32 components.
            pub const fn from_raw(raw: [i64; $n]) -> Self {
                let [$($field),+] = raw;
                Self { $($field: $crate::Fixed64::from_raw($field)),+ }
            }

            /// Returns the raw Q31.32 components.
            pub const fn to_raw(self) -> [i64; $n] {
                [$(self.$field.raw()),+]
            }

            /// Returns the components as an array.
            pub const fn to_array(self) -> [$crate::Fixed64; $n] {
                [$(self.$field),+]
            }

            /// Dot product.
            pub fn dot(self, rhs: Self) -> $crate::Fixed64 {
                $crate::Fixed64::ZERO $(+ self.$field * rhs.$field)+
            }

            /// Squared length. Saturates instead of wrapping, so the result
            /// is never negative.
            pub fn length_squared(self) -> $crate::Fixed64 {
                $crate::Fixed64::ZERO
                    $(.saturating_add(self.$field.saturating_mul(self.$field)))+
            }

            /// Euclidean length.
            ///
            /// Computed from the exact sum of squares, so it stays accurate
            /// after [`Self::length_squared`] has saturated.
            pub fn length(self) -> $crate::Fixed64 {
                $crate::Fixed64::from_raw($crate::arith::hypot(&self.to_raw()))
            }

            /// Unit vector in the same direction, or [`Self::ZERO`] when the
            /// length is at most `Fixed64::EPSILON`.
            #[must_use]
            pub fn normalized(self) -> Self {
                let len = self.length();
                if len <= $crate::Fixed64::EPSILON {
                    return Self::ZERO;
                }
                Self { $($field: self.$field / len),+ }
            }

            /// In-place [`Self::normalized`].
            pub fn normalize(&mut self) {
                *self = self.normalized();
            }

            /// In-place negation.
            pub fn negate(&mut self) {
                *self = -*self;
            }

            /// Componentwise product.
            #[must_use]
            pub fn component_mul(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }

            /// Componentwise minimum.
            #[must_use]
            pub fn min(self, rhs: Self) -> Self {
                Self { $($field: core::cmp::min(self.$field, rhs.$field)),+ }
            }

            /// Componentwise maximum.
            #[must_use]
            pub fn max(self, rhs: Self) -> Self {
                Self { $($field: core::cmp::max(self.$field, rhs.$field)),+ }
            }

            /// Interpolates toward `to`, clamping `t` to `[0, 1]`.
            #[must_use]
            pub fn lerp(self, to: Self, t: $crate::Fixed64) -> Self {
                self.lerp_unclamped(to, t.clamp01())
            }

            /// Interpolates toward `to` without clamping `t`.
            #[must_use]
            pub fn lerp_unclamped(self, to: Self, t: $crate::Fixed64) -> Self {
                Self { $($field: self.$field.lerp(to.$field, t)),+ }
            }

            /// Distance between two points.
            pub fn distance(self, other: Self) -> $crate::Fixed64 {
                (self - other).length()
            }

            /// Squared distance between two points.
            pub fn distance_squared(self, other: Self) -> $crate::Fixed64 {
                (self - other).length_squared()
            }

            /// Unsigned angle between two vectors in `[0, π]`; zero when either
            /// is degenerate.
            pub fn angle_between(self, other: Self) -> $crate::Fixed64 {
                let denominator = self.length().saturating_mul(other.length());
                if denominator <= $crate::Fixed64::EPSILON {
                    return $crate::Fixed64::ZERO;
                }
                let cos = (self.dot(other) / denominator)
                    .clamp($crate::Fixed64::NEG_ONE, $crate::Fixed64::ONE);
                cos.acos()
            }

            /// Projection of `self` onto `onto`; zero when `onto` is zero.
            #[must_use]
            pub fn project(self, onto: Self) -> Self {
                let denominator = onto.length_squared();
                if denominator == $crate::Fixed64::ZERO {
                    return Self::ZERO;
                }
                onto * (self.dot(onto) / denominator)
            }

            /// Reflection of `self` about the plane with unit `normal`.
            #[must_use]
            pub fn reflect(self, normal: Self) -> Self {
                self - normal * ($crate::Fixed64::TWO * self.dot(normal))
            }
        }

        impl core::ops::Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl core::ops::Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl core::ops::Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl core::ops::Mul<$crate::Fixed64> for $name {
            type Output = Self;

            fn mul(self, rhs: $crate::Fixed64) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl core::ops::Mul<$name> for $crate::Fixed64 {
            type Output = $name;

            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl core::ops::Div<$crate::Fixed64> for $name {
            type Output = Self;

            fn div(self, rhs: $crate::Fixed64) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl core::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl core::ops::SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl core::ops::MulAssign<$crate::Fixed64> for $name {
            fn mul_assign(&mut self, rhs: $crate::Fixed64) {
                *self = *self * rhs;
            }
        }

        impl core::ops::DivAssign<$crate::Fixed64> for $name {
            fn div_assign(&mut self, rhs: $crate::Fixed64) {
                *self = *self / rhs;
            }
        }

        impl From<[$crate::Fixed64; $n]> for $name {
            fn from(value: [$crate::Fixed64; $n]) -> Self {
                let [$($field),+] = value;
                Self { $($field),+ }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let parts = [$(self.$field),+];
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    core::fmt::Display::fmt(part, f)?;
                }
                f.write_str(")")
            }
        }
    };
}

pub(crate) use impl_vector;

mod vector2;
mod vector3;
mod vector4;

pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
