// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Optional serde support: every value is its raw Q31.32 integer(s), the
//! same numbers [`crate::wire`] puts on the byte stream. Floats never appear.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Fixed64, Matrix3x3, Matrix4x4, Quaternion, Vector2, Vector3, Vector4};

impl Serialize for Fixed64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.raw())
    }
}

impl<'de> Deserialize<'de> for Fixed64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_raw)
    }
}

macro_rules! impl_serde_raw {
    ($($ty:ty => $n:literal),+ $(,)?) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.to_raw().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <[i64; $n]>::deserialize(deserializer).map(<$ty>::from_raw)
            }
        }
    )+};
}

impl_serde_raw! {
    Vector2 => 2,
    Vector3 => 3,
    Vector4 => 4,
    Quaternion => 4,
    Matrix3x3 => 9,
    Matrix4x4 => 16,
}
