// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Row-major rotation/scale and affine matrices.

mod matrix3;
mod matrix4;

pub use matrix3::Matrix3x3;
pub use matrix4::Matrix4x4;
