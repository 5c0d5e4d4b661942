// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! lockstep-math: deterministic Q31.32 fixed-point math for lockstep simulation.
//!
//! Every operation in this crate is built from integer primitives. Identical
//! inputs produce bit-identical outputs on every platform, build profile and
//! thread, so peers running the same simulation step converge to the same
//! state without exchanging anything but inputs.
//!
//! Layering, leaves first:
//! - [`Fixed64`]: the scalar, its arithmetic core and transcendental functions.
//! - [`Vector2`], [`Vector3`], [`Vector4`]: componentwise geometry.
//! - [`Matrix3x3`], [`Matrix4x4`], [`Quaternion`]: rotations and affine transforms.
//! - [`DeterministicRandom`]: seeded MT19937 with fixed-point outputs.
//! - [`wire`]: raw-integer byte codec and state digests for desync detection.
//!
//! Overflow and division by zero never fault; they saturate to documented
//! sentinels. Only domain errors (negative `sqrt`, `acos` outside `[-1, 1]`,
//! non-positive `log2`) are hard failures, with `try_*` siblings returning
//! [`MathError`].
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

mod arith;
mod convert;
mod error;
mod exp_log;
mod fixed64;
mod inverse_trig;
mod lut;
mod matrix;
mod quaternion;
mod random;
#[cfg(feature = "serde")]
mod serde_impls;
mod trig;
mod vector;
/// Raw-integer byte codec and BLAKE3 state digests.
pub mod wire;

/// Error types for domain faults, decimal parsing and wire decoding.
pub use error::{MathError, ParseFixedError, WireError};
/// The Q31.32 scalar.
pub use fixed64::Fixed64;
/// Explicit init-before-use hook for the trig lookup tables.
pub use lut::{init_tables, LUT_SIZE};
/// Rotation/scale and affine matrices (row-major).
pub use matrix::{Matrix3x3, Matrix4x4};
/// Rotation quaternion.
pub use quaternion::Quaternion;
/// Quadrant folding used by the sine lookup.
pub use trig::QuadrantFold;
/// Seeded MT19937 generator.
pub use random::DeterministicRandom;
/// Fixed-point vectors.
pub use vector::{Vector2, Vector3, Vector4};
