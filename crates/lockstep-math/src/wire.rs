// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Raw-integer byte codec and state digests.
//!
//! Every value travels as its raw Q31.32 integers, little-endian `i64`, in
//! component order (`x, y, z, w` for vectors and quaternions, row-major for
//! matrices). Two peers that exchange these bytes and run the same
//! operations converge to the same state; [`state_digest`] lets them check
//! that cheaply once per tick.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::WireError;
use crate::{Fixed64, Matrix3x3, Matrix4x4, Quaternion, Vector2, Vector3, Vector4};

/// Domain-separation prefix for [`StateHasher`] digests.
pub const STATE_DIGEST_V1: &[u8] = b"lockstep-math:state:v1\0";

/// 32-byte BLAKE3 digest.
pub type Digest = [u8; 32];

const RAW_BYTES: usize = core::mem::size_of::<i64>();

/// Types with a fixed-size raw-integer byte form.
pub trait WireEncode {
    /// Encoded size in bytes.
    const WIRE_SIZE: usize;

    /// Appends the little-endian raw components to `buf`.
    fn encode<B: BufMut>(&self, buf: &mut B);
}

/// Inverse of [`WireEncode`].
pub trait WireDecode: Sized {
    /// Reads one value from the front of `buf`, consuming exactly its wire
    /// size on success and nothing on failure.
    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError>;
}

/// Encodes a single value into a fresh buffer.
pub fn to_bytes<T: WireEncode>(value: &T) -> Bytes {
    let mut buf = BytesMut::with_capacity(T::WIRE_SIZE);
    value.encode(&mut buf);
    buf.freeze()
}

fn ensure_remaining<B: Buf>(buf: &B, needed: usize) -> Result<(), WireError> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(WireError::Truncated { needed, remaining });
    }
    Ok(())
}

fn decode_raws<B: Buf, const N: usize>(buf: &mut B) -> Result<[i64; N], WireError> {
    ensure_remaining(buf, N * RAW_BYTES)?;
    let mut raw = [0i64; N];
    for slot in &mut raw {
        *slot = buf.get_i64_le();
    }
    Ok(raw)
}

impl WireEncode for Fixed64 {
    const WIRE_SIZE: usize = RAW_BYTES;

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_i64_le(self.raw());
    }
}

impl WireDecode for Fixed64 {
    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
        let [raw] = decode_raws::<B, 1>(buf)?;
        Ok(Self::from_raw(raw))
    }
}

macro_rules! impl_wire_raw {
    ($($ty:ty => $n:literal),+ $(,)?) => {$(
        impl WireEncode for $ty {
            const WIRE_SIZE: usize = $n * RAW_BYTES;

            fn encode<B: BufMut>(&self, buf: &mut B) {
                for raw in self.to_raw() {
                    buf.put_i64_le(raw);
                }
            }
        }

        impl WireDecode for $ty {
            fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
                decode_raws::<B, $n>(buf).map(<$ty>::from_raw)
            }
        }
    )+};
}

impl_wire_raw! {
    Vector2 => 2,
    Vector3 => 3,
    Vector4 => 4,
    Quaternion => 4,
    Matrix3x3 => 9,
    Matrix4x4 => 16,
}

/// Incremental BLAKE3 digest over wire-encoded values.
///
/// Starts from [`STATE_DIGEST_V1`]; feeding the same values in the same order
/// yields the same digest on every platform.
#[derive(Debug, Clone)]
pub struct StateHasher {
    hasher: blake3::Hasher,
    scratch: BytesMut,
}

impl Default for StateHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHasher {
    /// Fresh hasher seeded with the domain prefix.
    pub fn new() -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(STATE_DIGEST_V1);
        Self {
            hasher,
            scratch: BytesMut::new(),
        }
    }

    /// Feeds one value.
    pub fn update<T: WireEncode>(&mut self, value: &T) -> &mut Self {
        self.scratch.clear();
        value.encode(&mut self.scratch);
        self.hasher.update(&self.scratch);
        self
    }

    /// Finishes the digest.
    pub fn finalize(&self) -> Digest {
        self.hasher.finalize().into()
    }
}

/// Digest of a sequence of values of one type.
pub fn state_digest<'a, T, I>(values: I) -> Digest
where
    T: WireEncode + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut hasher = StateHasher::new();
    for value in values {
        hasher.update(value);
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_bytes_are_little_endian_raw() {
        let bytes = to_bytes(&Fixed64::ONE);
        assert_eq!(&bytes[..], &(1i64 << 32).to_le_bytes());
    }

    #[test]
    fn truncated_decode_consumes_nothing() {
        let bytes = to_bytes(&Vector3::from_ints(1, 2, 3));
        let mut short = bytes.slice(..20);
        assert_eq!(
            Vector3::decode(&mut short),
            Err(WireError::Truncated {
                needed: 24,
                remaining: 20
            })
        );
        assert_eq!(short.remaining(), 20);
    }

    #[test]
    fn digest_is_domain_separated() {
        let v = Fixed64::PI;
        let plain: Digest = blake3::hash(&to_bytes(&v)).into();
        assert_ne!(state_digest([&v]), plain);
    }
}
