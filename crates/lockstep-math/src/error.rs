// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

use crate::fixed64::Fixed64;

/// Domain fault raised by a transcendental function.
///
/// Saturation (overflow, division by zero) is never reported here; those
/// conditions resolve to sentinel values instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// `sqrt` received a negative argument.
    #[error("square root of negative value {0}")]
    NegativeSqrt(Fixed64),
    /// An inverse trig function received an argument outside `[-1, 1]`.
    #[error("{function} argument {value} is outside [-1, 1]")]
    OutOfDomain {
        /// Name of the rejecting function.
        function: &'static str,
        /// The offending argument.
        value: Fixed64,
    },
    /// `log2`/`ln` received zero or a negative argument.
    #[error("logarithm of non-positive value {0}")]
    NonPositiveLog(Fixed64),
    /// `pow(0, e)` with a negative exponent.
    #[error("zero raised to negative power {0}")]
    ZeroToNegativePower(Fixed64),
}

/// Failure while parsing a decimal literal into a [`Fixed64`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFixedError {
    /// The input was empty (or only a sign).
    #[error("empty fixed-point literal")]
    Empty,
    /// A character other than a digit, sign or single decimal point.
    #[error("invalid character {found:?} at byte {index}")]
    InvalidDigit {
        /// Byte offset of the bad character.
        index: usize,
        /// The character found.
        found: char,
    },
    /// The integer part does not fit in 31 bits plus sign.
    #[error("fixed-point literal out of range")]
    OutOfRange,
}

/// Failure while decoding raw values from a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WireError {
    /// The buffer ended before a complete value was read.
    #[error("truncated wire value: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes required for the value.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },
}
