// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Golden fixtures for lockstep-math.
//!
//! Generates JSON fixture files built only from raw Q31.32 integers and PRNG
//! words, and verifies a fixture file by regenerating it from the
//! configuration it embeds. A port of the math core is bit-compatible when it
//! reproduces every fixture exactly.

pub mod cli;
pub mod config;
pub mod fixtures;
