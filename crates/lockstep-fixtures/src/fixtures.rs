// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixture generation and verification.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use lockstep_math::wire::StateHasher;
use lockstep_math::{DeterministicRandom, Fixed64};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::FixtureConfig;

/// Format tag written into every fixture file.
pub const FORMAT_V1: &str = "lockstep-fixtures/v1";

/// Which fixture set to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureKind {
    /// PRNG word and fixed-point draw sequences.
    Prng,
    /// sin/cos/tan/atan/asin/sqrt over a sweep of angles.
    Trig,
    /// Scalar arithmetic on PRNG-drawn operand pairs.
    Arith,
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prng => "prng",
            Self::Trig => "trig",
            Self::Arith => "arith",
        })
    }
}

/// One recorded PRNG sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrngSequence {
    /// Single seed, when seeded by integer.
    pub seed: Option<u32>,
    /// Seed array, when seeded by array.
    pub seed_array: Option<Vec<u32>>,
    /// Raw tempered words.
    pub words: Vec<u32>,
    /// Raw `next_fixed` values drawn after `words` from the same generator.
    pub fixed_raw: Vec<i64>,
}

/// Trig results for one angle, all raw Q31.32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrigSample {
    /// Input angle.
    pub angle: i64,
    /// `sin(angle)`.
    pub sin: i64,
    /// `cos(angle)`.
    pub cos: i64,
    /// `tan(angle)`.
    pub tan: i64,
    /// `atan(angle)`.
    pub atan: i64,
    /// `asin(sin(angle))`.
    pub asin_of_sin: i64,
    /// `sqrt(|angle|)`.
    pub sqrt_abs: i64,
}

/// Arithmetic results for one operand pair, all raw Q31.32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithSample {
    /// Left operand.
    pub a: i64,
    /// Right operand.
    pub b: i64,
    /// Wrapping `a + b`.
    pub add: i64,
    /// Wrapping `a - b`.
    pub sub: i64,
    /// Wrapping `a * b`.
    pub mul: i64,
    /// `a / b`.
    pub div: i64,
    /// `a % b`.
    pub rem: i64,
    /// Saturating `a + b`.
    pub saturating_add: i64,
    /// Saturating `a * b`.
    pub saturating_mul: i64,
}

/// Fixture payload, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureBody {
    /// See [`FixtureKind::Prng`].
    Prng(Vec<PrngSequence>),
    /// See [`FixtureKind::Trig`].
    Trig(Vec<TrigSample>),
    /// See [`FixtureKind::Arith`].
    Arith(Vec<ArithSample>),
}

impl FixtureBody {
    /// Kind of this payload.
    pub const fn kind(&self) -> FixtureKind {
        match self {
            Self::Prng(_) => FixtureKind::Prng,
            Self::Trig(_) => FixtureKind::Trig,
            Self::Arith(_) => FixtureKind::Arith,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Prng(v) => v.len(),
            Self::Trig(v) => v.len(),
            Self::Arith(v) => v.len(),
        }
    }
}

/// A complete fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureFile {
    /// Always [`FORMAT_V1`].
    pub format: String,
    /// Parameters the body was generated from.
    pub config: FixtureConfig,
    /// Hex BLAKE3 state digest over every raw value in the body.
    pub digest_hex: String,
    /// Recorded values.
    pub body: FixtureBody,
}

impl FixtureFile {
    /// Reads a fixture file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open fixture {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse fixture {}", path.display()))
    }

    /// Writes pretty JSON followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self).context("failed to encode fixture")?;
        writeln!(writer).context("failed to write fixture")?;
        Ok(())
    }
}

/// Generates one fixture set.
pub fn generate(kind: FixtureKind, config: &FixtureConfig) -> FixtureFile {
    let body = match kind {
        FixtureKind::Prng => FixtureBody::Prng(prng_sequences(config)),
        FixtureKind::Trig => FixtureBody::Trig(trig_samples(config.trig_samples)),
        FixtureKind::Arith => {
            FixtureBody::Arith(arith_samples(config.arith_seed, config.arith_samples))
        }
    };
    let digest_hex = hex::encode(digest(&body));
    info!(kind = %kind, samples = body.len(), digest = %digest_hex, "fixture generated");
    FixtureFile {
        format: FORMAT_V1.to_owned(),
        config: config.clone(),
        digest_hex,
        body,
    }
}

/// Regenerates `file` from its embedded config and reports the first
/// difference.
pub fn verify(file: &FixtureFile) -> Result<()> {
    ensure!(
        file.format == FORMAT_V1,
        "unsupported fixture format {:?}",
        file.format
    );
    let kind = file.body.kind();
    let fresh = generate(kind, &file.config);

    match (&file.body, &fresh.body) {
        (FixtureBody::Prng(want), FixtureBody::Prng(got)) => first_mismatch(kind, want, got)?,
        (FixtureBody::Trig(want), FixtureBody::Trig(got)) => first_mismatch(kind, want, got)?,
        (FixtureBody::Arith(want), FixtureBody::Arith(got)) => first_mismatch(kind, want, got)?,
        _ => bail!("regenerated fixture kind differs from {kind}"),
    }
    ensure!(
        file.digest_hex == fresh.digest_hex,
        "{kind} digest mismatch: recorded {}, regenerated {}",
        file.digest_hex,
        fresh.digest_hex
    );
    info!(kind = %kind, samples = file.body.len(), "fixture verified");
    Ok(())
}

fn first_mismatch<T: PartialEq + fmt::Debug>(
    kind: FixtureKind,
    want: &[T],
    got: &[T],
) -> Result<()> {
    ensure!(
        want.len() == got.len(),
        "{kind} sample count mismatch: recorded {}, regenerated {}",
        want.len(),
        got.len()
    );
    if let Some((i, (w, g))) = want.iter().zip(got).enumerate().find(|(_, (w, g))| w != g) {
        bail!("{kind} sample {i} mismatch.\nRecorded:    {w:?}\nRegenerated: {g:?}");
    }
    Ok(())
}

fn draw_sequence(mut rng: DeterministicRandom, draws: usize) -> (Vec<u32>, Vec<i64>) {
    let words = (0..draws).map(|_| rng.next_u32()).collect();
    let fixed_raw = (0..draws).map(|_| rng.next_fixed().raw()).collect();
    (words, fixed_raw)
}

fn prng_sequences(config: &FixtureConfig) -> Vec<PrngSequence> {
    let mut out: Vec<PrngSequence> = config
        .prng_seeds
        .iter()
        .map(|&seed| {
            let (words, fixed_raw) =
                draw_sequence(DeterministicRandom::from_seed(seed), config.prng_draws);
            PrngSequence {
                seed: Some(seed),
                seed_array: None,
                words,
                fixed_raw,
            }
        })
        .collect();
    if let Some(key) = &config.prng_seed_array {
        let (words, fixed_raw) =
            draw_sequence(DeterministicRandom::from_seed_array(key), config.prng_draws);
        out.push(PrngSequence {
            seed: None,
            seed_array: Some(key.clone()),
            words,
            fixed_raw,
        });
    }
    out
}

fn count(n: usize) -> Fixed64 {
    Fixed64::from_i64(i64::try_from(n).unwrap_or(i64::MAX))
}

fn trig_samples(samples: usize) -> Vec<TrigSample> {
    let start = -Fixed64::PI_TIMES_2;
    let step = (Fixed64::PI_TIMES_2 + Fixed64::PI_TIMES_2) / count(samples);
    (0..samples)
        .map(|i| {
            let angle = start + step * count(i);
            let sin = angle.sin();
            TrigSample {
                angle: angle.raw(),
                sin: sin.raw(),
                cos: angle.cos().raw(),
                tan: angle.tan().raw(),
                atan: angle.atan().raw(),
                asin_of_sin: sin.asin().raw(),
                sqrt_abs: angle.abs().sqrt().raw(),
            }
        })
        .collect()
}

/// Operand with about 16 integer bits, so products exercise both the exact
/// and the saturating paths.
fn operand(rng: &mut DeterministicRandom) -> Fixed64 {
    let hi = u64::from(rng.next_u32());
    let lo = u64::from(rng.next_u32());
    Fixed64::from_raw(((hi << 32) | lo) as i64 >> 16)
}

fn arith_samples(seed: u32, samples: usize) -> Vec<ArithSample> {
    let mut rng = DeterministicRandom::from_seed(seed);
    (0..samples)
        .map(|_| {
            let a = operand(&mut rng);
            let b = operand(&mut rng);
            ArithSample {
                a: a.raw(),
                b: b.raw(),
                add: (a + b).raw(),
                sub: (a - b).raw(),
                mul: (a * b).raw(),
                div: (a / b).raw(),
                rem: (a % b).raw(),
                saturating_add: a.saturating_add(b).raw(),
                saturating_mul: a.saturating_mul(b).raw(),
            }
        })
        .collect()
}

/// State digest over the body's raw integers in declaration order. PRNG
/// words widen losslessly into raw `i64` slots.
fn digest(body: &FixtureBody) -> [u8; 32] {
    let mut hasher = StateHasher::new();
    let mut raw = |r: i64| {
        hasher.update(&Fixed64::from_raw(r));
    };
    match body {
        FixtureBody::Prng(seqs) => {
            for seq in seqs {
                seq.words.iter().for_each(|&w| raw(i64::from(w)));
                seq.fixed_raw.iter().for_each(|&r| raw(r));
            }
        }
        FixtureBody::Trig(samples) => {
            for s in samples {
                for r in [s.angle, s.sin, s.cos, s.tan, s.atan, s.asin_of_sin, s.sqrt_abs] {
                    raw(r);
                }
            }
        }
        FixtureBody::Arith(samples) => {
            for s in samples {
                for r in [
                    s.a,
                    s.b,
                    s.add,
                    s.sub,
                    s.mul,
                    s.div,
                    s.rem,
                    s.saturating_add,
                    s.saturating_mul,
                ] {
                    raw(r);
                }
            }
        }
    }
    hasher.finalize()
}
