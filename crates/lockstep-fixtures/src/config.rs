// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixture generation parameters.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Parameters shared by every fixture kind.
///
/// Loaded from JSON; every field is optional and falls back to
/// [`FixtureConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureConfig {
    /// Seeds for the PRNG fixture, one sequence per seed.
    pub prng_seeds: Vec<u32>,
    /// Optional seed array; adds one more sequence seeded by array.
    pub prng_seed_array: Option<Vec<u32>>,
    /// Draws recorded per PRNG sequence.
    pub prng_draws: usize,
    /// Evenly spaced angles sampled over `[-2π, 2π)` by the trig fixture.
    pub trig_samples: usize,
    /// Operand pairs recorded by the arithmetic fixture.
    pub arith_samples: usize,
    /// Seed used to draw arithmetic operands.
    pub arith_seed: u32,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            prng_seeds: vec![1, 5489],
            prng_seed_array: Some(vec![0x123, 0x234, 0x345, 0x456]),
            prng_draws: 16,
            trig_samples: 64,
            arith_samples: 64,
            arith_seed: 42,
        }
    }
}

impl FixtureConfig {
    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that would produce empty fixtures.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.prng_seeds.is_empty() || self.prng_seed_array.is_some(),
            "config must name at least one PRNG seed"
        );
        ensure!(self.prng_draws > 0, "prng_draws must be positive");
        ensure!(self.trig_samples > 0, "trig_samples must be positive");
        ensure!(self.arith_samples > 0, "arith_samples must be positive");
        Ok(())
    }
}
