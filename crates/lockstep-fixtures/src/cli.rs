// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface of the fixture tool.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::FixtureConfig;
use crate::fixtures::{generate, verify, FixtureFile, FixtureKind};

/// Parsed command line.
#[derive(Parser)]
#[command(name = "lockstep-fixtures")]
#[command(about = "Golden fixture generator for lockstep-math")]
pub struct Cli {
    /// JSON config file; flags below override its fields
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Fixture tool subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Record PRNG word and fixed-point sequences
    Prng {
        /// Seed to record (repeatable; replaces the config's seeds)
        #[arg(long = "seed")]
        seeds: Vec<u32>,
        /// Draws per sequence
        #[arg(long)]
        draws: Option<usize>,
        /// Output path (stdout when absent)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Record trig results over an angle sweep
    Trig {
        /// Number of angles in [-2π, 2π)
        #[arg(long)]
        samples: Option<usize>,
        /// Output path (stdout when absent)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Record scalar arithmetic on random operand pairs
    Arith {
        /// Operand seed
        #[arg(long)]
        seed: Option<u32>,
        /// Number of operand pairs
        #[arg(long)]
        samples: Option<usize>,
        /// Output path (stdout when absent)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Regenerate a fixture file and compare
    Verify {
        /// Fixture file to check
        file: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<FixtureConfig> {
    path.map_or_else(|| Ok(FixtureConfig::default()), FixtureConfig::load)
}

fn emit(file: &FixtureFile, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            file.write_to(BufWriter::new(f))
        }
        None => file.write_to(std::io::stdout().lock()),
    }
}

/// Runs one parsed command.
pub fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    let (kind, out) = match cli.command {
        Commands::Prng { seeds, draws, out } => {
            if !seeds.is_empty() {
                config.prng_seeds = seeds;
            }
            if let Some(draws) = draws {
                config.prng_draws = draws;
            }
            (FixtureKind::Prng, out)
        }
        Commands::Trig { samples, out } => {
            if let Some(samples) = samples {
                config.trig_samples = samples;
            }
            (FixtureKind::Trig, out)
        }
        Commands::Arith { seed, samples, out } => {
            if let Some(seed) = seed {
                config.arith_seed = seed;
            }
            if let Some(samples) = samples {
                config.arith_samples = samples;
            }
            (FixtureKind::Arith, out)
        }
        Commands::Verify { file } => {
            let fixture = FixtureFile::load(&file)?;
            return verify(&fixture).with_context(|| format!("{} failed", file.display()));
        }
    };
    config.validate()?;
    emit(&generate(kind, &config), out.as_deref())
}

/// Binary entry point: installs logging on stderr and runs the CLI.
pub fn entrypoint() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();
    run(Cli::parse())
}
