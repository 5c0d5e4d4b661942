// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixture generation, persistence and verification.

use anyhow::Result;
use lockstep_fixtures::cli::{run, Cli, Commands};
use lockstep_fixtures::config::FixtureConfig;
use lockstep_fixtures::fixtures::{generate, verify, FixtureBody, FixtureFile, FixtureKind};

fn small_config() -> FixtureConfig {
    FixtureConfig {
        prng_seeds: vec![1],
        prng_seed_array: None,
        prng_draws: 5,
        trig_samples: 16,
        arith_samples: 16,
        arith_seed: 7,
    }
}

#[test]
fn prng_fixture_records_reference_words() -> Result<()> {
    let file = generate(FixtureKind::Prng, &small_config());
    let FixtureBody::Prng(seqs) = &file.body else {
        anyhow::bail!("expected a prng body");
    };
    assert_eq!(seqs.len(), 1);
    assert_eq!(
        seqs[0].words,
        vec![1_791_095_845, 4_282_876_139, 3_093_770_124, 4_005_303_368, 491_263]
    );
    assert_eq!(file.digest_hex.len(), 64);
    Ok(())
}

#[test]
fn generation_is_reproducible() {
    for kind in [FixtureKind::Prng, FixtureKind::Trig, FixtureKind::Arith] {
        assert_eq!(generate(kind, &small_config()), generate(kind, &small_config()));
    }
}

#[test]
fn trig_fixture_starts_at_minus_two_pi() -> Result<()> {
    let file = generate(FixtureKind::Trig, &small_config());
    let FixtureBody::Trig(samples) = &file.body else {
        anyhow::bail!("expected a trig body");
    };
    assert_eq!(samples.len(), 16);
    assert_eq!(samples[0].angle, -26_986_075_409);
    Ok(())
}

#[test]
fn written_fixture_verifies_and_tampering_is_caught() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("arith.json");

    let file = generate(FixtureKind::Arith, &small_config());
    file.write_to(std::fs::File::create(&path)?)?;

    let loaded = FixtureFile::load(&path)?;
    assert_eq!(loaded, file);
    verify(&loaded)?;

    let mut tampered = loaded.clone();
    if let FixtureBody::Arith(samples) = &mut tampered.body {
        samples[3].mul += 1;
    }
    let err = verify(&tampered).err().map(|e| e.to_string()).unwrap_or_default();
    assert!(err.contains("sample 3 mismatch"), "{err}");

    let mut bad_digest = loaded;
    bad_digest.digest_hex = "00".repeat(32);
    assert!(verify(&bad_digest).is_err());
    Ok(())
}

#[test]
fn cli_writes_then_verifies() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("prng.json");
    run(Cli {
        config: None,
        command: Commands::Prng {
            seeds: vec![5489],
            draws: Some(3),
            out: Some(out.clone()),
        },
    })?;
    let written = FixtureFile::load(&out)?;
    assert_eq!(written.config.prng_seeds, vec![5489]);
    assert_eq!(written.config.prng_draws, 3);
    run(Cli {
        config: None,
        command: Commands::Verify { file: out },
    })
}

#[test]
fn config_fields_default_individually() -> Result<()> {
    let config: FixtureConfig = serde_json::from_str(r#"{ "trig_samples": 8 }"#)?;
    assert_eq!(config.trig_samples, 8);
    assert_eq!(config.prng_draws, FixtureConfig::default().prng_draws);
    assert!(serde_json::from_str::<FixtureConfig>(r#"{ "bogus": 1 }"#).is_err());

    let empty = FixtureConfig {
        prng_draws: 0,
        ..FixtureConfig::default()
    };
    assert!(empty.validate().is_err());
    Ok(())
}
