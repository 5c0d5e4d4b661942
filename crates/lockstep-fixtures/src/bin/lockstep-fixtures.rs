// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CLI entry point for the fixture tool.

use anyhow::Result;
use lockstep_fixtures::cli::entrypoint;

fn main() -> Result<()> {
    entrypoint()
}
