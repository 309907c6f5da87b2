// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

#[macro_use]
extern crate tracing;

mod cli;

use anyhow::Result;
use cli::Cli;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;

    // stdout carries the JSON report
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse_args();
    info!("Running {:?}", cli.command);

    let report = cli.run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
