// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::Cli;

fn main() {
    // Library logs go through `log`; the subscriber picks them up and
    // writes to stderr so stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli::run(&cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(cli::exit_code(&err));
    }
}
