// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release -p primeval-bench -- --hands 100000000 --tasks 4
// ...
// Total hands      100000000
// ```
use anyhow::Result;
use clap::Parser;
use log::error;

use primeval_bench::Config;

#[derive(Debug, Parser)]
struct Cli {
    /// The number of random hands to evaluate.
    #[clap(long, default_value_t = 10_000_000, value_parser = clap::value_parser!(u64).range(1..))]
    hands: u64,
    /// The number of parallel tasks sharing the evaluator.
    #[clap(long, short, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=256))]
    tasks: u16,
    /// The seed used to generate random hands.
    #[clap(long, short)]
    seed: Option<u64>,
    /// Evaluate all 133M 7 cards hands.
    #[clap(long)]
    all: bool,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = Config {
        hands: usize::try_from(cli.hands)?,
        tasks: cli.tasks as usize,
        seed: cli.seed,
        all: cli.all,
    };

    match primeval_bench::run(&config) {
        Ok(report) => {
            println!("{report}");
            Ok(())
        }
        Err(e) => {
            error!("{e}");
            Err(e)
        }
    }
}
