// Copyright 2022-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{collections::BTreeMap, fs::File, path::PathBuf};

use atomic_chess::{
    selfplay::{self, SelfPlayOptions},
    tracing::game::GameLogLayer,
};
use structopt::StructOpt;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Plays games of uniformly random moves against itself and reports how they ended.
#[derive(Debug, StructOpt)]
struct Options {
    /// Seed for the first game. Game N is played with seed + N.
    #[structopt(short, long, default_value = "0")]
    seed: u64,
    /// Number of games to play.
    #[structopt(short, long, default_value = "1")]
    games: u64,
    /// Number of plies after which an unfinished game is abandoned.
    #[structopt(short, long)]
    max_plies: Option<u32>,
    /// File to write a game event log to.
    #[structopt(long)]
    game_log: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Options::from_args();
    let log_layer = match args.game_log {
        Some(ref path) => Some(GameLogLayer::new(File::create(path)?)),
        None => None,
    };
    tracing_subscriber::registry()
        .with(log_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_env("ATOMIC_LOG")),
        )
        .init();

    let mut options = SelfPlayOptions::default();
    if let Some(max_plies) = args.max_plies {
        options.max_plies = max_plies;
    }

    let mut tally = BTreeMap::new();
    for n in 0..args.games {
        options.seed = args.seed.wrapping_add(n);
        let result = selfplay::play(&options);
        println!(
            "{:<8} {:<12} {:>4} plies  {}",
            options.seed,
            result.outcome.to_string(),
            result.moves.len(),
            result.final_fen
        );
        *tally.entry(result.outcome.to_string()).or_insert(0u64) += 1;
    }

    println!("===========================");
    for (outcome, count) in tally {
        println!("{:<15} {}", format!("{}:", outcome), count);
    }
    Ok(())
}
