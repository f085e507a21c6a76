// Copyright 2022-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use atomic_chess::{
    tracing::game::{GameEventKind, GameLogEvent},
    Game,
};
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Analyzer for game logs, as produced by atomic-selfplay.
#[derive(Debug, StructOpt)]
struct Options {
    /// A game log to analyze, as output by atomic-selfplay.
    #[structopt(name = "GAME_LOG")]
    game_log: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::INFO)
        .with_env_filter(EnvFilter::from_env("ATOMIC_LOG"))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Options::from_args();
    let file = File::open(&args.game_log)?;
    let reader = BufReader::new(file);
    let mut events = vec![];
    for line in reader.lines() {
        let line = line?;
        let event: GameLogEvent = serde_json::from_str(&line)?;
        events.push(event);
    }

    let games = GameSummaryBuilder::default().from_events(events);
    for (i, game) in games.iter().enumerate() {
        println!("== Game {} =======================", i + 1);
        println!("{:<20} {}", "Moves:", game.moves);
        println!("{:<20} {}", "Captures:", game.captures);
        println!("{:<20} {}", "Explosions:", game.explosions);
        println!("{:<20} {}", "Pieces Destroyed:", game.pieces_destroyed);
        match &game.result {
            Some((outcome, fen)) => {
                println!("{:<20} {}", "Result:", outcome);
                // Logs are written by this crate, so the final position always loads.
                if let Ok(final_position) = Game::from_fen(fen) {
                    print!("{:#}", final_position.board());
                }
            }
            None => println!("{:<20} UNFINISHED", "Result:"),
        }
    }
    Ok(())
}

#[derive(Default)]
struct GameSummary {
    moves: u32,
    captures: u32,
    explosions: u32,
    pieces_destroyed: u32,
    result: Option<(String, String)>,
}

#[derive(Default)]
struct GameSummaryBuilder {
    finished: Vec<GameSummary>,
    current: Option<GameSummary>,
}

impl GameSummaryBuilder {
    fn from_events(mut self, events: Vec<GameLogEvent>) -> Vec<GameSummary> {
        for event in events {
            if let GameEventKind::GameStart(_) = event.kind {
                self.finished.extend(self.current.take());
                self.current = Some(GameSummary::default());
                continue;
            }

            let game = self.current.get_or_insert_with(Default::default);
            match event.kind {
                GameEventKind::GameStart(_) => {}
                GameEventKind::Move(mov) => {
                    game.moves += 1;
                    if mov.captured {
                        game.captures += 1;
                    }
                }
                GameEventKind::Explosion(explosion) => {
                    game.explosions += 1;
                    game.pieces_destroyed += explosion.destroyed.split_whitespace().count() as u32;
                }
                GameEventKind::GameOver(over) => {
                    game.result = Some((over.outcome, over.fen));
                    if let Some(done) = self.current.take() {
                        self.finished.push(done);
                    }
                }
            }
        }

        // Games cut short by the ply cap end without a result.
        self.finished.extend(self.current.take());
        self.finished
    }
}
