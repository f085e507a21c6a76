// Copyright 2021-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use structopt::StructOpt;

use atomic_chess::Game;

/// Lists the legal moves in a position.
#[derive(Debug, StructOpt)]
struct Options {
    /// FEN representation of the position to analyze, e.g. "4k3/8/8/8/8/8/8/4K3 w".
    #[structopt(name = "FEN")]
    fen: String,
}

fn main() -> anyhow::Result<()> {
    let ops = Options::from_args();
    let game = Game::from_fen(&ops.fen)?;
    if game.is_over() {
        println!("game over: {}", game.game_state());
        return Ok(());
    }

    for mov in game.legal_moves() {
        println!("{}", mov.as_uci());
    }
    Ok(())
}
