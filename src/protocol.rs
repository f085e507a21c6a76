// Copyright 2021-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented text protocol for playing a game of atomic chess.
//!
//! Each line is one command:
//!
//! ```text
//! new                        start over from the starting position
//! position startpos          same as `new`
//! position fen <fen>         load a position
//! move <from> <to>           play a move, e.g. `move e2 e4`
//! move <from><to>            same, e.g. `move e2e4`
//! board                      print the board
//! state                      print the game state
//! fen                        print the position as FEN
//! moves                      list the legal moves
//! quit                       stop reading commands
//! ```

use std::io::{self, BufRead, Write};

use anyhow::anyhow;

use crate::{core::Move, game::Game};

/// Runs the command loop over stdin and stdout until `quit` or end of input.
pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(stdin.lock(), stdout.lock())
}

/// Runs the command loop over arbitrary input and output.
pub fn run_with<R: BufRead, W: Write>(input: R, mut out: W) -> io::Result<()> {
    let mut game = Game::new();
    for maybe_line in input.lines() {
        let line = maybe_line?;
        let components: Vec<_> = line.split_whitespace().collect();
        let (&command, arguments) = components.split_first().unwrap_or((&"", &[]));
        match (command, arguments) {
            ("", []) => {}
            ("quit", []) => break,
            ("new", []) => game = Game::new(),
            ("position", args) => handle_position(&mut out, &mut game, args)?,
            ("move", args) => handle_move(&mut out, &mut game, args)?,
            ("board", []) => write!(out, "{:#}", game.board())?,
            ("state", []) => writeln!(out, "{}", game.game_state())?,
            ("fen", []) => writeln!(out, "{}", game.as_fen())?,
            ("moves", []) => handle_moves(&mut out, &game)?,
            _ => writeln!(out, "unrecognized command: {} {:?}", command, arguments)?,
        }
        out.flush()?;
    }

    Ok(())
}

fn handle_position<W: Write>(out: &mut W, game: &mut Game, args: &[&str]) -> io::Result<()> {
    let result = parse_position(args);
    match result {
        Ok(position) => *game = position,
        Err(e) => writeln!(out, "invalid position command: {}", e)?,
    }

    Ok(())
}

fn parse_position(args: &[&str]) -> anyhow::Result<Game> {
    match args.split_first() {
        Some((&"startpos", [])) => Ok(Game::new()),
        Some((&"fen", fen)) if !fen.is_empty() => Ok(Game::from_fen(fen.join(" "))?),
        Some((&"fen", _)) => Err(anyhow!("FEN string expected")),
        Some((tok, _)) => Err(anyhow!("unknown token: {}", tok)),
        None => Err(anyhow!("expected `startpos` or `fen`")),
    }
}

fn handle_move<W: Write>(out: &mut W, game: &mut Game, args: &[&str]) -> io::Result<()> {
    let result = match args {
        [start, end] => game.try_make_move(start, end).map_err(anyhow::Error::from),
        [pair] => pair
            .parse::<Move>()
            .map_err(anyhow::Error::from)
            .and_then(|mov| game.apply_move(mov).map_err(anyhow::Error::from)),
        _ => Err(anyhow!("expected `move <from> <to>`")),
    };

    match result {
        Ok(report) => {
            write!(out, "ok {}", report.mov)?;
            if let Some(explosion) = &report.explosion {
                write!(out, " explosion {}", explosion.center)?;
            }
            if report.outcome.is_over() {
                write!(out, " {}", report.outcome)?;
            }
            writeln!(out)
        }
        Err(e) => writeln!(out, "rejected: {}", e),
    }
}

fn handle_moves<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    let moves: Vec<_> = game.legal_moves().into_iter().map(Move::as_uci).collect();
    writeln!(out, "{}", moves.join(" "))
}
